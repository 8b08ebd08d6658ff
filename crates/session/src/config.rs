//! Session configuration: engine table roots and initial player options.
//!
//! Everything here is data the embedder learns while instantiating the
//! engine (table addresses, engine mask constants) or from its preference
//! store (run-control text, a saved character). Nothing in this layer
//! persists it.

use bridge_core::MaskTables;

use crate::error::Result;

/// Addresses of the engine's static tables, captured at engine startup.
#[derive(Clone, Copy, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct EnginePointers {
    pub roles: u32,
    pub races: u32,
    pub genders: u32,
    pub aligns: u32,
    pub conditions: u32,
    pub condition_count: u32,
    pub extcmdlist: u32,
}

/// A pre-made character choice; when present the engine's own chooser is
/// skipped.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PlayerSelection {
    pub name: String,
    pub role: String,
    pub race: String,
    pub gender: String,
    pub align: String,
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct SessionConfig {
    /// Run-control option text handed to the engine by the embedder.
    #[serde(default)]
    pub run_control: String,
    #[serde(default)]
    pub player: Option<PlayerSelection>,
    #[serde(default)]
    pub pointers: EnginePointers,
    #[serde(default)]
    pub masks: MaskTables,
}

impl SessionConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(crate::error::BridgeError::from)
    }
}

/// Indices of a resolved player selection within the decoded catalogs, as
/// the engine consumes them.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PlayerIndices {
    pub name: String,
    pub role: i32,
    pub race: i32,
    pub gender: i32,
    pub align: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_loads_from_json_with_defaults() {
        let config = SessionConfig::from_json(
            r#"{
                "run_control": "OPTIONS=color",
                "pointers": {
                    "roles": 1024, "races": 2048, "genders": 0, "aligns": 0,
                    "conditions": 4096, "condition_count": 30, "extcmdlist": 8192
                }
            }"#,
        )
        .unwrap();
        assert_eq!(config.run_control, "OPTIONS=color");
        assert_eq!(config.pointers.condition_count, 30);
        assert!(config.player.is_none());
        assert!(config.masks.races.is_empty());
    }
}
