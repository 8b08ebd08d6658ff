//! Read-only presentation snapshot.
//!
//! The window/status model is mutated only by dispatcher handlers; the
//! presentation layer receives an owned copy after every externally visible
//! change and must never reach back into the live model.

use bridge_core::{StatusBoard, Window, WindowId, WindowKind};

use crate::config::PlayerIndices;
use crate::prompt::Prompt;

/// One live window and its identity.
#[derive(Clone, Debug, serde::Serialize)]
pub struct WindowSnapshot {
    pub id: WindowId,
    pub kind: WindowKind,
    pub window: Window,
}

/// Everything the presentation layer needs to draw one frame.
#[derive(Clone, Debug, Default, serde::Serialize)]
pub struct Snapshot {
    /// True once the engine has initialized its window system.
    pub ready: bool,
    /// Live windows in id (creation) order.
    pub windows: Vec<WindowSnapshot>,
    pub status: StatusBoard,
    /// Active interactive prompt, if a consumer is suspended on input.
    pub prompt: Option<Prompt>,
    /// The designated map window, once displayed.
    pub map_window: Option<WindowId>,
    /// The designated message window, once displayed.
    pub message_window: Option<WindowId>,
    /// Resolved pre-made character, when the configuration supplied one.
    pub player: Option<PlayerIndices>,
}

impl Snapshot {
    pub fn window(&self, id: WindowId) -> Option<&Window> {
        self.windows
            .iter()
            .find(|snapshot| snapshot.id == id)
            .map(|snapshot| &snapshot.window)
    }
}
