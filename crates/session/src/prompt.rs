//! Prompt state exposed while an interactive operation is suspended.
//!
//! The presentation layer renders whichever prompt is active; the session
//! sets and clears it around the corresponding suspension points.

/// The active interactive prompt, if any.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Prompt {
    /// Waiting for a keystroke or a map position.
    PosKey,
    /// Single-keystroke question with an optional choice set.
    Yn {
        question: String,
        choices: String,
        default: Option<char>,
    },
    /// Extended-command entry; `entered` mirrors the edit buffer.
    ExtCmd { entered: String },
    /// Free-text line entry.
    Getlin { prompt: String, entered: String },
}
