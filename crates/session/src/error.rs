//! Unified error types surfaced by the bridge.
//!
//! All failures here are terminal for the bridging session: there is no
//! retry policy over a single trusted engine process. Variant-mismatch and
//! out-of-range memory access are programming errors and panic instead.

use bridge_core::UnknownCondition;

use crate::args::CallArg;

pub type Result<T> = std::result::Result<T, BridgeError>;

#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// The engine invoked a name outside the operation catalog.
    #[error("unknown method {name}({args:?})")]
    UnknownMethod { name: String, args: Vec<CallArg> },

    /// A reported condition bit has no row in the static condition table.
    #[error(transparent)]
    UnknownCondition(#[from] UnknownCondition),

    /// The engine asked for a window type the bridge never instantiates.
    #[error("unknown window type {0}")]
    UnknownWindowType(i32),

    /// An argument was missing or of the wrong shape for its operation.
    #[error("bad argument {index} for {op}: expected {expected}")]
    BadArgument {
        op: &'static str,
        index: usize,
        expected: &'static str,
    },

    /// The input side hung up while an interactive operation was suspended.
    #[error("input channel closed while awaiting user input")]
    InputClosed,

    /// The session configuration text did not parse.
    #[error("malformed session configuration")]
    Config(#[from] serde_json::Error),
}
