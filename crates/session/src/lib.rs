//! Async bridging layer between the game engine and a presentation layer.
//!
//! The engine issues named calls with positional arguments; [`GameSession`]
//! resolves them through a static operation catalog and executes them in
//! arrival order against the `bridge-core` data model. Interactive
//! operations suspend on the input broker until the presentation layer
//! submits an event, and every externally visible change is published as a
//! [`Snapshot`] over a `tokio::sync::watch` channel.
pub mod args;
pub mod broker;
pub mod config;
pub mod error;
pub mod ops;
pub mod oracle;
pub mod prompt;
pub mod session;
pub mod snapshot;

pub use args::{ArgReader, CallArg};
pub use broker::{InputBroker, InputHandle};
pub use config::{EnginePointers, PlayerIndices, PlayerSelection, SessionConfig};
pub use error::{BridgeError, Result};
pub use ops::{Op, WIRE_PREFIX};
pub use oracle::{FileOracle, NullFiles, StaticFiles};
pub use prompt::Prompt;
pub use session::{CallReply, GameSession};
pub use snapshot::{Snapshot, WindowSnapshot};
