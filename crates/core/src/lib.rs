//! Data model for the engine-interface bridge.
//!
//! Everything in this crate is synchronous and free of I/O: the binary
//! struct decoder over an abstract engine memory, the window state machines,
//! the status board, and the extended-command resolver. The async plumbing
//! (call dispatch, input brokering) lives in `bridge-session` and drives
//! these types.
//!
//! Modules are organized by responsibility:
//! - [`memory`] abstracts the engine's linear memory
//! - [`decode`] reads the fixed-layout engine records out of it
//! - [`display`] holds colors, text attributes, and glyph data
//! - [`window`] hosts the per-variant window state machines
//! - [`status`] tracks the status field table and active conditions
//! - [`command`] resolves extended-command prefixes
//! - [`input`] models end-user input events and key mapping
pub mod bitmask;
pub mod command;
pub mod decode;
pub mod display;
pub mod input;
pub mod memory;
pub mod status;
pub mod window;

pub use bitmask::{decode_bitmask, lookup_mask};
pub use command::{CommandList, ExtCommand};
pub use decode::{
    Alignment, ConditionRecord, Gender, MaskTables, Race, Role, read_alignments, read_commands,
    read_conditions, read_genders, read_glyph_info, read_races, read_roles,
};
pub use display::{Color, CondAttr, GlyphFlags, GlyphInfo, HlAttr, StyledLine, TextAttr};
pub use input::{BACKSPACE, ENTER, ESC, InputEvent, Key, KeyInput};
pub use memory::{EngineMemory, VecMemory};
pub use status::{
    ActiveCondition, ConditionFlag, FieldValue, StatusBoard, StatusField, UnknownCondition,
    resolve_conditions,
};
pub use window::{
    MapCell, MapWindow, MenuEntry, MenuSelect, MenuSelection, MenuWindow, MessageWindow,
    SelectedItem, SelectionStep, TextWindow, Window, WindowId, WindowKind,
};
