//! Static operation catalog for the call dispatcher.
//!
//! Wire names are `"shim_" + snake_case` of the variant; the table is a
//! compile-time enum rather than name-based discovery, so an unknown name
//! can never reach a handler.

use std::str::FromStr;

/// Wire-name prefix every engine call carries.
pub const WIRE_PREFIX: &str = "shim_";

/// Every operation the engine may invoke, grouped as in its own window-port
/// documentation: low-level output, high-level prompts, window utilities,
/// status display, and miscellany.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum Op {
    // A. Low-level routines
    RawPrint,
    RawPrintBold,
    Curs,
    Putstr,
    Putmixed,
    GetNhEvent,
    Nhgetch,
    NhPoskey,

    // B. High-level routines
    PrintGlyph,
    YnFunction,
    Getlin,
    GetExtCmd,
    PlayerSelectionOrTty,
    DisplayFile,
    UpdateInventory,
    DoprevMessage,
    UpdatePositionbar,

    // C. Window utility routines
    InitNhwindows,
    ExitNhwindows,
    CreateNhwindow,
    ClearNhwindow,
    DisplayNhwindow,
    DestroyNhwindow,
    StartMenu,
    AddMenu,
    EndMenu,
    SelectMenu,
    MessageMenu,

    // D. Status display routines
    StatusInit,
    StatusEnablefield,
    StatusUpdate,
    StatusFinish,

    // E. Misc. routines
    Nhbell,
    MarkSynch,
    WaitSynch,
    DelayOutput,
    Askname,
    Cliparound,
    NumberPad,
    SuspendNhwindows,
    ResumeNhwindows,
    CanSuspend,
    StartScreen,
    EndScreen,
    Outrip,
    PreferenceUpdate,
    Getmsghistory,
    Putmsghistory,
}

impl Op {
    /// Resolves a raw wire name to its operation, or `None` for anything
    /// outside the catalog.
    pub fn from_wire(raw: &str) -> Option<Op> {
        let name = raw.strip_prefix(WIRE_PREFIX)?;
        Op::from_str(name).ok()
    }

    /// Static handler key used in diagnostics.
    pub fn key(self) -> &'static str {
        self.into()
    }
}
