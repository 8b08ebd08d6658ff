//! Window state machines.
//!
//! Windows are a closed set of four variants with distinct buffering and
//! selection semantics. The engine addresses them by integer id; ids are
//! assigned monotonically on creation and never reused while the window is
//! alive. Calling a variant-specific operation on the wrong variant is a
//! programming error and panics rather than being coerced.

use crate::display::{StyledLine, TextAttr};

pub mod map;
pub mod menu;
pub mod message;
pub mod text;

pub use map::{MapCell, MapWindow, MAP_COLS, MAP_ROWS};
pub use menu::{MenuEntry, MenuSelect, MenuSelection, MenuWindow, SelectedItem, SelectionStep};
pub use message::{MessageWindow, HISTORY_LINES};
pub use text::TextWindow;

/// Engine-visible window identifier.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub struct WindowId(pub u32);

impl std::fmt::Display for WindowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "win#{}", self.0)
    }
}

/// Window type codes as the engine numbers them. `Status` exists on the
/// wire but is never instantiated; the status board replaces it.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    serde::Serialize,
    serde::Deserialize,
    strum::Display,
    strum::FromRepr,
)]
#[strum(serialize_all = "snake_case")]
#[repr(i32)]
pub enum WindowKind {
    Message = 1,
    Status = 2,
    Map = 3,
    Menu = 4,
    Text = 5,
}

/// A live window: tagged variant over the four concrete state machines.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub enum Window {
    Message(MessageWindow),
    Map(MapWindow),
    Menu(MenuWindow),
    Text(TextWindow),
}

impl Window {
    pub fn kind(&self) -> WindowKind {
        match self {
            Window::Message(_) => WindowKind::Message,
            Window::Map(_) => WindowKind::Map,
            Window::Menu(_) => WindowKind::Menu,
            Window::Text(_) => WindowKind::Text,
        }
    }

    pub fn displayed(&self) -> bool {
        match self {
            Window::Message(win) => win.displayed,
            Window::Map(win) => win.displayed,
            Window::Menu(win) => win.displayed,
            Window::Text(win) => win.displayed,
        }
    }

    pub fn set_displayed(&mut self, displayed: bool) {
        match self {
            Window::Message(win) => win.displayed = displayed,
            Window::Map(win) => win.displayed = displayed,
            Window::Menu(win) => win.displayed = displayed,
            Window::Text(win) => win.displayed = displayed,
        }
    }

    pub fn blocking(&self) -> bool {
        match self {
            Window::Message(win) => win.blocking,
            Window::Map(win) => win.blocking,
            Window::Menu(win) => win.blocking,
            Window::Text(win) => win.blocking,
        }
    }

    pub fn set_blocking(&mut self, blocking: bool) {
        match self {
            Window::Message(win) => win.blocking = blocking,
            Window::Map(win) => win.blocking = blocking,
            Window::Menu(win) => win.blocking = blocking,
            Window::Text(win) => win.blocking = blocking,
        }
    }

    /// Type-specific clear: the message window archives, the map window
    /// resets its grid, menu and text windows drop their content.
    pub fn clear(&mut self) {
        match self {
            Window::Message(win) => win.clear(),
            Window::Map(win) => win.clear(),
            Window::Menu(win) => win.clear(),
            Window::Text(win) => win.clear(),
        }
    }

    /// Appends styled content; the map window interprets the text as cursor
    /// paint instructions.
    pub fn put_str(&mut self, text: &str, attr: TextAttr) {
        match self {
            Window::Message(win) => win.put_str(text, attr),
            Window::Map(win) => win.put_str(text, attr),
            Window::Menu(win) => win.lines.push(StyledLine::new(text, attr)),
            Window::Text(win) => win.lines.push(StyledLine::new(text, attr)),
        }
    }

    pub fn as_map_mut(&mut self) -> &mut MapWindow {
        match self {
            Window::Map(win) => win,
            other => panic!("expected a map window, found {}", other.kind()),
        }
    }

    pub fn as_menu_mut(&mut self) -> &mut MenuWindow {
        match self {
            Window::Menu(win) => win,
            other => panic!("expected a menu window, found {}", other.kind()),
        }
    }

    pub fn as_message_mut(&mut self) -> &mut MessageWindow {
        match self {
            Window::Message(win) => win,
            other => panic!("expected a message window, found {}", other.kind()),
        }
    }
}
