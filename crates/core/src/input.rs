//! End-user input events and keyboard mapping.
//!
//! The presentation layer feeds raw keystrokes and taps into the bridge;
//! this module owns the mapping to the event alphabet the interactive
//! operations consume, so the rest of the bridge stays agnostic about
//! concrete key handling.

/// Escape, also the universal "abort" gesture for interactive consumers.
pub const ESC: char = '\x1b';
pub const ENTER: char = '\n';
pub const BACKSPACE: char = '\x08';

/// Position modifier for a plain tap/primary click.
pub const CLICK_PRIMARY: i32 = 1;
/// Position modifier for the alternate tap mode (travel/far look).
pub const CLICK_SECONDARY: i32 = 2;

/// One unit of serialized end-user input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum InputEvent {
    /// A single character, control characters included.
    Char(char),
    /// Line/command submission.
    Submit,
    /// A screen position with a mode-distinguishing modifier.
    Pos { x: i16, y: i16, modifier: i32 },
}

/// A raw keystroke as reported by the presentation layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Escape,
    Enter,
    Backspace,
    /// Anything else (arrows, function keys); produces no event.
    Other,
}

/// Keystroke plus modifier state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyInput {
    pub key: Key,
    pub ctrl: bool,
    pub alt: bool,
}

impl KeyInput {
    pub fn plain(key: Key) -> Self {
        Self {
            key,
            ctrl: false,
            alt: false,
        }
    }

    pub fn ctrl(ch: char) -> Self {
        Self {
            key: Key::Char(ch),
            ctrl: true,
            alt: false,
        }
    }

    pub fn alt(ch: char) -> Self {
        Self {
            key: Key::Char(ch),
            ctrl: false,
            alt: true,
        }
    }

    /// Maps the keystroke to an input event.
    ///
    /// Ctrl+letter becomes the control character 1..=26 (letter uppercased
    /// first), alt shifts the character code by 128 (the engine's meta
    /// convention), and the named keys map to their fixed control
    /// characters.
    pub fn to_event(self) -> Option<InputEvent> {
        match self.key {
            Key::Char(ch) => {
                if self.ctrl {
                    let upper = ch.to_ascii_uppercase();
                    upper
                        .is_ascii_uppercase()
                        .then(|| InputEvent::Char((upper as u8 - b'A' + 1) as char))
                } else if self.alt {
                    char::from_u32(ch as u32 + 128).map(InputEvent::Char)
                } else {
                    Some(InputEvent::Char(ch))
                }
            }
            Key::Escape => Some(InputEvent::Char(ESC)),
            Key::Enter => Some(InputEvent::Char(ENTER)),
            Key::Backspace => Some(InputEvent::Char(BACKSPACE)),
            Key::Other => None,
        }
    }
}
