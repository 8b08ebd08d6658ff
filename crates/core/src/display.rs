//! Colors, text attributes, and glyph data shared by windows and status.
//!
//! Discriminants mirror the engine's wire values; decoding goes through
//! `from_repr` so the dispatcher can translate raw integers directly.

use bitflags::bitflags;

/// The engine's 16-color palette. Value 8 is the "no color" slot.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
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
pub enum Color {
    Black = 0,
    Red = 1,
    Green = 2,
    Brown = 3,
    Blue = 4,
    Magenta = 5,
    Cyan = 6,
    Gray = 7,
    #[default]
    NoColor = 8,
    Orange = 9,
    BrightGreen = 10,
    Yellow = 11,
    BrightBlue = 12,
    BrightMagenta = 13,
    BrightCyan = 14,
    White = 15,
}

impl Color {
    /// Decodes a color index, falling back to [`Color::NoColor`] for values
    /// outside the palette (custom 256-color and RGB glyph colors exceed it).
    pub fn from_index(index: i32) -> Self {
        Self::from_repr(index).unwrap_or(Color::NoColor)
    }
}

/// Text attribute attached to window lines (`ATR_*`).
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
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
pub enum TextAttr {
    #[default]
    None = 0,
    Bold = 1,
    Dim = 2,
    Italic = 3,
    Underline = 4,
    Blink = 5,
    Inverse = 7,
}

/// Highlight attribute carried in the high byte of a status color word.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
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
pub enum HlAttr {
    Undef = -1,
    #[default]
    None = 0,
    Bold = 1,
    Dim = 2,
    Italic = 3,
    Underline = 4,
    Blink = 5,
    Inverse = 6,
}

impl HlAttr {
    /// Decodes the high byte of a status color word; unknown values map to
    /// [`HlAttr::Undef`].
    pub fn from_index(index: i32) -> Self {
        Self::from_repr(index).unwrap_or(HlAttr::Undef)
    }
}

/// Condition style attribute. Discriminants are the slot indices in the
/// engine's colormask array (slots 18..24, after the 16 color slots).
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
    strum::EnumIter,
    strum::FromRepr,
)]
#[strum(serialize_all = "snake_case")]
#[repr(i32)]
pub enum CondAttr {
    Bold = 18,
    Dim = 19,
    Italic = 20,
    Underline = 21,
    Blink = 22,
    Inverse = 23,
}

bitflags! {
    /// Per-glyph modifier flags (`MG_*`), reported as a bitmask in the
    /// glyph-info record.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
    pub struct GlyphFlags: u32 {
        const HERO     = 1 << 0;
        const CORPSE   = 1 << 1;
        const INVIS    = 1 << 2;
        const DETECT   = 1 << 3;
        const PET      = 1 << 4;
        const RIDDEN   = 1 << 5;
        const STATUE   = 1 << 6;
        const OBJPILE  = 1 << 7;
        const BW_LAVA  = 1 << 8;
        const BW_ICE   = 1 << 9;
        const BW_SINK  = 1 << 10;
        const BW_ENGR  = 1 << 11;
        const NOTHING  = 1 << 12;
        const UNEXPL   = 1 << 13;
        const MALE     = 1 << 14;
        const FEMALE   = 1 << 15;
    }
}

/// Decoded glyph-info record: the visual identity of one map cell as the
/// engine describes it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GlyphInfo {
    pub glyph: i32,
    pub tty_char: char,
    pub frame_color: i32,
    pub flags: GlyphFlags,
    pub symbol_color: Color,
    pub symbol_index: i32,
    pub custom_color: Color,
    pub palette_index: i16,
    pub tile_index: i16,
}

/// One styled line of window content.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StyledLine {
    pub text: String,
    pub attr: TextAttr,
}

impl StyledLine {
    pub fn new(text: impl Into<String>, attr: TextAttr) -> Self {
        Self {
            text: text.into(),
            attr,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_discriminants_match_wire_values() {
        assert_eq!(Color::from_repr(8), Some(Color::NoColor));
        assert_eq!(Color::from_repr(15), Some(Color::White));
        assert_eq!(Color::from_index(200), Color::NoColor);
    }

    #[test]
    fn text_attr_skips_wire_value_six() {
        assert_eq!(TextAttr::from_repr(7), Some(TextAttr::Inverse));
        assert_eq!(TextAttr::from_repr(6), None);
    }

    #[test]
    fn cond_attr_slots_start_after_color_slots() {
        assert_eq!(CondAttr::from_repr(18), Some(CondAttr::Bold));
        assert_eq!(CondAttr::from_repr(23), Some(CondAttr::Inverse));
        assert_eq!(CondAttr::from_repr(16), None);
    }
}
