//! Glyph-info record decoding.

use crate::display::{Color, GlyphFlags, GlyphInfo};
use crate::memory::EngineMemory;

const GLYPH_TTY_CHAR_OFFSET: u32 = 4;
const GLYPH_FRAME_COLOR_OFFSET: u32 = 8;
const GLYPH_FLAGS_OFFSET: u32 = 12;
const GLYPH_SYMBOL_COLOR_OFFSET: u32 = 16;
const GLYPH_SYMBOL_INDEX_OFFSET: u32 = 20;
const GLYPH_CUSTOM_COLOR_OFFSET: u32 = 24;
const GLYPH_PALETTE_INDEX_OFFSET: u32 = 28;
const GLYPH_TILE_INDEX_OFFSET: u32 = 30;

pub fn read_glyph_info<M: EngineMemory + ?Sized>(mem: &M, addr: u32) -> GlyphInfo {
    GlyphInfo {
        glyph: mem.read_i32(addr),
        tty_char: char::from_u32(mem.read_i32(addr + GLYPH_TTY_CHAR_OFFSET) as u32)
            .unwrap_or(char::REPLACEMENT_CHARACTER),
        frame_color: mem.read_i32(addr + GLYPH_FRAME_COLOR_OFFSET),
        flags: GlyphFlags::from_bits_truncate(mem.read_i32(addr + GLYPH_FLAGS_OFFSET) as u32),
        symbol_color: Color::from_index(mem.read_i32(addr + GLYPH_SYMBOL_COLOR_OFFSET)),
        symbol_index: mem.read_i32(addr + GLYPH_SYMBOL_INDEX_OFFSET),
        custom_color: Color::from_index(mem.read_i32(addr + GLYPH_CUSTOM_COLOR_OFFSET)),
        palette_index: mem.read_i16(addr + GLYPH_PALETTE_INDEX_OFFSET),
        tile_index: mem.read_i16(addr + GLYPH_TILE_INDEX_OFFSET),
    }
}
