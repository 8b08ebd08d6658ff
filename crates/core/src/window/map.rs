//! Map window: the fixed glyph grid with a write cursor and a view center.

use crate::display::{GlyphInfo, TextAttr};

pub const MAP_ROWS: usize = 24;
pub const MAP_COLS: usize = 80;

/// One map cell: a plain styled character, or a decoded glyph pair
/// (foreground over background).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum MapCell {
    Char { ch: char, attr: TextAttr },
    Glyph { glyph: GlyphInfo, backglyph: GlyphInfo },
}

impl MapCell {
    pub const EMPTY: MapCell = MapCell::Char {
        ch: ' ',
        attr: TextAttr::None,
    };
}

impl Default for MapCell {
    fn default() -> Self {
        MapCell::EMPTY
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct MapWindow {
    pub displayed: bool,
    pub blocking: bool,
    /// Write position for character output; distinct from `center`.
    pub cursor: GridPos,
    /// Follow/scroll anchor requested by the engine.
    pub center: GridPos,
    cells: Vec<MapCell>,
}

impl MapWindow {
    pub fn new() -> Self {
        Self {
            displayed: false,
            blocking: false,
            cursor: GridPos::default(),
            center: GridPos::default(),
            cells: vec![MapCell::EMPTY; MAP_ROWS * MAP_COLS],
        }
    }

    /// Resets every cell and the displayed flag; cursor and center persist.
    pub fn clear(&mut self) {
        self.cells.fill(MapCell::EMPTY);
        self.displayed = false;
    }

    pub fn cell(&self, x: i32, y: i32) -> Option<&MapCell> {
        Self::index(x, y).map(|index| &self.cells[index])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[MapCell]> {
        self.cells.chunks(MAP_COLS)
    }

    /// Paints a decoded glyph pair. The first glyph paint is what marks the
    /// map displayed; the display call only handles the blocking handshake.
    pub fn print_glyph(&mut self, x: i32, y: i32, glyph: GlyphInfo, backglyph: GlyphInfo) {
        self.displayed = true;
        if let Some(index) = Self::index(x, y) {
            self.cells[index] = MapCell::Glyph { glyph, backglyph };
        }
    }

    pub fn set_cursor(&mut self, x: i32, y: i32) {
        self.cursor = GridPos { x, y };
    }

    /// Paints characters at the cursor, advancing one column per character;
    /// a newline moves to column 0 of the next row. Writes that land outside
    /// the grid are dropped (the engine writes a trailing newline on the
    /// last row).
    pub fn put_str(&mut self, text: &str, attr: TextAttr) {
        for ch in text.chars() {
            if ch == '\n' {
                self.cursor = GridPos {
                    x: 0,
                    y: self.cursor.y + 1,
                };
                continue;
            }
            if let Some(index) = Self::index(self.cursor.x, self.cursor.y) {
                self.cells[index] = MapCell::Char { ch, attr };
            }
            self.cursor.x += 1;
        }
    }

    pub fn set_center(&mut self, x: i32, y: i32) {
        self.center = GridPos { x, y };
    }

    fn index(x: i32, y: i32) -> Option<usize> {
        if (0..MAP_COLS as i32).contains(&x) && (0..MAP_ROWS as i32).contains(&y) {
            Some(y as usize * MAP_COLS + x as usize)
        } else {
            None
        }
    }
}

impl Default for MapWindow {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn char_at(win: &MapWindow, x: i32, y: i32) -> char {
        match win.cell(x, y).unwrap() {
            MapCell::Char { ch, .. } => *ch,
            MapCell::Glyph { .. } => panic!("expected a char cell"),
        }
    }

    #[test]
    fn put_str_advances_and_wraps_on_newline() {
        let mut win = MapWindow::new();
        win.put_str("ab\ncd", TextAttr::None);
        assert_eq!(char_at(&win, 0, 0), 'a');
        assert_eq!(char_at(&win, 1, 0), 'b');
        assert_eq!(char_at(&win, 0, 1), 'c');
        assert_eq!(char_at(&win, 1, 1), 'd');
        assert_eq!(win.cursor, GridPos { x: 2, y: 1 });
    }

    #[test]
    fn writes_resume_from_a_moved_cursor() {
        let mut win = MapWindow::new();
        win.set_cursor(78, 3);
        win.put_str("xyz", TextAttr::Bold);
        assert_eq!(char_at(&win, 78, 3), 'x');
        assert_eq!(char_at(&win, 79, 3), 'y');
        // 'z' fell off the row edge and was dropped.
        assert_eq!(win.cursor, GridPos { x: 81, y: 3 });
    }

    #[test]
    fn glyph_paint_marks_the_window_displayed() {
        let mut win = MapWindow::new();
        assert!(!win.displayed);
        let glyph = sample_glyph();
        win.print_glyph(10, 5, glyph, glyph);
        assert!(win.displayed);
        assert!(matches!(win.cell(10, 5), Some(MapCell::Glyph { .. })));
    }

    #[test]
    fn clear_resets_cells_and_displayed_flag() {
        let mut win = MapWindow::new();
        let glyph = sample_glyph();
        win.print_glyph(0, 0, glyph, glyph);
        win.clear();
        assert!(!win.displayed);
        assert_eq!(win.cell(0, 0), Some(&MapCell::EMPTY));
    }

    fn sample_glyph() -> GlyphInfo {
        GlyphInfo {
            glyph: 100,
            tty_char: '@',
            frame_color: 0,
            flags: crate::display::GlyphFlags::HERO,
            symbol_color: crate::display::Color::White,
            symbol_index: 1,
            custom_color: crate::display::Color::NoColor,
            palette_index: 0,
            tile_index: 0,
        }
    }
}
