//! Text window: an ordered list of styled lines, no selection semantics.

use crate::display::StyledLine;

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct TextWindow {
    pub displayed: bool,
    pub blocking: bool,
    pub lines: Vec<StyledLine>,
}

impl TextWindow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}
