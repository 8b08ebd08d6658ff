//! Message window: current lines plus a bounded history ring.

use std::collections::VecDeque;

use crate::display::{StyledLine, TextAttr};

/// History ring capacity; the oldest line falls off beyond this.
pub const HISTORY_LINES: usize = 50;

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct MessageWindow {
    pub displayed: bool,
    pub blocking: bool,
    /// Unacknowledged lines of the current turn.
    pub lines: Vec<StyledLine>,
    history: VecDeque<StyledLine>,
}

impl MessageWindow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Archives the current lines into history, trimming to capacity.
    pub fn clear(&mut self) {
        self.history.extend(self.lines.drain(..));
        while self.history.len() > HISTORY_LINES {
            self.history.pop_front();
        }
    }

    /// Appends a line. When the first line after a clear repeats the newest
    /// history line, that history line is dropped first so repeated engine
    /// messages do not double-print.
    pub fn put_str(&mut self, text: &str, attr: TextAttr) {
        if self.lines.is_empty() && self.history.back().is_some_and(|line| line.text == text) {
            self.history.pop_back();
        }
        self.lines.push(StyledLine::new(text, attr));
    }

    pub fn history(&self) -> impl Iterator<Item = &StyledLine> {
        self.history.iter()
    }

    /// Removes and returns the oldest archived line. Kept for the message
    /// history operations, which the session deliberately stubs out.
    pub fn pop_oldest(&mut self) -> Option<String> {
        self.history.pop_front().map(|line| line.text)
    }

    /// Re-inserts an archived line at the newest position.
    pub fn restore(&mut self, text: &str) {
        self.history.push_back(StyledLine::new(text, TextAttr::None));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window_with(lines: &[&str]) -> MessageWindow {
        let mut win = MessageWindow::new();
        for line in lines {
            win.put_str(line, TextAttr::None);
        }
        win
    }

    #[test]
    fn clear_archives_current_lines() {
        let mut win = window_with(&["You hit the newt.", "The newt bites!"]);
        win.clear();
        assert!(win.lines.is_empty());
        let history: Vec<_> = win.history().map(|line| line.text.as_str()).collect();
        assert_eq!(history, ["You hit the newt.", "The newt bites!"]);
    }

    #[test]
    fn repeated_line_after_clear_replaces_history_entry() {
        let mut win = window_with(&["You swap places with your pony."]);
        win.clear();
        win.put_str("You swap places with your pony.", TextAttr::None);
        assert_eq!(win.history().count(), 0);
        assert_eq!(win.lines.len(), 1);
    }

    #[test]
    fn dedup_only_applies_to_the_first_line() {
        let mut win = window_with(&["It is a wall."]);
        win.clear();
        win.put_str("You kick the wall.", TextAttr::None);
        win.put_str("It is a wall.", TextAttr::None);
        assert_eq!(win.history().count(), 1);
    }

    #[test]
    fn history_ring_caps_at_fifty_lines() {
        let mut win = MessageWindow::new();
        for i in 0..HISTORY_LINES + 1 {
            win.put_str(&format!("line {i}"), TextAttr::None);
        }
        win.clear();
        assert_eq!(win.history().count(), HISTORY_LINES);
        assert_eq!(win.history().next().unwrap().text, "line 1");
        assert_eq!(win.pop_oldest().as_deref(), Some("line 1"));
    }
}
