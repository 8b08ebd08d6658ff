//! Menu window: entries, accelerators, and the selection state machine.

use crate::display::{Color, GlyphInfo, StyledLine, TextAttr};
use crate::input::ESC;

/// Alphabet for locally synthesized accelerators, consumed in order within
/// one menu population and never reused.
pub const CUSTOM_ACCELERATORS: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// One selectable (or header) row of a menu.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MenuEntry {
    pub glyph: GlyphInfo,
    /// Opaque engine identifier; zero marks an unselectable header row.
    pub identifier: i32,
    /// Engine-supplied accelerator keystroke.
    pub accelerator: Option<char>,
    /// Shared group accelerator.
    pub group_accel: Option<char>,
    /// Locally synthesized accelerator for identified rows without one.
    pub custom_accelerator: Option<char>,
    pub attr: TextAttr,
    pub color: Color,
    pub label: String,
    pub item_flags: i32,
    /// 0 unselected, -1 "all", positive an explicit repeat count.
    pub selected: i32,
}

impl MenuEntry {
    fn matches(&self, ch: char) -> bool {
        self.accelerator == Some(ch)
            || self.group_accel == Some(ch)
            || self.custom_accelerator == Some(ch)
    }
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct MenuWindow {
    pub displayed: bool,
    pub blocking: bool,
    /// Plain text written via `put_str`; a menu with such lines renders as
    /// a text window.
    pub lines: Vec<StyledLine>,
    pub entries: Vec<MenuEntry>,
    pub prompt: String,
    accel_cursor: usize,
}

impl MenuWindow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begins a fresh population: entries and the accelerator cursor reset.
    pub fn start_menu(&mut self) {
        self.entries.clear();
        self.accel_cursor = 0;
    }

    /// Appends one entry. A custom accelerator is assigned only when the
    /// entry is identified (nonzero) and the engine supplied none.
    #[allow(clippy::too_many_arguments)]
    pub fn add_entry(
        &mut self,
        glyph: GlyphInfo,
        identifier: i32,
        accelerator: Option<char>,
        group_accel: Option<char>,
        attr: TextAttr,
        color: Color,
        label: impl Into<String>,
        item_flags: i32,
    ) {
        let custom_accelerator = if identifier != 0 && accelerator.is_none() {
            let assigned = CUSTOM_ACCELERATORS.chars().nth(self.accel_cursor);
            self.accel_cursor += 1;
            assigned
        } else {
            None
        };
        self.entries.push(MenuEntry {
            glyph,
            identifier,
            accelerator,
            group_accel,
            custom_accelerator,
            attr,
            color,
            label: label.into(),
            item_flags,
            selected: 0,
        });
    }

    /// Finishes the population, recording the free-text prompt.
    pub fn end_menu(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.entries.clear();
    }

    /// Entries with a nonzero selection, in entry order.
    pub fn selected_items(&self) -> Vec<SelectedItem> {
        self.entries
            .iter()
            .filter(|entry| entry.selected != 0)
            .map(|entry| SelectedItem {
                identifier: entry.identifier,
                count: entry.selected,
                item_flags: entry.item_flags,
            })
            .collect()
    }
}

/// Selection protocol modes, numbered as on the wire.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    serde::Serialize,
    serde::Deserialize,
    strum::Display,
    strum::FromRepr,
)]
#[strum(serialize_all = "snake_case")]
#[repr(i32)]
pub enum MenuSelect {
    PickNone = 0,
    PickOne = 1,
    PickAny = 2,
}

/// One selected menu row as reported back to the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelectedItem {
    pub identifier: i32,
    /// -1 means "all"; positive is an explicit repeat count.
    pub count: i32,
    pub item_flags: i32,
}

/// Outcome of feeding one keystroke to a selection run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectionStep {
    /// More input wanted.
    Continue,
    /// Selection finished with these items (possibly none).
    Done(Vec<SelectedItem>),
}

/// Count accumulator value meaning "no digits entered yet".
const COUNT_UNSET: i32 = -1;

/// Keystroke-driven selection run over one menu.
///
/// The async layer owns the keystroke source; this machine owns the
/// protocol. Digits accumulate a repeat count that applies to the next
/// accelerator keystroke only.
#[derive(Debug)]
pub struct MenuSelection {
    how: MenuSelect,
    count: i32,
}

impl MenuSelection {
    pub fn new(how: MenuSelect) -> Self {
        Self {
            how,
            count: COUNT_UNSET,
        }
    }

    pub fn feed(&mut self, menu: &mut MenuWindow, ch: char) -> SelectionStep {
        if self.how != MenuSelect::PickNone
            && let Some(digit) = ch.to_digit(10)
        {
            self.count = self.count.max(0) * 10 + digit as i32;
            return SelectionStep::Continue;
        }
        let count = std::mem::replace(&mut self.count, COUNT_UNSET);

        match self.how {
            // Exactly one acknowledgment keystroke, empty selection.
            MenuSelect::PickNone => SelectionStep::Done(Vec::new()),
            MenuSelect::PickOne => {
                if ch == ESC || ch == ' ' {
                    return SelectionStep::Done(Vec::new());
                }
                let hit = menu
                    .entries
                    .iter()
                    .find(|entry| entry.matches(ch))
                    .map(|entry| SelectedItem {
                        identifier: entry.identifier,
                        count,
                        item_flags: entry.item_flags,
                    });
                SelectionStep::Done(hit.into_iter().collect())
            }
            MenuSelect::PickAny => {
                match ch {
                    ESC | ' ' => return SelectionStep::Done(menu.selected_items()),
                    // Select-all gesture; pending digits do not apply.
                    ',' => {
                        for entry in &mut menu.entries {
                            if entry.identifier != 0 {
                                entry.selected = -1;
                            }
                        }
                    }
                    // Deselect-all gesture.
                    '-' => {
                        for entry in &mut menu.entries {
                            if entry.identifier != 0 {
                                entry.selected = 0;
                            }
                        }
                    }
                    _ => {
                        for entry in &mut menu.entries {
                            if !entry.matches(ch) {
                                continue;
                            }
                            if entry.selected == 0 {
                                entry.selected = count;
                            } else if count == -1 {
                                // "All" on an already-selected entry toggles
                                // it off.
                                entry.selected = 0;
                            }
                        }
                    }
                }
                SelectionStep::Continue
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::GlyphFlags;

    fn glyph() -> GlyphInfo {
        GlyphInfo {
            glyph: 0,
            tty_char: '?',
            frame_color: 0,
            flags: GlyphFlags::empty(),
            symbol_color: Color::Gray,
            symbol_index: 0,
            custom_color: Color::NoColor,
            palette_index: 0,
            tile_index: 0,
        }
    }

    fn menu(entries: &[(i32, Option<char>, Option<char>)]) -> MenuWindow {
        let mut win = MenuWindow::new();
        win.start_menu();
        for (identifier, accelerator, group) in entries {
            win.add_entry(
                glyph(),
                *identifier,
                *accelerator,
                *group,
                TextAttr::None,
                Color::Gray,
                format!("item {identifier}"),
                0,
            );
        }
        win.end_menu("Pick something");
        win
    }

    fn run(win: &mut MenuWindow, how: MenuSelect, input: &str) -> Vec<SelectedItem> {
        let mut selection = MenuSelection::new(how);
        for ch in input.chars() {
            if let SelectionStep::Done(items) = selection.feed(win, ch) {
                return items;
            }
        }
        panic!("selection did not finish for input {input:?}");
    }

    #[test]
    fn custom_accelerators_skip_supplied_and_headers() {
        let win = menu(&[(0, None, None), (7, None, None), (8, Some('x'), None), (9, None, None)]);
        let customs: Vec<_> = win
            .entries
            .iter()
            .map(|entry| entry.custom_accelerator)
            .collect();
        assert_eq!(customs, vec![None, Some('a'), None, Some('b')]);
    }

    #[test]
    fn restarting_a_menu_reuses_the_alphabet() {
        let mut win = menu(&[(7, None, None)]);
        assert_eq!(win.entries[0].custom_accelerator, Some('a'));
        win.start_menu();
        win.add_entry(glyph(), 5, None, None, TextAttr::None, Color::Gray, "fresh", 0);
        assert_eq!(win.entries[0].custom_accelerator, Some('a'));
    }

    #[test]
    fn pick_none_consumes_one_acknowledgment() {
        let mut win = menu(&[(7, Some('a'), None)]);
        assert_eq!(run(&mut win, MenuSelect::PickNone, "a"), Vec::new());
    }

    #[test]
    fn pick_one_applies_accumulated_count() {
        let mut win = menu(&[(7, Some('a'), None), (8, Some('b'), None)]);
        let items = run(&mut win, MenuSelect::PickOne, "12b");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].identifier, 8);
        assert_eq!(items[0].count, 12);
    }

    #[test]
    fn pick_one_without_digits_keeps_count_unset() {
        let mut win = menu(&[(7, Some('a'), None)]);
        let items = run(&mut win, MenuSelect::PickOne, "a");
        assert_eq!(items[0].count, -1);
    }

    #[test]
    fn pick_one_cancels_on_escape_and_space() {
        let mut win = menu(&[(7, Some('a'), None)]);
        assert_eq!(run(&mut win, MenuSelect::PickOne, "\x1b"), Vec::new());
        assert_eq!(run(&mut win, MenuSelect::PickOne, " "), Vec::new());
    }

    #[test]
    fn pick_one_unmatched_key_selects_nothing() {
        let mut win = menu(&[(7, Some('a'), None)]);
        assert_eq!(run(&mut win, MenuSelect::PickOne, "z"), Vec::new());
    }

    #[test]
    fn pick_any_select_all_ignores_pending_digits() {
        let mut win = menu(&[(7, Some('a'), None), (8, Some('b'), None)]);
        let items = run(&mut win, MenuSelect::PickAny, ",1\x1b");
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|item| item.count == -1));
    }

    #[test]
    fn pick_any_counts_toggles_and_reset() {
        let mut win = menu(&[
            (7, Some('a'), None),
            (8, Some('b'), None),
            (9, Some('c'), None),
        ]);
        // Select a with count 5, select b with default, toggle b back off,
        // then finish.
        let items = run(&mut win, MenuSelect::PickAny, "5abb\x1b");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].identifier, 7);
        assert_eq!(items[0].count, 5);
    }

    #[test]
    fn pick_any_hyphen_clears_selections() {
        let mut win = menu(&[(7, Some('a'), None), (8, Some('b'), None)]);
        let items = run(&mut win, MenuSelect::PickAny, "ab-\x1b");
        assert!(items.is_empty());
    }

    #[test]
    fn pick_any_group_accelerator_hits_every_member() {
        let mut win = menu(&[(7, Some('a'), Some('g')), (8, Some('b'), Some('g'))]);
        let items = run(&mut win, MenuSelect::PickAny, "g\x1b");
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn explicit_count_does_not_toggle_selected_entry() {
        let mut win = menu(&[(7, Some('a'), None)]);
        // Second press with a digit count leaves the existing selection.
        let items = run(&mut win, MenuSelect::PickAny, "4a2a\x1b");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].count, 4);
    }
}
