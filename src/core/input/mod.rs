//! # LocationInput
//!
//! Single-line text field the user types a location into.
//!
//! ## Responsibilities
//!
//! - Capture printable characters up to a character limit
//! - Handle editing (backspace, delete, cursor movement, readline kills)
//! - Produce the visible slice of the value for a fixed-width window
//!
//! The field never reacts to Enter, Esc or Ctrl+C; those belong to the
//! state machine. `update()` reports whether anything changed so the caller
//! can decide whether to log or redraw.
//!
//! ## Scrolling
//!
//! When the value is wider than `width` columns, the window slides so the
//! cursor stays visible, always leaving one column for the cursor cell.
//! A `width` of 0 disables the window.

mod text;

use crate::core::action::Key;

use text::{
    char_width, display_width, next_char_boundary, prev_char_boundary, prev_word_boundary,
};

/// Default maximum number of characters accepted.
pub const DEFAULT_CHAR_LIMIT: usize = 156;
/// Default visible width in terminal columns.
pub const DEFAULT_WIDTH: u16 = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationInput {
    value: String,
    /// Cursor position as byte offset in `value` (0..=value.len())
    pos: usize,
    /// Byte offset of the first visible character
    offset: usize,
    char_limit: usize,
    width: u16,
}

impl Default for LocationInput {
    fn default() -> Self {
        Self::new(DEFAULT_CHAR_LIMIT, DEFAULT_WIDTH)
    }
}

impl LocationInput {
    /// An empty field. A `char_limit` of 0 means unlimited.
    pub fn new(char_limit: usize, width: u16) -> Self {
        Self {
            value: String::new(),
            pos: 0,
            offset: 0,
            char_limit,
            width,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn char_limit(&self) -> usize {
        self.char_limit
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    /// Apply a key. Returns `true` if the value or the cursor moved.
    pub fn update(&mut self, key: &Key) -> bool {
        let before = (self.pos, self.value.len());
        let changed = match *key {
            Key::Char(c) => self.insert(c),
            Key::Backspace => {
                if self.pos == 0 {
                    return false;
                }
                let prev = prev_char_boundary(&self.value, self.pos);
                self.value.drain(prev..self.pos);
                self.pos = prev;
                true
            }
            Key::Delete => {
                if self.pos == self.value.len() {
                    return false;
                }
                let next = next_char_boundary(&self.value, self.pos);
                self.value.drain(self.pos..next);
                true
            }
            Key::Left => {
                if self.pos > 0 {
                    self.pos = prev_char_boundary(&self.value, self.pos);
                }
                self.pos != before.0
            }
            Key::Right => {
                if self.pos < self.value.len() {
                    self.pos = next_char_boundary(&self.value, self.pos);
                }
                self.pos != before.0
            }
            Key::Home => {
                self.pos = 0;
                self.pos != before.0
            }
            Key::End => {
                self.pos = self.value.len();
                self.pos != before.0
            }
            Key::DeleteWordBackward => {
                let start = prev_word_boundary(&self.value, self.pos);
                self.value.drain(start..self.pos);
                self.pos = start;
                self.value.len() != before.1
            }
            Key::DeleteToStart => {
                self.value.drain(..self.pos);
                self.pos = 0;
                self.value.len() != before.1
            }
            Key::DeleteToEnd => {
                self.value.truncate(self.pos);
                self.value.len() != before.1
            }
            Key::Enter | Key::Esc | Key::Interrupt => false,
        };

        if changed {
            self.scroll_to_cursor();
        }
        changed
    }

    /// The part of the value visible in the window.
    pub fn view(&self) -> String {
        let rest = &self.value[self.offset..];
        if self.width == 0 {
            return rest.to_string();
        }

        let width = usize::from(self.width);
        let mut used = 0;
        rest.chars()
            .take_while(|&c| {
                used += char_width(c);
                used <= width
            })
            .collect()
    }

    /// Display column of the cursor relative to the start of `view()`.
    pub fn cursor_column(&self) -> u16 {
        u16::try_from(display_width(&self.value[self.offset..self.pos])).unwrap_or(u16::MAX)
    }

    fn insert(&mut self, c: char) -> bool {
        if c.is_control() {
            return false;
        }
        if self.char_limit > 0 && self.value.chars().count() >= self.char_limit {
            return false;
        }
        self.value.insert(self.pos, c);
        self.pos += c.len_utf8();
        true
    }

    /// Slide the window so the cursor cell is inside it.
    fn scroll_to_cursor(&mut self) {
        if self.width == 0 {
            self.offset = 0;
            return;
        }
        let width = usize::from(self.width);

        self.offset = self.offset.min(self.pos);
        while self.offset < self.pos && display_width(&self.value[self.offset..self.pos]) >= width {
            self.offset = next_char_boundary(&self.value, self.offset);
        }

        // Scroll back when text was removed and the tail fits again.
        while self.offset > 0 {
            let prev = prev_char_boundary(&self.value, self.offset);
            if display_width(&self.value[prev..]) >= width {
                break;
            }
            self.offset = prev;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(text: &str) -> LocationInput {
        let mut input = LocationInput::default();
        for c in text.chars() {
            input.update(&Key::Char(c));
        }
        input
    }

    #[test]
    fn test_new_is_empty() {
        let input = LocationInput::default();
        assert_eq!(input.value(), "");
        assert_eq!(input.view(), "");
        assert_eq!(input.cursor_column(), 0);
        assert_eq!(input.char_limit(), DEFAULT_CHAR_LIMIT);
        assert_eq!(input.width(), DEFAULT_WIDTH);
    }

    #[test]
    fn test_typing_and_backspace() {
        let mut input = typed("Berlin");
        assert_eq!(input.view(), "Berlin");
        assert_eq!(input.cursor_column(), 6);

        assert!(input.update(&Key::Backspace));
        assert_eq!(input.value(), "Berli");
    }

    #[test]
    fn test_backspace_on_empty_is_noop() {
        let mut input = LocationInput::default();
        assert!(!input.update(&Key::Backspace));
        assert!(!input.update(&Key::Delete));
        assert!(!input.update(&Key::Left));
    }

    #[test]
    fn test_insert_in_the_middle() {
        let mut input = typed("Brlin");
        input.update(&Key::Home);
        input.update(&Key::Right);
        input.update(&Key::Char('e'));
        assert_eq!(input.value(), "Berlin");
        assert_eq!(input.cursor_column(), 2);
    }

    #[test]
    fn test_delete_removes_char_under_cursor() {
        let mut input = typed("Zürich");
        input.update(&Key::Home);
        input.update(&Key::Right);
        assert!(input.update(&Key::Delete));
        assert_eq!(input.value(), "Zrich");
    }

    #[test]
    fn test_char_limit_is_enforced() {
        let mut input = LocationInput::new(3, DEFAULT_WIDTH);
        for c in "Oslo".chars() {
            input.update(&Key::Char(c));
        }
        assert_eq!(input.value(), "Osl");
        assert!(!input.update(&Key::Char('o')));
    }

    #[test]
    fn test_control_chars_are_rejected() {
        let mut input = LocationInput::default();
        assert!(!input.update(&Key::Char('\t')));
        assert!(input.value().is_empty());
    }

    #[test]
    fn test_confirm_and_cancel_keys_are_not_consumed() {
        let mut input = typed("Rome");
        assert!(!input.update(&Key::Enter));
        assert!(!input.update(&Key::Esc));
        assert!(!input.update(&Key::Interrupt));
        assert_eq!(input.value(), "Rome");
    }

    #[test]
    fn test_readline_kills() {
        let mut input = typed("Rio de Janeiro");
        assert!(input.update(&Key::DeleteWordBackward));
        assert_eq!(input.value(), "Rio de ");

        input.update(&Key::Left);
        input.update(&Key::Left);
        assert!(input.update(&Key::DeleteToEnd));
        assert_eq!(input.value(), "Rio d");

        assert!(input.update(&Key::DeleteToStart));
        assert_eq!(input.value(), "");
        assert!(!input.update(&Key::DeleteToStart));
    }

    #[test]
    fn test_fresh_field_accepts_keys() {
        let mut input = LocationInput::new(DEFAULT_CHAR_LIMIT, DEFAULT_WIDTH);
        assert!(input.update(&Key::Char('a')));
        assert_eq!(input.value(), "a");
        assert_eq!(input.cursor_column(), 1);
    }

    #[test]
    fn test_window_follows_cursor() {
        let mut input = LocationInput::new(0, 5);
        for c in "Amsterdam".chars() {
            input.update(&Key::Char(c));
        }
        // One column is kept free for the cursor.
        assert_eq!(input.view(), "rdam");
        assert_eq!(input.cursor_column(), 4);

        input.update(&Key::Home);
        assert_eq!(input.view(), "Amste");
        assert_eq!(input.cursor_column(), 0);
    }

    #[test]
    fn test_window_scrolls_back_after_deletion() {
        let mut input = LocationInput::new(0, 5);
        for c in "Amsterdam".chars() {
            input.update(&Key::Char(c));
        }
        for _ in 0..6 {
            input.update(&Key::Backspace);
        }
        assert_eq!(input.value(), "Ams");
        assert_eq!(input.view(), "Ams");
        assert_eq!(input.cursor_column(), 3);
    }

    #[test]
    fn test_wide_chars_fit_window_by_columns() {
        let mut input = LocationInput::new(0, 4);
        for c in "東京都".chars() {
            input.update(&Key::Char(c));
        }
        assert_eq!(input.view(), "都");
        assert_eq!(input.cursor_column(), 2);
    }

    #[test]
    fn test_zero_width_shows_everything() {
        let mut input = LocationInput::new(0, 0);
        for c in "Llanfairpwllgwyngyll".chars() {
            input.update(&Key::Char(c));
        }
        assert_eq!(input.view(), "Llanfairpwllgwyngyll");
        assert_eq!(input.cursor_column(), 20);
    }
}
