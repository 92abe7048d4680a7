use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::util::unicode;

/// Single-line text input: a buffer, a byte cursor, and a focus flag.
///
/// Keys are ignored while blurred.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    value: String,
    /// Byte offset, always on a grapheme boundary
    cursor: usize,
    focused: bool,
}

impl TextField {
    pub fn new() -> Self {
        Self::default()
    }

    /// A focused field holding `value` with the cursor at the end
    pub fn with_value(value: impl Into<String>) -> Self {
        let mut field = Self::new();
        field.set_value(value);
        field.focus();
        field
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.value.len();
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Cursor position in terminal cells
    pub fn cursor_col(&self) -> usize {
        unicode::byte_offset_to_display_col(&self.value, self.cursor)
    }

    pub fn focus(&mut self) {
        self.focused = true;
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    fn insert(&mut self, c: char) {
        self.value.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Edit the buffer for one key. Returns true if the key was consumed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if !self.focused {
            return false;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);
        match key.code {
            KeyCode::Char('a') if ctrl => self.cursor = 0,
            KeyCode::Char('e') if ctrl => self.cursor = self.value.len(),
            KeyCode::Char('u') if ctrl => {
                self.value.drain(..self.cursor);
                self.cursor = 0;
            }
            KeyCode::Char('k') if ctrl => self.value.truncate(self.cursor),
            KeyCode::Char('w') if ctrl => {
                let start = unicode::word_boundary_left(&self.value, self.cursor);
                self.value.drain(start..self.cursor);
                self.cursor = start;
            }
            KeyCode::Char('b') if alt => {
                self.cursor = unicode::word_boundary_left(&self.value, self.cursor)
            }
            KeyCode::Char('f') if alt => {
                self.cursor = unicode::word_boundary_right(&self.value, self.cursor)
            }
            KeyCode::Char(_) if ctrl || alt => return false,
            KeyCode::Char(c) => self.insert(c),
            KeyCode::Backspace => {
                if let Some(prev) = unicode::prev_grapheme_boundary(&self.value, self.cursor) {
                    self.value.drain(prev..self.cursor);
                    self.cursor = prev;
                }
            }
            KeyCode::Delete => {
                if let Some(next) = unicode::next_grapheme_boundary(&self.value, self.cursor) {
                    self.value.drain(self.cursor..next);
                }
            }
            KeyCode::Left if ctrl || alt => {
                self.cursor = unicode::word_boundary_left(&self.value, self.cursor)
            }
            KeyCode::Right if ctrl || alt => {
                self.cursor = unicode::word_boundary_right(&self.value, self.cursor)
            }
            KeyCode::Left => {
                if let Some(prev) = unicode::prev_grapheme_boundary(&self.value, self.cursor) {
                    self.cursor = prev;
                }
            }
            KeyCode::Right => {
                if let Some(next) = unicode::next_grapheme_boundary(&self.value, self.cursor) {
                    self.cursor = next;
                }
            }
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.value.len(),
            _ => return false,
        }
        true
    }
}
