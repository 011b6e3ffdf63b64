//! Single-line text editing shared by the search overlay and the command bar.
//!
//! - `Char(c)` inserts at the cursor.
//! - `Backspace` deletes the character before the cursor.
//! - `Nav(Left)` / `Nav(Right)` move the cursor one character.

use crate::event::{AppEvent, Direction};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LineInput {
    pub text: String,
    /// Byte offset of the cursor within `text`, always on a char boundary.
    pub cursor: usize,
}

impl LineInput {
    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Replace the text and put the cursor at its end.
    pub fn set(&mut self, text: &str) {
        self.text.clear();
        self.text.push_str(text);
        self.cursor = self.text.len();
    }

    /// Apply an editing event. Returns whether the text changed (cursor-only
    /// moves return `false`).
    pub fn handle(&mut self, event: &AppEvent) -> bool {
        match event {
            AppEvent::Char(c) => {
                self.text.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                true
            }
            AppEvent::Backspace => {
                if self.cursor == 0 {
                    return false;
                }
                let prev = self.prev_boundary();
                self.text.remove(prev);
                self.cursor = prev;
                true
            }
            AppEvent::Nav(Direction::Left) => {
                self.cursor = self.prev_boundary();
                false
            }
            AppEvent::Nav(Direction::Right) => {
                if self.cursor < self.text.len() {
                    self.cursor = self.text[self.cursor..]
                        .char_indices()
                        .nth(1)
                        .map(|(i, _)| self.cursor + i)
                        .unwrap_or(self.text.len());
                }
                false
            }
            _ => false,
        }
    }

    /// Number of characters before the cursor, i.e. its display column.
    pub fn cursor_chars(&self) -> usize {
        self.text[..self.cursor].chars().count()
    }

    fn prev_boundary(&self) -> usize {
        self.text[..self.cursor]
            .char_indices()
            .last()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }
}
