//! Cursor handling for the file editor pane.
//!
//! The text itself lives in the controller's editor session; this module
//! only tracks where the cursor is and applies key presses to the buffer.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use farfile_core::RemotePath;

use super::constants::TAB_WIDTH;

/// Result of handling a key in the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorResult {
    /// Cursor moved or nothing happened.
    Continue,
    /// The buffer was modified.
    Changed,
    /// Save requested.
    Save,
    /// Close requested, discarding unsaved edits.
    Close,
}

/// Cursor and scroll state of the editor pane.
///
/// `cursor` is a byte offset that always sits on a char boundary.
#[derive(Debug, Clone, Default)]
pub struct EditorState {
    path: Option<RemotePath>,
    cursor: usize,
    scroll: usize,
}

impl EditorState {
    /// Reset the cursor when a different file is opened, and keep it inside
    /// `buffer` otherwise.
    pub fn sync(&mut self, path: &RemotePath, buffer: &str) {
        if self.path.as_ref() != Some(path) {
            self.path = Some(path.clone());
            self.cursor = 0;
            self.scroll = 0;
        }
        if self.cursor > buffer.len() || !buffer.is_char_boundary(self.cursor) {
            self.cursor = buffer.len();
        }
    }

    /// Forget the open file.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Byte offset of the cursor.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Cursor as (line, column in chars).
    pub fn position(&self, buffer: &str) -> (usize, usize) {
        let before = &buffer[..self.cursor.min(buffer.len())];
        let row = before.matches('\n').count();
        let col = before[line_start(before, before.len())..].chars().count();
        (row, col)
    }

    /// First visible line, adjusted so the cursor line fits in `height`.
    pub fn scroll_for(&mut self, buffer: &str, height: usize) -> usize {
        let (row, _) = self.position(buffer);
        if row < self.scroll {
            self.scroll = row;
        } else if height > 0 && row >= self.scroll + height {
            self.scroll = row + 1 - height;
        }
        self.scroll
    }

    /// Apply a key press to `buffer`.
    pub fn handle_key(&mut self, buffer: &mut String, key: KeyEvent) -> EditorResult {
        match (key.code, key.modifiers) {
            (KeyCode::Char('s'), KeyModifiers::CONTROL) => EditorResult::Save,
            (KeyCode::Esc, _) => EditorResult::Close,

            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                buffer.insert(self.cursor, c);
                self.cursor += c.len_utf8();
                EditorResult::Changed
            }
            (KeyCode::Enter, _) => {
                buffer.insert(self.cursor, '\n');
                self.cursor += 1;
                EditorResult::Changed
            }
            (KeyCode::Tab, _) => {
                let indent = " ".repeat(TAB_WIDTH);
                buffer.insert_str(self.cursor, &indent);
                self.cursor += indent.len();
                EditorResult::Changed
            }
            (KeyCode::Backspace, _) => {
                if self.cursor == 0 {
                    return EditorResult::Continue;
                }
                let prev = prev_boundary(buffer, self.cursor);
                buffer.replace_range(prev..self.cursor, "");
                self.cursor = prev;
                EditorResult::Changed
            }
            (KeyCode::Delete, _) => {
                let next = next_boundary(buffer, self.cursor);
                if next == self.cursor {
                    return EditorResult::Continue;
                }
                buffer.replace_range(self.cursor..next, "");
                EditorResult::Changed
            }

            (KeyCode::Left, _) => {
                self.cursor = prev_boundary(buffer, self.cursor);
                EditorResult::Continue
            }
            (KeyCode::Right, _) => {
                self.cursor = next_boundary(buffer, self.cursor);
                EditorResult::Continue
            }
            (KeyCode::Up, _) => {
                let start = line_start(buffer, self.cursor);
                if start > 0 {
                    let col = buffer[start..self.cursor].chars().count();
                    let prev_start = line_start(buffer, start - 1);
                    self.cursor = offset_at(buffer, prev_start, col);
                }
                EditorResult::Continue
            }
            (KeyCode::Down, _) => {
                let end = line_end(buffer, self.cursor);
                if end < buffer.len() {
                    let col = buffer[line_start(buffer, self.cursor)..self.cursor]
                        .chars()
                        .count();
                    self.cursor = offset_at(buffer, end + 1, col);
                }
                EditorResult::Continue
            }
            (KeyCode::Home, _) => {
                self.cursor = line_start(buffer, self.cursor);
                EditorResult::Continue
            }
            (KeyCode::End, _) => {
                self.cursor = line_end(buffer, self.cursor);
                EditorResult::Continue
            }

            _ => EditorResult::Continue,
        }
    }
}

fn prev_boundary(buffer: &str, at: usize) -> usize {
    buffer[..at]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

fn next_boundary(buffer: &str, at: usize) -> usize {
    buffer[at..]
        .chars()
        .next()
        .map(|c| at + c.len_utf8())
        .unwrap_or(at)
}

fn line_start(buffer: &str, at: usize) -> usize {
    buffer[..at].rfind('\n').map(|i| i + 1).unwrap_or(0)
}

fn line_end(buffer: &str, at: usize) -> usize {
    buffer[at..].find('\n').map(|i| at + i).unwrap_or(buffer.len())
}

/// Byte offset of column `col` on the line starting at `start`, clamped to
/// the line end.
fn offset_at(buffer: &str, start: usize, col: usize) -> usize {
    let end = line_end(buffer, start);
    buffer[start..end]
        .char_indices()
        .nth(col)
        .map(|(i, _)| start + i)
        .unwrap_or(end)
}
