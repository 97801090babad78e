//! Single-line input for prompts (rename, create).

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// State for a single-line text prompt.
///
/// The cursor counts characters, not bytes.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    buffer: String,
    cursor: usize,
}

impl InputState {
    /// Create a new empty input state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an input state seeded with `value`, cursor at the end.
    pub fn with_initial(value: &str) -> Self {
        Self {
            buffer: value.to_string(),
            cursor: value.chars().count(),
        }
    }

    /// Get the current buffer contents.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Get the cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn byte_index(&self, cursor: usize) -> usize {
        self.buffer
            .char_indices()
            .nth(cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.buffer.len())
    }

    fn len(&self) -> usize {
        self.buffer.chars().count()
    }

    /// Handle a key event.
    pub fn handle_key(&mut self, key: KeyEvent) -> InputResult {
        match (key.code, key.modifiers) {
            (KeyCode::Enter, _) => InputResult::Submit(self.buffer.clone()),

            (KeyCode::Esc, _) => InputResult::Cancel,

            (KeyCode::Backspace, _) => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    let at = self.byte_index(self.cursor);
                    self.buffer.remove(at);
                }
                InputResult::Continue
            }

            (KeyCode::Delete, _) => {
                if self.cursor < self.len() {
                    let at = self.byte_index(self.cursor);
                    self.buffer.remove(at);
                }
                InputResult::Continue
            }

            (KeyCode::Left, _) => {
                self.cursor = self.cursor.saturating_sub(1);
                InputResult::Continue
            }

            (KeyCode::Right, _) => {
                self.cursor = (self.cursor + 1).min(self.len());
                InputResult::Continue
            }

            (KeyCode::Home, _) | (KeyCode::Char('a'), KeyModifiers::CONTROL) => {
                self.cursor = 0;
                InputResult::Continue
            }

            (KeyCode::End, _) | (KeyCode::Char('e'), KeyModifiers::CONTROL) => {
                self.cursor = self.len();
                InputResult::Continue
            }

            // Ctrl-U - clear line
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
                self.buffer.clear();
                self.cursor = 0;
                InputResult::Continue
            }

            // Ctrl-K - delete from cursor to end
            (KeyCode::Char('k'), KeyModifiers::CONTROL) => {
                let at = self.byte_index(self.cursor);
                self.buffer.truncate(at);
                InputResult::Continue
            }

            // Ctrl-W - delete word before cursor
            (KeyCode::Char('w'), KeyModifiers::CONTROL) => {
                if self.cursor > 0 {
                    let end = self.byte_index(self.cursor);
                    let word_start = self.buffer[..end]
                        .trim_end()
                        .char_indices()
                        .rev()
                        .find(|(_, c)| c.is_whitespace())
                        .map(|(i, c)| i + c.len_utf8())
                        .unwrap_or(0);
                    self.buffer.replace_range(word_start..end, "");
                    self.cursor = self.buffer[..word_start].chars().count();
                }
                InputResult::Continue
            }

            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                let at = self.byte_index(self.cursor);
                self.buffer.insert(at, c);
                self.cursor += 1;
                InputResult::Continue
            }

            _ => InputResult::Continue,
        }
    }
}

/// Result of handling input.
#[derive(Debug, Clone)]
pub enum InputResult {
    /// Continue accepting input.
    Continue,
    /// User cancelled the input.
    Cancel,
    /// User submitted the input with this value.
    Submit(String),
}
