//! Event handling for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Key action in the file listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    // Navigation
    MoveUp,
    MoveDown,
    JumpToTop,
    JumpToBottom,

    // Directory navigation
    /// Enter a directory or open a file.
    Activate,
    NavigateBack,
    GoHome,
    Refresh,

    // File operations
    CreateFile,
    CreateDirectory,
    Edit,
    Rename,
    Delete,
    /// Open the context menu on the selected entry.
    ContextMenu,

    Cancel,

    // Application
    Quit,
    ForceQuit,

    None,
}

impl KeyAction {
    /// Convert a key event to an action.
    pub fn from_key_event(event: KeyEvent) -> Self {
        match (event.code, event.modifiers) {
            (KeyCode::Char('q'), KeyModifiers::NONE) => KeyAction::Quit,
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => KeyAction::ForceQuit,

            (KeyCode::Esc, _) => KeyAction::Cancel,

            // Navigation - vim style
            (KeyCode::Char('j'), KeyModifiers::NONE) => KeyAction::MoveDown,
            (KeyCode::Char('k'), KeyModifiers::NONE) => KeyAction::MoveUp,
            (KeyCode::Char('l'), KeyModifiers::NONE) => KeyAction::Activate,
            (KeyCode::Char('h'), KeyModifiers::NONE) => KeyAction::NavigateBack,

            // Navigation - arrow keys
            (KeyCode::Down, _) => KeyAction::MoveDown,
            (KeyCode::Up, _) => KeyAction::MoveUp,
            (KeyCode::Right, _) => KeyAction::Activate,
            (KeyCode::Left, _) => KeyAction::NavigateBack,

            // Jump
            (KeyCode::Char('g'), KeyModifiers::NONE) => KeyAction::JumpToTop,
            (KeyCode::Char('G'), KeyModifiers::SHIFT) => KeyAction::JumpToBottom,
            (KeyCode::Home, _) => KeyAction::JumpToTop,
            (KeyCode::End, _) => KeyAction::JumpToBottom,

            (KeyCode::Enter, _) => KeyAction::Activate,
            (KeyCode::Backspace, _) => KeyAction::NavigateBack,
            (KeyCode::Char('~'), _) => KeyAction::GoHome,
            (KeyCode::Char('R'), KeyModifiers::SHIFT) => KeyAction::Refresh,
            (KeyCode::F(5), _) => KeyAction::Refresh,

            // File operations
            (KeyCode::Char('a'), KeyModifiers::NONE) => KeyAction::CreateFile,
            (KeyCode::Char('A'), KeyModifiers::SHIFT) => KeyAction::CreateDirectory,
            (KeyCode::Char('e'), KeyModifiers::NONE) => KeyAction::Edit,
            (KeyCode::Char('r'), KeyModifiers::NONE) => KeyAction::Rename,
            (KeyCode::Char('d'), KeyModifiers::NONE) => KeyAction::Delete,
            (KeyCode::Delete, _) => KeyAction::Delete,
            (KeyCode::Char('m'), KeyModifiers::NONE) => KeyAction::ContextMenu,

            _ => KeyAction::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState};

    fn key_event(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(
            KeyAction::from_key_event(key_event(KeyCode::Char('q'), KeyModifiers::NONE)),
            KeyAction::Quit
        );
        assert_eq!(
            KeyAction::from_key_event(key_event(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            KeyAction::ForceQuit
        );
    }

    #[test]
    fn test_navigation_keys() {
        assert_eq!(
            KeyAction::from_key_event(key_event(KeyCode::Char('j'), KeyModifiers::NONE)),
            KeyAction::MoveDown
        );
        assert_eq!(
            KeyAction::from_key_event(key_event(KeyCode::Enter, KeyModifiers::NONE)),
            KeyAction::Activate
        );
        assert_eq!(
            KeyAction::from_key_event(key_event(KeyCode::Backspace, KeyModifiers::NONE)),
            KeyAction::NavigateBack
        );
        assert_eq!(
            KeyAction::from_key_event(key_event(KeyCode::Char('~'), KeyModifiers::SHIFT)),
            KeyAction::GoHome
        );
        assert_eq!(
            KeyAction::from_key_event(key_event(KeyCode::Char('R'), KeyModifiers::SHIFT)),
            KeyAction::Refresh
        );
    }

    #[test]
    fn test_file_operation_keys() {
        assert_eq!(
            KeyAction::from_key_event(key_event(KeyCode::Char('a'), KeyModifiers::NONE)),
            KeyAction::CreateFile
        );
        assert_eq!(
            KeyAction::from_key_event(key_event(KeyCode::Char('A'), KeyModifiers::SHIFT)),
            KeyAction::CreateDirectory
        );
        assert_eq!(
            KeyAction::from_key_event(key_event(KeyCode::Char('m'), KeyModifiers::NONE)),
            KeyAction::ContextMenu
        );
        assert_eq!(
            KeyAction::from_key_event(key_event(KeyCode::Char('z'), KeyModifiers::NONE)),
            KeyAction::None
        );
    }
}
