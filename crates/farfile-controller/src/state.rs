//! Controller state.
//!
//! All client-visible state lives in [`ControllerState`], a plain struct
//! with no rendering concerns. Views are computed from it by
//! [`crate::view::render`].

use farfile_core::{DirectoryEntry, RemotePath};

use crate::editor::EditorSession;
use crate::notice::Notices;
use crate::selection::ContextMenu;

/// Entries of the current directory.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ListingState {
    /// No listing received yet.
    #[default]
    Pending,
    /// The most recent successful listing.
    Loaded(Vec<DirectoryEntry>),
}

impl ListingState {
    /// Entries of the loaded listing, empty while pending.
    pub fn entries(&self) -> &[DirectoryEntry] {
        match self {
            Self::Pending => &[],
            Self::Loaded(entries) => entries,
        }
    }

    /// Get an entry by index.
    pub fn get(&self, index: usize) -> Option<&DirectoryEntry> {
        self.entries().get(index)
    }
}

/// The single selected entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Index into the current listing.
    pub index: usize,
    /// Snapshot of the selected entry.
    pub entry: DirectoryEntry,
}

/// A question waiting for the user's answer.
///
/// The directory is captured when the prompt opens, so a listing that
/// arrives while the user is typing does not retarget the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    /// New name for an entry.
    Rename {
        dir: RemotePath,
        entry: DirectoryEntry,
    },
    /// Confirm deletion of an entry.
    ConfirmDelete {
        dir: RemotePath,
        entry: DirectoryEntry,
    },
    /// Name for a new empty file.
    CreateFile { dir: RemotePath },
    /// Name for a new directory.
    CreateFolder { dir: RemotePath },
}

impl Prompt {
    /// Question shown to the user.
    pub fn message(&self) -> String {
        match self {
            Self::Rename { .. } => "Enter new name:".to_string(),
            Self::ConfirmDelete { entry, .. } => format!(
                "Are you sure you want to delete this {}?\n\"{}\"",
                entry.kind.noun(),
                entry.name
            ),
            Self::CreateFile { .. } => "Enter file name:".to_string(),
            Self::CreateFolder { .. } => "Enter folder name:".to_string(),
        }
    }

    /// Pre-filled answer for text prompts.
    pub fn initial_text(&self) -> Option<&str> {
        match self {
            Self::Rename { entry, .. } => Some(entry.name.as_str()),
            _ => None,
        }
    }

    /// Check if this prompt expects a yes/no answer instead of text.
    pub fn is_confirmation(&self) -> bool {
        matches!(self, Self::ConfirmDelete { .. })
    }
}

/// Everything the controller knows.
#[derive(Debug, Clone, Default)]
pub struct ControllerState {
    /// Directory shown, as last reported by the peer.
    pub current_path: RemotePath,
    /// Entries of `current_path`.
    pub listing: ListingState,
    /// At most one selected entry.
    pub selection: Option<Selection>,
    /// Open context menu, if any.
    pub menu: Option<ContextMenu>,
    /// Open editor session, if any.
    pub editor: Option<EditorSession>,
    /// Pending question for the user.
    pub prompt: Option<Prompt>,
    /// Active notices.
    pub notices: Notices,
}

impl ControllerState {
    /// Create the initial state at `home`.
    pub fn new(home: RemotePath) -> Self {
        Self {
            current_path: home,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = ControllerState::new(RemotePath::home());
        assert!(state.current_path.is_home());
        assert_eq!(state.listing, ListingState::Pending);
        assert!(state.selection.is_none());
        assert!(state.editor.is_none());
        assert!(state.notices.is_empty());
    }

    #[test]
    fn test_delete_prompt_names_kind() {
        let prompt = Prompt::ConfirmDelete {
            dir: RemotePath::home(),
            entry: DirectoryEntry::directory("old", "drwxr-xr-x"),
        };
        assert_eq!(
            prompt.message(),
            "Are you sure you want to delete this folder?\n\"old\""
        );
        assert!(prompt.is_confirmation());
        assert_eq!(prompt.initial_text(), None);
    }

    #[test]
    fn test_rename_prompt_initial_text() {
        let prompt = Prompt::Rename {
            dir: RemotePath::home(),
            entry: DirectoryEntry::file("a.txt", 1, "-rw-r--r--"),
        };
        assert_eq!(prompt.initial_text(), Some("a.txt"));
        assert!(!prompt.is_confirmation());
    }
}
