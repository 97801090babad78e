//! View model computed from controller state.
//!
//! [`render`] is a pure function: the same state always yields the same
//! view. Frontends draw the view; they never read state directly.

use strum::IntoEnumIterator;

use farfile_core::{EntryKind, RemotePath, format_size};

use crate::constants::DIRECTORY_GLYPH;
use crate::notice::NoticeKind;
use crate::selection::{MenuAction, Point};
use crate::state::{ControllerState, ListingState};

/// Everything a frontend needs to draw the browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserView {
    pub path: RemotePath,
    /// Newest first.
    pub notices: Vec<NoticeView>,
    pub body: ListingBody,
    pub menu: Option<MenuView>,
    pub editor: Option<EditorView>,
    pub prompt: Option<PromptView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeView {
    pub kind: NoticeKind,
    pub text: String,
}

/// Main area of the browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingBody {
    /// No listing received yet.
    Loading,
    /// The directory has no entries.
    Empty,
    /// One row per entry, in peer order.
    Rows(Vec<EntryRow>),
}

/// One listing row.
///
/// `name` is the raw name from the peer; frontends escape or strip it as
/// their medium requires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryRow {
    pub name: String,
    pub kind: EntryKind,
    pub glyph: Option<&'static str>,
    pub size: String,
    pub permissions: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuView {
    pub position: Point,
    pub items: Vec<MenuAction>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorView {
    pub path: RemotePath,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptView {
    pub message: String,
    pub initial: Option<String>,
    /// Yes/no question rather than a text field.
    pub confirm: bool,
}

/// Compute the view for `state`.
pub fn render(state: &ControllerState) -> BrowserView {
    let selected = state.selection.as_ref().map(|s| s.index);

    let body = match &state.listing {
        ListingState::Pending => ListingBody::Loading,
        ListingState::Loaded(entries) if entries.is_empty() => ListingBody::Empty,
        ListingState::Loaded(entries) => ListingBody::Rows(
            entries
                .iter()
                .enumerate()
                .map(|(index, entry)| EntryRow {
                    name: entry.name.to_string(),
                    kind: entry.kind,
                    glyph: entry.is_dir().then_some(DIRECTORY_GLYPH),
                    size: format_size(&entry.size),
                    permissions: entry.permissions.clone(),
                    selected: selected == Some(index),
                })
                .collect(),
        ),
    };

    BrowserView {
        path: state.current_path.clone(),
        notices: state
            .notices
            .iter()
            .map(|n| NoticeView {
                kind: n.kind,
                text: n.text(),
            })
            .collect(),
        body,
        menu: state.menu.as_ref().map(|menu| MenuView {
            position: menu.position,
            items: MenuAction::iter().collect(),
        }),
        editor: state.editor.as_ref().map(|session| EditorView {
            path: session.path().clone(),
            content: session.buffer().to_string(),
        }),
        prompt: state.prompt.as_ref().map(|prompt| PromptView {
            message: prompt.message(),
            initial: prompt.initial_text().map(str::to_string),
            confirm: prompt.is_confirmation(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use farfile_core::DirectoryEntry;

    use super::*;
    use crate::state::Selection;

    fn loaded(entries: Vec<DirectoryEntry>) -> ControllerState {
        let mut state = ControllerState::new(RemotePath::home());
        state.listing = ListingState::Loaded(entries);
        state
    }

    #[test]
    fn test_loading_before_first_listing() {
        let state = ControllerState::new(RemotePath::home());
        assert_eq!(render(&state).body, ListingBody::Loading);
    }

    #[test]
    fn test_empty_directory_has_no_rows() {
        assert_eq!(render(&loaded(vec![])).body, ListingBody::Empty);
    }

    #[test]
    fn test_rows() {
        let mut state = loaded(vec![
            DirectoryEntry::directory("src", "drwxr-xr-x"),
            DirectoryEntry::file("notes.txt", 2048, "-rw-r--r--"),
        ]);
        state.selection = Some(Selection {
            index: 1,
            entry: DirectoryEntry::file("notes.txt", 2048, "-rw-r--r--"),
        });

        let ListingBody::Rows(rows) = render(&state).body else {
            panic!("expected rows");
        };
        assert_eq!(rows[0].glyph, Some("📁"));
        assert_eq!(rows[0].size, "-");
        assert!(!rows[0].selected);
        assert_eq!(rows[1].glyph, None);
        assert_eq!(rows[1].size, "2.0 KB");
        assert_eq!(rows[1].permissions, "-rw-r--r--");
        assert!(rows[1].selected);
    }

    #[test]
    fn test_render_is_pure() {
        let state = loaded(vec![DirectoryEntry::file("a", 512, "-rw-------")]);
        assert_eq!(render(&state), render(&state));
    }
}
