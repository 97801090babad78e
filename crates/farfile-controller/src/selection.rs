//! Selection, context menu and prompts.

use strum::{Display, EnumIter, IntoStaticStr};
use tracing::debug;

use farfile_core::{DirectoryEntry, MenuFootprint, RemotePath};
use farfile_proto::Request;

use crate::controller::Controller;
use crate::state::{Prompt, Selection};
use crate::transport::Transport;

/// Actions offered by the context menu, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum MenuAction {
    Open,
    Edit,
    Rename,
    Delete,
}

impl MenuAction {
    /// Label shown in the menu.
    pub fn label(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::Edit => "Edit",
            Self::Rename => "Rename",
            Self::Delete => "Delete",
        }
    }
}

/// A position in frontend units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: u32,
    pub y: u32,
}

impl Point {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Visible area the menu must fit in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// An open context menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextMenu {
    /// Top-left corner after clamping.
    pub position: Point,
    /// Entry the menu was opened on.
    pub target: DirectoryEntry,
}

/// Position a menu at `pointer`, pulled back inside `viewport` when it
/// would overflow the right or bottom edge.
pub fn clamp_menu(pointer: Point, viewport: Viewport, footprint: MenuFootprint) -> Point {
    let mut position = pointer;
    if pointer.x.saturating_add(footprint.width) > viewport.width {
        position.x = viewport
            .width
            .saturating_sub(footprint.width)
            .saturating_sub(footprint.margin);
    }
    if pointer.y.saturating_add(footprint.height) > viewport.height {
        position.y = viewport
            .height
            .saturating_sub(footprint.height)
            .saturating_sub(footprint.margin);
    }
    position
}

impl<T: Transport> Controller<T> {
    /// Select the entry at `index`, replacing any previous selection.
    ///
    /// Also dismisses an open context menu. Out-of-range indices are
    /// ignored.
    pub fn select(&mut self, index: usize) -> bool {
        let Some(entry) = self.state.listing.get(index).cloned() else {
            return false;
        };
        self.state.selection = Some(Selection { index, entry });
        self.state.menu = None;
        true
    }

    /// Select the entry after the current one, or the first entry.
    pub fn select_next(&mut self) -> bool {
        let count = self.state.listing.entries().len();
        if count == 0 {
            return false;
        }
        let next = match &self.state.selection {
            Some(selection) => (selection.index + 1).min(count - 1),
            None => 0,
        };
        self.select(next)
    }

    /// Select the entry before the current one, or the first entry.
    pub fn select_previous(&mut self) -> bool {
        let previous = match &self.state.selection {
            Some(selection) => selection.index.saturating_sub(1),
            None => 0,
        };
        self.select(previous)
    }

    /// Clear the selection.
    pub fn clear_selection(&mut self) {
        self.state.selection = None;
    }

    /// Currently selected entry.
    pub fn selected(&self) -> Option<&DirectoryEntry> {
        self.state.selection.as_ref().map(|s| &s.entry)
    }

    /// Double activation: enter a directory or open a file for editing.
    pub fn activate(&mut self, index: usize) -> bool {
        if !self.select(index) {
            return false;
        }
        self.open_selected()
    }

    /// Select the entry at `index` and open the context menu on it.
    pub fn open_context_menu(&mut self, index: usize, pointer: Point, viewport: Viewport) -> bool {
        if !self.select(index) {
            return false;
        }
        let Some(target) = self.selected().cloned() else {
            return false;
        };
        let position = clamp_menu(pointer, viewport, self.config.menu);
        self.state.menu = Some(ContextMenu { position, target });
        true
    }

    /// Close the context menu, keeping the selection.
    pub fn dismiss_menu(&mut self) {
        self.state.menu = None;
    }

    /// Close the menu and run `action` on the selected entry.
    ///
    /// Returns `true` if a request was sent or a prompt opened.
    pub fn menu_action(&mut self, action: MenuAction) -> bool {
        self.state.menu = None;
        let Some(entry) = self.selected().cloned() else {
            debug!(%action, "Menu action without a selection");
            return false;
        };

        match action {
            MenuAction::Open => self.open_selected(),
            MenuAction::Edit if entry.is_dir() => false,
            MenuAction::Edit => self.open_file(&entry.name),
            MenuAction::Rename => {
                self.state.prompt = Some(Prompt::Rename {
                    dir: self.state.current_path.clone(),
                    entry,
                });
                true
            }
            MenuAction::Delete => {
                self.state.prompt = Some(Prompt::ConfirmDelete {
                    dir: self.state.current_path.clone(),
                    entry,
                });
                true
            }
        }
    }

    /// Ask for the name of a new file.
    pub fn begin_create_file(&mut self) {
        self.state.menu = None;
        self.state.prompt = Some(Prompt::CreateFile {
            dir: self.state.current_path.clone(),
        });
    }

    /// Ask for the name of a new folder.
    pub fn begin_create_folder(&mut self) {
        self.state.menu = None;
        self.state.prompt = Some(Prompt::CreateFolder {
            dir: self.state.current_path.clone(),
        });
    }

    /// Create an empty file in the current directory. No-op for an empty name.
    pub fn create_file(&mut self, name: &str) -> bool {
        if name.is_empty() {
            return false;
        }
        let filepath = self.state.current_path.join(name);
        self.send(Request::CreateFile { filepath })
    }

    /// Create a folder in the current directory. No-op for an empty name.
    pub fn create_folder(&mut self, name: &str) -> bool {
        if name.is_empty() {
            return false;
        }
        let folderpath = self.state.current_path.join(name);
        self.send(Request::CreateFolder { folderpath })
    }

    /// Pending prompt, if any.
    pub fn prompt(&self) -> Option<&Prompt> {
        self.state.prompt.as_ref()
    }

    /// Answer the pending prompt.
    ///
    /// Text prompts use `answer`; a delete confirmation ignores it. Returns
    /// `true` if a request was sent.
    pub fn submit_prompt(&mut self, answer: &str) -> bool {
        let Some(prompt) = self.state.prompt.take() else {
            return false;
        };

        match prompt {
            Prompt::Rename { dir, entry } => self.rename_entry(&dir, &entry, answer),
            Prompt::ConfirmDelete { dir, entry } => self.delete_entry(&dir, &entry),
            Prompt::CreateFile { dir } if !answer.is_empty() => self.send(Request::CreateFile {
                filepath: dir.join(answer),
            }),
            Prompt::CreateFolder { dir } if !answer.is_empty() => {
                self.send(Request::CreateFolder {
                    folderpath: dir.join(answer),
                })
            }
            Prompt::CreateFile { .. } | Prompt::CreateFolder { .. } => false,
        }
    }

    /// Dismiss the pending prompt without sending anything.
    pub fn cancel_prompt(&mut self) {
        self.state.prompt = None;
    }

    fn open_selected(&mut self) -> bool {
        let Some(entry) = self.selected().cloned() else {
            return false;
        };
        if entry.is_dir() {
            self.open_directory(&entry.name)
        } else {
            self.open_file(&entry.name)
        }
    }

    fn rename_entry(&mut self, dir: &RemotePath, entry: &DirectoryEntry, new_name: &str) -> bool {
        if new_name.is_empty() || new_name == entry.name.as_str() {
            return false;
        }
        self.send(Request::Rename {
            old_path: dir.join(&entry.name),
            new_path: dir.join(new_name),
        })
    }

    fn delete_entry(&mut self, dir: &RemotePath, entry: &DirectoryEntry) -> bool {
        self.send(Request::DeleteFile {
            filepath: dir.join(&entry.name),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FOOTPRINT: MenuFootprint = MenuFootprint {
        width: 150,
        height: 150,
        margin: 10,
    };

    #[test]
    fn test_menu_fits() {
        let position = clamp_menu(Point::new(100, 100), Viewport::new(800, 600), FOOTPRINT);
        assert_eq!(position, Point::new(100, 100));
    }

    #[test]
    fn test_menu_clamped_right_and_bottom() {
        let position = clamp_menu(Point::new(700, 500), Viewport::new(800, 600), FOOTPRINT);
        assert_eq!(position, Point::new(640, 440));
    }

    #[test]
    fn test_menu_clamp_tiny_viewport() {
        let position = clamp_menu(Point::new(5, 5), Viewport::new(100, 100), FOOTPRINT);
        assert_eq!(position, Point::new(0, 0));
    }

    #[test]
    fn test_menu_labels() {
        use strum::IntoEnumIterator;
        let labels: Vec<_> = MenuAction::iter().map(MenuAction::label).collect();
        assert_eq!(labels, ["Open", "Edit", "Rename", "Delete"]);
    }
}
