//! The single open editor session.

use farfile_core::RemotePath;
use farfile_proto::{FileContent, Outcome, Request};

use crate::controller::Controller;
use crate::transport::Transport;

/// A remote file loaded into an edit buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorSession {
    path: RemotePath,
    buffer: String,
}

impl EditorSession {
    /// Open a session on `path` with the fetched content.
    pub fn new(path: RemotePath, content: String) -> Self {
        Self {
            path,
            buffer: content,
        }
    }

    /// Remote path being edited.
    pub fn path(&self) -> &RemotePath {
        &self.path
    }

    /// Current buffer, including unsaved edits.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Mutable access to the buffer.
    pub fn buffer_mut(&mut self) -> &mut String {
        &mut self.buffer
    }

    /// Replace the whole buffer.
    pub fn set_buffer(&mut self, content: impl Into<String>) {
        self.buffer = content.into();
    }
}

impl<T: Transport> Controller<T> {
    /// Ask the peer for the content of a file in the current directory.
    pub fn open_file(&mut self, name: &str) -> bool {
        let filepath = self.state.current_path.join(name);
        self.send(Request::ReadFile { filepath })
    }

    /// Apply a `file_content` response. Replaces any open session.
    pub fn on_file_content(&mut self, outcome: Outcome<FileContent>) {
        match outcome {
            Ok(FileContent { filepath, content }) => {
                self.state.editor = Some(EditorSession::new(filepath, content));
            }
            Err(failure) => self.post_error(failure.message),
        }
    }

    /// Open session, if any.
    pub fn editor(&self) -> Option<&EditorSession> {
        self.state.editor.as_ref()
    }

    /// Mutable access to the open session.
    pub fn editor_mut(&mut self) -> Option<&mut EditorSession> {
        self.state.editor.as_mut()
    }

    /// Send the buffer to the peer. The session stays open until the write
    /// is acknowledged.
    pub fn save(&mut self) -> bool {
        let Some(session) = &self.state.editor else {
            return false;
        };
        let request = Request::WriteFile {
            filepath: session.path.clone(),
            content: session.buffer.clone(),
        };
        self.send(request)
    }

    /// Discard the session and its unsaved edits.
    pub fn close_editor(&mut self) {
        self.state.editor = None;
    }
}
