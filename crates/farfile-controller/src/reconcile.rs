//! Reconciliation after mutating operations.
//!
//! The controller never applies a mutation locally. On success it posts a
//! notice and re-lists the current path once; the listing that comes back
//! is the new truth.

use farfile_proto::{RemoteFailure, ResponseAction};
use tracing::debug;

use crate::constants::{CREATED, DELETED, RENAMED, SAVED};
use crate::controller::Controller;
use crate::transport::Transport;

/// Success message for a mutation acknowledgement.
pub fn success_message(action: ResponseAction) -> Option<&'static str> {
    match action {
        ResponseAction::FileWritten => Some(SAVED),
        ResponseAction::FileDeleted => Some(DELETED),
        ResponseAction::FileCreated | ResponseAction::FolderCreated => Some(CREATED),
        ResponseAction::ItemRenamed => Some(RENAMED),
        ResponseAction::DirectoryList | ResponseAction::FileContent => None,
    }
}

impl<T: Transport> Controller<T> {
    /// Apply a mutation acknowledgement.
    pub fn on_mutation(&mut self, action: ResponseAction, failure: Option<RemoteFailure>) {
        let Some(message) = success_message(action) else {
            debug!(%action, "Not a mutation acknowledgement");
            return;
        };

        if let Some(failure) = failure {
            self.post_error(failure.message);
            return;
        }

        self.post_success(message);
        if action == ResponseAction::FileWritten {
            self.close_editor();
        }
        self.refresh();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_messages() {
        assert_eq!(
            success_message(ResponseAction::FileWritten),
            Some("File saved successfully!")
        );
        assert_eq!(
            success_message(ResponseAction::FolderCreated),
            Some("Created successfully!")
        );
        assert_eq!(success_message(ResponseAction::DirectoryList), None);
    }
}
