//! Inbound responses.

use std::fmt;

use serde::Deserialize;
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use farfile_core::{DirectoryEntry, RemotePath};

use crate::ProtoError;

/// Wire status value marking success. Anything else is a failure.
const STATUS_SUCCESS: &str = "success";

/// Message used when a failure response carries none.
const UNKNOWN_ERROR: &str = "unknown error";

/// Response action names recognised by the file browser.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum ResponseAction {
    DirectoryList,
    FileContent,
    FileWritten,
    FileDeleted,
    FileCreated,
    FolderCreated,
    ItemRenamed,
}

impl ResponseAction {
    /// Wire name of the action.
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// A failure reported by the remote peer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFailure {
    /// Human-readable message from the peer.
    pub message: String,
}

impl RemoteFailure {
    /// Create a remote failure.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for RemoteFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for RemoteFailure {}

/// Result of a remote operation.
pub type Outcome<T> = Result<T, RemoteFailure>;

/// Payload of a successful `directory_list` response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    /// Path as reported (and possibly normalized) by the peer.
    pub path: RemotePath,
    /// Entries in peer order.
    pub items: Vec<DirectoryEntry>,
}

/// Payload of a successful `file_content` response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileContent {
    pub filepath: RemotePath,
    pub content: String,
}

/// A decoded file-browser response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    DirectoryList(Outcome<Listing>),
    FileContent(Outcome<FileContent>),
    FileWritten(Outcome<()>),
    FileDeleted(Outcome<()>),
    FileCreated(Outcome<()>),
    FolderCreated(Outcome<()>),
    ItemRenamed(Outcome<()>),
}

impl Response {
    /// The action this response answers.
    pub fn action(&self) -> ResponseAction {
        match self {
            Self::DirectoryList(_) => ResponseAction::DirectoryList,
            Self::FileContent(_) => ResponseAction::FileContent,
            Self::FileWritten(_) => ResponseAction::FileWritten,
            Self::FileDeleted(_) => ResponseAction::FileDeleted,
            Self::FileCreated(_) => ResponseAction::FileCreated,
            Self::FolderCreated(_) => ResponseAction::FolderCreated,
            Self::ItemRenamed(_) => ResponseAction::ItemRenamed,
        }
    }

    /// Get the failure, if the peer reported one.
    pub fn failure(&self) -> Option<&RemoteFailure> {
        match self {
            Self::DirectoryList(Err(e)) | Self::FileContent(Err(e)) => Some(e),
            Self::FileWritten(Err(e))
            | Self::FileDeleted(Err(e))
            | Self::FileCreated(Err(e))
            | Self::FolderCreated(Err(e))
            | Self::ItemRenamed(Err(e)) => Some(e),
            _ => None,
        }
    }

    /// Decode a response from a JSON object whose action is already known.
    pub(crate) fn from_value(
        action: ResponseAction,
        value: serde_json::Value,
    ) -> Result<Self, ProtoError> {
        let raw: RawResponse = serde_json::from_value(value)?;

        let outcome = if raw.status.as_deref() == Some(STATUS_SUCCESS) {
            Ok(())
        } else {
            Err(RemoteFailure::new(
                raw.message.unwrap_or_else(|| UNKNOWN_ERROR.to_string()),
            ))
        };

        let action_name = action.as_str();
        let response = match action {
            ResponseAction::DirectoryList => Self::DirectoryList(match outcome {
                Ok(()) => Ok(Listing {
                    path: raw.path.ok_or(ProtoError::missing(action_name, "path"))?,
                    items: raw.items.ok_or(ProtoError::missing(action_name, "items"))?,
                }),
                Err(e) => Err(e),
            }),
            ResponseAction::FileContent => Self::FileContent(match outcome {
                Ok(()) => Ok(FileContent {
                    filepath: raw
                        .filepath
                        .ok_or(ProtoError::missing(action_name, "filepath"))?,
                    content: raw
                        .content
                        .ok_or(ProtoError::missing(action_name, "content"))?,
                }),
                Err(e) => Err(e),
            }),
            ResponseAction::FileWritten => Self::FileWritten(outcome),
            ResponseAction::FileDeleted => Self::FileDeleted(outcome),
            ResponseAction::FileCreated => Self::FileCreated(outcome),
            ResponseAction::FolderCreated => Self::FolderCreated(outcome),
            ResponseAction::ItemRenamed => Self::ItemRenamed(outcome),
        };

        Ok(response)
    }
}

/// Loose wire form; which fields matter depends on the action.
#[derive(Deserialize)]
struct RawResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    path: Option<RemotePath>,
    #[serde(default)]
    items: Option<Vec<DirectoryEntry>>,
    #[serde(default)]
    filepath: Option<RemotePath>,
    #[serde(default)]
    content: Option<String>,
}
