//! Directory entries as reported by the remote peer.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Kind of a directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Directory,
}

impl EntryKind {
    /// Check if this is a directory.
    pub fn is_dir(self) -> bool {
        matches!(self, Self::Directory)
    }

    /// Noun used when talking to the user about this kind.
    pub fn noun(self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Directory => "folder",
        }
    }
}

/// Size of an entry.
///
/// On the wire this is either a number or a string. `"-"` marks entries
/// without a meaningful size; any other non-numeric string is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "WireSize", into = "WireSize")]
pub enum EntrySize {
    /// Size in bytes.
    Bytes(u64),
    /// No size (`"-"`).
    #[default]
    Unsized,
    /// Unrecognized size text, passed through unchanged.
    Opaque(String),
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum WireSize {
    Number(u64),
    Text(String),
}

impl From<WireSize> for EntrySize {
    fn from(raw: WireSize) -> Self {
        match raw {
            WireSize::Number(n) => Self::Bytes(n),
            WireSize::Text(text) if text == "-" => Self::Unsized,
            WireSize::Text(text) => match text.trim().parse::<u64>() {
                Ok(n) => Self::Bytes(n),
                Err(_) => Self::Opaque(text),
            },
        }
    }
}

impl From<EntrySize> for WireSize {
    fn from(size: EntrySize) -> Self {
        match size {
            EntrySize::Bytes(n) => Self::Number(n),
            EntrySize::Unsized => Self::Text("-".to_string()),
            EntrySize::Opaque(text) => Self::Text(text),
        }
    }
}

/// A single entry of a remote directory listing.
///
/// Entries are immutable snapshots; a new listing replaces them wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    /// Entry name (no path components).
    pub name: CompactString,
    /// File or directory.
    #[serde(rename = "type")]
    pub kind: EntryKind,
    /// Size as reported by the peer.
    #[serde(default)]
    pub size: EntrySize,
    /// Permission string as reported by the peer (e.g. `drwxr-xr-x`).
    #[serde(default)]
    pub permissions: String,
}

impl DirectoryEntry {
    /// Create a file entry.
    pub fn file(name: impl Into<CompactString>, size: u64, permissions: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::File,
            size: EntrySize::Bytes(size),
            permissions: permissions.into(),
        }
    }

    /// Create a directory entry.
    pub fn directory(name: impl Into<CompactString>, permissions: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::Directory,
            size: EntrySize::Unsized,
            permissions: permissions.into(),
        }
    }

    /// Check if this entry is a directory.
    pub fn is_dir(&self) -> bool {
        self.kind.is_dir()
    }
}
