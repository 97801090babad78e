//! Remote path handling.
//!
//! Remote paths are plain strings interpreted by the peer. The client never
//! normalizes them; it only concatenates names and strips trailing segments.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Marker for the remote user's home directory.
pub const HOME: &str = "~";

/// The remote filesystem root.
pub const ROOT: &str = "/";

/// A non-empty path on the remote filesystem.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RemotePath(String);

impl RemotePath {
    /// Create a remote path, rejecting the empty string.
    pub fn new(path: impl Into<String>) -> Result<Self, CoreError> {
        let path = path.into();
        if path.is_empty() {
            return Err(CoreError::EmptyPath);
        }
        Ok(Self(path))
    }

    /// The home directory marker.
    pub fn home() -> Self {
        Self(HOME.to_string())
    }

    /// The filesystem root.
    pub fn root() -> Self {
        Self(ROOT.to_string())
    }

    /// Get the path as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if this is the home marker.
    pub fn is_home(&self) -> bool {
        self.0 == HOME
    }

    /// Check if this is the root.
    pub fn is_root(&self) -> bool {
        self.0 == ROOT
    }

    /// Append a child name with a `/` separator.
    ///
    /// The name is not sanitized; the remote peer decides whether the
    /// resulting path is valid.
    pub fn join(&self, name: &str) -> Self {
        Self(format!("{}/{}", self.0, name))
    }

    /// Path one level up, or `None` at the home marker or root.
    ///
    /// Strips the last `/`-delimited segment. A path that becomes empty
    /// after stripping resolves to the root.
    pub fn parent(&self) -> Option<Self> {
        if self.is_home() || self.is_root() {
            return None;
        }

        match self.0.rfind('/') {
            Some(0) | None => Some(Self::root()),
            Some(idx) => Some(Self(self.0[..idx].to_string())),
        }
    }

    /// The last segment of the path.
    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }
}

impl Default for RemotePath {
    fn default() -> Self {
        Self::home()
    }
}

impl fmt::Display for RemotePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RemotePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RemotePath {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for RemotePath {
    type Error = CoreError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RemotePath> for String {
    fn from(path: RemotePath) -> Self {
        path.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(s: &str) -> RemotePath {
        RemotePath::new(s).unwrap()
    }

    #[test]
    fn test_empty_path_rejected() {
        assert_eq!(RemotePath::new(""), Err(CoreError::EmptyPath));
    }

    #[test]
    fn test_join_concatenates() {
        assert_eq!(RemotePath::home().join("projects").as_str(), "~/projects");
        assert_eq!(path("/var").join("log").as_str(), "/var/log");
        // No normalization happens client-side
        assert_eq!(RemotePath::root().join("etc").as_str(), "//etc");
    }

    #[test]
    fn test_parent() {
        assert_eq!(RemotePath::home().parent(), None);
        assert_eq!(RemotePath::root().parent(), None);
        assert_eq!(path("~/projects").parent(), Some(RemotePath::home()));
        assert_eq!(path("~/a/b").parent(), Some(path("~/a")));
        assert_eq!(path("/etc").parent(), Some(RemotePath::root()));
        assert_eq!(path("/var/log").parent(), Some(path("/var")));
        assert_eq!(path("relative").parent(), Some(RemotePath::root()));
    }

    #[test]
    fn test_file_name() {
        assert_eq!(path("~/a/notes.txt").file_name(), "notes.txt");
        assert_eq!(RemotePath::home().file_name(), "~");
    }

    #[test]
    fn test_serde_rejects_empty() {
        let parsed: Result<RemotePath, _> = serde_json::from_str("\"\"");
        assert!(parsed.is_err());
        let parsed: RemotePath = serde_json::from_str("\"/home/me\"").unwrap();
        assert_eq!(parsed.as_str(), "/home/me");
    }
}
