//! Error types for core values.

use thiserror::Error;

/// Errors raised while constructing core values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A remote path was empty.
    #[error("Remote path cannot be empty")]
    EmptyPath,

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Credential could not be encoded.
    #[error("Invalid credential: {message}")]
    InvalidCredential { message: String },
}

impl CoreError {
    /// Create an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}
