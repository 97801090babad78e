//! Protocol errors.

use thiserror::Error;

/// Errors that can occur while encoding or decoding frames.
#[derive(Debug, Error)]
pub enum ProtoError {
    /// Frame was not valid JSON.
    #[error("Malformed frame: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },

    /// Frame was valid JSON but not an object.
    #[error("Frame is not a JSON object")]
    NotAnObject,

    /// A success response lacked a payload field.
    #[error("'{action}' response is missing field '{field}'")]
    MissingField {
        action: &'static str,
        field: &'static str,
    },
}

impl ProtoError {
    /// Create a missing field error.
    pub fn missing(action: &'static str, field: &'static str) -> Self {
        Self::MissingField { action, field }
    }
}
