//! Inbound frame classification.

use serde_json::Value;

use crate::{DISCRIMINANT, ProtoError, Response, ResponseAction};

/// A classified inbound frame from the shared channel.
#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    /// A recognised file-browser response.
    Browser(Response),
    /// Carries the discriminant, but names an action the browser does not
    /// know.
    UnknownAction { action: String },
    /// No discriminant: traffic for some other consumer.
    Untagged(Value),
}

impl Frame {
    /// Parse and classify a text frame.
    ///
    /// Classification looks only at whether the discriminant is present
    /// and truthy; there is no session or request identifier.
    pub fn decode(text: &str) -> Result<Self, ProtoError> {
        let value: Value = serde_json::from_str(text)?;
        Self::classify(value)
    }

    /// Classify an already parsed JSON value.
    pub fn classify(value: Value) -> Result<Self, ProtoError> {
        if !value.is_object() {
            return Err(ProtoError::NotAnObject);
        }

        let action = match value.get(DISCRIMINANT) {
            Some(discriminant) if is_truthy(discriminant) => match discriminant {
                Value::String(action) => action.clone(),
                other => {
                    return Ok(Self::UnknownAction {
                        action: other.to_string(),
                    });
                }
            },
            _ => return Ok(Self::Untagged(value)),
        };

        match action.parse::<ResponseAction>() {
            Ok(known) => Ok(Self::Browser(Response::from_value(known, value)?)),
            Err(_) => Ok(Self::UnknownAction { action }),
        }
    }

    /// Check if the frame carries the discriminant.
    pub fn is_discriminated(&self) -> bool {
        !matches!(self, Self::Untagged(_))
    }
}

/// `null`, `false`, zero and `""` do not count as a discriminant.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
