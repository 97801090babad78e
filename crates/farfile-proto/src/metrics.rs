//! Frames from the metrics stream sharing the channel.
//!
//! The metrics producer emits untagged frames: `{"cpu": "12.3%"}` while
//! monitoring, or `{"status": "error", "message": ...}` when it fails.

use serde_json::Value;

use crate::Frame;

/// A decoded metrics frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetricsEvent {
    /// Current CPU usage, as formatted by the producer.
    Cpu(String),
    /// The producer reported an error.
    Error(String),
}

impl MetricsEvent {
    /// Decode a metrics event from an untagged frame.
    ///
    /// Returns `None` for discriminated frames and unrecognized payloads.
    pub fn from_frame(frame: &Frame) -> Option<Self> {
        match frame {
            Frame::Untagged(value) => Self::from_value(value),
            _ => None,
        }
    }

    /// Decode a metrics event from a JSON object.
    pub fn from_value(value: &Value) -> Option<Self> {
        if value.get("status").and_then(Value::as_str) == Some("error") {
            let message = value
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("unknown error");
            return Some(Self::Error(message.to_string()));
        }

        value
            .get("cpu")
            .and_then(Value::as_str)
            .filter(|cpu| !cpu.is_empty())
            .map(|cpu| Self::Cpu(cpu.to_string()))
    }
}
