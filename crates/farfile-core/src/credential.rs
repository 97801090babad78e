//! Connection credential attached to outbound requests.

use std::fmt;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Opaque authentication payload sent as `ssh_data` with every request.
///
/// The controller never inspects or validates it.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credential(serde_json::Value);

impl Credential {
    /// Wrap an arbitrary JSON payload.
    pub fn from_value(value: serde_json::Value) -> Self {
        Self(value)
    }

    /// Build a credential from SSH connection details.
    pub fn ssh(target: &SshTarget) -> Result<Self, CoreError> {
        serde_json::to_value(target)
            .map(Self)
            .map_err(|e| CoreError::InvalidCredential {
                message: e.to_string(),
            })
    }

    /// Get the raw payload.
    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// SSH connection details understood by the remote backend.
#[derive(Clone, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct SshTarget {
    /// Host name or address.
    pub host: String,

    /// SSH port.
    #[builder(default = "22")]
    #[serde(default = "default_port")]
    pub port: u16,

    /// Login user.
    pub user: String,

    /// Login password.
    #[builder(default)]
    #[serde(default)]
    pub password: String,
}

fn default_port() -> u16 {
    22
}

impl SshTargetBuilder {
    fn validate(&self) -> Result<(), String> {
        match self.host.as_deref() {
            Some(host) if !host.trim().is_empty() => {}
            _ => return Err("Host is required".to_string()),
        }
        match self.user.as_deref() {
            Some(user) if !user.trim().is_empty() => {}
            _ => return Err("User is required".to_string()),
        }
        Ok(())
    }
}

impl SshTarget {
    /// Create a new builder.
    pub fn builder() -> SshTargetBuilder {
        SshTargetBuilder::default()
    }
}

impl fmt::Debug for SshTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SshTarget")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}
