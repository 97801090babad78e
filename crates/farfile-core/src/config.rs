//! Controller configuration types.

use std::time::Duration;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::RemotePath;

/// Size of the context menu and the gap kept from the viewport edge.
///
/// Units are whatever the frontend measures its viewport in (pixels for a
/// browser, cells for a terminal).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuFootprint {
    pub width: u32,
    pub height: u32,
    pub margin: u32,
}

impl Default for MenuFootprint {
    fn default() -> Self {
        Self {
            width: 150,
            height: 150,
            margin: 10,
        }
    }
}

/// Configuration for the file-browser controller.
#[derive(Debug, Clone, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct ControllerConfig {
    /// Directory listed on startup and by "home".
    #[builder(default = "RemotePath::home()")]
    #[serde(default)]
    pub home: RemotePath,

    /// How long success notices stay visible, in milliseconds.
    #[builder(default = "3000")]
    #[serde(default = "default_success_ms")]
    pub success_notice_ms: u64,

    /// How long error notices stay visible, in milliseconds.
    #[builder(default = "5000")]
    #[serde(default = "default_error_ms")]
    pub error_notice_ms: u64,

    /// Delay before retrying the startup listing when the channel was not
    /// yet open, in milliseconds.
    #[builder(default = "2000")]
    #[serde(default = "default_startup_retry_ms")]
    pub startup_retry_ms: u64,

    /// Context menu footprint used for viewport clamping.
    #[builder(default)]
    #[serde(default)]
    pub menu: MenuFootprint,
}

fn default_success_ms() -> u64 {
    3000
}

fn default_error_ms() -> u64 {
    5000
}

fn default_startup_retry_ms() -> u64 {
    2000
}

impl ControllerConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if self.success_notice_ms == Some(0) {
            return Err("Success notice duration must be positive".to_string());
        }
        if self.error_notice_ms == Some(0) {
            return Err("Error notice duration must be positive".to_string());
        }
        Ok(())
    }
}

impl ControllerConfig {
    /// Create a new config builder.
    pub fn builder() -> ControllerConfigBuilder {
        ControllerConfigBuilder::default()
    }

    /// Success notice lifetime.
    pub fn success_ttl(&self) -> Duration {
        Duration::from_millis(self.success_notice_ms)
    }

    /// Error notice lifetime.
    pub fn error_ttl(&self) -> Duration {
        Duration::from_millis(self.error_notice_ms)
    }

    /// Startup retry delay.
    pub fn startup_retry(&self) -> Duration {
        Duration::from_millis(self.startup_retry_ms)
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            home: RemotePath::home(),
            success_notice_ms: default_success_ms(),
            error_notice_ms: default_error_ms(),
            startup_retry_ms: default_startup_retry_ms(),
            menu: MenuFootprint::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = ControllerConfig::default();
        assert!(config.home.is_home());
        assert_eq!(config.success_ttl(), Duration::from_millis(3000));
        assert_eq!(config.error_ttl(), Duration::from_millis(5000));
        assert_eq!(config.startup_retry(), Duration::from_millis(2000));
        assert_eq!(config.menu, MenuFootprint::default());
    }

    #[test]
    fn test_config_builder() {
        let config = ControllerConfig::builder()
            .home(RemotePath::root())
            .error_notice_ms(8000u64)
            .build()
            .unwrap();

        assert!(config.home.is_root());
        assert_eq!(config.error_notice_ms, 8000);
        assert_eq!(config.success_notice_ms, 3000);
    }

    #[test]
    fn test_config_rejects_zero_ttl() {
        let result = ControllerConfig::builder().success_notice_ms(0u64).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_config_partial_deserialize() {
        let config: ControllerConfig = serde_json::from_str(r#"{"error_notice_ms": 100}"#).unwrap();
        assert_eq!(config.error_notice_ms, 100);
        assert_eq!(config.success_notice_ms, 3000);
        assert!(config.home.is_home());
    }
}
