//! User settings persisted to disk.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use farfile_core::ControllerConfig;

/// Server URL used when none is configured.
pub const DEFAULT_URL: &str = "ws://localhost:8000/ws/cpu/";

/// Environment variable holding the SSH password by default.
pub const DEFAULT_PASSWORD_ENV: &str = "FARFILE_PASSWORD";

/// Persisted user settings.
///
/// The SSH password is never stored here; it is read from the environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    /// WebSocket URL of the server.
    pub url: String,
    /// Color theme: "dark" or "light".
    pub theme: String,
    /// Default SSH connection details.
    pub ssh: SshDefaults,
    /// Controller tuning.
    pub controller: ControllerConfig,
}

/// SSH connection defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SshDefaults {
    pub host: String,
    pub port: u16,
    pub user: String,
}

impl Default for SshDefaults {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: 22,
            user: String::new(),
        }
    }
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            theme: "dark".to_string(),
            ssh: SshDefaults::default(),
            controller: ControllerConfig::default(),
        }
    }
}

impl UserSettings {
    /// Get the config file path.
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("farfile").join("settings.toml"))
    }

    /// Load settings from disk, or return defaults.
    pub fn load() -> Self {
        Self::config_path()
            .map(|path| Self::load_from(&path))
            .unwrap_or_default()
    }

    /// Load settings from `path`, or return defaults if it is missing or
    /// unreadable.
    pub fn load_from(path: &Path) -> Self {
        std::fs::read_to_string(path)
            .ok()
            .and_then(|content| toml::from_str(&content).ok())
            .unwrap_or_default()
    }

    /// Save settings to disk.
    pub fn save(&self) -> std::io::Result<()> {
        let path = Self::config_path().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, "No config directory")
        })?;
        self.save_to(&path)
    }

    /// Save settings to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = UserSettings::load_from(&dir.path().join("nope.toml"));
        assert_eq!(settings, UserSettings::default());
        assert_eq!(settings.url, DEFAULT_URL);
        assert_eq!(settings.ssh.port, 22);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("farfile").join("settings.toml");

        let mut settings = UserSettings::default();
        settings.url = "wss://example.org/ws/cpu/".to_string();
        settings.ssh.host = "example.org".to_string();
        settings.ssh.user = "deploy".to_string();
        settings.controller.error_notice_ms = 8000;
        settings.save_to(&path).unwrap();

        assert_eq!(UserSettings::load_from(&path), settings);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "[ssh]\nhost = \"box\"\n").unwrap();

        let settings = UserSettings::load_from(&path);
        assert_eq!(settings.ssh.host, "box");
        assert_eq!(settings.ssh.port, 22);
        assert_eq!(settings.url, DEFAULT_URL);
        assert_eq!(settings.controller.success_notice_ms, 3000);
    }

    #[test]
    fn test_unparseable_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "url = [").unwrap();
        assert_eq!(UserSettings::load_from(&path), UserSettings::default());
    }
}
