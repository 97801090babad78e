//! Tests for the public TUI configuration surface.

use farfile_core::{ControllerConfig, Credential, RemotePath};
use farfile_tui::settings::DEFAULT_URL;
use farfile_tui::{Theme, TuiConfig, UserSettings};
use serde_json::json;

fn credential() -> Credential {
    Credential::from_value(json!({"host": "example.org", "user": "deploy"}))
}

#[test]
fn test_tui_config_defaults() {
    let config = TuiConfig::new(DEFAULT_URL, credential());
    assert_eq!(config.url, "ws://localhost:8000/ws/cpu/");
    assert_eq!(config.theme, "dark");
    assert_eq!(config.controller, ControllerConfig::default());
}

#[test]
fn test_tui_config_from_settings() {
    let mut settings = UserSettings::default();
    settings.theme = "light".to_string();
    settings.controller.home = RemotePath::root();

    let config = TuiConfig::new(settings.url.clone(), credential())
        .with_controller(settings.controller.clone())
        .with_theme(settings.theme.clone());

    assert!(config.controller.home.is_root());
    assert_eq!(Theme::from_name(&config.theme).variant, Theme::light().variant);
}

#[test]
fn test_settings_round_trip_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.toml");

    let mut settings = UserSettings::default();
    settings.ssh.host = "box".to_string();
    settings.ssh.port = 2222;
    settings.controller.success_notice_ms = 1500;
    settings.save_to(&path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("host = \"box\""));
    assert!(!text.contains("password"));

    let loaded = UserSettings::load_from(&path);
    assert_eq!(loaded.ssh.port, 2222);
    assert_eq!(loaded.controller.success_notice_ms, 1500);
}

#[test]
fn test_garbage_settings_fall_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.toml");
    std::fs::write(&path, "this is = = not toml").unwrap();

    assert_eq!(UserSettings::load_from(&path), UserSettings::default());
}
