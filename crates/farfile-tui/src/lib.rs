//! Terminal user interface for farfile.
//!
//! This crate provides an interactive TUI for browsing and editing files on
//! a remote host through a farfile server, built with ratatui.
//!
//! # Usage
//!
//! ```rust,no_run
//! use farfile_core::Credential;
//! use serde_json::json;
//!
//! let credential = Credential::from_value(json!({"host": "example.com", "user": "me"}));
//! farfile_tui::run("ws://localhost:8000/ws/cpu/", credential).unwrap();
//! ```
//!
//! # Keyboard Navigation
//!
//! - `j`/`k` - Move down/up
//! - `Enter`/`l` - Open directory or file
//! - `Backspace`/`h` - Parent directory
//! - `~` - Home directory
//! - `a`/`A` - New file/folder
//! - `e` - Edit, `r` - Rename, `d` - Delete
//! - `m` - Context menu
//! - `R` - Refresh
//! - `q` - Quit
//!
//! In the editor, `Ctrl-S` saves and `Esc` closes.

pub mod app;
mod event;
pub mod settings;
mod theme;
mod ui;

use std::time::Duration;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;

use farfile_core::{ControllerConfig, Credential};

pub use app::{App, AppResult};
pub use settings::UserSettings;
pub use theme::Theme;

/// Configuration for a TUI session.
#[derive(Debug, Clone)]
pub struct TuiConfig {
    /// WebSocket URL of the server.
    pub url: String,
    /// Opaque payload attached to every request.
    pub credential: Credential,
    pub controller: ControllerConfig,
    /// Theme name, "dark" or "light".
    pub theme: String,
}

impl TuiConfig {
    /// Create a config with default controller settings and the dark theme.
    pub fn new(url: impl Into<String>, credential: Credential) -> Self {
        Self {
            url: url.into(),
            credential,
            controller: ControllerConfig::default(),
            theme: "dark".to_string(),
        }
    }

    /// Use `controller` settings. The menu footprint is always measured in
    /// terminal cells.
    pub fn with_controller(mut self, controller: ControllerConfig) -> Self {
        self.controller = controller;
        self
    }

    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = theme.into();
        self
    }
}

/// Run the TUI against `url` with default settings.
pub fn run(url: &str, credential: Credential) -> AppResult<()> {
    run_with_config(TuiConfig::new(url, credential))
}

/// Run the TUI application.
pub fn run_with_config(mut config: TuiConfig) -> AppResult<()> {
    config.controller.menu = app::MENU_FOOTPRINT;

    // Create tokio runtime for the connection and event loop
    let rt = tokio::runtime::Runtime::new()?;

    let terminal = ratatui::init();
    execute!(std::io::stdout(), EnableMouseCapture)?;

    let result = rt.block_on(async move { App::connect(config).run(terminal).await });

    // Best effort: the terminal is restored either way
    let _ = execute!(std::io::stdout(), DisableMouseCapture);
    ratatui::restore();

    // Shutdown runtime immediately to cancel background tasks
    rt.shutdown_timeout(Duration::from_millis(100));

    result
}
