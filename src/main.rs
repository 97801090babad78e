//! farfile - Browse and edit a remote filesystem from the terminal.
//!
//! Usage:
//!   farfile                  Launch interactive TUI
//!   farfile ls [PATH]        List a remote directory (text, json or html)
//!   farfile cat PATH         Print a remote file
//!   farfile --help           Show help

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Context, Result, bail, eyre};
use tokio::sync::mpsc;
use tokio::time::{Instant, timeout_at};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use farfile_controller::connection::{self, Connection};
use farfile_controller::{ChannelTransport, Controller, ListingBody, Notice, render_html};
use farfile_core::{Credential, RemotePath, SshTarget};
use farfile_proto::{Demultiplexer, Frame, Interest, Request, Response, ResponseAction, SharedFrame};
use farfile_tui::settings::DEFAULT_PASSWORD_ENV;
use farfile_tui::{TuiConfig, UserSettings};

/// Environment variable holding the log filter.
const LOG_ENV: &str = "FARFILE_LOG";

#[derive(Parser)]
#[command(
    name = "farfile",
    version,
    about = "Browse and edit a remote filesystem",
    long_about = "farfile talks to a farfile server over a WebSocket and browses the \
                  filesystem of an SSH host on your behalf.\n\n\
                  Launch the interactive TUI by running `farfile`, or use \
                  subcommands for quick operations."
)]
struct Cli {
    /// WebSocket URL of the server
    #[arg(long, global = true)]
    url: Option<String>,

    /// SSH host
    #[arg(long, global = true)]
    host: Option<String>,

    /// SSH port
    #[arg(short, long, global = true)]
    port: Option<u16>,

    /// SSH user
    #[arg(short, long, global = true)]
    user: Option<String>,

    /// Environment variable holding the SSH password
    #[arg(long, global = true, default_value = DEFAULT_PASSWORD_ENV)]
    password_env: String,

    /// Color theme (dark or light)
    #[arg(long)]
    theme: Option<String>,

    /// Save the connection options to the settings file
    #[arg(long)]
    save_settings: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// List a remote directory
    Ls {
        /// Directory to list
        #[arg(default_value = "~")]
        path: String,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Seconds to wait for the server
        #[arg(short, long, default_value = "10")]
        timeout: u64,
    },

    /// Print a remote file
    Cat {
        /// File to print
        path: String,

        /// Seconds to wait for the server
        #[arg(short, long, default_value = "10")]
        timeout: u64,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
    /// Escaped HTML fragment of the listing
    Html,
}

/// Connection details after merging settings and flags.
struct Target {
    url: String,
    credential: Credential,
    settings: UserSettings,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let mut settings = UserSettings::load();
    apply_overrides(&cli, &mut settings);

    if cli.save_settings {
        settings.save().context("Failed to save settings")?;
    }

    let target = Target {
        url: settings.url.clone(),
        credential: credential(&settings, &cli.password_env)?,
        settings,
    };

    match cli.command {
        Some(Command::Ls {
            path,
            format,
            timeout,
        }) => {
            init_logging(false)?;
            run_ls(&target, &path, format, Duration::from_secs(timeout))?;
        }
        Some(Command::Cat { path, timeout }) => {
            init_logging(false)?;
            run_cat(&target, &path, Duration::from_secs(timeout))?;
        }
        None => {
            init_logging(true)?;
            let config = TuiConfig::new(target.url, target.credential)
                .with_controller(target.settings.controller)
                .with_theme(target.settings.theme);
            farfile_tui::run_with_config(config)?;
        }
    }

    Ok(())
}

fn apply_overrides(cli: &Cli, settings: &mut UserSettings) {
    if let Some(url) = &cli.url {
        settings.url = url.clone();
    }
    if let Some(host) = &cli.host {
        settings.ssh.host = host.clone();
    }
    if let Some(port) = cli.port {
        settings.ssh.port = port;
    }
    if let Some(user) = &cli.user {
        settings.ssh.user = user.clone();
    }
    if let Some(theme) = &cli.theme {
        settings.theme = theme.clone();
    }
}

fn credential(settings: &UserSettings, password_env: &str) -> Result<Credential> {
    let password = std::env::var(password_env).unwrap_or_default();
    let target = SshTarget::builder()
        .host(settings.ssh.host.as_str())
        .port(settings.ssh.port)
        .user(settings.ssh.user.as_str())
        .password(password)
        .build()
        .context("Invalid SSH target (set --host and --user, or save them in the settings file)")?;
    Ok(Credential::ssh(&target)?)
}

/// Install the log subscriber. The TUI logs to a file so output does not
/// corrupt the terminal.
fn init_logging(to_file: bool) -> Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if to_file {
        let path = log_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;
        builder
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .try_init()
            .map_err(|e| eyre!(e))?;
    } else {
        builder
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|e| eyre!(e))?;
    }

    Ok(())
}

fn log_path() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("farfile")
        .join("farfile.log")
}

fn run_ls(target: &Target, path: &str, format: OutputFormat, timeout: Duration) -> Result<()> {
    let path = RemotePath::new(path).context("Invalid path")?;
    let rt = tokio::runtime::Runtime::new()?;

    rt.block_on(async {
        let (mut session, mut frames) = Session::open(target).await?;
        if !session.controller.request_listing(path) {
            bail!(session.last_error());
        }

        let response = wait_for(&mut frames, ResponseAction::DirectoryList, timeout).await?;
        session.controller.handle_response(response.clone());
        session.connection.close().await;

        let listing = match response {
            Response::DirectoryList(outcome) => outcome.map_err(|e| eyre!("Listing failed: {e}"))?,
            other => bail!("Unexpected response: {}", other.action()),
        };

        match format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&listing.items)?);
            }
            OutputFormat::Html => {
                println!("{}", render_html(&session.controller.view()));
            }
            OutputFormat::Text => {
                println!("{}", listing.path.as_str());
                if let ListingBody::Rows(rows) = session.controller.view().body {
                    for row in rows {
                        println!(
                            "{:<3}{:<40} {:>10} {}",
                            row.glyph.unwrap_or(""),
                            row.name,
                            row.size,
                            row.permissions
                        );
                    }
                }
            }
        }

        Ok(())
    })
}

fn run_cat(target: &Target, path: &str, timeout: Duration) -> Result<()> {
    let filepath = RemotePath::new(path).context("Invalid path")?;
    let rt = tokio::runtime::Runtime::new()?;

    rt.block_on(async {
        let (mut session, mut frames) = Session::open(target).await?;
        if !session.controller.send(Request::ReadFile { filepath }) {
            bail!(session.last_error());
        }

        let response = wait_for(&mut frames, ResponseAction::FileContent, timeout).await?;
        session.connection.close().await;

        match response {
            Response::FileContent(Ok(file)) => {
                print!("{}", file.content);
                Ok(())
            }
            Response::FileContent(Err(e)) => bail!("Read failed: {e}"),
            other => bail!("Unexpected response: {}", other.action()),
        }
    })
}

/// A connected controller for one-shot commands.
struct Session {
    controller: Controller<ChannelTransport>,
    connection: Connection,
}

impl Session {
    async fn open(target: &Target) -> Result<(Self, mpsc::Receiver<SharedFrame>)> {
        let mut demux = Demultiplexer::new();
        let frames = demux.subscribe("browser", Interest::Browser);

        let connection = connection::connect(&target.url, demux).await?;
        info!(url = %target.url, "Connected");

        let controller = Controller::new(
            connection.transport(),
            target.credential.clone(),
            target.settings.controller.clone(),
        );

        Ok((
            Self {
                controller,
                connection,
            },
            frames,
        ))
    }

    fn last_error(&self) -> String {
        self.controller
            .state()
            .notices
            .latest()
            .map(Notice::text)
            .unwrap_or_else(|| "Request was not sent".to_string())
    }
}

/// Wait for the first response to `action`, ignoring everything else.
async fn wait_for(
    frames: &mut mpsc::Receiver<SharedFrame>,
    action: ResponseAction,
    timeout: Duration,
) -> Result<Response> {
    let deadline = Instant::now() + timeout;

    loop {
        let frame = timeout_at(deadline, frames.recv())
            .await
            .with_context(|| format!("Timed out waiting for {action}"))?
            .ok_or_else(|| eyre!("Connection closed before {action} arrived"))?;

        match &*frame {
            Frame::Browser(response) if response.action() == action => {
                return Ok(response.clone());
            }
            other => debug!(?other, "Skipping frame"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ls_accepts_html_format() {
        let cli = Cli::try_parse_from(["farfile", "ls", "/srv", "--format", "html"]).unwrap();
        match cli.command {
            Some(Command::Ls { path, format, .. }) => {
                assert_eq!(path, "/srv");
                assert!(matches!(format, OutputFormat::Html));
            }
            _ => panic!("expected ls"),
        }
    }
}
