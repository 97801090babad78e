//! The browser controller.
//!
//! [`Controller`] owns the client-side state and turns user intents into
//! requests on a [`Transport`]. Responses arrive later through
//! [`Controller::handle_frame`]; they carry only an action name and a
//! status, so the controller applies each one at face value.
//!
//! Behaviour is split across sibling modules by concern: navigation,
//! selection and prompts, the editor session, and post-mutation
//! reconciliation.

use std::time::Instant;

use tracing::{debug, trace, warn};

use farfile_core::{ControllerConfig, Credential};
use farfile_proto::{Frame, Request, Response};

use crate::notice::NoticeKind;
use crate::state::ControllerState;
use crate::transport::{Transport, TransportError};
use crate::view::{self, BrowserView};

/// What happened to the initial listing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// The channel was open and the listing was sent.
    Sent,
    /// The channel was not open yet; call [`Controller::retry_start`] after
    /// [`ControllerConfig::startup_retry`].
    Deferred,
}

/// Client-side controller for a remote file browser.
pub struct Controller<T> {
    pub(crate) transport: T,
    pub(crate) credential: Credential,
    pub(crate) config: ControllerConfig,
    pub(crate) state: ControllerState,
}

impl<T: Transport> Controller<T> {
    /// Create a controller. Nothing is sent until [`Controller::start`].
    pub fn new(transport: T, credential: Credential, config: ControllerConfig) -> Self {
        let state = ControllerState::new(config.home.clone());
        Self {
            transport,
            credential,
            config,
            state,
        }
    }

    /// Request the initial listing of the home directory.
    ///
    /// When the channel is not open yet nothing is sent and no notice is
    /// posted; the driver should retry once after the startup delay.
    pub fn start(&mut self) -> StartOutcome {
        if !self.transport.is_open() {
            debug!("Channel not open at startup, deferring initial listing");
            return StartOutcome::Deferred;
        }
        self.go_home();
        StartOutcome::Sent
    }

    /// Deferred startup attempt. Goes through the normal not-connected path.
    pub fn retry_start(&mut self) -> bool {
        self.go_home()
    }

    /// Encode and send a request.
    ///
    /// Returns `true` if the request was handed to the transport. When the
    /// channel is not open an error notice is posted and nothing is sent.
    pub fn send(&mut self, request: Request) -> bool {
        if !self.transport.is_open() {
            warn!(action = request.action(), "Dropping request, channel not open");
            self.post_error(TransportError::NotOpen.to_string());
            return false;
        }

        let text = match request.encode(&self.credential) {
            Ok(text) => text,
            Err(e) => {
                warn!(action = request.action(), error = %e, "Failed to encode request");
                self.post_error(e.to_string());
                return false;
            }
        };

        match self.transport.send(text) {
            Ok(()) => {
                debug!(action = request.action(), "Sent request");
                true
            }
            Err(e) => {
                warn!(action = request.action(), error = %e, "Transport rejected request");
                self.post_error(e.to_string());
                false
            }
        }
    }

    /// Apply an inbound frame. Returns `true` if state changed.
    pub fn handle_frame(&mut self, frame: &Frame) -> bool {
        match frame {
            Frame::Browser(response) => {
                self.handle_response(response.clone());
                true
            }
            Frame::UnknownAction { action } => {
                debug!(%action, "Ignoring unrecognised action");
                false
            }
            Frame::Untagged(_) => {
                trace!("Ignoring untagged frame");
                false
            }
        }
    }

    /// Apply a decoded file-browser response.
    pub fn handle_response(&mut self, response: Response) {
        if let Some(failure) = response.failure() {
            warn!(action = %response.action(), message = %failure, "Remote operation failed");
        }

        match response {
            Response::DirectoryList(outcome) => self.on_listing(outcome),
            Response::FileContent(outcome) => self.on_file_content(outcome),
            other => {
                let action = other.action();
                let failure = other.failure().cloned();
                self.on_mutation(action, failure);
            }
        }
    }

    /// Drop expired notices. Returns `true` if any were removed.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.state.notices.expire(now) > 0
    }

    /// When the next notice expires, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.state.notices.next_deadline()
    }

    /// Compute the current view.
    pub fn view(&self) -> BrowserView {
        view::render(&self.state)
    }

    /// Current state.
    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    /// Controller configuration.
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// The underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub(crate) fn post_success(&mut self, message: impl Into<String>) {
        let ttl = self.config.success_ttl();
        self.state
            .notices
            .post(NoticeKind::Success, message, ttl, Instant::now());
    }

    pub(crate) fn post_error(&mut self, message: impl Into<String>) {
        let ttl = self.config.error_ttl();
        self.state
            .notices
            .post(NoticeKind::Error, message, ttl, Instant::now());
    }
}

impl<T> std::fmt::Debug for Controller<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Controller")
            .field("current_path", &self.state.current_path)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
