//! The outbound side of the shared channel.

use thiserror::Error;
use tokio::sync::{mpsc, watch};

/// Lifecycle of the shared channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChannelState {
    #[default]
    Connecting,
    Open,
    Closed,
}

/// Errors raised when handing a frame to the transport.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The channel is not open.
    #[error("Not connected to server")]
    NotOpen,

    /// The connection task has gone away.
    #[error("Connection closed")]
    Disconnected,
}

/// A message-in/message-out channel with an open/closed state.
///
/// Sending is fire-and-forget: a successful `send` only means the frame was
/// handed to the channel, never that the peer processed it.
pub trait Transport {
    /// Check if the channel is currently open.
    fn is_open(&self) -> bool;

    /// Queue a text frame for delivery.
    fn send(&self, text: String) -> Result<(), TransportError>;
}

/// Transport backed by tokio channels.
///
/// The connection task (or a test) holds the matching [`ChannelEnd`].
#[derive(Debug, Clone)]
pub struct ChannelTransport {
    outbound: mpsc::UnboundedSender<String>,
    state: watch::Receiver<ChannelState>,
}

/// The far side of a [`ChannelTransport`].
#[derive(Debug)]
pub struct ChannelEnd {
    /// Frames queued by the controller.
    pub outbound: mpsc::UnboundedReceiver<String>,
    /// Publishes the channel state to every transport clone.
    pub state: watch::Sender<ChannelState>,
}

impl ChannelTransport {
    /// Create a connected transport/end pair.
    pub fn new(initial: ChannelState) -> (Self, ChannelEnd) {
        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(initial);
        (
            Self {
                outbound: outbound_tx,
                state: state_rx,
            },
            ChannelEnd {
                outbound: outbound_rx,
                state: state_tx,
            },
        )
    }

    /// Current channel state.
    pub fn state(&self) -> ChannelState {
        *self.state.borrow()
    }

    /// Subscribe to channel state changes.
    pub fn watch_state(&self) -> watch::Receiver<ChannelState> {
        self.state.clone()
    }
}

impl Transport for ChannelTransport {
    fn is_open(&self) -> bool {
        self.state() == ChannelState::Open
    }

    fn send(&self, text: String) -> Result<(), TransportError> {
        if !self.is_open() {
            return Err(TransportError::NotOpen);
        }
        self.outbound
            .send(text)
            .map_err(|_| TransportError::Disconnected)
    }
}

impl ChannelEnd {
    /// Publish a new channel state.
    pub fn set_state(&self, state: ChannelState) {
        self.state.send_replace(state);
    }

    /// Take every frame queued so far without waiting.
    pub fn drain(&mut self) -> Vec<String> {
        let mut frames = Vec::new();
        while let Ok(text) = self.outbound.try_recv() {
            frames.push(text);
        }
        frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_when_open() {
        let (transport, mut end) = ChannelTransport::new(ChannelState::Open);
        assert!(transport.is_open());
        transport.send("hello".to_string()).unwrap();
        assert_eq!(end.drain(), ["hello"]);
    }

    #[test]
    fn test_send_when_not_open() {
        let (transport, mut end) = ChannelTransport::new(ChannelState::Connecting);
        assert_eq!(transport.send("x".to_string()), Err(TransportError::NotOpen));
        assert!(end.drain().is_empty());
    }

    #[test]
    fn test_state_shared_between_clones() {
        let (transport, end) = ChannelTransport::new(ChannelState::Connecting);
        let clone = transport.clone();
        end.set_state(ChannelState::Open);
        assert!(transport.is_open());
        assert!(clone.is_open());
        end.set_state(ChannelState::Closed);
        assert!(!clone.is_open());
    }

    #[test]
    fn test_disconnected_end() {
        let (transport, end) = ChannelTransport::new(ChannelState::Open);
        let ChannelEnd { outbound, state } = end;
        drop(outbound);
        assert_eq!(
            transport.send("x".to_string()),
            Err(TransportError::Disconnected)
        );
        drop(state);
    }
}
