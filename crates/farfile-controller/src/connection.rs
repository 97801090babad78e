//! WebSocket connection driving the shared channel.
//!
//! One task owns the socket. It forwards text queued on the
//! [`ChannelTransport`] to the peer and hands every inbound text frame to
//! the [`Demultiplexer`]. When the socket ends the channel state flips to
//! [`ChannelState::Closed`]; there is no reconnection.

use futures::{Sink, SinkExt, Stream, StreamExt};
use thiserror::Error;
use tokio::task::JoinHandle;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::{self, Message};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use farfile_proto::Demultiplexer;

use crate::transport::{ChannelEnd, ChannelState, ChannelTransport};

/// Errors raised while opening the connection.
#[derive(Debug, Error)]
pub enum ConnectError {
    #[error("Failed to connect to {url}: {source}")]
    Connect {
        url: String,
        #[source]
        source: Box<tungstenite::Error>,
    },
}

/// A running connection.
#[derive(Debug)]
pub struct Connection {
    transport: ChannelTransport,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

/// Connect to `url` and wait for the handshake to finish.
pub async fn connect(url: &str, demux: Demultiplexer) -> Result<Connection, ConnectError> {
    let (socket, _) = connect_async(url)
        .await
        .map_err(|e| ConnectError::Connect {
            url: url.to_string(),
            source: Box::new(e),
        })?;
    info!(%url, "Connected");

    let (transport, end) = ChannelTransport::new(ChannelState::Open);
    let cancel = CancellationToken::new();
    let task = tokio::spawn(pump(socket, end, demux, cancel.clone()));

    Ok(Connection {
        transport,
        cancel,
        task,
    })
}

/// Start connecting to `url` in the background.
///
/// Returns immediately with the channel in [`ChannelState::Connecting`].
/// A failed handshake is logged and leaves the channel closed.
pub fn spawn(url: impl Into<String>, demux: Demultiplexer) -> Connection {
    let url = url.into();
    let (transport, end) = ChannelTransport::new(ChannelState::Connecting);
    let cancel = CancellationToken::new();
    let token = cancel.clone();

    let task = tokio::spawn(async move {
        let socket = tokio::select! {
            _ = token.cancelled() => {
                end.set_state(ChannelState::Closed);
                return;
            }
            result = connect_async(url.as_str()) => match result {
                Ok((socket, _)) => socket,
                Err(e) => {
                    error!(%url, error = %e, "Connection failed");
                    end.set_state(ChannelState::Closed);
                    return;
                }
            },
        };

        info!(%url, "Connected");
        end.set_state(ChannelState::Open);
        pump(socket, end, demux, token).await;
    });

    Connection {
        transport,
        cancel,
        task,
    }
}

impl Connection {
    /// A transport handle for the controller.
    pub fn transport(&self) -> ChannelTransport {
        self.transport.clone()
    }

    /// Close the socket and wait for the task to finish.
    pub async fn close(self) {
        self.cancel.cancel();
        if let Err(e) = self.task.await {
            warn!(error = %e, "Connection task failed");
        }
    }
}

async fn pump<S>(
    socket: S,
    mut end: ChannelEnd,
    mut demux: Demultiplexer,
    cancel: CancellationToken,
) where
    S: Stream<Item = Result<Message, tungstenite::Error>>
        + Sink<Message, Error = tungstenite::Error>
        + Unpin,
{
    let (mut sink, mut stream) = socket.split();

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                debug!("Connection cancelled");
                let _ = sink.send(Message::Close(None)).await;
                break;
            }

            outbound = end.outbound.recv() => match outbound {
                Some(text) => {
                    if let Err(e) = sink.send(Message::Text(text)).await {
                        warn!(error = %e, "Failed to send frame");
                        break;
                    }
                }
                None => break,
            },

            inbound = stream.next() => match inbound {
                Some(Ok(Message::Text(text))) => {
                    if let Err(e) = demux.dispatch_text(&text).await {
                        warn!(error = %e, "Dropping malformed frame");
                    }
                }
                Some(Ok(Message::Close(frame))) => {
                    debug!(?frame, "Peer closed connection");
                    break;
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    warn!(error = %e, "Connection error");
                    break;
                }
                None => break,
            },
        }
    }

    end.set_state(ChannelState::Closed);
    info!("Connection closed");
}
