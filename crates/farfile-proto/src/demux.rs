//! Shared-channel demultiplexer.
//!
//! Every inbound frame is offered to an ordered list of subscribers. Each
//! subscriber declares which frames it cares about; all interested
//! subscribers receive the frame, in registration order.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::{Frame, ProtoError, SUBSCRIBER_CHANNEL_SIZE};

/// Frames are shared between subscribers without copying.
pub type SharedFrame = Arc<Frame>;

/// Which frames a subscriber wants to receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interest {
    /// Frames carrying the discriminant (file-browser traffic).
    Browser,
    /// Frames without the discriminant (metrics and other consumers).
    Untagged,
    /// Every frame.
    Everything,
}

impl Interest {
    /// Check if a frame is relevant under this interest.
    pub fn wants(self, frame: &Frame) -> bool {
        match self {
            Self::Browser => frame.is_discriminated(),
            Self::Untagged => !frame.is_discriminated(),
            Self::Everything => true,
        }
    }
}

#[derive(Debug)]
struct Subscriber {
    name: String,
    interest: Interest,
    tx: mpsc::Sender<SharedFrame>,
}

/// Fans inbound frames out to subscribers.
#[derive(Debug, Default)]
pub struct Demultiplexer {
    subscribers: Vec<Subscriber>,
}

impl Demultiplexer {
    /// Create a demultiplexer with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a subscriber and get the receiving end of its queue.
    ///
    /// Subscribers are served in registration order. Dropping the receiver
    /// unsubscribes on the next dispatch.
    pub fn subscribe(
        &mut self,
        name: impl Into<String>,
        interest: Interest,
    ) -> mpsc::Receiver<SharedFrame> {
        let (tx, rx) = mpsc::channel(SUBSCRIBER_CHANNEL_SIZE);
        let name = name.into();
        tracing::debug!(subscriber = %name, ?interest, "subscriber registered");
        self.subscribers.push(Subscriber { name, interest, tx });
        rx
    }

    /// Number of registered subscribers.
    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    /// Check if there are no subscribers.
    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    /// Names of registered subscribers, in delivery order.
    pub fn subscriber_names(&self) -> impl Iterator<Item = &str> {
        self.subscribers.iter().map(|s| s.name.as_str())
    }

    /// Decode a text frame and dispatch it.
    ///
    /// Returns the number of subscribers that received the frame.
    pub async fn dispatch_text(&mut self, text: &str) -> Result<usize, ProtoError> {
        let frame = Frame::decode(text)?;
        Ok(self.dispatch(frame).await)
    }

    /// Dispatch a classified frame to every interested subscriber.
    ///
    /// Returns the number of subscribers that received the frame. A frame
    /// nobody wants is dropped.
    pub async fn dispatch(&mut self, frame: Frame) -> usize {
        let frame = Arc::new(frame);
        let mut delivered = 0;
        let mut closed = false;

        for subscriber in &self.subscribers {
            if !subscriber.interest.wants(&frame) {
                continue;
            }
            if subscriber.tx.send(Arc::clone(&frame)).await.is_ok() {
                delivered += 1;
            } else {
                closed = true;
            }
        }

        if closed {
            self.subscribers.retain(|s| {
                let open = !s.tx.is_closed();
                if !open {
                    tracing::debug!(subscriber = %s.name, "subscriber closed, removing");
                }
                open
            });
        }

        if delivered == 0 {
            tracing::trace!(?frame, "no subscriber for frame, dropping");
        }

        delivered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Response;

    #[tokio::test]
    async fn test_routes_by_discriminant() {
        let mut demux = Demultiplexer::new();
        let mut browser = demux.subscribe("browser", Interest::Browser);
        let mut metrics = demux.subscribe("metrics", Interest::Untagged);

        let n = demux
            .dispatch_text(r#"{"action": "file_deleted", "status": "success"}"#)
            .await
            .unwrap();
        assert_eq!(n, 1);
        let n = demux.dispatch_text(r#"{"cpu": "3.0%"}"#).await.unwrap();
        assert_eq!(n, 1);

        let frame = browser.try_recv().unwrap();
        assert_eq!(*frame, Frame::Browser(Response::FileDeleted(Ok(()))));
        assert!(browser.try_recv().is_err());

        let frame = metrics.try_recv().unwrap();
        assert!(matches!(*frame, Frame::Untagged(_)));
        assert!(metrics.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_multiple_subscribers_all_receive() {
        let mut demux = Demultiplexer::new();
        let mut first = demux.subscribe("first", Interest::Untagged);
        let mut second = demux.subscribe("second", Interest::Everything);
        let mut third = demux.subscribe("third", Interest::Untagged);

        let n = demux.dispatch_text(r#"{"cpu": "1%"}"#).await.unwrap();
        assert_eq!(n, 3);
        assert!(first.try_recv().is_ok());
        assert!(second.try_recv().is_ok());
        assert!(third.try_recv().is_ok());
    }

    #[tokio::test]
    async fn test_unwanted_frame_is_dropped() {
        let mut demux = Demultiplexer::new();
        let mut browser = demux.subscribe("browser", Interest::Browser);

        let n = demux.dispatch_text(r#"{"cpu": "1%"}"#).await.unwrap();
        assert_eq!(n, 0);
        assert!(browser.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_closed_subscriber_is_pruned() {
        let mut demux = Demultiplexer::new();
        let gone = demux.subscribe("gone", Interest::Everything);
        let mut kept = demux.subscribe("kept", Interest::Everything);
        drop(gone);

        let n = demux.dispatch_text(r#"{"cpu": "1%"}"#).await.unwrap();
        assert_eq!(n, 1);
        assert_eq!(demux.subscriber_names().collect::<Vec<_>>(), ["kept"]);
        assert!(kept.try_recv().is_ok());
    }

    #[tokio::test]
    async fn test_malformed_text_is_an_error() {
        let mut demux = Demultiplexer::new();
        let _rx = demux.subscribe("any", Interest::Everything);
        assert!(demux.dispatch_text("{oops").await.is_err());
    }
}
