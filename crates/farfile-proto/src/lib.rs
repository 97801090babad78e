//! Wire protocol for farfile.
//!
//! The file browser shares one text channel with unrelated traffic. This
//! crate defines the request and response messages, classifies inbound
//! frames by their `action` discriminant, and fans frames out to an ordered
//! list of subscribers.

mod demux;
mod error;
mod frame;
pub mod metrics;
mod request;
mod response;

pub use demux::{Demultiplexer, Interest, SharedFrame};
pub use error::ProtoError;
pub use frame::Frame;
pub use request::{Envelope, Request};
pub use response::{FileContent, Listing, Outcome, RemoteFailure, Response, ResponseAction};

/// Name of the discriminant field separating file-browser frames from
/// other traffic.
pub const DISCRIMINANT: &str = "action";

/// Default channel buffer size for subscriber queues.
pub const SUBSCRIBER_CHANNEL_SIZE: usize = 256;
