//! Remote file-browser controller.
//!
//! This crate keeps client-side browser state (current path, listing,
//! selection, editor session, notices) consistent with a remote peer that
//! reports asynchronously over a shared channel. Requests are
//! fire-and-forget; every mutation is followed by a fresh listing instead
//! of a local update.

pub mod connection;
pub mod constants;
mod controller;
mod editor;
pub mod html;
mod navigation;
mod notice;
mod reconcile;
mod selection;
mod state;
mod transport;
pub mod view;

pub use connection::{ConnectError, Connection};
pub use controller::{Controller, StartOutcome};
pub use editor::EditorSession;
pub use html::render_html;
pub use notice::{Notice, NoticeKind, Notices};
pub use reconcile::success_message;
pub use selection::{ContextMenu, MenuAction, Point, Viewport, clamp_menu};
pub use state::{ControllerState, ListingState, Prompt, Selection};
pub use transport::{ChannelEnd, ChannelState, ChannelTransport, Transport, TransportError};
pub use view::{BrowserView, EditorView, EntryRow, ListingBody, MenuView, NoticeView, PromptView};
