//! Core types for farfile.
//!
//! This crate provides the data model shared by the protocol, controller and
//! frontends: directory entries reported by the remote peer, remote paths,
//! the opaque credential payload, and controller configuration.

mod config;
mod credential;
mod entry;
mod error;
mod path;
mod size;

pub use config::{ControllerConfig, ControllerConfigBuilder, MenuFootprint};
pub use credential::{Credential, SshTarget, SshTargetBuilder};
pub use entry::{DirectoryEntry, EntryKind, EntrySize};
pub use error::CoreError;
pub use path::{HOME, ROOT, RemotePath};
pub use size::{format_bytes, format_size};
