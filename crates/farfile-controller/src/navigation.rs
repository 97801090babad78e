//! Navigation between remote directories.
//!
//! Every navigation is just a listing request. The current path only moves
//! when a successful listing arrives, and it moves to whatever path the
//! peer reports.

use farfile_core::RemotePath;
use farfile_proto::{Listing, Outcome, Request};

use crate::controller::Controller;
use crate::state::ListingState;
use crate::transport::Transport;

impl<T: Transport> Controller<T> {
    /// Ask the peer to list `path`.
    pub fn request_listing(&mut self, path: RemotePath) -> bool {
        self.send(Request::ListDirectory { path })
    }

    /// Re-list the current path.
    pub fn refresh(&mut self) -> bool {
        let path = self.state.current_path.clone();
        self.request_listing(path)
    }

    /// List the parent of the current path. No-op at home or root.
    pub fn go_back(&mut self) -> bool {
        match self.state.current_path.parent() {
            Some(parent) => self.request_listing(parent),
            None => false,
        }
    }

    /// List the configured home directory.
    pub fn go_home(&mut self) -> bool {
        let home = self.config.home.clone();
        self.request_listing(home)
    }

    /// List a child directory of the current path.
    pub fn open_directory(&mut self, name: &str) -> bool {
        let path = self.state.current_path.join(name);
        self.request_listing(path)
    }

    /// Apply a `directory_list` response.
    pub fn on_listing(&mut self, outcome: Outcome<Listing>) {
        match outcome {
            Ok(Listing { path, items }) => {
                self.state.current_path = path;
                self.state.listing = ListingState::Loaded(items);
                self.state.selection = None;
                self.state.menu = None;
            }
            Err(failure) => self.post_error(failure.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use farfile_core::{ControllerConfig, Credential, DirectoryEntry};
    use farfile_proto::RemoteFailure;
    use serde_json::json;

    use super::*;
    use crate::transport::{ChannelEnd, ChannelState, ChannelTransport};

    fn controller() -> (Controller<ChannelTransport>, ChannelEnd) {
        let (transport, end) = ChannelTransport::new(ChannelState::Open);
        let credential = Credential::from_value(json!({"host": "h"}));
        (
            Controller::new(transport, credential, ControllerConfig::default()),
            end,
        )
    }

    fn listed_path(frame: &str) -> String {
        let value: serde_json::Value = serde_json::from_str(frame).unwrap();
        assert_eq!(value["action"], "list_directory");
        value["path"].as_str().unwrap().to_string()
    }

    #[test]
    fn test_back_at_home_is_noop() {
        let (mut controller, mut end) = controller();
        assert!(!controller.go_back());
        assert!(end.drain().is_empty());
    }

    #[test]
    fn test_back_strips_last_segment() {
        let (mut controller, mut end) = controller();
        controller.on_listing(Ok(Listing {
            path: RemotePath::new("/var/log").unwrap(),
            items: vec![],
        }));
        assert!(controller.go_back());
        assert_eq!(listed_path(&end.drain()[0]), "/var");
    }

    #[test]
    fn test_back_from_top_level_goes_to_root() {
        let (mut controller, mut end) = controller();
        controller.on_listing(Ok(Listing {
            path: RemotePath::new("/etc").unwrap(),
            items: vec![],
        }));
        controller.go_back();
        assert_eq!(listed_path(&end.drain()[0]), "/");
    }

    #[test]
    fn test_listing_failure_keeps_path() {
        let (mut controller, _end) = controller();
        controller.on_listing(Ok(Listing {
            path: RemotePath::new("/srv").unwrap(),
            items: vec![DirectoryEntry::directory("www", "drwxr-xr-x")],
        }));
        controller.on_listing(Err(RemoteFailure::new("Permission denied")));

        assert_eq!(controller.state().current_path.as_str(), "/srv");
        assert_eq!(controller.state().listing.entries().len(), 1);
        assert_eq!(
            controller.state().notices.latest().unwrap().text(),
            "Error: Permission denied"
        );
    }
}
