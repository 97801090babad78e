//! Outbound requests.

use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;

use farfile_core::{Credential, RemotePath};

use crate::ProtoError;

/// A request sent from the controller to the remote peer.
///
/// Requests are fire-and-forget; the protocol carries no request id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, IntoStaticStr)]
#[serde(tag = "action", rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Request {
    /// List the entries of a directory.
    ListDirectory { path: RemotePath },
    /// Read a file's content.
    ReadFile { filepath: RemotePath },
    /// Replace a file's content.
    WriteFile { filepath: RemotePath, content: String },
    /// Create an empty file.
    CreateFile { filepath: RemotePath },
    /// Create a directory.
    CreateFolder { folderpath: RemotePath },
    /// Rename or move an entry.
    Rename {
        old_path: RemotePath,
        new_path: RemotePath,
    },
    /// Delete a file or directory.
    DeleteFile { filepath: RemotePath },
    /// Ask the peer to start streaming metrics on the shared channel.
    #[serde(rename = "start")]
    #[strum(serialize = "start")]
    StartMonitoring,
}

impl Request {
    /// The wire action name.
    pub fn action(&self) -> &'static str {
        self.into()
    }

    /// Serialize this request together with the credential payload.
    pub fn encode(&self, credential: &Credential) -> Result<String, ProtoError> {
        let envelope = Envelope {
            request: self,
            ssh_data: credential,
        };
        Ok(serde_json::to_string(&envelope)?)
    }
}

/// Wire form of a request: the request fields plus `ssh_data`.
#[derive(Debug, Serialize)]
pub struct Envelope<'a> {
    #[serde(flatten)]
    pub request: &'a Request,
    pub ssh_data: &'a Credential,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn credential() -> Credential {
        Credential::from_value(json!({"host": "h", "user": "u"}))
    }

    fn encode(request: &Request) -> Value {
        serde_json::from_str(&request.encode(&credential()).unwrap()).unwrap()
    }

    #[test]
    fn test_list_directory_wire_shape() {
        let value = encode(&Request::ListDirectory {
            path: RemotePath::home(),
        });
        assert_eq!(value["action"], "list_directory");
        assert_eq!(value["path"], "~");
        assert_eq!(value["ssh_data"]["host"], "h");
    }

    #[test]
    fn test_rename_wire_shape() {
        let value = encode(&Request::Rename {
            old_path: RemotePath::new("~/a").unwrap(),
            new_path: RemotePath::new("~/b").unwrap(),
        });
        assert_eq!(value["action"], "rename");
        assert_eq!(value["old_path"], "~/a");
        assert_eq!(value["new_path"], "~/b");
    }

    #[test]
    fn test_create_folder_uses_folderpath() {
        let value = encode(&Request::CreateFolder {
            folderpath: RemotePath::new("~/new").unwrap(),
        });
        assert_eq!(value["action"], "create_folder");
        assert_eq!(value["folderpath"], "~/new");
        assert!(value.get("filepath").is_none());
    }

    #[test]
    fn test_start_monitoring() {
        let value = encode(&Request::StartMonitoring);
        assert_eq!(value["action"], "start");
        assert_eq!(Request::StartMonitoring.action(), "start");
    }

    #[test]
    fn test_action_names_match_wire() {
        let req = Request::DeleteFile {
            filepath: RemotePath::new("~/x").unwrap(),
        };
        assert_eq!(req.action(), "delete_file");
        assert_eq!(encode(&req)["action"], "delete_file");
    }

    #[test]
    fn test_decode_ignores_credential() {
        let text = Request::ReadFile {
            filepath: RemotePath::new("~/a.txt").unwrap(),
        }
        .encode(&credential())
        .unwrap();
        let decoded: Request = serde_json::from_str(&text).unwrap();
        assert_eq!(
            decoded,
            Request::ReadFile {
                filepath: RemotePath::new("~/a.txt").unwrap()
            }
        );
    }
}
