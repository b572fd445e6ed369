//! Cross-context message protocol
//!
//! Requests are JSON-serializable objects tagged by an `action` field;
//! responses always carry `success` plus an action-specific payload or an
//! `error` string. Payloads cross the channel by value, never by
//! reference, preserving the copy semantics of the original
//! message-passing model.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use dropdock_core::UploadFileRef;

/// An incoming request from a UI context.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Request {
    /// Fetch a file from cloud storage and materialize it locally.
    DownloadFile { path: String, filename: String },
    /// Probe whether the Dropbox session is live.
    CheckAuth,
    /// Log in to the VC platform and persist the session token.
    AuthenticateVc { email: String, password: String },
    /// List startups visible to the stored VC token.
    GetStartups,
    /// Transfer a batch of cloud-storage files to the VC platform.
    #[serde(rename_all = "camelCase")]
    UploadToVc {
        files: Vec<UploadFileRef>,
        startup_id: String,
        document_type: String,
    },
}

impl Request {
    /// The wire-level action tag, for log lines.
    pub fn action(&self) -> &'static str {
        match self {
            Request::DownloadFile { .. } => "download_file",
            Request::CheckAuth => "check_auth",
            Request::AuthenticateVc { .. } => "authenticate_vc",
            Request::GetStartups => "get_startups",
            Request::UploadToVc { .. } => "upload_to_vc",
        }
    }
}

/// A response to a UI context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(flatten)]
    pub data: Map<String, Value>,
}

impl Response {
    /// Successful response; `data` must be a JSON object (or null).
    pub fn ok(data: Value) -> Self {
        let data = match data {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => {
                let mut map = Map::new();
                map.insert("data".to_string(), other);
                map
            }
        };
        Self {
            success: true,
            error: None,
            data,
        }
    }

    /// Failed response carrying an operator-readable message.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
            data: Map::new(),
        }
    }

    /// Payload field accessor.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }
}
