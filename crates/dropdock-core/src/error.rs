//! Error taxonomy for the integration core
//!
//! Errors are caught at the boundary of a public operation, logged, and
//! converted into a failed router response. No operation retries on its own.

use thiserror::Error;

use crate::domain::TokenProvider;

/// How many characters of a non-JSON error body survive normalization.
const RAW_BODY_LIMIT: usize = 100;

/// Result alias for operations surfacing [`BridgeError`].
pub type BridgeResult<T> = Result<T, BridgeError>;

#[derive(Debug, Error)]
pub enum BridgeError {
    /// Precondition failure: no token stored for the provider. Never retried.
    #[error("No access token available")]
    NoToken(TokenProvider),

    /// Interactive auth flow cancelled, redirect unparsable, or login rejected.
    #[error("{0}")]
    Authentication(String),

    /// Non-2xx from a remote provider; the message is the normalized body.
    #[error("{message}")]
    Api { message: String },

    /// A single file's failure inside a multi-file upload. Aborts the batch.
    #[error("Error in file {file}: {source}")]
    BatchItem {
        file: String,
        #[source]
        source: Box<BridgeError>,
    },

    /// The underlying token store failed. Fatal to the calling operation.
    #[error("Token store failure: {0}")]
    Storage(#[source] anyhow::Error),

    /// Transport-level failure before any response was produced.
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Local filesystem failure while materializing a download.
    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),
}

impl BridgeError {
    /// Wrap a per-file failure, naming the file that broke the batch.
    pub fn batch_item(file: impl Into<String>, source: BridgeError) -> Self {
        BridgeError::BatchItem {
            file: file.into(),
            source: Box::new(source),
        }
    }
}

/// Normalize a non-2xx response body into an error message.
///
/// Providers return structured JSON for some errors and plain text for
/// others (gateway-level failures), so callers must not assume either
/// shape: attempt a JSON parse and surface `error_summary` when present,
/// otherwise fall back to a truncated slice of the raw text.
pub fn normalize_error_body(context: &str, body: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(json) => {
            let summary = json
                .get("error_summary")
                .and_then(|v| v.as_str())
                .unwrap_or("Unknown error");
            format!("{}: {}", context, summary)
        }
        Err(_) => {
            let head: String = body.chars().take(RAW_BODY_LIMIT).collect();
            format!("{}: {}", context, head)
        }
    }
}
