//! Dropbox v2 API client
//!
//! Stateless REST wrapper: every call rereads the token from the store,
//! sends `Authorization: Bearer <token>`, and normalizes non-2xx bodies
//! through the shared error-body algorithm. No call retries.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use dropdock_core::{
    normalize_error_body, BridgeError, BridgeResult, FileEntry, TokenProvider, TokenRepository,
};

use super::auth::{AuthFlowController, AuthFlowLauncher};
use super::types::{
    DownloadArg, FolderListing, GetMetadataArg, ListFolderArg, ListFolderContinueArg,
    ListFolderResult, Metadata, SearchArg, SearchV2Result,
};
use crate::config::DropboxConfig;

/// Client for the Dropbox v2 file API.
pub struct DropboxClient {
    config: DropboxConfig,
    http: reqwest::Client,
    tokens: Arc<dyn TokenRepository>,
    auth: AuthFlowController,
}

impl DropboxClient {
    /// Create a new client sharing the bridge-wide HTTP client.
    pub fn new(
        config: DropboxConfig,
        http: reqwest::Client,
        tokens: Arc<dyn TokenRepository>,
        launcher: Arc<dyn AuthFlowLauncher>,
    ) -> Self {
        let auth = AuthFlowController::new(config.clone(), launcher, tokens.clone());
        Self {
            config,
            http,
            tokens,
            auth,
        }
    }

    /// Run the interactive auth flow; persists and returns the token.
    pub async fn authenticate(&self) -> BridgeResult<String> {
        self.auth.authenticate().await
    }

    /// Access to the flow controller, mainly for state inspection.
    pub fn auth(&self) -> &AuthFlowController {
        &self.auth
    }

    /// Whether a stored token exists AND still passes a live account probe.
    ///
    /// Never errors: any failure along the way reads as "not authenticated".
    pub async fn is_authenticated(&self) -> bool {
        match self.tokens.get(TokenProvider::Dropbox).await {
            Ok(Some(_)) => match self.current_account().await {
                Ok(_) => true,
                Err(e) => {
                    debug!(error = %e, "Token validation probe failed");
                    false
                }
            },
            Ok(None) => false,
            Err(e) => {
                warn!(error = %e, "Token store read failed during auth check");
                false
            }
        }
    }

    /// Drop the stored token. Idempotent.
    pub async fn logout(&self) -> BridgeResult<()> {
        self.tokens
            .remove(TokenProvider::Dropbox)
            .await
            .map_err(BridgeError::Storage)
    }

    /// Account-info probe; used to validate the stored token.
    pub async fn current_account(&self) -> BridgeResult<serde_json::Value> {
        let response = self
            .rpc("/users/get_current_account", &serde_json::json!({}))
            .await?;
        Ok(response.json().await?)
    }

    /// Non-recursive listing of one folder. Empty string lists the root.
    pub async fn list_folder(&self, path: &str) -> BridgeResult<FolderListing> {
        debug!(path, "Listing folder");
        let response = self
            .rpc("/files/list_folder", &ListFolderArg::new(path))
            .await?;
        let result: ListFolderResult = response.json().await?;
        Ok(result.into())
    }

    /// Pagination continuation for [`list_folder`](Self::list_folder).
    pub async fn list_folder_continue(&self, cursor: &str) -> BridgeResult<FolderListing> {
        let arg = ListFolderContinueArg {
            cursor: cursor.to_string(),
        };
        let response = self.rpc("/files/list_folder/continue", &arg).await?;
        let result: ListFolderResult = response.json().await?;
        Ok(result.into())
    }

    /// Single-entry metadata fetch.
    pub async fn get_metadata(&self, path: &str) -> BridgeResult<FileEntry> {
        let response = self
            .rpc("/files/get_metadata", &GetMetadataArg::new(path))
            .await?;
        let metadata: Metadata = response.json().await?;
        Ok(metadata.into())
    }

    /// Download a file's bytes from the content host.
    ///
    /// The path travels in the `Dropbox-API-Arg` header; the request has
    /// no body.
    pub async fn download(&self, path: &str) -> BridgeResult<Vec<u8>> {
        let token = self.require_token().await?;
        debug!(path, "Downloading file");

        let arg = DownloadArg {
            path: path.to_string(),
        };
        let arg_json = serde_json::to_string(&arg).expect("download arg serializes");

        let response = self
            .http
            .post(format!("{}/files/download", self.config.content_base_url))
            .bearer_auth(&token)
            .header("Dropbox-API-Arg", arg_json)
            .send()
            .await?;

        let response = check_status(response, "Failed to download file").await?;
        Ok(response.bytes().await?.to_vec())
    }

    /// Keyword search, scoped to `path` when given, capped at 20 active files.
    pub async fn search(&self, query: &str, path: Option<&str>) -> BridgeResult<Vec<FileEntry>> {
        debug!(query, "Searching");
        let response = self
            .rpc("/files/search_v2", &SearchArg::new(query, path))
            .await?;
        let result: SearchV2Result = response.json().await?;
        Ok(result
            .matches
            .into_iter()
            .map(|m| m.metadata.metadata.into())
            .collect())
    }

    async fn require_token(&self) -> BridgeResult<String> {
        self.tokens
            .get(TokenProvider::Dropbox)
            .await
            .map_err(BridgeError::Storage)?
            .ok_or(BridgeError::NoToken(TokenProvider::Dropbox))
    }

    /// JSON RPC against the api host: bearer token + JSON body.
    async fn rpc<T: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        arg: &T,
    ) -> BridgeResult<reqwest::Response> {
        let token = self.require_token().await?;

        let response = self
            .http
            .post(format!("{}{}", self.config.api_base_url, endpoint))
            .bearer_auth(&token)
            .json(arg)
            .send()
            .await?;

        check_status(response, "API error").await
    }
}

/// Pass 2xx through; normalize anything else into an [`BridgeError::Api`].
async fn check_status(
    response: reqwest::Response,
    context: &str,
) -> BridgeResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = normalize_error_body(context, &body);
    warn!(status = %status, "Dropbox call failed: {}", message);
    Err(BridgeError::Api { message })
}
