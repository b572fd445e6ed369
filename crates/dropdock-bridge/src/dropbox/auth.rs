//! Interactive OAuth2 implicit-grant flow
//!
//! The flow is driven by a host-owned browser window: the controller
//! builds the authorization URL, the launcher opens it and resolves with
//! the redirect URL (or nothing, when the user closes the window), and
//! the controller extracts the token from the redirect fragment and
//! persists it.
//!
//! Single-flight is delegated to the host window model; the controller
//! takes no lock around the interactive step.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::{debug, info, warn};
use url::Url;

use dropdock_core::{BridgeError, BridgeResult, TokenProvider, TokenRepository};

use crate::config::DropboxConfig;

/// Host-supplied primitive that opens an interactive auth window.
#[async_trait]
pub trait AuthFlowLauncher: Send + Sync {
    /// Open `url` in an interactive window owned by the host and resolve
    /// with the final redirect URL. `None` means the user closed the
    /// window.
    async fn launch(&self, url: &str) -> anyhow::Result<Option<String>>;
}

/// Observable flow state. One attempt at a time per bridge instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFlowState {
    Idle,
    AwaitingRedirect,
    Completed,
    Cancelled,
}

/// Drives the implicit grant and persists the resulting token.
pub struct AuthFlowController {
    config: DropboxConfig,
    launcher: Arc<dyn AuthFlowLauncher>,
    tokens: Arc<dyn TokenRepository>,
    state: Mutex<AuthFlowState>,
}

impl AuthFlowController {
    pub fn new(
        config: DropboxConfig,
        launcher: Arc<dyn AuthFlowLauncher>,
        tokens: Arc<dyn TokenRepository>,
    ) -> Self {
        Self {
            config,
            launcher,
            tokens,
            state: Mutex::new(AuthFlowState::Idle),
        }
    }

    /// Current flow state, for diagnostics and tests.
    pub fn state(&self) -> AuthFlowState {
        *self.state.lock()
    }

    /// Build the authorization URL for the implicit grant.
    pub fn authorization_url(&self) -> BridgeResult<String> {
        let mut url = Url::parse(&self.config.authorize_url)
            .map_err(|e| BridgeError::Authentication(format!("Invalid authorize URL: {}", e)))?;

        url.query_pairs_mut()
            .append_pair("client_id", &self.config.client_id)
            .append_pair("response_type", "token")
            .append_pair("redirect_uri", &self.config.redirect_uri);

        Ok(url.to_string())
    }

    /// Run the interactive flow to completion and return the token.
    ///
    /// On any cancellation or extraction failure nothing is persisted and
    /// the flow records `Cancelled`.
    pub async fn authenticate(&self) -> BridgeResult<String> {
        let auth_url = self.authorization_url()?;

        info!("Starting Dropbox authentication flow");
        debug!(redirect_uri = %self.config.redirect_uri, "Launching auth window");
        *self.state.lock() = AuthFlowState::AwaitingRedirect;

        let redirect_url = match self.launcher.launch(&auth_url).await {
            Ok(Some(redirect_url)) => redirect_url,
            Ok(None) => {
                warn!("Auth window closed without a redirect");
                return Err(self.cancel("Authentication failed or was cancelled"));
            }
            Err(e) => {
                warn!(error = %e, "Auth window failed");
                return Err(self.cancel(&e.to_string()));
            }
        };

        let Some(token) = extract_access_token(&redirect_url) else {
            warn!("Redirect carried no access token fragment");
            return Err(self.cancel("Failed to extract access token"));
        };

        if let Err(e) = self.tokens.set(TokenProvider::Dropbox, &token).await {
            *self.state.lock() = AuthFlowState::Cancelled;
            return Err(BridgeError::Storage(e));
        }

        *self.state.lock() = AuthFlowState::Completed;
        info!("Dropbox authentication completed, token persisted");
        Ok(token)
    }

    fn cancel(&self, message: &str) -> BridgeError {
        *self.state.lock() = AuthFlowState::Cancelled;
        BridgeError::Authentication(message.to_string())
    }
}

/// Extract the access token from a redirect URL fragment.
///
/// Literal pair match, no percent-decoding: tokens are URL-safe and the
/// provider emits the fragment verbatim (`#access_token=...&token_type=...`).
pub(crate) fn extract_access_token(redirect_url: &str) -> Option<String> {
    let (_, fragment) = redirect_url.split_once('#')?;
    fragment
        .split('&')
        .find_map(|pair| pair.strip_prefix("access_token="))
        .filter(|token| !token.is_empty())
        .map(String::from)
}
