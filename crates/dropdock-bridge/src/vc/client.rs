//! VC platform backend client
//!
//! Thin fetch wrapper over the platform's login/list/upload endpoints.
//! The backend's response shapes have drifted over time, so bodies are
//! parsed through the ordered extraction strategies in `dropdock_core`.

use reqwest::header::AUTHORIZATION;
use serde_json::Value;
use tracing::{debug, info, warn};

use dropdock_core::{
    extract_login_token, extract_startup_list, BridgeError, BridgeResult, StartupSummary,
    UploadJob,
};

use crate::config::VcConfig;

/// Normalize a stored token into an `Authorization` header value.
///
/// Tokens arrive from arbitrary response shapes and are sometimes already
/// prefixed; never double-prefix.
pub fn bearer_header(token: &str) -> String {
    if token.starts_with("Bearer ") {
        token.to_string()
    } else {
        format!("Bearer {}", token)
    }
}

/// Client for the VC platform REST API.
#[derive(Clone)]
pub struct VcClient {
    config: VcConfig,
    http: reqwest::Client,
}

impl VcClient {
    pub fn new(config: VcConfig, http: reqwest::Client) -> Self {
        Self { config, http }
    }

    /// Authenticate with credentials.
    ///
    /// Returns `Ok(None)` when login succeeded but no strategy recognized
    /// the token shape; the caller owns the fallback.
    pub async fn login(&self, email: &str, password: &str) -> BridgeResult<Option<String>> {
        info!("Authenticating with VC platform");

        let response = self
            .http
            .post(format!("{}/auth/login", self.config.base_url))
            .json(&serde_json::json!({"username": email, "password": password}))
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        let body: Value = serde_json::from_str(&text).unwrap_or(Value::Null);

        if !status.is_success() {
            let message = body
                .get("message")
                .and_then(|m| m.as_str())
                .map(String::from)
                .unwrap_or_else(|| format!("Login failed with status {}", status.as_u16()));
            warn!(status = %status, "VC login rejected");
            return Err(BridgeError::Authentication(message));
        }

        Ok(extract_login_token(&body))
    }

    /// Fetch the startup list visible to the stored token.
    pub async fn list_startups(&self, token: &str) -> BridgeResult<Vec<StartupSummary>> {
        debug!("Fetching startup list");

        let response = self
            .http
            .get(format!("{}/startups", self.config.base_url))
            .header(AUTHORIZATION, bearer_header(token))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, "Startup list fetch failed");
            return Err(BridgeError::Api {
                message: format!("Server error: {} - {}", status.as_u16(), body),
            });
        }

        let body: Value = response.json().await?;
        extract_startup_list(&body).ok_or_else(|| BridgeError::Api {
            message: "Unrecognized startup list shape".to_string(),
        })
    }

    /// Upload one document as multipart form data.
    pub async fn upload_document(
        &self,
        token: &str,
        job: &UploadJob,
        bytes: Vec<u8>,
    ) -> BridgeResult<()> {
        debug!(file = %job.file_name, startup = %job.startup_id, "Uploading document");

        let part = reqwest::multipart::Part::bytes(bytes).file_name(job.file_name.clone());
        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("startupId", job.startup_id.clone())
            .text("type", job.document_type.clone())
            .text("name", job.file_name.clone());

        let response = self
            .http
            .post(format!("{}/documents/upload", self.config.base_url))
            .header(AUTHORIZATION, bearer_header(token))
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body: Value = response.json().await.unwrap_or(Value::Null);
            let message = body
                .get("message")
                .and_then(|m| m.as_str())
                .map(String::from)
                .unwrap_or_else(|| format!("Error uploading file {}", job.file_name));
            warn!(status = %status, file = %job.file_name, "Document upload failed");
            return Err(BridgeError::Api { message });
        }

        info!(file = %job.file_name, "Document uploaded");
        Ok(())
    }

    /// Liveness probe, diagnostic only. Logs the outcome, never errors.
    pub async fn health_check(&self) -> bool {
        match self
            .http
            .get(format!("{}/health", self.config.base_url))
            .send()
            .await
        {
            Ok(response) if response.status().is_success() => {
                info!("VC backend reachable");
                true
            }
            Ok(response) => {
                warn!(status = %response.status(), "VC backend health check failed");
                false
            }
            Err(e) => {
                warn!(error = %e, "VC backend unreachable");
                false
            }
        }
    }
}
