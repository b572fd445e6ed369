//! Shared fixtures for Dropdock integration tests.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tempfile::TempDir;
use tokio::sync::Mutex;

use dropdock_bridge::{
    AuthFlowLauncher, BridgeServices, DownloadsConfig, DownloadsService, DropboxClient,
    DropboxConfig, VcClient, VcConfig,
};
use dropdock_core::TokenRepository;
use dropdock_storage::{Database, SqliteTokenRepository};

/// Launcher that resolves with a fixed redirect URL (or `None` to
/// emulate the user closing the auth window).
pub struct FakeLauncher {
    redirect: Option<String>,
}

impl FakeLauncher {
    pub fn returning(redirect: &str) -> Arc<Self> {
        Arc::new(Self {
            redirect: Some(redirect.to_string()),
        })
    }

    pub fn cancelled() -> Arc<Self> {
        Arc::new(Self { redirect: None })
    }
}

#[async_trait]
impl AuthFlowLauncher for FakeLauncher {
    async fn launch(&self, _url: &str) -> anyhow::Result<Option<String>> {
        Ok(self.redirect.clone())
    }
}

/// In-memory token repository backing for a test.
pub fn memory_tokens() -> Arc<dyn TokenRepository> {
    let db = Database::open_in_memory().expect("in-memory database");
    Arc::new(SqliteTokenRepository::new(Arc::new(Mutex::new(db))))
}

/// Dropbox config with both hosts pointed at a mock server.
pub fn dropbox_config(mock_url: &str) -> DropboxConfig {
    DropboxConfig {
        api_base_url: mock_url.to_string(),
        content_base_url: mock_url.to_string(),
        ..DropboxConfig::default()
    }
}

/// Fully wired services against mock Dropbox/VC hosts.
///
/// Returns the tempdir keeping the download directories alive.
pub fn test_services(
    dropbox_url: &str,
    vc_url: &str,
    launcher: Arc<dyn AuthFlowLauncher>,
) -> (Arc<BridgeServices>, TempDir) {
    let tokens = memory_tokens();
    let http = reqwest::Client::new();

    let dropbox = DropboxClient::new(
        dropbox_config(dropbox_url),
        http.clone(),
        tokens.clone(),
        launcher,
    );
    let vc = VcClient::new(
        VcConfig {
            base_url: vc_url.to_string(),
        },
        http,
    );

    let dir = TempDir::new().expect("tempdir");
    let downloads = DownloadsService::new(DownloadsConfig {
        downloads_dir: dir.path().join("downloads"),
        scratch_dir: dir.path().join("scratch"),
        cleanup_delay: Duration::from_millis(50),
    });

    let services = Arc::new(BridgeServices {
        tokens,
        dropbox,
        vc,
        downloads,
        upload_simulation_delay: Duration::from_millis(10),
    });

    (services, dir)
}
