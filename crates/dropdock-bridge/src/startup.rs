//! Bridge startup wiring
//!
//! Builds the service graph (database, token repository, provider
//! clients, downloads service) and spawns the router. The host embeds
//! the returned handle; there is no network listener of our own.

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;

use dropdock_core::TokenRepository;
use dropdock_storage::{Database, SqliteTokenRepository};

use crate::config::BridgeConfig;
use crate::downloads::DownloadsService;
use crate::dropbox::{AuthFlowLauncher, DropboxClient};
use crate::router::{BridgeServices, Router, RouterHandle};
use crate::vc::VcClient;

/// A running bridge instance.
pub struct BridgeHandle {
    pub router: RouterHandle,
    services: Arc<BridgeServices>,
}

impl BridgeHandle {
    /// Direct access to the wired services, for hosts that need more than
    /// the message protocol (e.g. to start the interactive auth flow).
    pub fn services(&self) -> &Arc<BridgeServices> {
        &self.services
    }
}

/// The bridge bootstrapper.
pub struct Bridge;

impl Bridge {
    /// Wire the service graph and spawn the router.
    ///
    /// `launcher` is the host's interactive auth-window primitive.
    pub fn start(config: BridgeConfig, launcher: Arc<dyn AuthFlowLauncher>) -> Result<BridgeHandle> {
        info!("Starting Dropdock bridge");

        let db = Database::open(&config.database_path)
            .with_context(|| format!("Failed to open token store at {:?}", config.database_path))?;
        let db = Arc::new(Mutex::new(db));
        let tokens: Arc<dyn TokenRepository> = Arc::new(SqliteTokenRepository::new(db));

        let http = reqwest::Client::new();
        let dropbox = DropboxClient::new(
            config.dropbox.clone(),
            http.clone(),
            tokens.clone(),
            launcher,
        );
        let vc = VcClient::new(config.vc.clone(), http);
        let downloads = DownloadsService::new(config.downloads.clone());

        let services = Arc::new(BridgeServices {
            tokens,
            dropbox,
            vc,
            downloads,
            upload_simulation_delay: config.upload_simulation_delay,
        });

        // One-shot diagnostic probe, the counterpart of the original
        // install-time backend check. Outcome is log-only.
        let probe = services.vc.clone();
        tokio::spawn(async move {
            let reachable = probe.health_check().await;
            info!(reachable, "VC backend probe finished");
        });

        let router = Router::spawn(services.clone());
        info!("Dropdock bridge started");

        Ok(BridgeHandle { router, services })
    }
}

/// Initialize console logging with env-filter overrides.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("dropdock=debug,info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .ok();
}
