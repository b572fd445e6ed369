//! Bridge configuration
//!
//! Provider endpoints ship with production defaults; every value can be
//! overridden through `DROPDOCK_*` environment variables, and base URLs are
//! injectable so tests can point the clients at a mock server.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

/// Default Dropbox app key (public OAuth client identifier).
const DEFAULT_CLIENT_ID: &str = "vjstg3sfs8vjnsk";

const DEFAULT_AUTHORIZE_URL: &str = "https://www.dropbox.com/oauth2/authorize";
const DEFAULT_API_BASE_URL: &str = "https://api.dropboxapi.com/2";
const DEFAULT_CONTENT_BASE_URL: &str = "https://content.dropboxapi.com/2";
const DEFAULT_REDIRECT_URI: &str = "https://dropdock.app/oauth/callback";

const DEFAULT_VC_BASE_URL: &str = "http://localhost:5000/api";

/// How long a download spool file lives before the cleanup task removes it.
const DEFAULT_SPOOL_CLEANUP: Duration = Duration::from_secs(60);

/// Pause used when simulating an upload against a demo startup.
const DEFAULT_UPLOAD_SIMULATION_DELAY: Duration = Duration::from_secs(1);

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Dropbox OAuth identity and API endpoints.
#[derive(Debug, Clone)]
pub struct DropboxConfig {
    /// OAuth client identifier (app key)
    pub client_id: String,
    /// Redirect URI registered for the implicit grant
    pub redirect_uri: String,
    /// Interactive authorization endpoint
    pub authorize_url: String,
    /// RPC endpoint base (listing, metadata, search, account)
    pub api_base_url: String,
    /// Binary content-transfer host (download)
    pub content_base_url: String,
}

impl Default for DropboxConfig {
    fn default() -> Self {
        Self {
            client_id: DEFAULT_CLIENT_ID.to_string(),
            redirect_uri: DEFAULT_REDIRECT_URI.to_string(),
            authorize_url: DEFAULT_AUTHORIZE_URL.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            content_base_url: DEFAULT_CONTENT_BASE_URL.to_string(),
        }
    }
}

impl DropboxConfig {
    /// Build a config from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        Self {
            client_id: env_or("DROPDOCK_DROPBOX_CLIENT_ID", DEFAULT_CLIENT_ID),
            redirect_uri: env_or("DROPDOCK_DROPBOX_REDIRECT_URI", DEFAULT_REDIRECT_URI),
            authorize_url: env_or("DROPDOCK_DROPBOX_AUTHORIZE_URL", DEFAULT_AUTHORIZE_URL),
            api_base_url: env_or("DROPDOCK_DROPBOX_API_URL", DEFAULT_API_BASE_URL),
            content_base_url: env_or("DROPDOCK_DROPBOX_CONTENT_URL", DEFAULT_CONTENT_BASE_URL),
        }
    }
}

/// VC platform backend endpoint.
#[derive(Debug, Clone)]
pub struct VcConfig {
    /// API base path, e.g. `http://localhost:5000/api`
    pub base_url: String,
}

impl Default for VcConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_VC_BASE_URL.to_string(),
        }
    }
}

impl VcConfig {
    pub fn from_env() -> Self {
        Self {
            base_url: env_or("DROPDOCK_VC_BASE_URL", DEFAULT_VC_BASE_URL),
        }
    }
}

/// Local download materialization settings.
#[derive(Debug, Clone)]
pub struct DownloadsConfig {
    /// Directory finished downloads land in
    pub downloads_dir: PathBuf,
    /// Scratch directory for spool files
    pub scratch_dir: PathBuf,
    /// Delay before a spool file is removed
    pub cleanup_delay: Duration,
}

/// Aggregated configuration for a bridge instance.
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    pub dropbox: DropboxConfig,
    pub vc: VcConfig,
    pub downloads: DownloadsConfig,
    /// Token database location
    pub database_path: PathBuf,
    /// Pause used when simulating demo-startup uploads
    pub upload_simulation_delay: Duration,
}

impl BridgeConfig {
    /// Standard layout: platform data dir for the database, platform
    /// download dir for finished files. Honors `DROPDOCK_*` overrides.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let database_path = match std::env::var("DROPDOCK_DATA_DIR") {
            Ok(dir) => PathBuf::from(dir).join(dropdock_storage::DATABASE_FILE),
            Err(_) => dropdock_storage::default_database_path()
                .context("Could not determine platform data directory")?,
        };

        let downloads_dir = match std::env::var("DROPDOCK_DOWNLOADS_DIR") {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => dirs::download_dir().context("Could not determine downloads directory")?,
        };

        let scratch_dir = std::env::temp_dir().join("dropdock");

        Ok(Self {
            dropbox: DropboxConfig::from_env(),
            vc: VcConfig::from_env(),
            downloads: DownloadsConfig {
                downloads_dir,
                scratch_dir,
                cleanup_delay: DEFAULT_SPOOL_CLEANUP,
            },
            database_path,
            upload_simulation_delay: DEFAULT_UPLOAD_SIMULATION_DELAY,
        })
    }
}
