//! Local download materialization
//!
//! Fetched bytes are spooled to a scratch file, handed off into the
//! downloads directory under the requested filename, and the spool file
//! is removed by a detached cleanup task after a fixed delay. That delay
//! is the only explicit timer in the system.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::fs;
use tracing::{debug, info, warn};
use uuid::Uuid;

use dropdock_core::BridgeResult;

use crate::config::DownloadsConfig;

/// One materialized download.
#[derive(Debug, Clone)]
pub struct DownloadRecord {
    pub id: Uuid,
    pub path: PathBuf,
}

/// Writes fetched bytes into the user's downloads directory.
#[derive(Clone)]
pub struct DownloadsService {
    config: DownloadsConfig,
}

impl DownloadsService {
    pub fn new(config: DownloadsConfig) -> Self {
        Self { config }
    }

    /// Materialize `bytes` as a download named `filename`.
    ///
    /// Name collisions get a ` (n)` suffix rather than overwriting an
    /// existing file.
    pub async fn save(&self, filename: &str, bytes: &[u8]) -> BridgeResult<DownloadRecord> {
        fs::create_dir_all(&self.config.scratch_dir).await?;
        fs::create_dir_all(&self.config.downloads_dir).await?;

        let id = Uuid::new_v4();
        let spool_path = self.config.scratch_dir.join(format!("{}.part", id));
        fs::write(&spool_path, bytes).await?;
        debug!(id = %id, size = bytes.len(), "Spooled download");

        let target = unique_target(&self.config.downloads_dir, filename).await;
        fs::copy(&spool_path, &target).await?;
        info!(id = %id, path = %target.display(), "Download initiated");

        let delay = self.config.cleanup_delay;
        tokio::spawn(cleanup_spool(spool_path, delay));

        Ok(DownloadRecord { id, path: target })
    }
}

/// Remove a spool file once the hand-off window has passed.
async fn cleanup_spool(path: PathBuf, delay: Duration) {
    tokio::time::sleep(delay).await;
    match fs::remove_file(&path).await {
        Ok(()) => debug!(path = %path.display(), "Spool file removed"),
        Err(e) => warn!(path = %path.display(), error = %e, "Spool cleanup failed"),
    }
}

/// First non-colliding path for `filename` inside `dir`.
async fn unique_target(dir: &Path, filename: &str) -> PathBuf {
    let candidate = dir.join(filename);
    if !fs::try_exists(&candidate).await.unwrap_or(false) {
        return candidate;
    }

    let (stem, extension) = match filename.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem.to_string(), format!(".{}", ext)),
        _ => (filename.to_string(), String::new()),
    };

    let mut n = 1;
    loop {
        let candidate = dir.join(format!("{} ({}){}", stem, n, extension));
        if !fs::try_exists(&candidate).await.unwrap_or(false) {
            return candidate;
        }
        n += 1;
    }
}
