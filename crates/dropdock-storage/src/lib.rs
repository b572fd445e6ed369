//! Dropdock Storage Layer
//!
//! SQLite-backed persistence for the integration core. The only state
//! Dropdock owns is the per-provider bearer token, stored as a plain
//! key-value row.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                 Bridge / Router              │
//! ├──────────────────────────────────────────────┤
//! │              TokenRepository trait           │
//! ├──────────────────────────────────────────────┤
//! │            SqliteTokenRepository             │
//! ├──────────────────────────────────────────────┤
//! │                  Database                    │
//! │                  (SQLite)                    │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use dropdock_storage::{Database, SqliteTokenRepository};
//! use std::sync::Arc;
//! use tokio::sync::Mutex;
//!
//! let db = Database::open(&path)?;
//! let db = Arc::new(Mutex::new(db));
//! let tokens = SqliteTokenRepository::new(db.clone());
//! ```

mod database;
mod repositories;

pub use database::Database;
pub use repositories::SqliteTokenRepository;

/// Default database file name.
pub const DATABASE_FILE: &str = "dropdock.db";

/// Get the default database path for the current platform.
pub fn default_database_path() -> Option<std::path::PathBuf> {
    dirs::data_local_dir().map(|p| p.join("dropdock").join(DATABASE_FILE))
}
