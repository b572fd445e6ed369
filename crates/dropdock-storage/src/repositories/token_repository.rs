//! SQLite implementation of TokenRepository.
//!
//! One row per provider; `set` upserts, making the last-writer-wins
//! semantics of the store explicit at the SQL level.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use dropdock_core::{TokenProvider, TokenRepository};
use rusqlite::params;
use tokio::sync::Mutex;

use crate::Database;

/// SQLite-backed token repository.
pub struct SqliteTokenRepository {
    db: Arc<Mutex<Database>>,
}

impl SqliteTokenRepository {
    /// Create a new token repository.
    pub fn new(db: Arc<Mutex<Database>>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TokenRepository for SqliteTokenRepository {
    async fn get(&self, provider: TokenProvider) -> Result<Option<String>> {
        let db = self.db.lock().await;
        let conn = db.connection();

        let result = conn.query_row(
            "SELECT value FROM tokens WHERE provider = ?",
            params![provider.storage_key()],
            |row| row.get(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, provider: TokenProvider, token: &str) -> Result<()> {
        let db = self.db.lock().await;
        let conn = db.connection();

        conn.execute(
            "INSERT INTO tokens (provider, value, updated_at)
             VALUES (?, ?, datetime('now'))
             ON CONFLICT(provider) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![provider.storage_key(), token],
        )?;

        Ok(())
    }

    async fn remove(&self, provider: TokenProvider) -> Result<()> {
        let db = self.db.lock().await;
        let conn = db.connection();

        conn.execute(
            "DELETE FROM tokens WHERE provider = ?",
            params![provider.storage_key()],
        )?;

        Ok(())
    }
}
