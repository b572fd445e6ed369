//! Repository traits for data access
//!
//! These traits define the interface for persistence without specifying
//! the implementation (SQLite, in-memory, etc.)

use async_trait::async_trait;

use crate::domain::TokenProvider;

/// Result type for repository operations
pub type RepoResult<T> = anyhow::Result<T>;

/// Token repository trait
///
/// Origin-scoped key-value storage of bearer tokens, one slot per
/// provider. Writes are last-writer-wins; there is no multi-account
/// model. A storage failure is fatal to the calling operation and is
/// propagated, not retried.
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Get the stored token for a provider, if any
    async fn get(&self, provider: TokenProvider) -> RepoResult<Option<String>>;

    /// Store a token for a provider, replacing any previous value
    async fn set(&self, provider: TokenProvider, token: &str) -> RepoResult<()>;

    /// Remove the stored token for a provider; idempotent
    async fn remove(&self, provider: TokenProvider) -> RepoResult<()>;
}
