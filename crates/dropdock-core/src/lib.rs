//! # Dropdock Core Library
//!
//! Domain logic, entities, and error taxonomy for Dropdock.
//!
//! ## Modules
//!
//! - `domain` - Core entities (TokenProvider, FileEntry, Selection, UploadJob)
//! - `error` - Error taxonomy and provider error-body normalization
//! - `extract` - Ordered extraction strategies for unstable VC response shapes
//! - `repository` - Data access traits

pub mod domain;
pub mod error;
pub mod extract;
pub mod repository;

// Re-export commonly used types
pub use domain::*;
pub use error::{normalize_error_body, BridgeError, BridgeResult};
pub use extract::{extract_login_token, extract_startup_list};
pub use repository::{RepoResult, TokenRepository};
