//! Dropbox integration
//!
//! OAuth2 implicit-grant authentication plus a stateless REST wrapper
//! over the v2 file API.

mod auth;
mod client;
mod types;

pub use auth::{AuthFlowController, AuthFlowLauncher, AuthFlowState};
pub use client::DropboxClient;
pub use types::{FolderListing, SEARCH_MAX_RESULTS};
