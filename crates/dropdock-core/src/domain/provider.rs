//! Token provider identity
//!
//! Each provider maps to a fixed key in the token store. At most one token
//! is stored per provider; writing replaces the previous value.

use serde::{Deserialize, Serialize};

/// The two remote identities Dropdock holds bearer tokens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenProvider {
    /// Dropbox cloud storage (OAuth2 implicit grant)
    Dropbox,
    /// VC platform backend (credential login)
    VcPlatform,
}

impl TokenProvider {
    /// Fixed storage key for this provider.
    pub fn storage_key(&self) -> &'static str {
        match self {
            TokenProvider::Dropbox => "dropbox_access_token",
            TokenProvider::VcPlatform => "vc_token",
        }
    }

    /// Human-readable provider name for log lines and error messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            TokenProvider::Dropbox => "Dropbox",
            TokenProvider::VcPlatform => "VC platform",
        }
    }
}

impl std::fmt::Display for TokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}
