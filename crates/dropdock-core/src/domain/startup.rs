//! Startup summaries from the VC platform

use serde::{Deserialize, Serialize};

/// One startup as listed by the VC backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartupSummary {
    pub id: String,
    pub name: String,
}

impl StartupSummary {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}
