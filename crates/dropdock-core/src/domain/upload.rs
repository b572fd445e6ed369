//! Upload batch types
//!
//! An `UploadJob` exists only for the duration of the batch loop; the first
//! unrecoverable failure aborts the remaining jobs.

use serde::{Deserialize, Serialize};

/// Startup ids with this prefix belong to the built-in demo data set;
/// uploads against them are simulated instead of sent to the backend.
pub const DEMO_STARTUP_PREFIX: &str = "startup-";

/// A file reference as supplied by the UI for an upload batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadFileRef {
    pub path: String,
    pub name: String,
}

/// One file being transferred from cloud storage to the VC backend.
#[derive(Debug, Clone)]
pub struct UploadJob {
    pub source_path: String,
    pub file_name: String,
    pub startup_id: String,
    pub document_type: String,
}

impl UploadJob {
    pub fn new(file: &UploadFileRef, startup_id: &str, document_type: &str) -> Self {
        Self {
            source_path: file.path.clone(),
            file_name: file.name.clone(),
            startup_id: startup_id.to_string(),
            document_type: document_type.to_string(),
        }
    }

    /// Whether this job targets the demo data set rather than the live backend.
    pub fn is_demo_target(&self) -> bool {
        self.startup_id.starts_with(DEMO_STARTUP_PREFIX)
    }
}

/// Outcome of a fully successful upload batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadReport {
    pub uploaded: usize,
    pub message: String,
}

impl UploadReport {
    pub fn for_batch(uploaded: usize) -> Self {
        Self {
            uploaded,
            message: format!("{} files uploaded successfully", uploaded),
        }
    }
}
