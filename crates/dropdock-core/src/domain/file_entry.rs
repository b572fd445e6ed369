//! File entries returned from listing and search calls
//!
//! Entries are constructed from provider responses, held in UI memory for
//! the duration of a browsing session, and discarded on navigation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Distinguishes folders from files; file-only metadata lives on the variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntryKind {
    Folder,
    File {
        /// Size in bytes, when the provider reported it
        size: Option<u64>,
        /// Provider content hash for change detection
        content_hash: Option<String>,
        /// Last modification time recorded by the provider
        server_modified: Option<DateTime<Utc>>,
    },
}

/// One file or folder from a listing or search response.
///
/// `path` is the provider's lowercased path and is the unique identifier
/// within a listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileEntry {
    pub path: String,
    pub name: String,
    #[serde(flatten)]
    pub kind: EntryKind,
}

impl FileEntry {
    /// Construct a folder entry.
    pub fn folder(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            kind: EntryKind::Folder,
        }
    }

    /// Construct a file entry without extended metadata.
    pub fn file(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            kind: EntryKind::File {
                size: None,
                content_hash: None,
                server_modified: None,
            },
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self.kind, EntryKind::Folder)
    }

    /// File size in bytes, if known. Folders have none.
    pub fn size(&self) -> Option<u64> {
        match self.kind {
            EntryKind::File { size, .. } => size,
            EntryKind::Folder => None,
        }
    }
}

/// Sort entries the way they are surfaced to the UI: folders first, then
/// files, each group by name ascending.
///
/// This is the only deterministic ordering contract in the system; listing
/// responses themselves carry no ordering guarantee.
pub fn sort_entries(entries: &mut [FileEntry]) {
    entries.sort_by(|a, b| match (a.is_folder(), b.is_folder()) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
    });
}
