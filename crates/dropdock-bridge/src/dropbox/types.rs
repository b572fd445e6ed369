//! Wire types for the Dropbox v2 API
//!
//! Request arguments are JSON bodies except for `DownloadArg`, which
//! travels in the `Dropbox-API-Arg` header on the content host. Response
//! metadata is `.tag`-discriminated.

use chrono::{DateTime, Utc};
use dropdock_core::{EntryKind, FileEntry};
use serde::{Deserialize, Serialize};

/// Search result cap; the UI never pages search results.
pub const SEARCH_MAX_RESULTS: u32 = 20;

#[derive(Debug, Serialize)]
pub struct ListFolderArg {
    pub path: String,
    pub recursive: bool,
    pub include_media_info: bool,
    pub include_deleted: bool,
    pub include_has_explicit_shared_members: bool,
}

impl ListFolderArg {
    /// Non-recursive listing of active entries, the only mode the UI uses.
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
            recursive: false,
            include_media_info: false,
            include_deleted: false,
            include_has_explicit_shared_members: false,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ListFolderContinueArg {
    pub cursor: String,
}

#[derive(Debug, Serialize)]
pub struct GetMetadataArg {
    pub path: String,
    pub include_media_info: bool,
    pub include_deleted: bool,
    pub include_has_explicit_shared_members: bool,
}

impl GetMetadataArg {
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
            include_media_info: false,
            include_deleted: false,
            include_has_explicit_shared_members: false,
        }
    }
}

/// Sent in the `Dropbox-API-Arg` header, not the body.
#[derive(Debug, Serialize)]
pub struct DownloadArg {
    pub path: String,
}

#[derive(Debug, Serialize)]
pub struct SearchArg {
    pub query: String,
    pub options: SearchOptions,
}

#[derive(Debug, Serialize)]
pub struct SearchOptions {
    pub path: String,
    pub max_results: u32,
    pub file_status: String,
}

impl SearchArg {
    /// Scoped or unscoped search over active (non-deleted) files.
    pub fn new(query: &str, path: Option<&str>) -> Self {
        Self {
            query: query.to_string(),
            options: SearchOptions {
                path: path.unwrap_or_default().to_string(),
                max_results: SEARCH_MAX_RESULTS,
                file_status: "active".to_string(),
            },
        }
    }
}

/// `.tag`-discriminated entry metadata.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = ".tag", rename_all = "snake_case")]
pub enum Metadata {
    File(FileMetadata),
    Folder(FolderMetadata),
}

#[derive(Debug, Clone, Deserialize)]
pub struct FileMetadata {
    pub name: String,
    pub path_lower: Option<String>,
    pub path_display: Option<String>,
    pub size: Option<u64>,
    pub content_hash: Option<String>,
    pub client_modified: Option<DateTime<Utc>>,
    pub server_modified: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FolderMetadata {
    pub name: String,
    pub path_lower: Option<String>,
    pub path_display: Option<String>,
}

impl From<Metadata> for FileEntry {
    fn from(metadata: Metadata) -> Self {
        match metadata {
            Metadata::Folder(folder) => FileEntry {
                path: folder
                    .path_lower
                    .or(folder.path_display)
                    .unwrap_or_default(),
                name: folder.name,
                kind: EntryKind::Folder,
            },
            Metadata::File(file) => FileEntry {
                path: file.path_lower.or(file.path_display).unwrap_or_default(),
                name: file.name,
                kind: EntryKind::File {
                    size: file.size,
                    content_hash: file.content_hash,
                    server_modified: file.server_modified.or(file.client_modified),
                },
            },
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ListFolderResult {
    pub entries: Vec<Metadata>,
    pub cursor: Option<String>,
    #[serde(default)]
    pub has_more: bool,
}

/// search_v2 nests entry metadata one level deeper than listing does.
#[derive(Debug, Deserialize)]
pub struct SearchV2Result {
    pub matches: Vec<SearchMatch>,
}

#[derive(Debug, Deserialize)]
pub struct SearchMatch {
    pub metadata: SearchMatchMetadata,
}

#[derive(Debug, Deserialize)]
pub struct SearchMatchMetadata {
    pub metadata: Metadata,
}

/// A folder listing with entries converted to domain form.
#[derive(Debug, Clone)]
pub struct FolderListing {
    pub entries: Vec<FileEntry>,
    pub cursor: Option<String>,
    pub has_more: bool,
}

impl From<ListFolderResult> for FolderListing {
    fn from(result: ListFolderResult) -> Self {
        Self {
            entries: result.entries.into_iter().map(FileEntry::from).collect(),
            cursor: result.cursor,
            has_more: result.has_more,
        }
    }
}
