//! Core domain entities
//!
//! These types cross the router boundary and are therefore serializable.
//! Everything here is transient except the token keys in `provider`.

mod file_entry;
mod provider;
mod selection;
mod startup;
mod upload;

pub use file_entry::{sort_entries, EntryKind, FileEntry};
pub use provider::TokenProvider;
pub use selection::Selection;
pub use startup::StartupSummary;
pub use upload::{UploadFileRef, UploadJob, UploadReport};
