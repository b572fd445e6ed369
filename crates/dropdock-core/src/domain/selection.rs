//! File selection for bulk operations
//!
//! Invariant: only non-folder entries enter the set. The host UI clears the
//! selection on folder navigation.

use std::collections::BTreeSet;

use super::FileEntry;

/// Set of selected file paths for bulk download or upload.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    paths: BTreeSet<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file entry to the selection. Folders are rejected.
    ///
    /// Returns `true` if the entry was added.
    pub fn select(&mut self, entry: &FileEntry) -> bool {
        if entry.is_folder() {
            return false;
        }
        self.paths.insert(entry.path.clone())
    }

    pub fn deselect(&mut self, path: &str) -> bool {
        self.paths.remove(path)
    }

    /// Toggle an entry in or out of the selection.
    ///
    /// Folders never enter the set; toggling one is a no-op.
    pub fn toggle(&mut self, entry: &FileEntry) {
        if self.paths.contains(&entry.path) {
            self.paths.remove(&entry.path);
        } else {
            self.select(entry);
        }
    }

    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains(path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Snapshot of the selected paths, in stable order.
    pub fn paths(&self) -> Vec<String> {
        self.paths.iter().cloned().collect()
    }

    pub fn clear(&mut self) {
        self.paths.clear();
    }
}
