//! In-memory archive contents: file bytes keyed by path plus the
//! ancestor-closed set of directory paths.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::path::ArchivePath;

/// A logical member found in, or implied by, a loaded archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchiveEntry {
    pub path: ArchivePath,
    pub is_directory: bool,
}

impl ArchiveEntry {
    pub fn file(path: ArchivePath) -> Self {
        Self {
            path,
            is_directory: false,
        }
    }

    pub fn directory(path: ArchivePath) -> Self {
        Self {
            path,
            is_directory: true,
        }
    }

    pub fn name(&self) -> &str {
        self.path.segment()
    }
}

/// File path → current bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileStore {
    files: BTreeMap<ArchivePath, Vec<u8>>,
}

impl FileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a file, returning the previous bytes.
    pub fn insert(&mut self, path: ArchivePath, data: Vec<u8>) -> Option<Vec<u8>> {
        self.files.insert(path, data)
    }

    pub fn get(&self, path: &str) -> Option<&[u8]> {
        self.files.get(path).map(Vec::as_slice)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Paths in ascending order.
    pub fn paths(&self) -> impl Iterator<Item = &ArchivePath> {
        self.files.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ArchivePath, &[u8])> {
        self.files.iter().map(|(path, data)| (path, data.as_slice()))
    }

    /// Sum of uncompressed file sizes.
    pub fn total_bytes(&self) -> u64 {
        self.files.values().map(|data| data.len() as u64).sum()
    }

    #[cfg(test)]
    pub(crate) fn allocated_bytes(&self) -> usize {
        self.files.values().map(Vec::capacity).sum()
    }
}

/// Set of known directory paths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectorySet {
    dirs: BTreeSet<ArchivePath>,
}

impl DirectorySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: ArchivePath) -> bool {
        self.dirs.insert(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.dirs.contains(path)
    }

    pub fn len(&self) -> usize {
        self.dirs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ArchivePath> {
        self.dirs.iter()
    }

    /// Insert every missing proper ancestor of `path`. Returns how many were added.
    pub fn insert_ancestors(&mut self, path: &ArchivePath) -> usize {
        let mut added = 0;
        for ancestor in path.ancestors() {
            if !self.dirs.contains(ancestor) {
                self.dirs.insert(ArchivePath::from_prefix(ancestor));
                added += 1;
            }
        }
        added
    }

    /// Whether every proper ancestor of every directory and file is present.
    pub fn is_closed_over(&self, files: &FileStore) -> bool {
        self.dirs
            .iter()
            .chain(files.paths())
            .all(|path| path.ancestors().all(|a| self.dirs.contains(a)))
    }
}

/// One file store plus its directory set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiveContents {
    pub files: FileStore,
    pub directories: DirectorySet,
}

impl ArchiveContents {
    pub fn new(files: FileStore, directories: DirectorySet) -> Self {
        Self { files, directories }
    }

    /// Flat entry list: shallower paths first, directories before files at
    /// equal depth, then by path.
    pub fn entries(&self) -> Vec<ArchiveEntry> {
        let mut entries: Vec<ArchiveEntry> = self
            .directories
            .iter()
            .cloned()
            .map(ArchiveEntry::directory)
            .chain(self.files.paths().cloned().map(ArchiveEntry::file))
            .collect();

        entries.sort_by(|a, b| {
            a.path
                .depth()
                .cmp(&b.path.depth())
                .then_with(|| b.is_directory.cmp(&a.is_directory))
                .then_with(|| a.path.cmp(&b.path))
        });
        entries
    }
}
