//! Decompress ZIP bytes into an ancestor-closed [`ArchiveContents`].
//!
//! Every parse failure (bad signature, truncated central directory,
//! unsupported compression method, checksum mismatch) surfaces as
//! [`ArchiveError::CorruptArchive`]. Loading never touches caller state.

use std::io::{Cursor, Read};
use tracing::{debug, info, warn};
use zip::ZipArchive;
use zs_config::LoadLimits;

use crate::path::{ArchivePath, SEPARATOR};
use crate::store::{ArchiveContents, ArchiveEntry, DirectorySet, FileStore};
use crate::{ArchiveError, Result};

/// Largest buffer reserved up front for a single member.
const PREALLOC_LIMIT: u64 = 64 * 1024;

/// Counters gathered while loading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    /// Members listed in the central directory.
    pub members: usize,
    /// Directories added because no explicit entry existed.
    pub synthesized_dirs: usize,
    /// Members skipped because their name does not normalize to a path.
    pub skipped: usize,
    /// Total uncompressed bytes of file members.
    pub total_bytes: u64,
}

/// Result of a successful load.
#[derive(Debug, Clone)]
pub struct LoadedArchive {
    pub contents: ArchiveContents,
    pub entries: Vec<ArchiveEntry>,
    pub stats: LoadStats,
}

fn corrupt(err: impl std::fmt::Display) -> ArchiveError {
    ArchiveError::CorruptArchive(err.to_string())
}

/// Parse `bytes` as a ZIP archive.
pub fn load(bytes: &[u8], limits: &LoadLimits) -> Result<LoadedArchive> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).map_err(corrupt)?;

    if archive.len() > limits.max_entries {
        return Err(ArchiveError::LimitExceeded(format!(
            "{} members exceeds limit {}",
            archive.len(),
            limits.max_entries
        )));
    }

    let mut files = FileStore::new();
    let mut directories = DirectorySet::new();
    let mut stats = LoadStats {
        members: archive.len(),
        ..LoadStats::default()
    };

    for index in 0..archive.len() {
        let mut member = archive.by_index(index).map_err(corrupt)?;
        let name = member.name().to_string();

        let path = match ArchivePath::parse(&name) {
            Ok(path) => path,
            Err(_) => {
                warn!(index, name = %name, "Skipping member with unusable path");
                stats.skipped += 1;
                continue;
            }
        };

        // Only a trailing `/` marks a directory; `\` is part of the name.
        if name.ends_with(SEPARATOR) {
            directories.insert(path);
            continue;
        }

        // The declared size is untrusted, so it only caps the initial buffer.
        let remaining = limits.max_total_bytes.saturating_sub(stats.total_bytes);
        let initial = member.size().min(remaining).min(PREALLOC_LIMIT);
        let mut data = Vec::with_capacity(initial as usize);
        member
            .by_ref()
            .take(remaining.saturating_add(1))
            .read_to_end(&mut data)
            .map_err(|e| corrupt(format!("{}: {}", name, e)))?;
        data.shrink_to_fit();

        let size = data.len() as u64;
        if size > remaining {
            return Err(ArchiveError::LimitExceeded(format!(
                "uncompressed size exceeds limit {} bytes at '{}'",
                limits.max_total_bytes, name
            )));
        }
        stats.total_bytes += size;

        debug!(path = %path, bytes = size, "Loaded member");
        if files.insert(path, data).is_some() {
            warn!(name = %name, "Duplicate member, keeping last occurrence");
        }
    }

    let members: Vec<ArchivePath> = directories.iter().chain(files.paths()).cloned().collect();
    for path in &members {
        stats.synthesized_dirs += directories.insert_ancestors(path);
    }
    if stats.synthesized_dirs > 0 {
        debug!(
            count = stats.synthesized_dirs,
            "Synthesized implicit ancestor directories"
        );
    }

    let contents = ArchiveContents::new(files, directories);
    let entries = contents.entries();

    info!(
        members = stats.members,
        files = contents.files.len(),
        directories = contents.directories.len(),
        bytes = stats.total_bytes,
        "Archive loaded"
    );

    Ok(LoadedArchive {
        contents,
        entries,
        stats,
    })
}
