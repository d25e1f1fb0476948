//! Serialize a file store and directory set back into ZIP bytes.
//!
//! Output is deterministic for a given input: directories are written
//! first, then files, each group in ascending path order, all with a fixed
//! modification time.

use std::io::{Cursor, Write};
use tracing::{debug, info, warn};
use zip::write::{FileOptions, ZipWriter};
use zip::{CompressionMethod, DateTime};
use zs_config::validate::{MAX_COMPRESSION_LEVEL, MIN_COMPRESSION_LEVEL};

use crate::store::{DirectorySet, FileStore};
use crate::Result;

/// Deflate level used when none is configured.
pub const DEFAULT_COMPRESSION_LEVEL: i64 = 6;

/// Writes archive contents as a Deflate-compressed ZIP.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveWriter {
    compression_level: i64,
}

impl Default for ArchiveWriter {
    fn default() -> Self {
        Self::new(DEFAULT_COMPRESSION_LEVEL)
    }
}

impl ArchiveWriter {
    /// Levels outside the Deflate range are clamped into it.
    pub fn new(compression_level: i64) -> Self {
        let clamped = compression_level.clamp(MIN_COMPRESSION_LEVEL, MAX_COMPRESSION_LEVEL);
        if clamped != compression_level {
            warn!(
                requested = compression_level,
                used = clamped,
                "Compression level out of range, clamping"
            );
        }
        Self {
            compression_level: clamped,
        }
    }

    pub fn compression_level(&self) -> i64 {
        self.compression_level
    }

    fn options(&self, permissions: u32) -> FileOptions<'static, ()> {
        FileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .compression_level(Some(self.compression_level))
            .last_modified_time(DateTime::default())
            .unix_permissions(permissions)
    }

    /// Write every directory and file into a new in-memory archive.
    pub fn write(&self, files: &FileStore, directories: &DirectorySet) -> Result<Vec<u8>> {
        let mut buffer = Cursor::new(Vec::new());
        {
            let mut zip = ZipWriter::new(&mut buffer);
            let dir_options = self.options(0o755);
            let file_options = self.options(0o644);

            for dir in directories.iter() {
                zip.add_directory(dir.to_dir_name(), dir_options)?;
            }

            for (path, data) in files.iter() {
                zip.start_file(path.as_str(), file_options)?;
                zip.write_all(data)?;
                debug!(path = %path, bytes = data.len(), "Wrote member");
            }

            zip.finish()?;
        }

        let bytes = buffer.into_inner();

        info!(
            files = files.len(),
            directories = directories.len(),
            compressed_bytes = bytes.len(),
            uncompressed_bytes = files.total_bytes(),
            "Archive written to memory"
        );

        Ok(bytes)
    }
}
