//! Error types for archive session operations.

use thiserror::Error;

/// Errors that can occur while loading, editing or exporting an archive.
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// Input bytes do not parse as a ZIP container
    #[error("corrupt archive: {0}")]
    CorruptArchive(String),

    /// Archive exceeds a configured load limit
    #[error("archive limit exceeded: {0}")]
    LimitExceeded(String),

    /// File member not present in the session
    #[error("file not found in archive: {0}")]
    PathNotFound(String),

    /// Member bytes are not valid UTF-8 under the strict text policy
    #[error("member '{path}' is not valid UTF-8: {source}")]
    Encoding {
        path: String,
        #[source]
        source: std::str::Utf8Error,
    },

    /// Member name that does not normalize to a usable path
    #[error("invalid member path: {0:?}")]
    InvalidPath(String),

    /// Operation requires a loaded archive
    #[error("no archive loaded")]
    NotLoaded,

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP writer error
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

impl ArchiveError {
    /// Error code for structured error reporting.
    pub fn code(&self) -> u32 {
        match self {
            ArchiveError::CorruptArchive(_) => 40,
            ArchiveError::LimitExceeded(_) => 41,
            ArchiveError::PathNotFound(_) => 42,
            ArchiveError::Encoding { .. } => 43,
            ArchiveError::InvalidPath(_) => 44,
            ArchiveError::NotLoaded => 45,
            ArchiveError::Io(_) => 50,
            ArchiveError::Zip(_) => 51,
        }
    }

    /// Whether the caller can carry on with the current session.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ArchiveError::PathNotFound(_)
                | ArchiveError::Encoding { .. }
                | ArchiveError::InvalidPath(_)
                | ArchiveError::NotLoaded
        )
    }
}

/// Result type alias for archive operations.
pub type Result<T> = std::result::Result<T, ArchiveError>;
