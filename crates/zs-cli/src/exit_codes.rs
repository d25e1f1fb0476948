//! Exit codes for the `zs` CLI.
//!
//! Exit code ranges:
//! - 0: Success
//! - 10-19: User/input errors (recoverable by user action)
//! - 20-29: Internal errors (bugs, should be reported)

use zs_archive::ArchiveError;

/// Exit codes for zs operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success
    Clean = 0,

    // ========================================================================
    // User / Input Errors (10-19)
    // ========================================================================
    /// Configuration file invalid
    ConfigError = 10,

    /// Input or output file could not be read/written
    IoError = 11,

    /// Archive is corrupt or exceeds load limits
    ArchiveError = 12,

    /// Member not present in the archive
    NotFound = 13,

    /// Member is not valid UTF-8 under the strict text policy
    EncodingError = 14,

    // ========================================================================
    // Internal Errors (20-29)
    // ========================================================================
    /// Internal error (bug - please report)
    InternalError = 20,
}

impl ExitCode {
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn is_success(self) -> bool {
        self == ExitCode::Clean
    }

    /// Get the error code name as a string constant.
    pub fn code_name(&self) -> &'static str {
        match self {
            ExitCode::Clean => "OK",
            ExitCode::ConfigError => "ERR_CONFIG",
            ExitCode::IoError => "ERR_IO",
            ExitCode::ArchiveError => "ERR_ARCHIVE",
            ExitCode::NotFound => "ERR_NOT_FOUND",
            ExitCode::EncodingError => "ERR_ENCODING",
            ExitCode::InternalError => "ERR_INTERNAL",
        }
    }
}

impl From<&ArchiveError> for ExitCode {
    fn from(err: &ArchiveError) -> Self {
        match err {
            ArchiveError::CorruptArchive(_) | ArchiveError::LimitExceeded(_) => {
                ExitCode::ArchiveError
            }
            ArchiveError::PathNotFound(_) | ArchiveError::InvalidPath(_) => ExitCode::NotFound,
            ArchiveError::Encoding { .. } => ExitCode::EncodingError,
            ArchiveError::Io(_) => ExitCode::IoError,
            ArchiveError::NotLoaded | ArchiveError::Zip(_) => ExitCode::InternalError,
        }
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        std::process::ExitCode::from(code.as_u8())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_archive_error_mapping() {
        assert_eq!(
            ExitCode::from(&ArchiveError::CorruptArchive("x".into())),
            ExitCode::ArchiveError
        );
        assert_eq!(
            ExitCode::from(&ArchiveError::PathNotFound("a".into())),
            ExitCode::NotFound
        );
        assert_eq!(
            ExitCode::from(&ArchiveError::NotLoaded),
            ExitCode::InternalError
        );
    }

    #[test]
    fn test_code_values_are_stable() {
        assert_eq!(ExitCode::Clean.as_u8(), 0);
        assert_eq!(ExitCode::ArchiveError.as_u8(), 12);
        assert_eq!(ExitCode::NotFound.code_name(), "ERR_NOT_FOUND");
        assert!(ExitCode::Clean.is_success());
        assert!(!ExitCode::IoError.is_success());
    }
}
