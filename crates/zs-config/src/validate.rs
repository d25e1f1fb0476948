//! Configuration validation errors and semantic validation.

use thiserror::Error;

use crate::archive::ArchiveConfig;

/// Validation result type.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Deflate level bounds accepted by the writer.
pub const MIN_COMPRESSION_LEVEL: i64 = 1;
pub const MAX_COMPRESSION_LEVEL: i64 = 9;

/// Configuration validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Version mismatch: expected {expected}, got {actual}")]
    VersionMismatch { expected: String, actual: String },
}

impl ValidationError {
    /// Error code for structured error reporting.
    pub fn code(&self) -> u32 {
        match self {
            ValidationError::IoError(_) => 60,
            ValidationError::ParseError(_) => 61,
            ValidationError::InvalidValue { .. } => 65,
            ValidationError::VersionMismatch { .. } => 66,
        }
    }
}

/// Validate an archive configuration semantically.
pub fn validate_config(config: &ArchiveConfig) -> ValidationResult<()> {
    if config.schema_version != crate::CONFIG_SCHEMA_VERSION {
        return Err(ValidationError::VersionMismatch {
            expected: crate::CONFIG_SCHEMA_VERSION.to_string(),
            actual: config.schema_version.clone(),
        });
    }

    if !(MIN_COMPRESSION_LEVEL..=MAX_COMPRESSION_LEVEL).contains(&config.compression_level) {
        return Err(ValidationError::InvalidValue {
            field: "compression_level".to_string(),
            message: format!(
                "must be between {} and {}, got {}",
                MIN_COMPRESSION_LEVEL, MAX_COMPRESSION_LEVEL, config.compression_level
            ),
        });
    }

    if config.limits.max_entries == 0 {
        return Err(ValidationError::InvalidValue {
            field: "limits.max_entries".to_string(),
            message: "must be greater than 0".to_string(),
        });
    }

    if config.limits.max_total_bytes == 0 {
        return Err(ValidationError::InvalidValue {
            field: "limits.max_total_bytes".to_string(),
            message: "must be greater than 0".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::LoadLimits;

    #[test]
    fn test_default_config_is_valid() {
        validate_config(&ArchiveConfig::default()).unwrap();
    }

    #[test]
    fn test_compression_level_bounds() {
        for level in [1, 9] {
            let config = ArchiveConfig::default().with_compression_level(level);
            validate_config(&config).unwrap();
        }
        for level in [-1, 0, 10, 264] {
            let config = ArchiveConfig::default().with_compression_level(level);
            match validate_config(&config).unwrap_err() {
                ValidationError::InvalidValue { field, .. } => {
                    assert_eq!(field, "compression_level")
                }
                other => panic!("unexpected error: {other}"),
            }
        }
    }

    #[test]
    fn test_zero_limits_rejected() {
        let config = ArchiveConfig::default().with_limits(LoadLimits {
            max_entries: 0,
            ..LoadLimits::default()
        });
        assert!(validate_config(&config).is_err());

        let config = ArchiveConfig::default().with_limits(LoadLimits {
            max_total_bytes: 0,
            ..LoadLimits::default()
        });
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_version_mismatch() {
        let mut config = ArchiveConfig::default();
        config.schema_version = "0.9.0".to_string();
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, ValidationError::VersionMismatch { .. }));
        assert_eq!(err.code(), 66);
    }
}
