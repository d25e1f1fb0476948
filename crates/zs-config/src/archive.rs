//! Archive session configuration types.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::validate::ValidationError;

/// How stored member bytes are turned into editable text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextPolicy {
    /// Invalid UTF-8 sequences are replaced with U+FFFD.
    #[default]
    Lossy,
    /// Invalid UTF-8 is reported as an encoding error.
    Strict,
}

impl TextPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextPolicy::Lossy => "lossy",
            TextPolicy::Strict => "strict",
        }
    }
}

impl std::str::FromStr for TextPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lossy" | "best-effort" => Ok(TextPolicy::Lossy),
            "strict" => Ok(TextPolicy::Strict),
            _ => Err(format!("unknown text policy: {}", s)),
        }
    }
}

impl std::fmt::Display for TextPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resource guards applied while an archive is decompressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadLimits {
    /// Maximum number of members in the central directory.
    pub max_entries: usize,
    /// Maximum sum of uncompressed member sizes.
    pub max_total_bytes: u64,
}

impl Default for LoadLimits {
    fn default() -> Self {
        Self {
            max_entries: 65_536,
            max_total_bytes: 512 * 1024 * 1024,
        }
    }
}

impl LoadLimits {
    /// Limits that never trip. Intended for tests and trusted inputs.
    pub fn unlimited() -> Self {
        Self {
            max_entries: usize::MAX,
            max_total_bytes: u64::MAX,
        }
    }
}

/// Top-level `zs.toml` contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchiveConfig {
    pub schema_version: String,
    pub text_policy: TextPolicy,
    /// Deflate level (1-9) applied to every member on export.
    pub compression_level: i64,
    pub limits: LoadLimits,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            schema_version: crate::CONFIG_SCHEMA_VERSION.to_string(),
            text_policy: TextPolicy::default(),
            compression_level: 6,
            limits: LoadLimits::default(),
        }
    }
}

impl ArchiveConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ValidationError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ValidationError::IoError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ValidationError> {
        toml::from_str(content)
            .map_err(|e| ValidationError::ParseError(format!("Invalid TOML: {}", e)))
    }

    /// Serialize back to TOML.
    pub fn to_toml(&self) -> Result<String, ValidationError> {
        toml::to_string_pretty(self)
            .map_err(|e| ValidationError::ParseError(format!("TOML encode failed: {}", e)))
    }

    pub fn with_text_policy(mut self, policy: TextPolicy) -> Self {
        self.text_policy = policy;
        self
    }

    pub fn with_compression_level(mut self, level: i64) -> Self {
        self.compression_level = level;
        self
    }

    pub fn with_limits(mut self, limits: LoadLimits) -> Self {
        self.limits = limits;
        self
    }
}
