//! Archive session configuration loading and validation.
//!
//! This crate provides:
//! - Typed Rust structs for `zs.toml` (text policy, compression level, load limits)
//! - Config resolution (CLI → env → XDG → defaults)
//! - Semantic validation

pub mod archive;
pub mod resolve;
pub mod validate;

pub use archive::{ArchiveConfig, LoadLimits, TextPolicy};
pub use resolve::{resolve_config, ConfigPath, ConfigSource};
pub use validate::{validate_config, ValidationError, ValidationResult};

/// Schema version for configuration files.
pub const CONFIG_SCHEMA_VERSION: &str = "1.0.0";

/// Load, parse and validate the configuration picked by [`resolve_config`].
///
/// Falls back to [`ArchiveConfig::default`] when no file is found.
pub fn load_config(
    cli_path: Option<&std::path::Path>,
) -> ValidationResult<(ArchiveConfig, ConfigSource)> {
    let resolved = resolve_config(cli_path);
    let config = match &resolved.path {
        Some(path) => ArchiveConfig::from_file(path)?,
        None => ArchiveConfig::default(),
    };
    validate_config(&config)?;
    Ok((config, resolved.source))
}
