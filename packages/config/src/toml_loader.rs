//! TOML rules file loader.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::fs;
use std::path::Path;

use crate::error::ConfigError;
use crate::types::RulesFile;

/// Load a TOML rules file.
///
/// # Arguments
///
/// * `path` - Path to the TOML rules file
///
/// # Errors
///
/// * If the file cannot be read
/// * If the file cannot be parsed as TOML, or has unknown keys
pub fn load_rules_file(path: &Path) -> Result<RulesFile, ConfigError> {
    log::debug!("Loading rules file from {}", path.display());

    let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;

    let file: RulesFile = toml::from_str(&content).map_err(|e| ConfigError::TomlParseError {
        path: path.to_path_buf(),
        source: e,
    })?;

    log::debug!("Loaded {} rules", file.replace.len());

    Ok(file)
}
