//! Error types for rules-file loading.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading rules.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the rules file.
    #[error("Failed to read rules file {}: {source}", path.display())]
    ReadError {
        /// Path to the file that couldn't be read.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the rules file.
    #[error("Failed to parse rules file {}: {source}", path.display())]
    TomlParseError {
        /// Path to the file that couldn't be parsed.
        path: PathBuf,
        /// The underlying TOML error.
        #[source]
        source: toml::de::Error,
    },

    /// A rule is not valid.
    #[error(transparent)]
    InvalidRule(#[from] mane_replace::ReplaceError),
}
