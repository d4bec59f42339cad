//! Error types for ignore pattern compilation.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while compiling ignore patterns.
#[derive(Debug, Error)]
pub enum GlobError {
    /// A pattern line is not a valid glob.
    #[error("Invalid ignore pattern {pattern:?} (from {}): {source}", anchor_dir.display())]
    InvalidIgnorePattern {
        /// The pattern line as written.
        pattern: String,
        /// Directory the pattern is relative to.
        anchor_dir: PathBuf,
        /// The underlying globset error.
        #[source]
        source: globset::Error,
    },
}
