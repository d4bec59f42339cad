//! Error types for copy and rewrite operations.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;

use thiserror::Error;

/// Errors recorded while planning or executing an operation.
///
/// None of these abort a run; they are collected in the run's report.
#[derive(Debug, Error)]
pub enum OperationError {
    /// A source path given on the command line does not exist.
    #[error("Source not found: {}", path.display())]
    SourceNotFound {
        /// The missing path.
        path: PathBuf,
    },

    /// Two entries would be written to the same destination.
    #[error("Destination collision: {} -> {} is already taken", source_path.display(), target.display())]
    DestinationCollision {
        /// The entry that was not copied or renamed.
        source_path: PathBuf,
        /// The contested destination.
        target: PathBuf,
    },

    /// An ignore file under a source contains a malformed pattern.
    #[error("Invalid ignore pattern for {}: {source}", root.display())]
    InvalidIgnorePattern {
        /// The source root that was skipped.
        root: PathBuf,
        /// The underlying pattern error.
        #[source]
        source: mane_glob::GlobError,
    },

    /// Ignore files for a source could not be collected.
    #[error("Failed to collect ignore files for {}: {source}", root.display())]
    IgnoreDiscovery {
        /// The source root that was skipped.
        root: PathBuf,
        /// The underlying discovery error.
        #[source]
        source: mane_git::GitError,
    },

    /// A rewritten name is empty or contains a path separator.
    #[error("Rewriting {} gives an invalid name {name:?}", path.display())]
    InvalidName {
        /// The entry whose name was rewritten.
        path: PathBuf,
        /// The rewritten name.
        name: String,
    },

    /// Directory traversal failed.
    #[error("Failed to walk {}: {message}", path.display())]
    Walk {
        /// The path being walked.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// Materializing an entry failed.
    #[error(transparent)]
    Copy(#[from] mane_copy::CopyError),
}
