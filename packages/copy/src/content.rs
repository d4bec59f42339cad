//! Text/binary classification of file contents.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::fs;
use std::path::Path;

use crate::error::CopyError;

/// How many leading bytes are searched for a NUL byte.
pub const BINARY_SNIFF_LEN: usize = 8 * 1024;

/// A file's contents, classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileContent {
    /// Valid UTF-8 without NUL bytes near the start.
    Text(String),
    /// Anything else; never rewritten.
    Binary(Vec<u8>),
}

/// Whether `bytes` look binary (a NUL within the first [`BINARY_SNIFF_LEN`] bytes).
#[must_use]
pub fn is_binary(bytes: &[u8]) -> bool {
    bytes.iter().take(BINARY_SNIFF_LEN).any(|&b| b == 0)
}

/// Read and classify a file.
///
/// # Errors
///
/// * If the file cannot be read
pub fn read_content(path: &Path) -> Result<FileContent, CopyError> {
    let bytes = fs::read(path).map_err(|e| CopyError::ReadError {
        path: path.to_path_buf(),
        io_error: e,
    })?;

    if is_binary(&bytes) {
        log::trace!("{} contains NUL bytes, treating as binary", path.display());
        return Ok(FileContent::Binary(bytes));
    }

    match String::from_utf8(bytes) {
        Ok(text) => Ok(FileContent::Text(text)),
        Err(e) => {
            log::trace!("{} is not UTF-8, treating as binary", path.display());
            Ok(FileContent::Binary(e.into_bytes()))
        }
    }
}
