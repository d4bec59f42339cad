//! Gitignore-style path exclusion matching.
//!
//! Patterns are compiled with `globset` and evaluated the way git evaluates
//! ignore files:
//!
//! * The last matching pattern decides; `!pattern` re-includes
//! * `dir/` matches directories only (and everything beneath them)
//! * Patterns without `/` match a basename at any depth; others are anchored
//! * `*` and `?` never cross `/`; `**` does
//!
//! # Example
//!
//! ```rust
//! use std::path::Path;
//!
//! use mane_glob::{IgnoreFile, IgnoreMatcher};
//!
//! let file = IgnoreFile::new("/repo", ["*.log", "!keep.log"]);
//! let matcher = IgnoreMatcher::from_files("/repo", &[file])?;
//!
//! assert!(matcher.is_excluded(Path::new("app.log"), false));
//! assert!(!matcher.is_excluded(Path::new("keep.log"), false));
//! # Ok::<(), mane_glob::GlobError>(())
//! ```

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod matcher;
mod pattern;

pub use error::GlobError;
pub use matcher::{IgnoreFile, IgnoreMatcher};
pub use pattern::IgnorePattern;
