//! Ignore-file discovery for mane.
//!
//! This crate locates the gitignore-style rule files that apply to a path:
//!
//! * Repository discovery using the `git2` library
//! * The repository's `info/exclude` and every `.gitignore` above the path
//! * Every `.gitignore` inside the path
//!
//! # Example
//!
//! ```rust,ignore
//! use mane_git::locate_ignore_files;
//! use mane_glob::IgnoreMatcher;
//!
//! let files = locate_ignore_files(source)?;
//! let matcher = IgnoreMatcher::from_files(source.canonicalize()?, &files)?;
//! ```

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod ignore_files;
mod repo;

pub use error::GitError;
pub use ignore_files::{GITIGNORE_FILE_NAME, locate_ignore_files};
pub use repo::{discover_repo, get_repo_root};
