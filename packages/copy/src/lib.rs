//! Single-entry file materialization with content rewriting.
//!
//! This crate knows how to put one filesystem entry at a destination:
//!
//! * Text files are decoded, passed through a transform and written
//! * Binary files are copied byte-for-byte, using copy-on-write via
//!   `reflink-copy` (APFS, Btrfs, `ReFS`) when the filesystem supports it
//! * Symlinks are recreated as symlinks, never followed
//!
//! Walking trees and deciding *what* to copy is left to the caller.
//!
//! # Example
//!
//! ```rust,ignore
//! use mane_copy::{copy_file, CopyResult};
//!
//! match copy_file(source, target, |text| text.replace("foo", "bar"))? {
//!     CopyResult::Text { changed } => println!("rewritten: {changed}"),
//!     CopyResult::Binary => println!("copied verbatim"),
//! }
//! ```

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod content;
mod copy;
mod error;
mod progress;

pub use content::{BINARY_SNIFF_LEN, FileContent, is_binary, read_content};
pub use copy::{CopyResult, copy_file, copy_symlink, create_dir, rename_entry, rewrite_file};
pub use error::CopyError;
pub use progress::CopyProgress;
