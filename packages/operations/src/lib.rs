//! Copy planning and execution for mane.
//!
//! This crate turns a set of sources, a destination and a [`RuleSet`] into
//! files on disk:
//!
//! * Source trees are walked serially and in name order, pruning everything
//!   the ignore rules exclude
//! * Destination names are rewritten when renaming is enabled
//! * Text contents are rewritten; binaries and symlinks are copied as-is
//! * Per-entry failures are collected instead of aborting the run
//!
//! # Example
//!
//! ```rust,ignore
//! use mane_operations::{CopyJob, CopyOptions, plan_copy, execute_plan};
//!
//! // Plan first (for dry runs and progress totals)
//! let plan = plan_copy(&job, &rules, options, &mane_git::locate_ignore_files);
//!
//! let report = execute_plan(plan, &rules, |_, progress| {
//!     println!("{}/{} files", progress.files_copied, progress.files_total);
//! });
//! ```

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod execute;
mod plan;
mod rewrite;
mod walk;

use std::path::Path;

pub use error::OperationError;
pub use execute::{CopyReport, execute_plan};
pub use mane_copy::CopyProgress;
pub use plan::{CopyJob, CopyOptions, CopyPlan, PlannedEntry, plan_copy};
pub use rewrite::{RewriteReport, rewrite_in_place, rewrite_to_string};
pub use walk::EntryKind;

use mane_git::GitError;
use mane_glob::IgnoreFile;
use mane_replace::RuleSet;

/// Plan and execute a copy in one step.
///
/// # Arguments
///
/// * `job` - Sources and destination
/// * `rules` - Replacement rules for names and contents
/// * `options` - Renaming and ignore behaviour
/// * `locate` - Collects the ignore files that apply to a source directory
/// * `on_progress` - Called after each entry, directories included
pub fn copy_with_replacements<L, F>(
    job: &CopyJob,
    rules: &RuleSet,
    options: CopyOptions,
    locate: &L,
    on_progress: F,
) -> CopyReport
where
    L: Fn(&Path) -> Result<Vec<IgnoreFile>, GitError>,
    F: FnMut(&PlannedEntry, &CopyProgress),
{
    log::debug!(
        "Copying {} sources to {}",
        job.sources.len(),
        job.destination.display()
    );

    let plan = plan_copy(job, rules, options, locate);
    execute_plan(plan, rules, on_progress)
}
