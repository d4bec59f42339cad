//! Executing a copy plan.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use mane_copy::{CopyProgress, copy_file, copy_symlink, create_dir};
use mane_replace::RuleSet;

use crate::error::OperationError;
use crate::plan::{CopyPlan, PlannedEntry};
use crate::walk::EntryKind;

/// Outcome of a copy.
#[derive(Debug, Default)]
pub struct CopyReport {
    /// Files and symlinks written.
    pub files_copied: u64,
    /// Directories that did not exist before.
    pub directories_created: u64,
    /// Every entry that was not copied, with the reason.
    pub errors: Vec<OperationError>,
}

impl CopyReport {
    /// Whether the copy finished without any errors.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Materialize every planned entry.
///
/// Planning errors are carried into the report. A failing entry is recorded
/// and the remaining entries are still processed.
///
/// # Arguments
///
/// * `plan` - The plan from [`crate::plan_copy`]
/// * `rules` - Applied to the content of text files
/// * `on_progress` - Called after each entry. Directories do not advance
///   `files_copied`.
pub fn execute_plan<F>(plan: CopyPlan, rules: &RuleSet, mut on_progress: F) -> CopyReport
where
    F: FnMut(&PlannedEntry, &CopyProgress),
{
    let files_total = plan.file_count();
    let mut report = CopyReport {
        errors: plan.errors,
        ..CopyReport::default()
    };
    let mut files_done = 0u64;

    log::debug!("Copying {files_total} files");

    for entry in &plan.entries {
        if entry.kind == EntryKind::Directory {
            match create_dir(&entry.target) {
                Ok(true) => report.directories_created += 1,
                Ok(false) => {}
                Err(e) => report.errors.push(e.into()),
            }
        } else {
            match copy_entry(entry, rules) {
                Ok(created_parent) => {
                    report.files_copied += 1;
                    if created_parent {
                        report.directories_created += 1;
                    }
                }
                Err(e) => {
                    log::debug!("Failed to copy {}: {e}", entry.source.display());
                    report.errors.push(e);
                }
            }
            files_done += 1;
        }

        on_progress(
            entry,
            &CopyProgress::new(
                files_total,
                files_done,
                Some(entry.source.to_string_lossy().to_string()),
            ),
        );
    }

    log::debug!(
        "Copied {} files, created {} directories, {} errors",
        report.files_copied,
        report.directories_created,
        report.errors.len()
    );

    report
}

/// Copy one file or symlink. Returns whether its parent had to be created.
fn copy_entry(entry: &PlannedEntry, rules: &RuleSet) -> Result<bool, OperationError> {
    let created_parent = match entry.target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => create_dir(parent)?,
        _ => false,
    };

    match entry.kind {
        EntryKind::Symlink => copy_symlink(&entry.source, &entry.target)?,
        EntryKind::File | EntryKind::Directory => {
            copy_file(&entry.source, &entry.target, |text| rules.apply(text))?;
        }
    }

    Ok(created_parent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    use crate::plan::{CopyJob, CopyOptions, plan_copy};
    use mane_git::GitError;
    use mane_glob::IgnoreFile;
    use tempfile::TempDir;

    fn no_ignore_files(_: &Path) -> Result<Vec<IgnoreFile>, GitError> {
        Ok(Vec::new())
    }

    #[test]
    fn test_execute_creates_parents_for_file_roots() {
        let dir = TempDir::new().unwrap();
        let base = dir.path();
        fs::write(base.join("a.txt"), "foo").unwrap();
        fs::write(base.join("b.txt"), "Foo").unwrap();

        let job = CopyJob {
            sources: vec![base.join("a.txt"), base.join("b.txt")],
            destination: base.join("out/nested"),
        };
        let rules = RuleSet::from_pairs([("foo", "bar")]).unwrap();
        let plan = plan_copy(&job, &rules, CopyOptions::default(), &no_ignore_files);

        let mut seen = Vec::new();
        let report = execute_plan(plan, &rules, |_, progress| {
            seen.push((progress.files_copied, progress.files_total));
        });

        assert!(report.is_success());
        assert_eq!(report.files_copied, 2);
        assert_eq!(report.directories_created, 1);
        assert_eq!(seen, vec![(1, 2), (2, 2)]);
        assert_eq!(fs::read_to_string(base.join("out/nested/a.txt")).unwrap(), "bar");
        assert_eq!(fs::read_to_string(base.join("out/nested/b.txt")).unwrap(), "Bar");
    }

    #[test]
    fn test_directories_are_reported_without_advancing() {
        let dir = TempDir::new().unwrap();
        let base = dir.path();
        fs::create_dir_all(base.join("foo/sub")).unwrap();
        fs::write(base.join("foo/sub/a.txt"), "a").unwrap();

        let job = CopyJob {
            sources: vec![base.join("foo")],
            destination: base.join("out"),
        };
        let rules = RuleSet::default();
        let plan = plan_copy(&job, &rules, CopyOptions::default(), &no_ignore_files);

        let mut seen = Vec::new();
        let report = execute_plan(plan, &rules, |entry, progress| {
            let target = entry.target.strip_prefix(base).unwrap().to_path_buf();
            seen.push((target, entry.kind, progress.files_copied));
        });

        assert!(report.is_success());
        assert_eq!(report.directories_created, 2);
        assert_eq!(
            seen,
            vec![
                (Path::new("out").to_path_buf(), EntryKind::Directory, 0),
                (Path::new("out").join("sub"), EntryKind::Directory, 0),
                (Path::new("out").join("sub").join("a.txt"), EntryKind::File, 1),
            ]
        );
    }

    #[test]
    fn test_failed_entry_does_not_stop_the_copy() {
        let dir = TempDir::new().unwrap();
        let base = dir.path();
        fs::create_dir_all(base.join("src")).unwrap();
        fs::write(base.join("src/a.txt"), "a").unwrap();
        fs::write(base.join("src/b.txt"), "b").unwrap();

        let job = CopyJob {
            sources: vec![base.join("src")],
            destination: base.join("out"),
        };
        let rules = RuleSet::default();
        let plan = plan_copy(&job, &rules, CopyOptions::default(), &no_ignore_files);
        fs::remove_file(base.join("src/a.txt")).unwrap();

        let report = execute_plan(plan, &rules, |_, _| {});

        assert_eq!(report.files_copied, 1);
        assert_eq!(report.errors.len(), 1);
        assert!(matches!(report.errors[0], OperationError::Copy(_)));
        assert_eq!(fs::read_to_string(base.join("out/b.txt")).unwrap(), "b");
    }
}
