//! Rewriting existing files and names without copying.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf, is_separator};

use mane_copy::{CopyResult, FileContent, read_content, rename_entry, rewrite_file};
use mane_git::GitError;
use mane_glob::IgnoreFile;
use mane_replace::RuleSet;

use crate::error::OperationError;
use crate::walk::{EntryKind, build_matcher, walk_tree};

/// Outcome of an in-place rewrite.
#[derive(Debug, Default)]
pub struct RewriteReport {
    /// Files whose content changed.
    pub files_rewritten: u64,
    /// Files and directories that were renamed.
    pub entries_renamed: u64,
    /// Every entry that could not be rewritten or renamed, with the reason.
    pub errors: Vec<OperationError>,
}

impl RewriteReport {
    /// Whether the rewrite finished without any errors.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Rewrite contents and names of `paths` in place.
///
/// Directories are walked with the same ignore rules as a copy. All contents
/// are rewritten first; then entries are renamed deepest-first so a parent is
/// renamed only after everything below it. A rename onto an existing path is
/// reported as a collision and skipped. Overlapping paths are handled once.
///
/// # Arguments
///
/// * `paths` - Files or directories to rewrite (each is renamed too)
/// * `rules` - Replacement rules
/// * `include_ignored` - Rewrite entries even when ignore rules exclude them
/// * `locate` - Collects the ignore files that apply to a directory
pub fn rewrite_in_place<L>(
    paths: &[PathBuf],
    rules: &RuleSet,
    include_ignored: bool,
    locate: &L,
) -> RewriteReport
where
    L: Fn(&Path) -> Result<Vec<IgnoreFile>, GitError>,
{
    let mut report = RewriteReport::default();
    let mut seen: HashSet<PathBuf> = HashSet::new();
    let mut renames: Vec<(PathBuf, PathBuf)> = Vec::new();

    for root in paths {
        let Some(kind) = EntryKind::of(root) else {
            report.errors.push(OperationError::SourceNotFound { path: root.clone() });
            continue;
        };

        let mut entries = vec![(root.clone(), kind)];
        if kind == EntryKind::Directory {
            match build_matcher(root, include_ignored, locate) {
                Ok(matcher) => {
                    let (walked, errors) = walk_tree(root, &matcher);
                    report.errors.extend(errors);
                    entries.extend(walked.into_iter().map(|entry| (entry.path, entry.kind)));
                }
                Err(e) => {
                    report.errors.push(e);
                    continue;
                }
            }
        }

        for (path, kind) in entries {
            let key = entry_key(&path);
            if !seen.insert(key.clone()) {
                log::debug!("{} was already rewritten", path.display());
                continue;
            }

            if kind == EntryKind::File {
                match rewrite_file(&path, |text| rules.apply(text)) {
                    Ok(CopyResult::Text { changed: true }) => report.files_rewritten += 1,
                    Ok(_) => {}
                    Err(e) => report.errors.push(e.into()),
                }
            }
            renames.push((key, path));
        }
    }

    // Deepest first; the stable sort keeps traversal order among equals.
    renames.sort_by_key(|(key, _)| std::cmp::Reverse(key.components().count()));

    for (_, path) in renames {
        match rename_one(&path, rules) {
            Ok(true) => report.entries_renamed += 1,
            Ok(false) => {}
            Err(e) => report.errors.push(e),
        }
    }

    log::debug!(
        "Rewrote {} files, renamed {} entries, {} errors",
        report.files_rewritten,
        report.entries_renamed,
        report.errors.len()
    );

    report
}

/// The path an entry is known by regardless of how it was spelled.
///
/// Only the parent is resolved so a symlink stays distinct from its target.
fn entry_key(path: &Path) -> PathBuf {
    let resolved = match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) => {
            let parent = if parent.as_os_str().is_empty() {
                Path::new(".")
            } else {
                parent
            };
            fs::canonicalize(parent).map(|parent| parent.join(name))
        }
        _ => fs::canonicalize(path),
    };
    resolved.unwrap_or_else(|_| path.to_path_buf())
}

/// Rename `path` to its rewritten name. Returns whether a rename happened.
fn rename_one(path: &Path, rules: &RuleSet) -> Result<bool, OperationError> {
    let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
        return Ok(false);
    };

    let rewritten = rules.apply_to_name(name);
    if rewritten == name {
        return Ok(false);
    }
    if rewritten.is_empty() || rewritten.contains(is_separator) || rewritten == "." || rewritten == ".." {
        return Err(OperationError::InvalidName {
            path: path.to_path_buf(),
            name: rewritten,
        });
    }

    let target = path.with_file_name(&rewritten);
    if EntryKind::of(&target).is_some() {
        return Err(OperationError::DestinationCollision {
            source_path: path.to_path_buf(),
            target,
        });
    }

    rename_entry(path, &target)?;
    log::debug!("Renamed {} -> {}", path.display(), target.display());
    Ok(true)
}

/// Rewritten content of a text file, or `None` if the file is binary.
///
/// # Errors
///
/// * If the file cannot be read
pub fn rewrite_to_string(path: &Path, rules: &RuleSet) -> Result<Option<String>, OperationError> {
    match read_content(path)? {
        FileContent::Text(text) => Ok(Some(rules.apply(&text))),
        FileContent::Binary(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn no_ignore_files(_: &Path) -> Result<Vec<IgnoreFile>, GitError> {
        Ok(Vec::new())
    }

    fn rules(pairs: &[(&str, &str)]) -> RuleSet {
        RuleSet::from_pairs(pairs.iter().copied()).unwrap()
    }

    #[test]
    fn test_rewrite_tree_in_place() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("foo");
        fs::create_dir_all(root.join("foo_utils")).unwrap();
        fs::write(root.join("foo_utils/FooHelper.ts"), "export class FooHelper {}").unwrap();
        fs::write(root.join("index.ts"), "import { foo } from './foo';").unwrap();

        let report = rewrite_in_place(
            &[root.clone()],
            &rules(&[("foo", "bar")]),
            false,
            &no_ignore_files,
        );

        assert!(report.is_success(), "{:?}", report.errors);
        assert_eq!(report.files_rewritten, 2);
        assert_eq!(report.entries_renamed, 3);

        let renamed = dir.path().join("bar");
        assert!(!root.exists());
        assert_eq!(
            fs::read_to_string(renamed.join("bar_utils/BarHelper.ts")).unwrap(),
            "export class BarHelper {}"
        );
        assert_eq!(
            fs::read_to_string(renamed.join("index.ts")).unwrap(),
            "import { bar } from './bar';"
        );
    }

    #[test]
    fn test_overlapping_paths_are_rewritten_once() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("foo");
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join("foo.txt"), "foo").unwrap();
        fs::write(root.join("zzz.txt"), "zzz").unwrap();

        let report = rewrite_in_place(
            &[root.clone(), dir.path().join("foo/../foo/foo.txt")],
            &rules(&[("foo", "foo_bar")]),
            false,
            &no_ignore_files,
        );

        assert!(report.is_success(), "{:?}", report.errors);
        assert_eq!(report.files_rewritten, 1);
        assert_eq!(report.entries_renamed, 2);
        assert_eq!(
            fs::read_to_string(dir.path().join("foo_bar/foo_bar.txt")).unwrap(),
            "foo_bar"
        );
    }

    #[test]
    fn test_rename_collision_is_reported() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("foo.txt"), "foo").unwrap();
        fs::write(dir.path().join("bar.txt"), "existing").unwrap();

        let report = rewrite_in_place(
            &[dir.path().join("foo.txt")],
            &rules(&[("foo", "bar")]),
            false,
            &no_ignore_files,
        );

        assert_eq!(report.files_rewritten, 1);
        assert_eq!(report.entries_renamed, 0);
        assert!(matches!(
            report.errors[..],
            [OperationError::DestinationCollision { .. }]
        ));
        assert_eq!(fs::read_to_string(dir.path().join("foo.txt")).unwrap(), "bar");
        assert_eq!(
            fs::read_to_string(dir.path().join("bar.txt")).unwrap(),
            "existing"
        );
    }

    #[test]
    fn test_ignored_entries_are_untouched() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("app");
        fs::create_dir_all(root.join("dist")).unwrap();
        fs::write(root.join("dist/foo.js"), "foo").unwrap();
        fs::write(root.join("foo.ts"), "foo").unwrap();

        let locate = |path: &Path| -> Result<Vec<IgnoreFile>, GitError> {
            Ok(vec![IgnoreFile::new(path.canonicalize().unwrap(), ["dist/"])])
        };
        let report = rewrite_in_place(&[root.clone()], &rules(&[("foo", "bar")]), false, &locate);

        assert!(report.is_success());
        assert_eq!(fs::read_to_string(root.join("bar.ts")).unwrap(), "bar");
        assert_eq!(fs::read_to_string(root.join("dist/foo.js")).unwrap(), "foo");
    }

    #[test]
    fn test_missing_path_is_reported() {
        let dir = TempDir::new().unwrap();
        let report = rewrite_in_place(
            &[dir.path().join("missing")],
            &RuleSet::default(),
            false,
            &no_ignore_files,
        );
        assert!(matches!(
            report.errors[..],
            [OperationError::SourceNotFound { .. }]
        ));
    }

    #[test]
    fn test_rewrite_to_string() {
        let dir = TempDir::new().unwrap();
        let text = dir.path().join("a.txt");
        let binary = dir.path().join("a.bin");
        fs::write(&text, "Hello, World").unwrap();
        fs::write(&binary, [0u8, 1]).unwrap();

        let set = rules(&[("Hello", "Hi"), ("World", "Japan")]);
        assert_eq!(
            rewrite_to_string(&text, &set).unwrap().as_deref(),
            Some("Hi, Japan")
        );
        assert_eq!(rewrite_to_string(&binary, &set).unwrap(), None);
    }
}
