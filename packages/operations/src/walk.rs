//! Ignore-aware, deterministic tree traversal.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::fs;
use std::path::{Path, PathBuf};

use mane_git::GitError;
use mane_glob::{IgnoreFile, IgnoreMatcher};

use crate::error::OperationError;

/// What kind of filesystem entry something is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// A directory (walked into).
    Directory,
    /// A regular file.
    File,
    /// A symbolic link (never followed).
    Symlink,
}

impl EntryKind {
    /// Classify a file type without following links.
    #[must_use]
    pub fn from_file_type(file_type: fs::FileType) -> Self {
        if file_type.is_symlink() {
            Self::Symlink
        } else if file_type.is_dir() {
            Self::Directory
        } else {
            Self::File
        }
    }

    /// Classify the entry at `path` without following links.
    ///
    /// Returns `None` if nothing exists there.
    #[must_use]
    pub fn of(path: &Path) -> Option<Self> {
        fs::symlink_metadata(path)
            .ok()
            .map(|meta| Self::from_file_type(meta.file_type()))
    }
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Directory => write!(f, "dir"),
            Self::File => write!(f, "file"),
            Self::Symlink => write!(f, "symlink"),
        }
    }
}

/// One entry found below a walk root.
#[derive(Debug, Clone)]
pub struct WalkedEntry {
    /// Full path of the entry.
    pub path: PathBuf,
    /// Path relative to the walk root.
    pub relative: PathBuf,
    /// Entry kind.
    pub kind: EntryKind,
}

/// Build the matcher for a directory root.
///
/// # Errors
///
/// * If ignore files cannot be collected
/// * If an ignore file contains a malformed pattern
pub fn build_matcher<L>(root: &Path, include_ignored: bool, locate: &L) -> Result<IgnoreMatcher, OperationError>
where
    L: Fn(&Path) -> Result<Vec<IgnoreFile>, GitError>,
{
    let canonical = fs::canonicalize(root).map_err(|e| OperationError::Walk {
        path: root.to_path_buf(),
        message: e.to_string(),
    })?;

    if include_ignored {
        log::debug!("Ignore rules disabled for {}", root.display());
        return Ok(IgnoreMatcher::include_all(canonical));
    }

    let files = locate(root).map_err(|e| OperationError::IgnoreDiscovery {
        root: root.to_path_buf(),
        source: e,
    })?;

    IgnoreMatcher::from_files(canonical, &files).map_err(|e| OperationError::InvalidIgnorePattern {
        root: root.to_path_buf(),
        source: e,
    })
}

/// Walk everything below `root` that `matcher` does not exclude.
///
/// The walk is serial and sorted by name, so the result is depth-first and
/// deterministic. Excluded directories are never read. The root itself is not
/// part of the result.
pub fn walk_tree(root: &Path, matcher: &IgnoreMatcher) -> (Vec<WalkedEntry>, Vec<OperationError>) {
    let mut entries = Vec::new();
    let mut errors = Vec::new();

    let prune_root = root.to_path_buf();
    let prune_matcher = matcher.clone();

    let walker = jwalk::WalkDir::new(root)
        .parallelism(jwalk::Parallelism::Serial)
        .skip_hidden(false)
        .follow_links(false)
        .sort(true)
        .process_read_dir(move |_, _, _, children| {
            children.retain(|child| {
                child.as_ref().map_or(true, |entry| {
                    let path = entry.path();
                    let Ok(relative) = path.strip_prefix(&prune_root) else {
                        return true;
                    };
                    let is_dir = entry.file_type().is_dir();
                    let excluded = prune_matcher.is_excluded(relative, is_dir);
                    if excluded {
                        log::trace!("Ignoring {}", path.display());
                    }
                    !excluded
                })
            });
        });

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                errors.push(OperationError::Walk {
                    path: root.to_path_buf(),
                    message: e.to_string(),
                });
                continue;
            }
        };

        if entry.depth == 0 {
            continue;
        }

        let path = entry.path();
        let Ok(relative) = path.strip_prefix(root).map(Path::to_path_buf) else {
            errors.push(OperationError::Walk {
                path: path.clone(),
                message: format!("not below {}", root.display()),
            });
            continue;
        };

        entries.push(WalkedEntry {
            kind: EntryKind::from_file_type(entry.file_type()),
            path,
            relative,
        });
    }

    log::debug!("Walked {} entries below {}", entries.len(), root.display());

    (entries, errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn no_ignore_files(_: &Path) -> Result<Vec<IgnoreFile>, GitError> {
        Ok(Vec::new())
    }

    fn relatives(entries: &[WalkedEntry]) -> Vec<String> {
        entries
            .iter()
            .map(|e| e.relative.to_string_lossy().replace('\\', "/"))
            .collect()
    }

    #[test]
    fn test_walk_is_sorted_depth_first() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("b/inner")).unwrap();
        fs::write(root.join("b/inner/x.txt"), "").unwrap();
        fs::write(root.join("a.txt"), "").unwrap();
        fs::write(root.join("c.txt"), "").unwrap();

        let matcher = build_matcher(root, false, &no_ignore_files).unwrap();
        let (entries, errors) = walk_tree(root, &matcher);

        assert!(errors.is_empty());
        assert_eq!(
            relatives(&entries),
            vec!["a.txt", "b", "b/inner", "b/inner/x.txt", "c.txt"]
        );
        assert_eq!(entries[1].kind, EntryKind::Directory);
        assert_eq!(entries[0].kind, EntryKind::File);
    }

    #[test]
    fn test_excluded_directories_are_pruned() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("node_modules/pkg")).unwrap();
        fs::write(root.join("node_modules/pkg/index.js"), "").unwrap();
        fs::write(root.join("app.log"), "").unwrap();
        fs::write(root.join("keep.log"), "").unwrap();
        fs::write(root.join("main.rs"), "").unwrap();

        let locate = |path: &Path| -> Result<Vec<IgnoreFile>, GitError> {
            Ok(vec![IgnoreFile::new(
                path.canonicalize().unwrap(),
                ["node_modules/", "*.log", "!keep.log"],
            )])
        };
        let matcher = build_matcher(root, false, &locate).unwrap();
        let (entries, _) = walk_tree(root, &matcher);

        assert_eq!(relatives(&entries), vec!["keep.log", "main.rs"]);
    }

    #[test]
    fn test_include_ignored_skips_discovery() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("app.log"), "").unwrap();

        let locate = |_: &Path| -> Result<Vec<IgnoreFile>, GitError> {
            panic!("ignore files should not be collected")
        };
        let matcher = build_matcher(dir.path(), true, &locate).unwrap();
        let (entries, _) = walk_tree(dir.path(), &matcher);

        assert!(matcher.is_empty());
        assert_eq!(relatives(&entries), vec!["app.log"]);
    }

    #[test]
    fn test_invalid_pattern_is_reported_for_root() {
        let dir = TempDir::new().unwrap();
        let locate = |path: &Path| -> Result<Vec<IgnoreFile>, GitError> {
            Ok(vec![IgnoreFile::new(path.to_path_buf(), ["[oops"])])
        };

        let err = build_matcher(dir.path(), false, &locate).unwrap_err();
        assert!(matches!(err, OperationError::InvalidIgnorePattern { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks_are_not_followed() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("real")).unwrap();
        fs::write(root.join("real/file.txt"), "").unwrap();
        std::os::unix::fs::symlink("real", root.join("link")).unwrap();

        let matcher = IgnoreMatcher::include_all(root.canonicalize().unwrap());
        let (entries, _) = walk_tree(root, &matcher);

        assert_eq!(relatives(&entries), vec!["link", "real", "real/file.txt"]);
        assert_eq!(entries[0].kind, EntryKind::Symlink);
    }
}
