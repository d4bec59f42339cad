//! Locating the ignore files that apply to a path.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use mane_glob::{IgnoreFile, IgnoreMatcher};

use crate::error::GitError;
use crate::repo::{discover_repo, get_repo_root};

/// Name of per-directory ignore files.
pub const GITIGNORE_FILE_NAME: &str = ".gitignore";

/// Collect every ignore file that applies to `start`, lowest precedence first.
///
/// Inside a git work tree the list starts with an implicit `.git/` rule at the
/// work-tree root, then `info/exclude`, then each `.gitignore` from the
/// work-tree root down to (but excluding) `start`'s own directory. Every
/// `.gitignore` inside `start`'s directory follows, outermost first.
/// Directories excluded by the rules found so far are not searched.
///
/// Outside a repository only the `.gitignore` files inside `start` are used.
///
/// # Errors
///
/// * If `start` cannot be resolved
/// * If an ignore file exists but cannot be read
pub fn locate_ignore_files(start: &Path) -> Result<Vec<IgnoreFile>, GitError> {
    let start = fs::canonicalize(start).map_err(|e| GitError::InvalidPath {
        path: start.to_path_buf(),
        source: e,
    })?;
    let start_dir = if start.is_dir() {
        start
    } else {
        start.parent().map_or_else(|| start.clone(), Path::to_path_buf)
    };

    let mut files = Vec::new();

    match discover_repo(&start_dir).and_then(|repo| {
        let root = get_repo_root(&repo)?;
        Ok((repo.path().to_path_buf(), root))
    }) {
        Ok((git_dir, root)) => {
            let root = fs::canonicalize(&root).map_err(|e| GitError::InvalidPath {
                path: root.clone(),
                source: e,
            })?;
            log::debug!("Ignore root is repository at {}", root.display());

            files.push(IgnoreFile::new(&root, [".git/"]));
            if let Some(file) = read_ignore_file(&git_dir.join("info").join("exclude"), &root)? {
                files.push(file);
            }
            for dir in ancestors_between(&root, &start_dir) {
                if let Some(file) = read_ignore_file(&dir.join(GITIGNORE_FILE_NAME), &dir)? {
                    files.push(file);
                }
            }
        }
        Err(e) => {
            log::debug!("Not inside a git work tree: {e}");
        }
    }

    let nested = nested_ignore_files(&start_dir, &files)?;
    files.extend(nested);

    log::debug!(
        "Found {} ignore files for {}",
        files.len(),
        start_dir.display()
    );

    Ok(files)
}

/// Directories from `root` down to `dir`, excluding `dir` itself.
fn ancestors_between(root: &Path, dir: &Path) -> Vec<PathBuf> {
    let Ok(relative) = dir.strip_prefix(root) else {
        return Vec::new();
    };

    let mut dirs = Vec::new();
    let mut current = root.to_path_buf();
    for component in relative.components() {
        dirs.push(current.clone());
        current.push(component);
    }
    dirs
}

/// Shared state of a nested ignore file scan.
struct NestedScan {
    files: Vec<IgnoreFile>,
    matcher: IgnoreMatcher,
    error: Option<GitError>,
}

impl NestedScan {
    /// Read the `.gitignore` in `dir` and fold it into the matcher.
    fn read_dir_rules(&mut self, root: &Path, inherited: &[IgnoreFile], dir: &Path) {
        let file = match read_ignore_file(&dir.join(GITIGNORE_FILE_NAME), dir) {
            Ok(Some(file)) => file,
            Ok(None) => return,
            Err(e) => {
                log::warn!("{e}");
                self.error.get_or_insert(e);
                return;
            }
        };
        self.files.push(file);

        let all: Vec<IgnoreFile> = inherited.iter().chain(&self.files).cloned().collect();
        match IgnoreMatcher::from_files(root, &all) {
            Ok(matcher) => self.matcher = matcher,
            Err(e) => log::warn!("Not pruning below {}: {e}", dir.display()),
        }
    }
}

/// Every `.gitignore` in `dir`'s subtree, outermost first.
///
/// `inherited` holds the rules that apply above `dir`. Directories those rules
/// or any nested file exclude are not searched.
fn nested_ignore_files(dir: &Path, inherited: &[IgnoreFile]) -> Result<Vec<IgnoreFile>, GitError> {
    let matcher = IgnoreMatcher::from_files(dir, inherited).unwrap_or_else(|e| {
        log::warn!("Not pruning below {}: {e}", dir.display());
        IgnoreMatcher::include_all(dir)
    });
    let state = Arc::new(Mutex::new(NestedScan {
        files: Vec::new(),
        matcher,
        error: None,
    }));

    let scan_state = Arc::clone(&state);
    let scan_root = dir.to_path_buf();
    let scan_inherited = inherited.to_vec();

    let walker = jwalk::WalkDir::new(dir)
        .parallelism(jwalk::Parallelism::Serial)
        .skip_hidden(false)
        .follow_links(false)
        .sort(true)
        .process_read_dir(move |_, path, _, children| {
            let mut scan = scan_state.lock().unwrap_or_else(PoisonError::into_inner);

            let has_rules = children.iter().flatten().any(|entry| {
                entry.file_type().is_file() && entry.file_name() == GITIGNORE_FILE_NAME
            });
            if has_rules {
                scan.read_dir_rules(&scan_root, &scan_inherited, path);
            }

            children.retain(|child| {
                child.as_ref().map_or(true, |entry| {
                    if !entry.file_type().is_dir() || entry.file_name() == ".git" {
                        return false;
                    }
                    let child_path = entry.path();
                    let excluded = child_path
                        .strip_prefix(&scan_root)
                        .is_ok_and(|relative| scan.matcher.is_excluded(relative, true));
                    if excluded {
                        log::trace!("Not searching {} for ignore files", child_path.display());
                    }
                    !excluded
                })
            });
        });

    for entry in walker {
        if let Err(e) = entry {
            log::warn!("Skipping unreadable entry below {}: {e}", dir.display());
        }
    }

    let mut scan = state.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(e) = scan.error.take() {
        return Err(e);
    }
    Ok(std::mem::take(&mut scan.files))
}

fn read_ignore_file(path: &Path, anchor_dir: &Path) -> Result<Option<IgnoreFile>, GitError> {
    match fs::read_to_string(path) {
        Ok(contents) => {
            log::trace!("Read ignore file {}", path.display());
            Ok(Some(IgnoreFile::parse(anchor_dir, &contents)))
        }
        Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory) => Ok(None),
        Err(e) => Err(GitError::ReadIgnoreFile {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use git2::Repository;
    use tempfile::TempDir;

    fn canonical(dir: &TempDir) -> PathBuf {
        dir.path().canonicalize().unwrap()
    }

    #[test]
    fn test_outside_repository_uses_nested_files_only() {
        let dir = TempDir::new().unwrap();
        let root = canonical(&dir);
        fs::create_dir_all(root.join("web")).unwrap();
        fs::write(root.join(".gitignore"), "*.log\n").unwrap();
        fs::write(root.join("web/.gitignore"), "dist/\n").unwrap();

        let files = locate_ignore_files(&root).unwrap();

        assert_eq!(files.len(), 2);
        assert_eq!(files[0].anchor_dir, root);
        assert_eq!(files[0].patterns, vec!["*.log"]);
        assert_eq!(files[1].anchor_dir, root.join("web"));
        assert_eq!(files[1].patterns, vec!["dist/"]);
    }

    #[test]
    fn test_parent_files_come_before_child_files() {
        let dir = TempDir::new().unwrap();
        let root = canonical(&dir);
        // ".a" sorts before ".gitignore" but is deeper.
        fs::create_dir_all(root.join(".a")).unwrap();
        fs::write(root.join(".a/.gitignore"), "child\n").unwrap();
        fs::write(root.join(".gitignore"), "parent\n").unwrap();

        let files = locate_ignore_files(&root).unwrap();

        assert_eq!(files[0].patterns, vec!["parent"]);
        assert_eq!(files[1].patterns, vec!["child"]);
    }

    #[test]
    fn test_inside_repository_includes_ancestors() {
        let dir = TempDir::new().unwrap();
        let root = canonical(&dir);
        Repository::init(&root).unwrap();
        fs::create_dir_all(root.join("apps/web/src")).unwrap();
        fs::write(root.join(".gitignore"), "*.log\n").unwrap();
        fs::write(root.join("apps/.gitignore"), "tmp/\n").unwrap();
        fs::write(root.join("apps/web/.gitignore"), "dist/\n").unwrap();
        fs::write(root.join("apps/web/src/.gitignore"), "*.gen.ts\n").unwrap();

        let files = locate_ignore_files(&root.join("apps/web")).unwrap();

        assert_eq!(files[0].anchor_dir, root);
        assert_eq!(files[0].patterns, vec![".git/"]);
        assert!(files.iter().any(|f| f.anchor_dir == root.join("apps")));
        assert!(files.iter().any(|f| f.anchor_dir == root.join("apps/web/src")));

        let patterns: Vec<&str> = files
            .iter()
            .flat_map(|f| f.patterns.iter().map(String::as_str))
            .filter(|p| !p.is_empty() && !p.starts_with('#'))
            .collect();
        let position = |p: &str| patterns.iter().position(|x| *x == p).unwrap();
        assert!(position("*.log") < position("tmp/"));
        assert!(position("tmp/") < position("dist/"));
        assert!(position("dist/") < position("*.gen.ts"));
    }

    #[test]
    fn test_excluded_directories_are_not_searched() {
        let dir = TempDir::new().unwrap();
        let root = canonical(&dir);
        fs::create_dir_all(root.join("node_modules/pkg")).unwrap();
        fs::create_dir_all(root.join("src")).unwrap();
        fs::write(root.join(".gitignore"), "node_modules/\n").unwrap();
        fs::write(root.join("node_modules/pkg/.gitignore"), "*.map\n").unwrap();
        fs::write(root.join("src/.gitignore"), "*.gen.ts\n").unwrap();

        let files = locate_ignore_files(&root).unwrap();

        let anchors: Vec<PathBuf> = files.iter().map(|f| f.anchor_dir.clone()).collect();
        assert_eq!(anchors, vec![root.clone(), root.join("src")]);
    }

    #[test]
    fn test_excluded_by_ancestor_rules_is_not_searched() {
        let dir = TempDir::new().unwrap();
        let root = canonical(&dir);
        Repository::init(&root).unwrap();
        fs::create_dir_all(root.join("app/build/out")).unwrap();
        fs::write(root.join(".gitignore"), "build/\n").unwrap();
        fs::write(root.join("app/build/out/.gitignore"), "*.o\n").unwrap();

        let files = locate_ignore_files(&root.join("app")).unwrap();

        assert!(files.iter().all(|f| !f.anchor_dir.starts_with(root.join("app/build"))));
    }

    #[test]
    fn test_start_may_be_a_file() {
        let dir = TempDir::new().unwrap();
        let root = canonical(&dir);
        fs::write(root.join(".gitignore"), "*.log\n").unwrap();
        fs::write(root.join("main.rs"), "fn main() {}\n").unwrap();

        let files = locate_ignore_files(&root.join("main.rs")).unwrap();

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].anchor_dir, root);
    }

    #[test]
    fn test_missing_start_is_an_error() {
        let dir = TempDir::new().unwrap();
        let result = locate_ignore_files(&dir.path().join("missing"));
        assert!(matches!(result, Err(GitError::InvalidPath { .. })));
    }
}
