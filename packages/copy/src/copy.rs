//! Materializing single entries.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::content::{FileContent, read_content};
use crate::error::CopyError;

/// Result of materializing one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyResult {
    /// The file was text and went through the transform.
    Text {
        /// Whether the transform changed anything.
        changed: bool,
    },
    /// The file was binary and was copied (or left) untouched.
    Binary,
}

/// Copy a file to `target`, rewriting text content with `transform`.
///
/// An existing `target` is overwritten. The parent directory must exist.
///
/// # Arguments
///
/// * `source` - Source file path
/// * `target` - Target file path
/// * `transform` - Applied to the decoded content of text files
///
/// # Errors
///
/// * If the source cannot be read
/// * If the target cannot be written
pub fn copy_file<F>(source: &Path, target: &Path, transform: F) -> Result<CopyResult, CopyError>
where
    F: Fn(&str) -> String,
{
    log::trace!("Copying file: {} -> {}", source.display(), target.display());

    match read_content(source)? {
        FileContent::Text(text) => {
            let rewritten = transform(&text);
            let changed = rewritten != text;
            remove_if_symlink(target)?;
            fs::write(target, rewritten).map_err(|e| CopyError::WriteError {
                path: target.to_path_buf(),
                io_error: e,
            })?;
            Ok(CopyResult::Text { changed })
        }
        FileContent::Binary(_) => {
            remove_existing(target)?;
            copy_file_with_reflink(source, target)?;
            Ok(CopyResult::Binary)
        }
    }
}

/// Rewrite a text file in place. Binary files are left alone.
///
/// The file is only written when the transform changed its content.
///
/// # Errors
///
/// * If the file cannot be read or written
pub fn rewrite_file<F>(path: &Path, transform: F) -> Result<CopyResult, CopyError>
where
    F: Fn(&str) -> String,
{
    match read_content(path)? {
        FileContent::Text(text) => {
            let rewritten = transform(&text);
            if rewritten == text {
                return Ok(CopyResult::Text { changed: false });
            }
            log::trace!("Rewriting {}", path.display());
            fs::write(path, rewritten).map_err(|e| CopyError::WriteError {
                path: path.to_path_buf(),
                io_error: e,
            })?;
            Ok(CopyResult::Text { changed: true })
        }
        FileContent::Binary(_) => {
            log::trace!("Skipping binary file {}", path.display());
            Ok(CopyResult::Binary)
        }
    }
}

/// Create a directory and any missing parents.
///
/// Returns `true` if the directory did not exist before.
///
/// # Errors
///
/// * If the directory cannot be created
pub fn create_dir(path: &Path) -> Result<bool, CopyError> {
    if path.is_dir() {
        return Ok(false);
    }

    fs::create_dir_all(path).map_err(|e| CopyError::CreateDirError {
        path: path.to_path_buf(),
        io_error: e,
    })?;
    log::trace!("Created directory {}", path.display());

    Ok(true)
}

/// Rename an entry. Callers check for collisions first.
///
/// # Errors
///
/// * If the rename fails
pub fn rename_entry(source: &Path, target: &Path) -> Result<(), CopyError> {
    fs::rename(source, target).map_err(|e| CopyError::RenameError {
        source_path: source.to_path_buf(),
        target_path: target.to_path_buf(),
        io_error: e,
    })?;
    log::trace!("Renamed {} -> {}", source.display(), target.display());
    Ok(())
}

/// Copy a single file, trying reflink first then falling back to regular copy.
fn copy_file_with_reflink(source: &Path, target: &Path) -> Result<(), CopyError> {
    match reflink_copy::reflink(source, target) {
        Ok(()) => {
            log::trace!("Reflinked {} -> {}", source.display(), target.display());
            Ok(())
        }
        Err(_) => {
            fs::copy(source, target).map_err(|e| CopyError::FileCopyError {
                source_path: source.to_path_buf(),
                target_path: target.to_path_buf(),
                io_error: e,
            })?;
            log::trace!("Copied {} -> {}", source.display(), target.display());
            Ok(())
        }
    }
}

/// Recreate the symlink at `source` at `target`, replacing whatever is there.
///
/// The link text is copied unchanged.
///
/// # Errors
///
/// * If the link cannot be read or created
pub fn copy_symlink(source: &Path, target: &Path) -> Result<(), CopyError> {
    let link_target = fs::read_link(source).map_err(|e| CopyError::ReadLinkError {
        path: source.to_path_buf(),
        io_error: e,
    })?;

    remove_existing(target)?;

    #[cfg(unix)]
    {
        std::os::unix::fs::symlink(&link_target, target).map_err(|e| {
            CopyError::CreateSymlinkError {
                path: target.to_path_buf(),
                io_error: e,
            }
        })?;
    }

    #[cfg(windows)]
    {
        let resolved = source
            .parent()
            .map_or_else(|| link_target.clone(), |parent| parent.join(&link_target));
        let result = if resolved.is_dir() {
            std::os::windows::fs::symlink_dir(&link_target, target)
        } else {
            std::os::windows::fs::symlink_file(&link_target, target)
        };
        result.map_err(|e| CopyError::CreateSymlinkError {
            path: target.to_path_buf(),
            io_error: e,
        })?;
    }

    log::trace!(
        "Symlinked {} -> {} (target: {})",
        source.display(),
        target.display(),
        link_target.display()
    );

    Ok(())
}

/// Remove a file or symlink at `path` so it can be replaced.
fn remove_existing(path: &Path) -> Result<(), CopyError> {
    match fs::symlink_metadata(path) {
        Ok(meta) if !meta.is_dir() => fs::remove_file(path).map_err(|e| CopyError::RemoveError {
            path: path.to_path_buf(),
            io_error: e,
        }),
        Ok(_) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(CopyError::RemoveError {
            path: path.to_path_buf(),
            io_error: e,
        }),
    }
}

/// Writing through an old symlink would modify its target instead.
fn remove_if_symlink(path: &Path) -> Result<(), CopyError> {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => remove_existing(path),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn upper(text: &str) -> String {
        text.to_uppercase()
    }

    #[test]
    fn test_copy_text_file_is_transformed() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("source.txt");
        let target = dir.path().join("target.txt");
        fs::write(&source, "hello world").unwrap();

        let result = copy_file(&source, &target, upper).unwrap();

        assert_eq!(result, CopyResult::Text { changed: true });
        assert_eq!(fs::read_to_string(&target).unwrap(), "HELLO WORLD");
        assert_eq!(fs::read_to_string(&source).unwrap(), "hello world");
    }

    #[test]
    fn test_copy_text_file_unchanged() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("source.txt");
        let target = dir.path().join("target.txt");
        fs::write(&source, "HELLO").unwrap();

        let result = copy_file(&source, &target, upper).unwrap();

        assert_eq!(result, CopyResult::Text { changed: false });
        assert_eq!(fs::read_to_string(&target).unwrap(), "HELLO");
    }

    #[test]
    fn test_copy_binary_file_is_verbatim() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("image.bin");
        let target = dir.path().join("copy.bin");
        let bytes = [0x89, b'P', b'N', b'G', 0, b'f', b'o', b'o'];
        fs::write(&source, bytes).unwrap();

        let result = copy_file(&source, &target, upper).unwrap();

        assert_eq!(result, CopyResult::Binary);
        assert_eq!(fs::read(&target).unwrap(), bytes);
    }

    #[test]
    fn test_copy_file_overwrites_existing() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("source.txt");
        let target = dir.path().join("target.txt");
        fs::write(&source, "new").unwrap();
        fs::write(&target, "old content").unwrap();

        copy_file(&source, &target, str::to_string).unwrap();

        assert_eq!(fs::read_to_string(&target).unwrap(), "new");
    }

    #[test]
    fn test_copy_binary_overwrites_existing() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("source.bin");
        let target = dir.path().join("target.bin");
        fs::write(&source, [0u8, 1, 2]).unwrap();
        fs::write(&target, "old").unwrap();

        copy_file(&source, &target, str::to_string).unwrap();

        assert_eq!(fs::read(&target).unwrap(), [0u8, 1, 2]);
    }

    #[test]
    fn test_copy_file_missing_source() {
        let dir = TempDir::new().unwrap();
        let result = copy_file(
            &dir.path().join("missing.txt"),
            &dir.path().join("target.txt"),
            str::to_string,
        );
        assert!(matches!(result, Err(CopyError::ReadError { .. })));
    }

    #[test]
    fn test_rewrite_file_in_place() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.txt");
        fs::write(&path, "abc").unwrap();

        assert_eq!(
            rewrite_file(&path, upper).unwrap(),
            CopyResult::Text { changed: true }
        );
        assert_eq!(fs::read_to_string(&path).unwrap(), "ABC");

        assert_eq!(
            rewrite_file(&path, upper).unwrap(),
            CopyResult::Text { changed: false }
        );
    }

    #[test]
    fn test_rewrite_file_skips_binary() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.bin");
        fs::write(&path, [b'a', 0, b'b']).unwrap();

        assert_eq!(rewrite_file(&path, upper).unwrap(), CopyResult::Binary);
        assert_eq!(fs::read(&path).unwrap(), [b'a', 0, b'b']);
    }

    #[test]
    fn test_create_dir_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a/b/c");

        assert!(create_dir(&path).unwrap());
        assert!(!create_dir(&path).unwrap());
        assert!(path.is_dir());
    }

    #[test]
    fn test_rename_entry() {
        let dir = TempDir::new().unwrap();
        let from = dir.path().join("foo.txt");
        let to = dir.path().join("bar.txt");
        fs::write(&from, "x").unwrap();

        rename_entry(&from, &to).unwrap();

        assert!(!from.exists());
        assert_eq!(fs::read_to_string(&to).unwrap(), "x");
    }

    #[cfg(unix)]
    #[test]
    fn test_copy_symlink_replaces_existing() {
        let dir = TempDir::new().unwrap();
        let link = dir.path().join("link");
        let target = dir.path().join("copied-link");
        std::os::unix::fs::symlink("somewhere/else", &link).unwrap();
        fs::write(&target, "in the way").unwrap();

        copy_symlink(&link, &target).unwrap();

        assert_eq!(
            fs::read_link(&target).unwrap(),
            Path::new("somewhere/else")
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_copy_file_does_not_write_through_old_symlink() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("source.txt");
        let victim = dir.path().join("victim.txt");
        let target = dir.path().join("target.txt");
        fs::write(&source, "new").unwrap();
        fs::write(&victim, "untouched").unwrap();
        std::os::unix::fs::symlink(&victim, &target).unwrap();

        copy_file(&source, &target, str::to_string).unwrap();

        assert_eq!(fs::read_to_string(&victim).unwrap(), "untouched");
        assert_eq!(fs::read_to_string(&target).unwrap(), "new");
    }
}
