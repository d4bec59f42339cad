//! Evaluation of ordered ignore-pattern files.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::{Path, PathBuf};

use crate::error::GlobError;
use crate::pattern::IgnorePattern;

/// The raw lines of one ignore file and the directory they are relative to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoreFile {
    /// Directory the patterns are anchored at.
    pub anchor_dir: PathBuf,
    /// Pattern lines in file order (comments and blanks allowed).
    pub patterns: Vec<String>,
}

impl IgnoreFile {
    /// Create an ignore file from individual lines.
    pub fn new<P, I, S>(anchor_dir: P, patterns: I) -> Self
    where
        P: Into<PathBuf>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            anchor_dir: anchor_dir.into(),
            patterns: patterns.into_iter().map(Into::into).collect(),
        }
    }

    /// Create an ignore file from the full text of a `.gitignore`.
    pub fn parse(anchor_dir: impl Into<PathBuf>, contents: &str) -> Self {
        Self::new(anchor_dir, contents.lines())
    }
}

#[derive(Debug, Clone)]
struct PatternGroup {
    anchor_dir: PathBuf,
    patterns: Vec<IgnorePattern>,
}

/// Answers "is this path excluded?" for paths under a root directory.
///
/// Groups are evaluated in the order given; within and across groups the
/// last matching pattern decides. A path inside an excluded directory is
/// always excluded, even if a later pattern would re-include it.
#[derive(Debug, Clone)]
pub struct IgnoreMatcher {
    root: PathBuf,
    groups: Vec<PatternGroup>,
}

impl IgnoreMatcher {
    /// A matcher that excludes nothing.
    pub fn include_all(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            groups: Vec::new(),
        }
    }

    /// Compile `files`, lowest precedence first.
    ///
    /// # Errors
    ///
    /// * If any pattern line is malformed
    pub fn from_files(root: impl Into<PathBuf>, files: &[IgnoreFile]) -> Result<Self, GlobError> {
        let mut groups = Vec::with_capacity(files.len());

        for file in files {
            let mut patterns = Vec::with_capacity(file.patterns.len());
            for line in &file.patterns {
                let parsed =
                    IgnorePattern::parse(line).map_err(|e| GlobError::InvalidIgnorePattern {
                        pattern: line.clone(),
                        anchor_dir: file.anchor_dir.clone(),
                        source: e,
                    })?;
                if let Some(pattern) = parsed {
                    patterns.push(pattern);
                }
            }

            log::trace!(
                "Compiled {} ignore patterns anchored at {}",
                patterns.len(),
                file.anchor_dir.display()
            );

            if !patterns.is_empty() {
                groups.push(PatternGroup {
                    anchor_dir: file.anchor_dir.clone(),
                    patterns,
                });
            }
        }

        Ok(Self {
            root: root.into(),
            groups,
        })
    }

    /// Whether this matcher has no patterns at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Whether `relative` (relative to the matcher's root directory) is excluded.
    #[must_use]
    pub fn is_excluded(&self, relative: &Path, is_dir: bool) -> bool {
        if self.groups.is_empty() {
            return false;
        }

        let components: Vec<_> = relative.components().collect();
        let mut current = self.root.clone();

        for (i, component) in components.iter().enumerate() {
            current.push(component);
            let is_last = i + 1 == components.len();
            let as_dir = if is_last { is_dir } else { true };
            if self.decide(&current, as_dir) == Some(true) {
                return true;
            }
        }

        false
    }

    /// Last-match-wins verdict for one path, ignoring its ancestors.
    fn decide(&self, path: &Path, is_dir: bool) -> Option<bool> {
        let mut verdict = None;

        for group in &self.groups {
            let Ok(relative) = path.strip_prefix(&group.anchor_dir) else {
                continue;
            };
            if relative.as_os_str().is_empty() {
                continue;
            }
            for pattern in &group.patterns {
                if pattern.matches(relative, is_dir) {
                    verdict = Some(!pattern.is_negated());
                }
            }
        }

        verdict
    }
}
