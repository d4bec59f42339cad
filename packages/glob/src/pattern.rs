//! Compilation of single gitignore pattern lines.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::Path;

use globset::{GlobBuilder, GlobMatcher};

/// One compiled ignore line.
#[derive(Debug, Clone)]
pub struct IgnorePattern {
    original: String,
    negated: bool,
    dir_only: bool,
    matcher: GlobMatcher,
}

impl IgnorePattern {
    /// Compile a gitignore line.
    ///
    /// Returns `Ok(None)` for blank lines and comments.
    ///
    /// # Errors
    ///
    /// * If the glob body is malformed (e.g. an unclosed `[` class)
    pub fn parse(line: &str) -> Result<Option<Self>, globset::Error> {
        let line = trim_trailing_spaces(line.trim_end_matches(['\r', '\n']));
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let (negated, body) = match line.strip_prefix('!') {
            Some(rest) => (true, rest),
            None => (false, line),
        };
        let body = if body.starts_with("\\#") || body.starts_with("\\!") {
            &body[1..]
        } else {
            body
        };
        let (dir_only, body) = match body.strip_suffix('/') {
            Some(rest) => (true, rest),
            None => (false, body),
        };

        let anchored = body.contains('/');
        let body = body.strip_prefix('/').unwrap_or(body);
        if body.is_empty() {
            return Ok(None);
        }

        // Braces are literal in gitignore syntax.
        let body = body.replace('{', "\\{").replace('}', "\\}");
        let glob = if anchored { body } else { format!("**/{body}") };

        let matcher = GlobBuilder::new(&glob)
            .literal_separator(true)
            .backslash_escape(true)
            .build()?
            .compile_matcher();

        Ok(Some(Self {
            original: line.to_string(),
            negated,
            dir_only,
            matcher,
        }))
    }

    /// The pattern line as written (trailing whitespace removed).
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.original
    }

    /// Whether this is a `!` re-include pattern.
    #[must_use]
    pub const fn is_negated(&self) -> bool {
        self.negated
    }

    /// Whether this pattern only applies to directories.
    #[must_use]
    pub const fn is_dir_only(&self) -> bool {
        self.dir_only
    }

    /// Whether `relative` (relative to the pattern's anchor directory) matches.
    #[must_use]
    pub fn matches(&self, relative: &Path, is_dir: bool) -> bool {
        if self.dir_only && !is_dir {
            return false;
        }
        self.matcher.is_match(relative)
    }
}

/// Drop unescaped trailing spaces; `\ ` keeps its space.
fn trim_trailing_spaces(line: &str) -> &str {
    let trimmed = line.trim_end_matches(' ');
    if trimmed.len() < line.len() && trimmed.ends_with('\\') {
        &line[..=trimmed.len()]
    } else {
        trimmed
    }
}
