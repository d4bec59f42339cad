//! CLI argument definitions.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;

use clap::{ArgAction, Parser};
use mane_operations::CopyJob;

/// CLI arguments for mane.
#[derive(Debug, Parser)]
#[command(
    name = "mane",
    about = "Copy and rewrite files with case-aware replacements",
    version
)]
pub struct Args {
    /// Replace FROM with TO in every case style (repeatable).
    #[arg(
        short = 'r',
        long = "replace",
        value_names = ["FROM", "TO"],
        num_args = 2,
        action = ArgAction::Append
    )]
    pub replace: Vec<String>,

    /// Copy SOURCE... to TARGET (the last path).
    #[arg(
        short = 'c',
        long = "copy",
        value_names = ["SOURCE", "TARGET"],
        num_args = 2..,
        action = ArgAction::Append
    )]
    pub copy: Vec<PathBuf>,

    /// Files to rewrite (printed to stdout unless --in-place).
    pub files: Vec<PathBuf>,

    /// Rewrite file and directory names as well.
    #[arg(short = 'i', long = "in-place")]
    pub in_place: bool,

    /// Include files that match .gitignore patterns.
    #[arg(long = "include-git-ignore")]
    pub include_git_ignore: bool,

    /// Load replacement rules from a TOML file.
    #[arg(long = "rules", value_name = "FILE")]
    pub rules_file: Option<PathBuf>,

    /// Print what --copy would do without writing anything.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Disable progress bars (useful for CI environments).
    #[arg(long = "no-progress")]
    pub no_progress: bool,

    /// Enable verbose output.
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

/// What a run does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Copy sources to a target.
    Copy,
    /// Rewrite contents and names of the given paths.
    InPlace,
    /// Print rewritten contents of the given files.
    Files,
    /// Rewrite standard input to standard output.
    Stdin,
    /// Nothing to do.
    None,
}

impl Args {
    /// `-r` values as `(from, to)` pairs in command-line order.
    #[must_use]
    pub fn rule_pairs(&self) -> Vec<(String, String)> {
        self.replace
            .chunks_exact(2)
            .map(|pair| (pair[0].clone(), pair[1].clone()))
            .collect()
    }

    /// The copy job, if `--copy` was given.
    ///
    /// The last `--copy` path is the target; all others are sources.
    #[must_use]
    pub fn copy_job(&self) -> Option<CopyJob> {
        let (destination, sources) = self.copy.split_last()?;
        if sources.is_empty() {
            return None;
        }
        Some(CopyJob {
            sources: sources.to_vec(),
            destination: destination.clone(),
        })
    }

    /// Pick the mode from the flags and whether stdin is a terminal.
    ///
    /// `in_place` includes the rules file's setting.
    #[must_use]
    pub fn mode(&self, in_place: bool, stdin_is_terminal: bool) -> Mode {
        if !self.copy.is_empty() {
            Mode::Copy
        } else if !self.files.is_empty() {
            if in_place { Mode::InPlace } else { Mode::Files }
        } else if self.in_place {
            Mode::InPlace
        } else if !stdin_is_terminal {
            Mode::Stdin
        } else {
            Mode::None
        }
    }

    /// Determine if we should show progress bars.
    #[must_use]
    pub const fn should_show_progress(&self) -> bool {
        !self.no_progress
    }
}
