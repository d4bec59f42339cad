//! Terminal output formatting.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::Path;

use colored::Colorize;
use mane_operations::{CopyPlan, CopyReport, EntryKind, OperationError, RewriteReport};

/// Format a `source -> target` line.
#[must_use]
pub fn format_entry(source: &Path, target: &Path) -> String {
    format!("{} {} {}", source.display(), "->".dimmed(), target.display())
}

/// Print the entries and problems of a plan without executing it.
pub fn print_plan(plan: &CopyPlan) {
    for entry in &plan.entries {
        let kind = match entry.kind {
            EntryKind::Directory => "dir ".cyan(),
            EntryKind::File => "file".normal(),
            EntryKind::Symlink => "link".yellow(),
        };
        println!("  {kind} {}", format_entry(&entry.source, &entry.target));
    }
    println!(
        "\n{} {} entries ({} files), {} problems",
        "Dry run:".bold(),
        plan.entries.len(),
        plan.file_count(),
        plan.errors.len()
    );
}

/// Print the totals of a finished copy.
pub fn print_copy_summary(report: &CopyReport) {
    let mark = if report.is_success() { "✓".green() } else { "✗".red() };
    println!(
        "{mark} Copied {} files, created {} directories",
        report.files_copied, report.directories_created
    );
}

/// Print the totals of a finished in-place rewrite.
pub fn print_rewrite_summary(report: &RewriteReport) {
    let mark = if report.is_success() { "✓".green() } else { "✗".red() };
    println!(
        "{mark} Rewrote {} files, renamed {} entries",
        report.files_rewritten, report.entries_renamed
    );
}

/// Print every per-entry error.
pub fn print_entry_errors(errors: &[OperationError]) {
    for error in errors {
        eprintln!("  {} {error}", "•".red());
    }
}

/// Print error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", "Error:".red().bold(), message);
}

/// Print a warning message.
///
/// Goes to stderr so it never mixes with rewritten output on stdout.
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "Warning:".yellow().bold(), message);
}
