//! Progress bar utilities for the CLI.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

const FILE_BAR_TEMPLATE: &str = "  {prefix:<12} [{bar:25.green/dim}] {pos}/{len} files {wide_msg:.dim}";

/// Progress bar manager for copy operations.
pub struct ProgressManager {
    multi: MultiProgress,
    enabled: bool,
}

impl ProgressManager {
    /// Create a new progress manager.
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        Self {
            multi: MultiProgress::new(),
            enabled,
        }
    }

    /// Create a progress bar counting files.
    ///
    /// If progress is disabled, returns a hidden progress bar.
    #[must_use]
    pub fn create_file_bar(&self, label: &str, total: u64) -> ProgressBar {
        if !self.enabled || total == 0 {
            return ProgressBar::hidden();
        }

        let pb = self.multi.add(ProgressBar::new(total));
        let style = ProgressStyle::with_template(FILE_BAR_TEMPLATE)
            .map_or_else(|_| ProgressStyle::default_bar(), |style| style.progress_chars("━━─"));
        pb.set_style(style);
        pb.set_prefix(label.to_string());
        pb
    }

    /// Print a line above any active bars.
    pub fn println(&self, line: &str) {
        self.multi.suspend(|| println!("{line}"));
    }

    /// Clear any active progress bars (for clean output after completion).
    pub fn clear(&self) {
        self.multi.clear().ok();
    }
}
