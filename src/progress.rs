//! Progress feedback for file analysis.
//!
//! A single `indicatif` bar counts analyzed files. It is hidden when stderr
//! is not a terminal (CI, piped output) or when `DEBTSCORE_QUIET` is set.

use indicatif::{ProgressBar, ProgressStyle};
use std::io::IsTerminal;

pub const TEMPLATE_FILE_ANALYSIS: &str = "📁 {msg} {pos}/{len} files ({percent}%) - {eta}";

/// Configuration for progress display behavior
#[derive(Debug, Clone, Copy, Default)]
pub struct ProgressConfig {
    pub quiet_mode: bool,
}

impl ProgressConfig {
    /// Create progress configuration from environment and CLI arguments
    pub fn from_env(quiet: bool) -> Self {
        let env_quiet = std::env::var_os("DEBTSCORE_QUIET").is_some();
        Self {
            quiet_mode: quiet || env_quiet,
        }
    }

    pub fn should_show_progress(&self) -> bool {
        !self.quiet_mode && std::io::stderr().is_terminal()
    }

    /// A file counter, or a hidden bar when progress is suppressed
    pub fn file_bar(&self, len: u64) -> ProgressBar {
        if !self.should_show_progress() {
            return ProgressBar::hidden();
        }

        let style = ProgressStyle::with_template(TEMPLATE_FILE_ANALYSIS)
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        let bar = ProgressBar::new(len).with_style(style);
        bar.set_message("Analyzing");
        bar
    }
}
