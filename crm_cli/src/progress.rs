//! Progress bar for clone batches
//!
//! Renders the core batch notifications with `indicatif` on stderr.

use colored::*;
use crm_client_core::{BatchProgress, BatchResult, CloneOutcome};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;

const BAR_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} repos | {msg}";

/// Batch observer drawing a progress bar
pub struct CloneProgressBar {
    bar: ProgressBar,
}

impl CloneProgressBar {
    /// Create a visible progress bar
    pub fn new() -> Self {
        let bar = ProgressBar::new(0);
        let style = ProgressStyle::default_bar()
            .template(BAR_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("##-");
        bar.set_style(style);
        Self { bar }
    }

    /// Create a bar that draws nothing
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    /// Visible or hidden depending on `enabled`
    pub fn for_terminal(enabled: bool) -> Self {
        if enabled { Self::new() } else { Self::hidden() }
    }

    pub fn position(&self) -> u64 {
        self.bar.position()
    }
}

impl Default for CloneProgressBar {
    fn default() -> Self {
        Self::new()
    }
}

impl BatchProgress for CloneProgressBar {
    fn batch_started(&self, total: usize) {
        self.bar.set_length(total as u64);
        self.bar.set_position(0);
        self.bar.enable_steady_tick(Duration::from_millis(120));
    }

    fn clone_started(&self, _index: usize, remote: &str, _destination: &Path) {
        self.bar.set_message(remote.cyan().to_string());
    }

    fn clone_finished(&self, outcome: &CloneOutcome) {
        if !outcome.succeeded {
            // Keep failures visible above the bar
            self.bar.println(format!(
                "{} {}",
                "✗".red(),
                outcome.source_full_name
            ));
        }
        self.bar.inc(1);
    }

    fn batch_finished(&self, _result: &BatchResult) {
        self.bar.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_hidden_bar_counts_attempts() {
        let progress = CloneProgressBar::hidden();
        let outcome = CloneOutcome {
            destination: PathBuf::from("lab-1/x"),
            source_full_name: "org/x".to_string(),
            succeeded: false,
            error_message: Some("Error cloning org/x: boom".to_string()),
        };

        progress.batch_started(2);
        progress.clone_started(0, "org/x", Path::new("lab-1/x"));
        progress.clone_finished(&outcome);
        progress.clone_finished(&outcome);

        assert_eq!(progress.position(), 2);
    }
}
