//! Terminal progress for weaving and animation export

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Single progress bar tracking the current stage of a carpet run
///
/// Each stage (weaving rows, encoding frames) resets the bar with its own
/// length and label.
pub struct ProgressManager {
    bar: ProgressBar,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a progress manager drawing to stderr
    pub fn new() -> Self {
        let bar = ProgressBar::new(0);
        bar.set_style(Self::stage_style());
        Self { bar }
    }

    /// Create a progress manager that never draws
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    /// Start a new stage of `length` steps
    pub fn start_stage(&self, label: &str, length: usize) {
        self.bar.reset();
        self.bar.set_length(length as u64);
        self.bar.set_position(0);
        self.bar.set_prefix(label.to_string());
    }

    /// Record one finished step of the current stage
    pub fn advance(&self) {
        self.bar.inc(1);
    }

    /// Current position within the stage
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Mark the current stage as done
    pub fn finish_stage(&self, elapsed: Duration) {
        let length = self.bar.length().unwrap_or(0);
        self.bar.set_position(length);
        self.bar
            .set_message(format!("done in {:.2}s", elapsed.as_secs_f64()));
    }

    /// Remove the bar from the terminal
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }

    fn stage_style() -> ProgressStyle {
        let template =
            format!("{{prefix:>8}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}");
        ProgressStyle::default_bar()
            .template(&template)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▉▊▋▌▍▎▏ ")
    }
}
