//! Spinner and progress bar utilities for long-running operations.

use crate::printer::Printer;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use sx_core::ProgressSink;

/// Resolution of the fraction-based progress bar.
const PROGRESS_STEPS: u64 = 1000;

/// A spinner for indeterminate progress.
pub struct Spinner {
    bar: ProgressBar,
}

impl Spinner {
    /// Create a new spinner with a message.
    pub fn new(message: impl Into<String>, printer: Printer) -> Self {
        let bar = ProgressBar::with_draw_target(None, printer.target());
        bar.set_style(
            ProgressStyle::default_spinner()
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
                .template("{spinner:.cyan} {msg}")
                .expect("valid template"),
        );
        bar.set_message(message.into());
        bar.enable_steady_tick(Duration::from_millis(80));
        Self { bar }
    }

    /// Finish the spinner with a success message.
    pub fn finish_success(self, message: impl Into<String>) {
        self.bar.set_style(
            ProgressStyle::default_spinner()
                .template("{msg}")
                .expect("valid template"),
        );
        self.bar.finish_with_message(format!(
            "{} {}",
            console::style("✓").green(),
            message.into()
        ));
    }

    /// Finish the spinner with a failure message.
    pub fn finish_error(self, message: impl Into<String>) {
        self.bar.set_style(
            ProgressStyle::default_spinner()
                .template("{msg}")
                .expect("valid template"),
        );
        self.bar
            .finish_with_message(format!("{} {}", console::style("✗").red(), message.into()));
    }
}

/// A progress bar driven by a completed fraction.
pub struct Progress {
    bar: ProgressBar,
}

impl Progress {
    /// Create a new progress bar.
    pub fn new(message: impl Into<String>, printer: Printer) -> Self {
        let bar = ProgressBar::with_draw_target(Some(PROGRESS_STEPS), printer.target());
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{msg} [{bar:40.cyan/dim}] {percent:>3}%")
                .expect("valid template")
                .progress_chars("━━─"),
        );
        bar.set_message(message.into());
        Self { bar }
    }
}

impl ProgressSink for Progress {
    fn set_fraction(&self, fraction: f64) {
        let fraction = fraction.clamp(0.0, 1.0);
        self.bar
            .set_position((fraction * PROGRESS_STEPS as f64).round() as u64);
    }

    fn finish(&self) {
        self.bar.set_position(PROGRESS_STEPS);
        self.bar.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_clamps_fraction() {
        let progress = Progress::new("downloading", Printer::Silent);
        progress.set_fraction(1.7);
        assert_eq!(progress.bar.position(), PROGRESS_STEPS);
        progress.set_fraction(-0.5);
        assert_eq!(progress.bar.position(), 0);
        progress.set_fraction(0.25);
        assert_eq!(progress.bar.position(), 250);
    }
}
