//! Display sinks the toolchain core reports through.
//!
//! The core never prints. Notes, warnings and download progress flow through
//! these traits so the CLI can render them and tests can capture them.

use std::sync::Mutex;

/// Sink for user-facing notes and warnings.
pub trait Reporter: Send + Sync {
    /// Report progress of an operation.
    fn note(&self, message: &str);

    /// Report an assumption made on the user's behalf.
    fn warn(&self, message: &str);
}

/// Sink for the progress of a single transfer.
pub trait ProgressSink: Send + Sync {
    /// Set the completed fraction, between 0.0 and 1.0.
    fn set_fraction(&self, fraction: f64);

    /// Mark the transfer as finished.
    fn finish(&self) {}
}

/// A progress sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullProgress;

impl ProgressSink for NullProgress {
    fn set_fraction(&self, _fraction: f64) {}
}

/// A reporter that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentReporter;

impl Reporter for SilentReporter {
    fn note(&self, _message: &str) {}

    fn warn(&self, _message: &str) {}
}

/// A reporter that keeps every message in memory.
#[derive(Debug, Default)]
pub struct MemoryReporter {
    notes: Mutex<Vec<String>>,
    warnings: Mutex<Vec<String>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notes reported so far.
    pub fn notes(&self) -> Vec<String> {
        self.notes.lock().map(|n| n.clone()).unwrap_or_default()
    }

    /// Warnings reported so far.
    pub fn warnings(&self) -> Vec<String> {
        self.warnings.lock().map(|w| w.clone()).unwrap_or_default()
    }
}

impl Reporter for MemoryReporter {
    fn note(&self, message: &str) {
        if let Ok(mut notes) = self.notes.lock() {
            notes.push(message.to_string());
        }
    }

    fn warn(&self, message: &str) {
        if let Ok(mut warnings) = self.warnings.lock() {
            warnings.push(message.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_reporter_separates_notes_and_warnings() {
        let reporter = MemoryReporter::new();
        reporter.note("Downloading list of Swift versions...");
        reporter.warn("falling back");
        reporter.warn("again");

        assert_eq!(reporter.notes().len(), 1);
        assert_eq!(reporter.warnings(), vec!["falling back", "again"]);
    }
}
