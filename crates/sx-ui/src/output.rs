//! Output formatting for the sx CLI.

use crate::printer::Printer;
use crate::style::Style;
use sx_core::{Error, Reporter};
use std::io::{self, Write};

/// Verbosity level for output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Verbosity {
    /// Quiet mode - errors and requested listings only
    Quiet,
    /// Normal output
    #[default]
    Normal,
    /// Verbose output - includes paths and underlying tool output
    Verbose,
}

impl From<Printer> for Verbosity {
    fn from(printer: Printer) -> Self {
        if printer.is_verbose() {
            Verbosity::Verbose
        } else if printer.is_quiet() {
            Verbosity::Quiet
        } else {
            Verbosity::Normal
        }
    }
}

/// Output handler for consistent CLI output.
///
/// Diagnostics go to stderr; listings requested by the user go to stdout.
#[derive(Debug, Clone)]
pub struct Output {
    verbosity: Verbosity,
    stdout: bool,
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

impl Output {
    /// Create a new output handler with default verbosity.
    pub fn new() -> Self {
        Self {
            verbosity: Verbosity::Normal,
            stdout: true,
        }
    }

    /// Create an output handler for a printer.
    pub fn from_printer(printer: Printer) -> Self {
        Self {
            verbosity: printer.into(),
            stdout: printer.stdout_enabled(),
        }
    }

    /// Get the current verbosity level.
    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    /// Check if verbose output is enabled.
    pub fn is_verbose(&self) -> bool {
        self.verbosity >= Verbosity::Verbose
    }

    /// Print a status message with a step title.
    pub fn status(&self, action: &str, message: &str) {
        if self.verbosity >= Verbosity::Normal {
            eprintln!("{:>12} {}", Style::bold(Style::success(action)), message);
        }
    }

    /// Print an info message.
    pub fn info(&self, message: &str) {
        if self.verbosity >= Verbosity::Normal {
            eprintln!("{}", message);
        }
    }

    /// Print a warning message.
    pub fn warn(&self, message: &str) {
        eprintln!("{}: {}", Style::warning("warning"), message);
    }

    /// Print an error message.
    pub fn error(&self, message: &str) {
        eprintln!("{}: {}", Style::error("error"), message);
    }

    /// Print a structured error as a single diagnostic line.
    ///
    /// In verbose mode the offending path and the underlying cause follow on
    /// separate lines.
    pub fn print_error(&self, error: &Error) {
        self.error(&error.to_string());

        if self.is_verbose() {
            if let Some(path) = error.path() {
                eprintln!("  {} {}", Style::dim("-->"), path.display());
            }
            if let Error::ExtractionFailed { stderr, .. } = error
                && !stderr.trim().is_empty()
            {
                for line in stderr.lines() {
                    eprintln!("  {} {}", Style::dim("|"), line);
                }
            }
        }
    }

    /// Print a line of a requested listing to stdout.
    pub fn line(&self, message: &str) {
        if self.stdout {
            println!("{}", message);
        }
    }

    /// Print a success message.
    pub fn success(&self, message: &str) {
        if self.verbosity >= Verbosity::Normal {
            eprintln!("{} {}", Style::success("✓"), message);
        }
    }

    /// Flush stdout.
    pub fn flush(&self) {
        let _ = io::stdout().flush();
        let _ = io::stderr().flush();
    }
}

impl Reporter for Output {
    fn note(&self, message: &str) {
        self.info(message);
    }

    fn warn(&self, message: &str) {
        Output::warn(self, message);
    }
}
