//! Printer abstraction for controlling output verbosity.
//!
//! A `Printer` decides which output is shown and whether progress bars are
//! drawn, based on the `--quiet` and `--verbose` flags.

use indicatif::ProgressDrawTarget;

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Printer {
    /// Suppress all output.
    Silent,
    /// Suppress most output but preserve important stdout.
    Quiet,
    /// Normal output (default).
    #[default]
    Normal,
    /// Verbose output including debug messages.
    Verbose,
}

impl Printer {
    /// Create a printer from quiet/verbose flags.
    pub fn from_flags(quiet: u8, verbose: bool) -> Self {
        if quiet >= 2 {
            Self::Silent
        } else if quiet == 1 {
            Self::Quiet
        } else if verbose {
            Self::Verbose
        } else {
            Self::Normal
        }
    }

    /// Get the progress bar draw target for this printer.
    pub fn target(self) -> ProgressDrawTarget {
        match self {
            Self::Silent | Self::Quiet | Self::Verbose => ProgressDrawTarget::hidden(),
            Self::Normal => ProgressDrawTarget::stderr(),
        }
    }

    /// Check if stdout output is enabled.
    pub fn stdout_enabled(self) -> bool {
        !matches!(self, Self::Silent)
    }

    /// Check if verbose output is enabled.
    pub fn is_verbose(self) -> bool {
        matches!(self, Self::Verbose)
    }

    /// Check if quiet mode is active.
    pub fn is_quiet(self) -> bool {
        matches!(self, Self::Quiet | Self::Silent)
    }
}
