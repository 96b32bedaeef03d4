//! Core types and process execution for sx.
//!
//! This crate provides the error taxonomy, the collaborator traits the
//! toolchain core reports through, and command execution used across all
//! sx crates.

pub mod command;
pub mod env;
pub mod error;
pub mod report;

pub use command::{CommandOutput, CommandRunner};
pub use env::EnvVars;
pub use error::{Error, ErrorKind, Result};
pub use report::{MemoryReporter, NullProgress, ProgressSink, Reporter, SilentReporter};

/// Exit codes for the sx CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// General error (filesystem, unexpected failures)
    GeneralError = 1,
    /// Usage error (bad arguments)
    UsageError = 2,
    /// Configuration or catalog error
    ConfigError = 3,
    /// The requested version does not resolve against the catalog
    QueryError = 4,
    /// The request conflicts with the installed store
    StateError = 5,
    /// Download, page fetch or extraction failure
    TransportError = 6,
}

impl From<ErrorKind> for ExitCode {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::Query => ExitCode::QueryError,
            ErrorKind::State => ExitCode::StateError,
            ErrorKind::Transport => ExitCode::TransportError,
            ErrorKind::Persistence | ErrorKind::Config => ExitCode::ConfigError,
            ErrorKind::Filesystem => ExitCode::GeneralError,
        }
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        std::process::ExitCode::from(code as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_distinct_per_kind() {
        let codes = [
            ExitCode::from(ErrorKind::Query),
            ExitCode::from(ErrorKind::State),
            ExitCode::from(ErrorKind::Transport),
            ExitCode::from(ErrorKind::Config),
            ExitCode::from(ErrorKind::Filesystem),
        ];
        for (i, a) in codes.iter().enumerate() {
            assert_ne!(i32::from(*a), 0);
            for b in &codes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_persistence_maps_to_config() {
        assert_eq!(ExitCode::from(ErrorKind::Persistence), ExitCode::ConfigError);
    }
}
