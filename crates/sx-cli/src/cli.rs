//! CLI argument parsing.

use clap::{Args, Parser, Subcommand};
use sx_core::EnvVars;

use crate::styles::STYLES;

/// sx - Swift toolchain version manager
#[derive(Parser, Debug)]
#[command(name = "sx")]
#[command(author, version, about = "Install and switch between Swift toolchains")]
#[command(long_about = None)]
#[command(propagate_version = true)]
#[command(styles = STYLES)]
#[command(after_help = "Use `sx help <command>` for more information about a command.")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands.
#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true, env = EnvVars::SX_VERBOSE)]
    pub verbose: bool,

    /// Suppress output (use twice for complete silence)
    #[arg(short, long, global = true, action = clap::ArgAction::Count, env = EnvVars::SX_QUIET)]
    pub quiet: u8,

    /// Disable colored output
    #[arg(long, global = true, env = EnvVars::SX_NO_COLOR)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long, global = true, env = EnvVars::SX_CONFIG_FILE)]
    pub config_file: Option<std::path::PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Update the list of available Swift versions
    Update {
        /// Platform version to select builds for (e.g. 20.04)
        #[arg(long)]
        platform: Option<String>,
    },

    /// Show the available Swift versions
    Available {
        /// Maximum number of snapshots to show per version
        #[arg(long, value_name = "N")]
        max_snapshots: Option<usize>,
    },

    /// Show the installed Swift versions
    List,

    /// Install a Swift version
    Install {
        /// Version to install (e.g. 5.3.2)
        #[arg(id = "query", value_name = "VERSION")]
        version: String,

        /// Install the snapshot from this date instead of the release
        #[arg(short, long, value_name = "DATE")]
        snapshot: Option<String>,

        /// Activate the version once installed
        #[arg(long)]
        activate: bool,
    },

    /// Make an installed Swift version the active one
    Activate {
        /// Version to activate
        #[arg(id = "query", value_name = "VERSION")]
        version: String,

        /// Activate the snapshot from this date
        #[arg(short, long, value_name = "DATE")]
        snapshot: Option<String>,
    },

    /// Remove an installed Swift version
    Remove {
        /// Version to remove
        #[arg(id = "query", value_name = "VERSION")]
        version: String,

        /// Remove the snapshot from this date
        #[arg(short, long, value_name = "DATE")]
        snapshot: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_install() {
        let cli = Cli::try_parse_from(["sx", "install", "5.3", "--snapshot", "2021-06-01"]).unwrap();
        match cli.command {
            Commands::Install {
                version,
                snapshot,
                activate,
            } => {
                assert_eq!(version, "5.3");
                assert_eq!(snapshot.as_deref(), Some("2021-06-01"));
                assert!(!activate);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_version_positional_with_propagated_version_flag() {
        let cli = Cli::try_parse_from(["sx", "activate", "5.3.2"]).unwrap();
        assert!(matches!(cli.command, Commands::Activate { ref version, .. } if version == "5.3.2"));

        let cli = Cli::try_parse_from(["sx", "remove", "5.3", "-s", "2021-06-01"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Remove { ref version, ref snapshot } if version == "5.3" && snapshot.as_deref() == Some("2021-06-01")
        ));

        let err = Cli::try_parse_from(["sx", "install", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_quiet_is_counted() {
        let cli = Cli::try_parse_from(["sx", "-qq", "list"]).unwrap();
        assert_eq!(cli.global.quiet, 2);
    }
}
