//! sx - Swift toolchain version manager
//!
//! Installs Swift toolchain builds side by side and switches between them.

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod styles;

use cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize telemetry
    sx_telemetry::init(cli.global.verbose);

    // Run the command
    let exit_code = commands::run(cli).await?;

    std::process::exit(exit_code);
}
