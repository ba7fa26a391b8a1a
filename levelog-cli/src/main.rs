//! ## levelog-cli
//! **Command-line front end for the levelog facade**
//!
//! Emits single messages through a logger built from configuration, which
//! makes thresholds, line format and call-site capture easy to check from a
//! shell.

use clap::Parser;

mod commands;
mod error;

use commands::Cli;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();
    commands::run_command(cli)?;
    Ok(())
}
