//! Command-line interface for the webhook helpers.

use std::io::Write;

use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::daemon::check_daemon;
use crate::error::Result;
use crate::source::validate_request_source;

/// USEP GitHub helpers - Queue worker and request source checks.
#[derive(Parser)]
#[command(name = "usep-gh-check")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Report whether the USEP queue worker is running.
    Daemon,

    /// Check a request source address against the allow-list.
    ValidateIp {
        /// Perceived source IP address
        ip: String,
    },
}

/// Run the CLI. Reports are printed as JSON, whatever their status.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Daemon => print_json(&check_daemon()),
        Commands::ValidateIp { ip } => print_json(&validate_request_source(&ip)),
    }
}

fn print_json<T: Serialize>(report: &T) -> Result<()> {
    let json = serde_json::to_string(report)?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{json}")?;
    Ok(())
}
