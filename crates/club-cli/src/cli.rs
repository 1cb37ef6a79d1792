//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Computer club ledger.
///
/// Replays a day's log of client actions, reports every automatic or
/// rejected event, and prints the revenue earned per table.
#[derive(Debug, Parser)]
#[command(name = "club", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Replay a log and print the transcript and revenue.
    Run {
        /// The log file to replay.
        input: PathBuf,

        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Validate a log without replaying it.
    Check {
        /// The log file to validate.
        input: PathBuf,
    },
}
