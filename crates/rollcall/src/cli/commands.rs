//! CLI command definitions.

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::config::OutputFormat;

/// Scan command arguments.
#[derive(Debug, Args)]
pub struct ScanCommand {
    /// Read decoded payloads from this file instead of stdin
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Roster output format (overrides config)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Warn when an already-recorded roll number is scanned again
    #[arg(long)]
    pub notify_duplicates: bool,

    /// Only print the number of scanned attendees
    #[arg(long)]
    pub count_only: bool,
}

/// Check command arguments.
#[derive(Debug, Args)]
pub struct CheckCommand {
    /// The decoded QR payload to evaluate
    pub payload: String,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}
