//! Command-line interface for rollcall.
//!
//! This module provides the CLI structure and output rendering for the
//! `rollcall` binary.

mod commands;
pub mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{CheckCommand, ConfigCommand, ScanCommand};

use crate::logging::Verbosity;

/// rollcall - Take attendance from scanned QR codes
///
/// Reads decoded QR payloads (one JSON object per line, e.g. from
/// `zbarcam --raw`), records each attendee once, and prints the roster.
#[derive(Debug, Parser)]
#[command(name = "rollcall")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Scan payloads until the input ends or Ctrl-C, then print the roster
    Scan(ScanCommand),

    /// Evaluate a single payload
    Check(CheckCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.verbose)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use clap::CommandFactory;

    #[test]
    fn test_cli_name() {
        assert_eq!(Cli::command().get_name(), "rollcall");
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_scan_defaults() {
        let cli = Cli::try_parse_from(["rollcall", "scan"]).unwrap();
        let Command::Scan(scan) = cli.command else {
            panic!("expected scan");
        };
        assert!(scan.input.is_none());
        assert!(scan.format.is_none());
        assert!(!scan.notify_duplicates);
        assert!(!scan.count_only);
    }

    #[test]
    fn test_parse_scan_with_options() {
        let cli = Cli::try_parse_from([
            "rollcall",
            "scan",
            "--input",
            "codes.txt",
            "--format",
            "json",
            "--notify-duplicates",
            "--count-only",
        ])
        .unwrap();
        let Command::Scan(scan) = cli.command else {
            panic!("expected scan");
        };
        assert_eq!(scan.input, Some(PathBuf::from("codes.txt")));
        assert_eq!(scan.format, Some(OutputFormat::Json));
        assert!(scan.notify_duplicates);
        assert!(scan.count_only);
    }

    #[test]
    fn test_parse_check() {
        let cli = Cli::try_parse_from(["rollcall", "check", "not-json-text", "--json"]).unwrap();
        let Command::Check(check) = cli.command else {
            panic!("expected check");
        };
        assert_eq!(check.payload, "not-json-text");
        assert!(check.json);
    }

    #[test]
    fn test_parse_config_path() {
        let cli = Cli::try_parse_from(["rollcall", "config", "path"]).unwrap();
        assert!(matches!(cli.command, Command::Config(ConfigCommand::Path)));
    }

    #[test]
    fn test_parse_with_config() {
        let cli = Cli::try_parse_from(["rollcall", "-c", "/custom/config.toml", "scan"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_verbosity_flags() {
        let cli = Cli::try_parse_from(["rollcall", "-vv", "scan"]).unwrap();
        assert_eq!(cli.verbosity(), Verbosity::Trace);

        let cli = Cli::try_parse_from(["rollcall", "-q", "scan"]).unwrap();
        assert_eq!(cli.verbosity(), Verbosity::Quiet);
    }
}
