//! `rollcall` - CLI for taking attendance from scanned QR codes
//!
//! Reads decoded payloads from stdin or a file, records attendees, and prints
//! the roster when the input ends or the user interrupts.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use rollcall::cli::{render, CheckCommand, Cli, Command, ConfigCommand, ScanCommand};
use rollcall::config::OutputFormat;
use rollcall::{
    init_logging, Config, DecoderAdapter, LineDecoder, LineSource, ScanSession, Scanner,
};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    let config = Config::load_from(cli.config.clone()).context("loading configuration")?;

    match cli.command {
        Command::Scan(scan_cmd) => {
            let runtime = tokio::runtime::Runtime::new()?;
            let result = runtime.block_on(handle_scan(config, scan_cmd));
            // A blocked stdin read must not hold up exit after Ctrl-C.
            runtime.shutdown_background();
            result
        }
        Command::Check(check_cmd) => handle_check(&check_cmd),
        Command::Config(config_cmd) => handle_config(&config, config_cmd),
    }
}

async fn handle_scan(mut config: Config, cmd: ScanCommand) -> anyhow::Result<()> {
    if cmd.notify_duplicates {
        config.notifications.notify_duplicates = true;
    }
    let format = cmd.format.unwrap_or(config.output.format);

    let source = cmd.input.map_or(LineSource::Stdin, LineSource::File);
    let decoder = LineDecoder::new(source).skip_blank_lines(config.scanner.skip_blank_lines);
    let mut scanner = Scanner::new(decoder, &config);

    if let Err(err) = scanner.start().await {
        print_notifications(&mut scanner);
        return Err(err.into());
    }

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            step = scanner.process_next() => {
                print_notifications(&mut scanner);
                if step.is_none() {
                    break;
                }
            }
            _ = &mut shutdown => {
                info!("Interrupted, stopping scanner");
                scanner.stop();
                break;
            }
        }
    }

    let roster = scanner.session().roster();
    if cmd.count_only || !config.output.show_roster {
        println!("{}", render::count_line(roster.len()));
    } else if format == OutputFormat::Json {
        println!("{}", render::roster(roster, format)?);
    } else {
        println!("{}", render::count_line(roster.len()));
        print!("{}", render::roster(roster, format)?);
    }
    Ok(())
}

fn print_notifications<A: DecoderAdapter>(scanner: &mut Scanner<A>) {
    for notification in scanner.take_notifications() {
        eprintln!("{notification}");
    }
}

fn handle_check(cmd: &CheckCommand) -> anyhow::Result<()> {
    let mut session = ScanSession::new();
    let outcome = session.submit(&cmd.payload);
    println!("{}", render::outcome(&outcome, cmd.json)?);
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Scanner]");
                println!("  Channel capacity:   {}", config.scanner.channel_capacity);
                println!("  Skip blank lines:   {}", config.scanner.skip_blank_lines);
                println!();
                println!("[Notifications]");
                println!(
                    "  Notify duplicates:  {}",
                    config.notifications.notify_duplicates
                );
                println!("  Success:            {}", config.notifications.success_message);
                println!(
                    "  Duplicate:          {}",
                    config.notifications.duplicate_message
                );
                println!(
                    "  Invalid format:     {}",
                    config.notifications.invalid_format_message
                );
                println!(
                    "  Camera blocked:     {}",
                    config.notifications.camera_blocked_message
                );
                println!();
                println!("[Output]");
                println!("  Format:             {:?}", config.output.format);
                println!("  Show roster:        {}", config.output.show_roster);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            validate_config(path)?;
            println!("Configuration is valid.");
        }
    }
    Ok(())
}

fn validate_config(path: PathBuf) -> anyhow::Result<()> {
    Config::load_from(Some(path)).context("configuration is invalid")?;
    Ok(())
}
