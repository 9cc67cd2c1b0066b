//! Configuration management for rollcall.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default configuration directory name.
const CONFIG_DIR_NAME: &str = "rollcall";

/// Prefix for configuration environment variables.
const ENV_PREFIX: &str = "ROLLCALL_";

/// Placeholder substituted with the roll number in `duplicate_message`.
pub const ROLL_NO_PLACEHOLDER: &str = "{rollNo}";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `ROLLCALL_`, sections split on `__`)
/// 2. TOML config file at `~/.config/rollcall/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Scanner configuration.
    pub scanner: ScannerConfig,
    /// Notification configuration.
    pub notifications: NotificationConfig,
    /// Output configuration.
    pub output: OutputConfig,
}

/// Scanner-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    /// Capacity of the channel between the decode source and the scanner.
    pub channel_capacity: usize,
    /// Skip blank lines when reading payloads from a line source.
    pub skip_blank_lines: bool,
}

/// Notification-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// Surface a warning when an already-recorded roll number is scanned.
    pub notify_duplicates: bool,
    /// Warning shown for a repeat scan; `{rollNo}` is replaced by the roll number.
    pub duplicate_message: String,
    /// Message shown when an attendee is recorded.
    pub success_message: String,
    /// Message shown when a payload cannot be parsed.
    pub invalid_format_message: String,
    /// Blocking alert shown when the camera cannot be opened.
    pub camera_blocked_message: String,
}

/// Output-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Format used to print the roster.
    pub format: OutputFormat,
    /// Print the full roster, not just the count.
    pub show_roster: bool,
}

/// Output format for the roster and command results.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Plain,
    /// Formatted table
    Table,
    /// JSON output
    Json,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 16,
            skip_blank_lines: true,
        }
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            notify_duplicates: false,
            duplicate_message: format!("Already scanned: {ROLL_NO_PLACEHOLDER}"),
            success_message: "QR Code Scanned!".to_string(),
            invalid_format_message: "Invalid QR code format. Please scan a valid QR code."
                .to_string(),
            camera_blocked_message:
                "Camera is blocked or not accessible. Please allow camera access and restart scanning."
                    .to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Plain,
            show_roster: true,
        }
    }
}

impl Config {
    /// Load configuration with an optional custom config path.
    ///
    /// A missing config file is not an error; defaults are used instead.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading, parsing or validation fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.scanner.channel_capacity == 0 {
            return Err(Error::ConfigValidation {
                message: "channel_capacity must be greater than 0".to_string(),
            });
        }

        let messages = [
            ("success_message", &self.notifications.success_message),
            ("duplicate_message", &self.notifications.duplicate_message),
            (
                "invalid_format_message",
                &self.notifications.invalid_format_message,
            ),
            (
                "camera_blocked_message",
                &self.notifications.camera_blocked_message,
            ),
        ];
        for (key, message) in messages {
            if message.trim().is_empty() {
                return Err(Error::ConfigValidation {
                    message: format!("{key} must not be empty"),
                });
            }
        }

        Ok(())
    }
}
