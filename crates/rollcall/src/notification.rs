//! User-facing notifications produced while scanning.

use serde::Serialize;

use crate::config::{NotificationConfig, ROLL_NO_PLACEHOLDER};
use crate::reducer::ScanOutcome;

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationLevel {
    /// An attendee was recorded.
    Success,
    /// Something was already recorded; nothing changed.
    Warning,
    /// A scan was rejected; scanning continues.
    Error,
    /// Scanning cannot continue until the user intervenes.
    Alert,
}

impl std::fmt::Display for NotificationLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
            Self::Alert => write!(f, "alert"),
        }
    }
}

/// A message for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    /// How the message should be surfaced.
    pub level: NotificationLevel,
    /// The text to show.
    pub message: String,
}

impl Notification {
    /// Create a notification.
    #[must_use]
    pub fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    /// The notification to show for a scan outcome, if any.
    ///
    /// Duplicates only produce a notification when `notify_duplicates` is set.
    #[must_use]
    pub fn for_outcome(outcome: &ScanOutcome, config: &NotificationConfig) -> Option<Self> {
        match outcome {
            ScanOutcome::Accepted(_) => Some(Self::new(
                NotificationLevel::Success,
                &config.success_message,
            )),
            ScanOutcome::RejectedInvalidFormat(_) => Some(Self::new(
                NotificationLevel::Error,
                &config.invalid_format_message,
            )),
            ScanOutcome::RejectedDuplicate(roll_no) if config.notify_duplicates => Some(Self::new(
                NotificationLevel::Warning,
                config
                    .duplicate_message
                    .replace(ROLL_NO_PLACEHOLDER, roll_no),
            )),
            ScanOutcome::RejectedDuplicate(_) => None,
        }
    }

    /// The blocking alert shown when the camera cannot be opened.
    #[must_use]
    pub fn camera_blocked(config: &NotificationConfig) -> Self {
        Self::new(NotificationLevel::Alert, &config.camera_blocked_message)
    }

    /// Check if this notification must block until acknowledged.
    #[must_use]
    pub fn is_blocking(&self) -> bool {
        self.level == NotificationLevel::Alert
    }
}

impl std::fmt::Display for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.level, self.message)
    }
}
