//! Error types for rollcall.
//!
//! This module defines the crate-level error type. Payload validation failures
//! are not errors in this sense: they are ordinary scan outcomes and live in
//! [`crate::payload::PayloadError`].

use thiserror::Error;

/// The main error type for rollcall operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Scanner Errors ===
    /// The decode source could not be started (camera blocked, device missing,
    /// input unreadable).
    #[error("camera is not accessible via '{adapter}': {message}")]
    CameraAccess {
        /// Name of the adapter that failed.
        adapter: &'static str,
        /// Description of what went wrong.
        message: String,
    },

    /// `start` was called on a scanner that is already running.
    #[error("scanner is already running")]
    ScannerAlreadyRunning,

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === I/O Errors ===
    /// File system or stream operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Serialization Errors ===
    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Generic Errors ===
    /// An internal error occurred (bug).
    #[error("internal error: {0}")]
    Internal(String),
}

/// A specialized Result type for rollcall operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a camera access error for the named adapter.
    #[must_use]
    pub fn camera_access(adapter: &'static str, message: impl Into<String>) -> Self {
        Self::CameraAccess {
            adapter,
            message: message.into(),
        }
    }

    /// Create a new internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this error means the decode source could not be opened.
    ///
    /// This is the only error that halts a scanning session.
    #[must_use]
    pub fn is_camera_access_error(&self) -> bool {
        matches!(self, Self::CameraAccess { .. })
    }
}
