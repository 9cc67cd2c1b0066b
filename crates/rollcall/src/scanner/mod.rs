//! Scanner lifecycle and the decode source abstraction.
//!
//! A [`Scanner`] drives a [`DecoderAdapter`] (a camera plus QR decoder, or any
//! other source of decoded payloads) through a two-state lifecycle and feeds
//! each decoded payload into its [`ScanSession`].
//!
//! ```text
//!            start() ok
//!   Stopped ───────────▶ Running
//!      ▲  ◀─────────────   │
//!      │   start() failed  │ stop() / source finished
//!      └───────────────────┘
//! ```

mod lines;

pub use lines::{LineDecoder, LineSource};

use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::config::{Config, NotificationConfig, ScannerConfig};
use crate::error::{Error, Result};
use crate::notification::Notification;
use crate::reducer::ScanOutcome;
use crate::session::ScanSession;

/// An event produced by a decode source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeEvent {
    /// A frame was decoded successfully.
    Decoded {
        /// The decoded text payload.
        data: String,
    },
    /// A frame could not be decoded. Not fatal.
    Failed {
        /// Description of the failure.
        message: String,
    },
}

impl DecodeEvent {
    /// Create a successful decode event.
    #[must_use]
    pub fn decoded(data: impl Into<String>) -> Self {
        Self::Decoded { data: data.into() }
    }
}

/// A source of decoded QR payloads.
///
/// Implementors own the camera (or equivalent) and deliver one
/// [`DecodeEvent`] per decode attempt through the channel handed to
/// [`start`](Self::start). Dropping or closing the channel ends the session.
#[async_trait::async_trait]
pub trait DecoderAdapter: Send {
    /// The name of this adapter (for logging/debugging).
    fn name(&self) -> &'static str;

    /// Acquire the camera and begin sending decode events.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CameraAccess`] if the camera is unavailable or access
    /// was denied.
    async fn start(&mut self, tx: mpsc::Sender<DecodeEvent>) -> Result<()>;

    /// Stop delivering events. Must not fail.
    fn stop(&mut self);
}

/// Lifecycle state of a [`Scanner`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScannerState {
    /// Not scanning; no events are processed.
    Stopped,
    /// The adapter is running and events are processed.
    Running,
}

impl std::fmt::Display for ScannerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stopped => write!(f, "stopped"),
            Self::Running => write!(f, "running"),
        }
    }
}

/// What happened when a single decode event was processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanStep {
    /// A payload was decoded and evaluated.
    Scanned(ScanOutcome),
    /// The adapter reported a decode failure.
    DecodeFailed(String),
}

/// Drives a decode source and accumulates the session roster.
#[derive(Debug)]
pub struct Scanner<A> {
    adapter: A,
    scanner_config: ScannerConfig,
    notification_config: NotificationConfig,
    state: ScannerState,
    permission_granted: bool,
    session: ScanSession,
    events: Option<mpsc::Receiver<DecodeEvent>>,
    notifications: Vec<Notification>,
}

impl<A: DecoderAdapter> Scanner<A> {
    /// Create a stopped scanner with an empty session.
    #[must_use]
    pub fn new(adapter: A, config: &Config) -> Self {
        Self {
            adapter,
            scanner_config: config.scanner.clone(),
            notification_config: config.notifications.clone(),
            state: ScannerState::Stopped,
            permission_granted: true,
            session: ScanSession::new(),
            events: None,
            notifications: Vec::new(),
        }
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> ScannerState {
        self.state
    }

    /// Check if the scanner is running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state == ScannerState::Running
    }

    /// Whether the last start attempt was able to open the camera.
    #[must_use]
    pub fn permission_granted(&self) -> bool {
        self.permission_granted
    }

    /// The session accumulated so far.
    #[must_use]
    pub fn session(&self) -> &ScanSession {
        &self.session
    }

    /// Mutable access to the session, e.g. to reset it between runs.
    pub fn session_mut(&mut self) -> &mut ScanSession {
        &mut self.session
    }

    /// The underlying adapter.
    #[must_use]
    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    /// Start scanning.
    ///
    /// On failure the scanner stays stopped and a blocking alert is queued.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ScannerAlreadyRunning`] if already running, or the
    /// adapter's error (normally [`Error::CameraAccess`]) if it failed to start.
    pub async fn start(&mut self) -> Result<()> {
        if self.is_running() {
            return Err(Error::ScannerAlreadyRunning);
        }

        info!(adapter = self.adapter.name(), "Starting scanner");
        let (tx, rx) = mpsc::channel(self.scanner_config.channel_capacity);

        match self.adapter.start(tx).await {
            Ok(()) => {
                self.events = Some(rx);
                self.state = ScannerState::Running;
                self.permission_granted = true;
                Ok(())
            }
            Err(err) => {
                error!(adapter = self.adapter.name(), error = %err, "Failed to start scanner");
                self.permission_granted = false;
                self.notifications
                    .push(Notification::camera_blocked(&self.notification_config));
                Err(err)
            }
        }
    }

    /// Stop scanning. Always succeeds; a no-op when already stopped.
    ///
    /// Events the adapter delivers after this point are discarded.
    pub fn stop(&mut self) {
        if !self.is_running() {
            return;
        }

        info!(
            adapter = self.adapter.name(),
            scanned = self.session.len(),
            "Stopping scanner"
        );
        self.adapter.stop();
        self.events = None;
        self.state = ScannerState::Stopped;
    }

    /// Start when stopped, stop when running.
    ///
    /// # Errors
    ///
    /// Returns the start error if starting failed.
    pub async fn toggle(&mut self) -> Result<ScannerState> {
        match self.state {
            ScannerState::Stopped => self.start().await?,
            ScannerState::Running => self.stop(),
        }
        Ok(self.state)
    }

    /// Wait for and process the next decode event.
    ///
    /// Returns `None` when the scanner is stopped, or when the adapter has
    /// finished (in which case the scanner stops itself).
    pub async fn process_next(&mut self) -> Option<ScanStep> {
        let next = self.events.as_mut()?.recv().await;
        let Some(event) = next else {
            debug!(adapter = self.adapter.name(), "Decode source finished");
            self.stop();
            return None;
        };
        Some(self.handle(event))
    }

    /// Process events until the adapter finishes.
    pub async fn run(&mut self) {
        while self.process_next().await.is_some() {}
    }

    /// Drain notifications queued since the last call.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    fn handle(&mut self, event: DecodeEvent) -> ScanStep {
        match event {
            DecodeEvent::Decoded { data } => {
                let outcome = self.session.submit(&data);
                if let Some(n) = Notification::for_outcome(&outcome, &self.notification_config) {
                    self.notifications.push(n);
                }
                ScanStep::Scanned(outcome)
            }
            DecodeEvent::Failed { message } => {
                debug!(%message, "Decode failed");
                ScanStep::DecodeFailed(message)
            }
        }
    }
}
