//! `rollcall` - attendance taking from scanned QR codes
//!
//! Each attendee carries a QR code encoding a small JSON record. A decode
//! source delivers the decoded text, and rollcall validates it, records each
//! roll number once, and keeps the roster in scan order.
//!
//! ```
//! use rollcall::{ScanOutcome, ScanSession};
//!
//! let mut session = ScanSession::new();
//! let alice = r#"{"name":"Alice","rollNo":"101","class":"5A"}"#;
//!
//! assert!(session.submit(alice).is_accepted());
//! assert_eq!(
//!     session.submit(alice),
//!     ScanOutcome::RejectedDuplicate("101".to_string())
//! );
//! assert_eq!(session.len(), 1);
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod notification;
pub mod payload;
pub mod reducer;
pub mod scanner;
pub mod session;

pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use notification::{Notification, NotificationLevel};
pub use payload::{AttendeeRecord, PayloadError};
pub use reducer::{evaluate, ScanOutcome, SeenSet};
pub use scanner::{
    DecodeEvent, DecoderAdapter, LineDecoder, LineSource, ScanStep, Scanner, ScannerState,
};
pub use session::{Roster, RosterEntry, ScanSession};
