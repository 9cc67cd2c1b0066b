//! The scan event reducer.
//!
//! [`evaluate`] turns one decoded payload into a [`ScanOutcome`], consulting
//! and updating the set of roll numbers already accepted in the session.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::payload::{AttendeeRecord, PayloadError};

/// Roll numbers accepted so far in a session.
///
/// Grows monotonically until [`clear`](Self::clear) is called.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeenSet {
    roll_nos: HashSet<String>,
}

impl SeenSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether a roll number has already been accepted.
    #[must_use]
    pub fn contains(&self, roll_no: &str) -> bool {
        self.roll_nos.contains(roll_no)
    }

    /// Number of accepted roll numbers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.roll_nos.len()
    }

    /// Check if nothing has been accepted yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roll_nos.is_empty()
    }

    /// Forget every accepted roll number.
    pub fn clear(&mut self) {
        self.roll_nos.clear();
    }

    fn insert(&mut self, roll_no: String) -> bool {
        self.roll_nos.insert(roll_no)
    }
}

/// Result of evaluating a single decoded payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    /// A new attendee was recorded.
    Accepted(AttendeeRecord),
    /// The payload is unparseable or lacks a required field.
    RejectedInvalidFormat(PayloadError),
    /// The roll number was already accepted in this session.
    RejectedDuplicate(String),
}

impl ScanOutcome {
    /// Check if the payload was accepted.
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }

    /// Check if the payload was rejected as a duplicate.
    #[must_use]
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::RejectedDuplicate(_))
    }

    /// Check if the payload was rejected as malformed.
    #[must_use]
    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::RejectedInvalidFormat(_))
    }
}

/// Evaluate one decoded payload against the roll numbers seen so far.
///
/// Only an [`Accepted`](ScanOutcome::Accepted) outcome mutates `seen`.
pub fn evaluate(raw: &str, seen: &mut SeenSet) -> ScanOutcome {
    let record = match AttendeeRecord::from_payload(raw) {
        Ok(record) => record,
        Err(err) => {
            warn!(error = %err, "Rejected invalid payload");
            return ScanOutcome::RejectedInvalidFormat(err);
        }
    };

    if seen.contains(&record.roll_no) {
        debug!(roll_no = %record.roll_no, "Ignoring duplicate scan");
        return ScanOutcome::RejectedDuplicate(record.roll_no);
    }

    seen.insert(record.roll_no.clone());
    ScanOutcome::Accepted(record)
}
