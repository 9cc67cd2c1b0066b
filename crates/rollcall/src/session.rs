//! Scanning session state.
//!
//! A [`ScanSession`] owns the [`SeenSet`] and the [`Roster`] for one run of
//! the scanner. Sessions never share state, so any number can coexist.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::payload::AttendeeRecord;
use crate::reducer::{evaluate, ScanOutcome, SeenSet};

/// An accepted attendee together with when they were scanned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    /// The attendee as decoded from their QR code.
    #[serde(flatten)]
    pub record: AttendeeRecord,

    /// When the scan was accepted.
    pub scanned_at: DateTime<Utc>,
}

/// Accepted attendees in the order they were scanned.
///
/// Roll numbers are unique; entries are only ever appended by
/// [`ScanSession::submit`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Roster {
    entries: Vec<RosterEntry>,
}

impl Roster {
    /// Number of attendees recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no attendee has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in scan order.
    pub fn iter(&self) -> std::slice::Iter<'_, RosterEntry> {
        self.entries.iter()
    }

    /// Iterate over the bare records in scan order.
    pub fn records(&self) -> impl Iterator<Item = &AttendeeRecord> {
        self.entries.iter().map(|e| &e.record)
    }

    fn push(&mut self, record: AttendeeRecord) {
        self.entries.push(RosterEntry {
            record,
            scanned_at: Utc::now(),
        });
    }

    fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<'a> IntoIterator for &'a Roster {
    type Item = &'a RosterEntry;
    type IntoIter = std::slice::Iter<'a, RosterEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// The accumulated state of one scanning session.
#[derive(Debug, Clone, Default)]
pub struct ScanSession {
    seen: SeenSet,
    roster: Roster,
}

impl ScanSession {
    /// Create an empty session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate a decoded payload and record it if accepted.
    pub fn submit(&mut self, raw: &str) -> ScanOutcome {
        let outcome = evaluate(raw, &mut self.seen);
        if let ScanOutcome::Accepted(record) = &outcome {
            info!(roll_no = %record.roll_no, name = %record.name, "Attendee scanned");
            self.roster.push(record.clone());
        }
        outcome
    }

    /// The roster accumulated so far.
    #[must_use]
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Number of attendees recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.roster.len()
    }

    /// Check if no attendee has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roster.is_empty()
    }

    /// Check whether a roll number has been recorded.
    #[must_use]
    pub fn contains(&self, roll_no: &str) -> bool {
        self.seen.contains(roll_no)
    }

    /// Discard the roster and forget every seen roll number.
    pub fn reset(&mut self) {
        info!(discarded = self.roster.len(), "Resetting scan session");
        self.seen.clear();
        self.roster.clear();
    }
}
