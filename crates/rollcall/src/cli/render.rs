//! Text rendering of rosters and scan outcomes.

use std::fmt::Write as _;

use serde_json::json;

use crate::config::OutputFormat;
use crate::error::Result;
use crate::reducer::ScanOutcome;
use crate::session::Roster;

const TABLE_HEADERS: [&str; 5] = ["#", "Name", "Roll No", "Class", "Scanned At"];

/// The headline count shown after a scan.
#[must_use]
pub fn count_line(count: usize) -> String {
    format!("Number of Scanned Results: {count}")
}

/// Render the roster in the requested format.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn roster(roster: &Roster, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Plain => Ok(plain(roster)),
        OutputFormat::Table => Ok(table(roster)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(roster)?),
    }
}

fn plain(roster: &Roster) -> String {
    let mut out = String::new();
    for entry in roster {
        let r = &entry.record;
        let _ = writeln!(out, "Name: {}  Roll No: {}  Class: {}", r.name, r.roll_no, r.class);
    }
    out
}

fn table(roster: &Roster) -> String {
    let rows: Vec<[String; 5]> = roster
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            [
                (i + 1).to_string(),
                entry.record.name.clone(),
                entry.record.roll_no.clone(),
                entry.record.class.clone(),
                entry.scanned_at.format("%H:%M:%S").to_string(),
            ]
        })
        .collect();

    let mut widths = TABLE_HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &TABLE_HEADERS[..], &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_row(&mut out, rule.as_slice(), &widths);
    for row in &rows {
        push_row(&mut out, row.as_slice(), &widths);
    }
    out
}

fn push_row<S: AsRef<str>>(out: &mut String, cells: &[S], widths: &[usize]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{:<width$}", cell.as_ref()))
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}

/// Render a single scan outcome.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn outcome(outcome: &ScanOutcome, as_json: bool) -> Result<String> {
    if as_json {
        let value = match outcome {
            ScanOutcome::Accepted(record) => json!({ "outcome": "accepted", "record": record }),
            ScanOutcome::RejectedInvalidFormat(reason) => json!({
                "outcome": "rejected_invalid_format",
                "reason": reason.to_string(),
            }),
            ScanOutcome::RejectedDuplicate(roll_no) => json!({
                "outcome": "rejected_duplicate",
                "rollNo": roll_no,
            }),
        };
        return Ok(serde_json::to_string_pretty(&value)?);
    }

    Ok(match outcome {
        ScanOutcome::Accepted(record) => format!("accepted: {record}"),
        ScanOutcome::RejectedInvalidFormat(reason) => format!("rejected (invalid format): {reason}"),
        ScanOutcome::RejectedDuplicate(roll_no) => format!("rejected (duplicate): {roll_no}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::PayloadError;
    use crate::session::ScanSession;

    fn session() -> ScanSession {
        let mut session = ScanSession::new();
        session.submit(r#"{"name":"Alice","rollNo":"101","class":"5A"}"#);
        session.submit(r#"{"name":"Bartholomew","rollNo":"7","class":"6C"}"#);
        session
    }

    #[test]
    fn test_count_line() {
        assert_eq!(count_line(3), "Number of Scanned Results: 3");
    }

    #[test]
    fn test_plain_roster() {
        let out = roster(session().roster(), OutputFormat::Plain).unwrap();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "Name: Alice  Roll No: 101  Class: 5A");
    }

    #[test]
    fn test_table_roster_aligns_columns() {
        let out = roster(session().roster(), OutputFormat::Table).unwrap();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("#  Name"));
        assert!(lines[1].starts_with("-  ----"));

        let col = lines[0].find("Roll No").unwrap();
        assert_eq!(&lines[2][col..col + 3], "101");
        assert_eq!(&lines[3][col..col + 1], "7");
    }

    #[test]
    fn test_json_roster() {
        let out = roster(session().roster(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[1]["rollNo"], "7");
    }

    #[test]
    fn test_empty_table_has_header_only() {
        let out = roster(ScanSession::new().roster(), OutputFormat::Table).unwrap();
        assert_eq!(out.lines().count(), 2);
    }

    #[test]
    fn test_outcome_plain() {
        let out = outcome(&ScanOutcome::RejectedDuplicate("101".to_string()), false).unwrap();
        assert_eq!(out, "rejected (duplicate): 101");

        let out = outcome(
            &ScanOutcome::RejectedInvalidFormat(PayloadError::NotAnObject),
            false,
        )
        .unwrap();
        assert!(out.starts_with("rejected (invalid format)"));
    }

    #[test]
    fn test_outcome_json() {
        let mut session = ScanSession::new();
        let accepted = session.submit(r#"{"name":"Alice","rollNo":"101","class":"5A"}"#);

        let out = outcome(&accepted, true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["outcome"], "accepted");
        assert_eq!(value["record"]["rollNo"], "101");
    }
}
