//! Attendee records and the QR payload schema.
//!
//! A payload is the text decoded from a single QR code. It must be a JSON
//! object carrying three non-empty string fields: `name`, `rollNo` and
//! `class`. Any other fields are ignored.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Wire name of the attendee name field.
pub const FIELD_NAME: &str = "name";

/// Wire name of the roll number field (the identity key).
pub const FIELD_ROLL_NO: &str = "rollNo";

/// Wire name of the class field.
pub const FIELD_CLASS: &str = "class";

/// Why a payload could not be turned into an [`AttendeeRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayloadError {
    /// The payload is not well-formed JSON.
    #[error("payload is not valid JSON: {0}")]
    Malformed(String),

    /// The payload parsed, but the top level is not an object.
    #[error("payload is not a JSON object")]
    NotAnObject,

    /// A required field is absent (or `null`).
    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    /// A required field is present but is not a string.
    #[error("field '{0}' must be a string")]
    WrongType(&'static str),

    /// A required field is an empty string.
    #[error("field '{0}' must not be empty")]
    EmptyField(&'static str),
}

/// A single attendee, as encoded in their QR code.
///
/// Identity is [`roll_no`](Self::roll_no). Records are never modified once
/// accepted into a roster.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttendeeRecord {
    /// Attendee display name.
    pub name: String,

    /// Roll number, unique within a session.
    #[serde(rename = "rollNo")]
    pub roll_no: String,

    /// Class or section the attendee belongs to.
    pub class: String,
}

impl AttendeeRecord {
    /// Parse and validate a raw payload.
    ///
    /// # Errors
    ///
    /// Returns a [`PayloadError`] describing the first problem found.
    pub fn from_payload(raw: &str) -> Result<Self, PayloadError> {
        let value: Value =
            serde_json::from_str(raw).map_err(|e| PayloadError::Malformed(e.to_string()))?;
        let Value::Object(fields) = value else {
            return Err(PayloadError::NotAnObject);
        };

        Ok(Self {
            name: required_text(&fields, FIELD_NAME)?,
            roll_no: required_text(&fields, FIELD_ROLL_NO)?,
            class: required_text(&fields, FIELD_CLASS)?,
        })
    }
}

impl std::fmt::Display for AttendeeRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}, {})", self.name, self.roll_no, self.class)
    }
}

fn required_text(fields: &Map<String, Value>, key: &'static str) -> Result<String, PayloadError> {
    match fields.get(key) {
        None | Some(Value::Null) => Err(PayloadError::MissingField(key)),
        Some(Value::String(s)) if s.is_empty() => Err(PayloadError::EmptyField(key)),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(PayloadError::WrongType(key)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_payload() {
        let record =
            AttendeeRecord::from_payload(r#"{"name":"Alice","rollNo":"101","class":"5A"}"#)
                .unwrap();
        assert_eq!(record.name, "Alice");
        assert_eq!(record.roll_no, "101");
        assert_eq!(record.class, "5A");
    }

    #[test]
    fn test_parse_ignores_extra_fields() {
        let record = AttendeeRecord::from_payload(
            r#"{"name":"Alice","rollNo":"101","class":"5A","section":"north"}"#,
        )
        .unwrap();
        assert_eq!(record.roll_no, "101");
    }

    #[test]
    fn test_parse_not_json() {
        let err = AttendeeRecord::from_payload("not-json-text").unwrap_err();
        assert!(matches!(err, PayloadError::Malformed(_)));
    }

    #[test]
    fn test_parse_empty_input() {
        let err = AttendeeRecord::from_payload("").unwrap_err();
        assert!(matches!(err, PayloadError::Malformed(_)));
    }

    #[test]
    fn test_parse_not_an_object() {
        assert_eq!(
            AttendeeRecord::from_payload("[1, 2, 3]").unwrap_err(),
            PayloadError::NotAnObject
        );
        assert_eq!(
            AttendeeRecord::from_payload("null").unwrap_err(),
            PayloadError::NotAnObject
        );
        assert_eq!(
            AttendeeRecord::from_payload(r#""Alice""#).unwrap_err(),
            PayloadError::NotAnObject
        );
    }

    #[test]
    fn test_parse_missing_roll_no() {
        let err = AttendeeRecord::from_payload(r#"{"name":"Bob","class":"5A"}"#).unwrap_err();
        assert_eq!(err, PayloadError::MissingField(FIELD_ROLL_NO));
    }

    #[test]
    fn test_parse_missing_each_field() {
        let cases = [
            (r#"{"rollNo":"1","class":"5A"}"#, FIELD_NAME),
            (r#"{"name":"A","class":"5A"}"#, FIELD_ROLL_NO),
            (r#"{"name":"A","rollNo":"1"}"#, FIELD_CLASS),
        ];
        for (raw, field) in cases {
            assert_eq!(
                AttendeeRecord::from_payload(raw).unwrap_err(),
                PayloadError::MissingField(field),
                "payload: {raw}"
            );
        }
    }

    #[test]
    fn test_parse_null_field_is_missing() {
        let err = AttendeeRecord::from_payload(r#"{"name":null,"rollNo":"1","class":"5A"}"#)
            .unwrap_err();
        assert_eq!(err, PayloadError::MissingField(FIELD_NAME));
    }

    #[test]
    fn test_parse_empty_field() {
        let err =
            AttendeeRecord::from_payload(r#"{"name":"Alice","rollNo":"","class":"5A"}"#)
                .unwrap_err();
        assert_eq!(err, PayloadError::EmptyField(FIELD_ROLL_NO));
    }

    #[test]
    fn test_parse_numeric_roll_no_rejected() {
        let err = AttendeeRecord::from_payload(r#"{"name":"Alice","rollNo":101,"class":"5A"}"#)
            .unwrap_err();
        assert_eq!(err, PayloadError::WrongType(FIELD_ROLL_NO));
    }

    #[test]
    fn test_record_serializes_wire_names() {
        let record = AttendeeRecord {
            name: "Alice".to_string(),
            roll_no: "101".to_string(),
            class: "5A".to_string(),
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains(r#""rollNo":"101""#));
        assert!(!json.contains("roll_no"));
    }

    #[test]
    fn test_record_display() {
        let record = AttendeeRecord {
            name: "Alice".to_string(),
            roll_no: "101".to_string(),
            class: "5A".to_string(),
        };
        assert_eq!(record.to_string(), "Alice (101, 5A)");
    }

    #[test]
    fn test_payload_error_display() {
        assert!(PayloadError::MissingField(FIELD_CLASS)
            .to_string()
            .contains("class"));
        assert!(PayloadError::NotAnObject.to_string().contains("object"));
    }
}
