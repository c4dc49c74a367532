//! Student record types.
//!
//! This module defines the persisted entity and its field types:
//! - [`StudentId`]: Opaque store-assigned identifier
//! - [`Status`]: Performance status bucket
//! - [`Grade`]: Numeric score, tolerant of non-numeric stored values
//! - [`StudentRecord`]: A persisted record
//! - [`NewStudent`]: The four mutable fields, validated

#![allow(clippy::should_implement_trait)]

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Opaque identifier assigned by a store on create.
///
/// The relational binding hands out auto-incrementing integers, the document
/// binding hands out string keys. Serialized untagged, so it appears in JSON
/// as either a number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StudentId {
    /// Integer row id.
    Number(i64),
    /// Document key.
    Key(String),
}

impl StudentId {
    /// Returns the integer form, if this id is numeric.
    #[must_use]
    pub const fn as_number(&self) -> Option<i64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Key(_) => None,
        }
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Key(k) => f.write_str(k),
        }
    }
}

impl FromStr for StudentId {
    type Err = std::convert::Infallible;

    /// Parses a path segment. Only segments that print back identically
    /// become [`StudentId::Number`], so keys such as `007` keep their spelling.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.parse::<i64>() {
            Ok(n) if n.to_string() == s => Self::Number(n),
            _ => Self::Key(s.to_string()),
        })
    }
}

impl From<i64> for StudentId {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for StudentId {
    fn from(value: &str) -> Self {
        Self::Key(value.to_string())
    }
}

/// Performance status of a student.
///
/// Exactly three values are recognized. Stored data that carries anything
/// else is kept as [`Status::Unrecognized`] so it still renders, but it never
/// matches a status filter and is never produced by validation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Status {
    /// "Passed".
    #[default]
    Passed,
    /// "Conditional".
    Conditional,
    /// "At Risk".
    AtRisk,
    /// Any other stored value.
    Unrecognized(String),
}

impl Status {
    /// The three recognized statuses, in display order.
    pub const ALL: [Self; 3] = [Self::Passed, Self::Conditional, Self::AtRisk];

    /// Convert to string representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Passed => "Passed",
            Self::Conditional => "Conditional",
            Self::AtRisk => "At Risk",
            Self::Unrecognized(s) => s,
        }
    }

    /// Parse one of the three recognized values.
    #[must_use]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Passed" => Some(Self::Passed),
            "Conditional" => Some(Self::Conditional),
            "At Risk" => Some(Self::AtRisk),
            _ => None,
        }
    }

    /// Returns true for the three recognized values.
    #[must_use]
    pub const fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Status {
    fn from(value: String) -> Self {
        Self::from_str(&value).unwrap_or(Self::Unrecognized(value))
    }
}

impl From<Status> for String {
    fn from(value: Status) -> Self {
        match value {
            Status::Unrecognized(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

/// A grade as stored.
///
/// Validation only ever produces [`Grade::Numeric`]; [`Grade::Text`] exists
/// because a schemaless store may hand back strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Grade {
    /// Numeric score.
    Numeric(f64),
    /// Raw stored text.
    Text(String),
}

impl Grade {
    /// The numeric value, if there is one.
    ///
    /// Text is trimmed and parsed; anything that is not a finite number
    /// yields `None`.
    #[must_use]
    pub fn value(&self) -> Option<f64> {
        let value = match self {
            Self::Numeric(v) => *v,
            Self::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

impl From<f64> for Grade {
    fn from(value: f64) -> Self {
        Self::Numeric(value)
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(v) => write!(f, "{v}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// A persisted student record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    /// Store-assigned identifier.
    pub id: StudentId,
    /// Student name.
    pub name: String,
    /// Section, used only for grouping and filtering.
    pub section: String,
    /// Grade.
    pub grade: Grade,
    /// Status bucket.
    pub status: Status,
}

impl StudentRecord {
    /// Create a record from an id and validated fields.
    #[must_use]
    pub fn new(id: impl Into<StudentId>, student: NewStudent) -> Self {
        Self {
            id: id.into(),
            name: student.name,
            section: student.section,
            grade: Grade::Numeric(student.grade),
            status: student.status,
        }
    }
}

/// The four mutable fields of a record, already validated.
///
/// Used for both create (the store assigns the id) and update (full replace).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewStudent {
    /// Non-empty name.
    pub name: String,
    /// Non-empty section.
    pub section: String,
    /// Finite numeric grade.
    pub grade: f64,
    /// One of the recognized statuses.
    pub status: Status,
}

impl NewStudent {
    /// Create a new student payload.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        section: impl Into<String>,
        grade: f64,
        status: Status,
    ) -> Self {
        Self {
            name: name.into(),
            section: section.into(),
            grade,
            status,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    #[test_case("42", StudentId::Number(42) ; "digits become numbers")]
    #[test_case("-7", StudentId::Number(-7) ; "negative digits")]
    #[test_case("aB3xYz", StudentId::Key("aB3xYz".into()) ; "keys stay strings")]
    #[test_case("", StudentId::Key(String::new()) ; "empty segment")]
    #[test_case("007", StudentId::Key("007".into()) ; "leading zeros stay keys")]
    #[test_case("+5", StudentId::Key("+5".into()) ; "explicit plus stays key")]
    #[test_case("-0", StudentId::Key("-0".into()) ; "negative zero stays key")]
    fn test_student_id_from_str(input: &str, expected: StudentId) {
        assert_eq!(input.parse::<StudentId>().unwrap(), expected);
    }

    #[test]
    fn test_student_id_serde_untagged() {
        assert_eq!(serde_json::to_value(StudentId::Number(3)).unwrap(), json!(3));
        assert_eq!(
            serde_json::to_value(StudentId::from("k1")).unwrap(),
            json!("k1")
        );
        let id: StudentId = serde_json::from_value(json!("k2")).unwrap();
        assert_eq!(id, StudentId::Key("k2".into()));
        let id: StudentId = serde_json::from_value(json!(9)).unwrap();
        assert_eq!(id.as_number(), Some(9));
    }

    #[test_case("Passed", Status::Passed)]
    #[test_case("Conditional", Status::Conditional)]
    #[test_case("At Risk", Status::AtRisk)]
    #[test_case("at risk", Status::Unrecognized("at risk".into()) ; "case sensitive")]
    #[test_case("Failed", Status::Unrecognized("Failed".into()) ; "unknown")]
    fn test_status_from_string(input: &str, expected: Status) {
        assert_eq!(Status::from(input.to_string()), expected);
    }

    #[test]
    fn test_status_serde_round_trips_unrecognized() {
        let status: Status = serde_json::from_value(json!("Dropped")).unwrap();
        assert!(!status.is_recognized());
        assert_eq!(serde_json::to_value(&status).unwrap(), json!("Dropped"));
        assert_eq!(serde_json::to_value(Status::AtRisk).unwrap(), json!("At Risk"));
    }

    #[test]
    fn test_status_all_recognized() {
        assert!(Status::ALL.iter().all(Status::is_recognized));
        assert_eq!(Status::default(), Status::Passed);
    }

    #[test_case(Grade::Numeric(88.5), Some(88.5))]
    #[test_case(Grade::Text(" 91 ".into()), Some(91.0) ; "trimmed text")]
    #[test_case(Grade::Text("A+".into()), None ; "letter grade")]
    #[test_case(Grade::Text(String::new()), None ; "empty text")]
    #[test_case(Grade::Numeric(f64::NAN), None ; "nan")]
    #[test_case(Grade::Text("inf".into()), None ; "infinite text")]
    fn test_grade_value(grade: Grade, expected: Option<f64>) {
        assert_eq!(grade.value(), expected);
    }

    #[test]
    fn test_grade_deserialize_number_or_text() {
        let grade: Grade = serde_json::from_value(json!(90)).unwrap();
        assert_eq!(grade, Grade::Numeric(90.0));
        let grade: Grade = serde_json::from_value(json!("ninety")).unwrap();
        assert_eq!(grade, Grade::Text("ninety".into()));
    }

    #[test]
    fn test_record_serializes_flat() {
        let record = StudentRecord::new(
            1,
            NewStudent::new("Anna", "A", 95.0, Status::Passed),
        );
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            json!({"id": 1, "name": "Anna", "section": "A", "grade": 95.0, "status": "Passed"})
        );
    }
}
