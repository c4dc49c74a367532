//! Wire format of the document REST API.
//!
//! Documents carry their fields as typed value objects, for example
//! `{"grade": {"doubleValue": 91.5}}` or `{"grade": {"integerValue": "91"}}`
//! (64-bit integers travel as decimal strings). The collection is
//! schemaless, so decoding never rejects a document over a missing or
//! oddly-typed field: it degrades to text the views can still render.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::student::{Grade, NewStudent, Status, StudentId, StudentRecord};

/// A document as returned by the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Full resource name, ending in `/documents/students/{key}`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Typed field values.
    #[serde(default)]
    pub fields: HashMap<String, Value>,
}

impl Document {
    /// Encode the four mutable fields for a write.
    #[must_use]
    pub fn from_student(student: &NewStudent) -> Self {
        let fields = HashMap::from([
            ("name".to_string(), json!({ "stringValue": student.name })),
            ("section".to_string(), json!({ "stringValue": student.section })),
            ("grade".to_string(), json!({ "doubleValue": student.grade })),
            ("status".to_string(), json!({ "stringValue": student.status.as_str() })),
        ]);
        Self { name: None, fields }
    }

    /// The document key: the last segment of the resource name.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        self.name
            .as_deref()
            .and_then(|name| name.rsplit('/').next())
            .filter(|key| !key.is_empty())
    }

    /// Decode into a record. Returns `None` only when the document has no name.
    #[must_use]
    pub fn into_record(self) -> Option<StudentRecord> {
        let id = StudentId::Key(self.key()?.to_string());
        let text = |field: &str| self.fields.get(field).map(scalar_text).unwrap_or_default();

        let grade = match self.fields.get("grade") {
            Some(value) => decode_grade(value),
            None => Grade::Text(String::new()),
        };

        Some(StudentRecord {
            id,
            name: text("name"),
            section: text("section"),
            grade,
            status: Status::from(text("status")),
        })
    }
}

/// One page of a collection listing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPage {
    /// Documents on this page. Absent when the collection is empty.
    #[serde(default)]
    pub documents: Vec<Document>,
    /// Token for the next page, absent on the last one.
    #[serde(default)]
    pub next_page_token: Option<String>,
}

#[allow(clippy::cast_precision_loss)]
fn decode_grade(value: &Value) -> Grade {
    if let Some(n) = value.get("doubleValue").and_then(Value::as_f64) {
        return Grade::Numeric(n);
    }
    if let Some(n) = value
        .get("integerValue")
        .and_then(|v| v.as_str().map(str::to_string).or_else(|| v.as_i64().map(|i| i.to_string())))
        .and_then(|s| s.parse::<i64>().ok())
    {
        return Grade::Numeric(n as f64);
    }
    Grade::Text(scalar_text(value))
}

/// Render any scalar value object as text.
fn scalar_text(value: &Value) -> String {
    let Some(object) = value.as_object() else {
        return String::new();
    };
    for key in ["stringValue", "integerValue", "doubleValue", "booleanValue"] {
        match object.get(key) {
            Some(Value::String(s)) => return s.clone(),
            Some(Value::Null) | None => {}
            Some(other) => return other.to_string(),
        }
    }
    String::new()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const NAME: &str = "projects/p/databases/(default)/documents/students/k9";

    fn document(fields: Value) -> Document {
        serde_json::from_value(json!({ "name": NAME, "fields": fields })).unwrap()
    }

    #[test]
    fn test_encode_student() {
        let doc = Document::from_student(&NewStudent::new("Juan", "B", 88.0, Status::AtRisk));
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(
            value,
            json!({"fields": {
                "name": {"stringValue": "Juan"},
                "section": {"stringValue": "B"},
                "grade": {"doubleValue": 88.0},
                "status": {"stringValue": "At Risk"}
            }})
        );
    }

    #[test]
    fn test_decode_full_document() {
        let record = document(json!({
            "name": {"stringValue": "Anna"},
            "section": {"stringValue": "A"},
            "grade": {"integerValue": "95"},
            "status": {"stringValue": "Passed"}
        }))
        .into_record()
        .unwrap();

        assert_eq!(
            record,
            StudentRecord::new("k9", NewStudent::new("Anna", "A", 95.0, Status::Passed))
        );
    }

    #[test]
    fn test_decode_string_grade_and_unknown_status() {
        let record = document(json!({
            "name": {"stringValue": "Old"},
            "section": {"stringValue": "Z"},
            "grade": {"stringValue": "B+"},
            "status": {"stringValue": "Transferred"}
        }))
        .into_record()
        .unwrap();

        assert_eq!(record.grade, Grade::Text("B+".into()));
        assert_eq!(record.grade.value(), None);
        assert_eq!(record.status, Status::Unrecognized("Transferred".into()));
    }

    #[test]
    fn test_decode_missing_fields() {
        let record = document(json!({})).into_record().unwrap();
        assert_eq!(record.id, StudentId::Key("k9".into()));
        assert_eq!(record.name, "");
        assert_eq!(record.grade, Grade::Text(String::new()));
        assert!(!record.status.is_recognized());
    }

    #[test]
    fn test_decode_numeric_section() {
        let record = document(json!({"section": {"integerValue": "7"}}))
            .into_record()
            .unwrap();
        assert_eq!(record.section, "7");
    }

    #[test]
    fn test_document_without_name() {
        let doc: Document = serde_json::from_value(json!({"fields": {}})).unwrap();
        assert!(doc.into_record().is_none());
    }

    #[test]
    fn test_list_page_defaults() {
        let page: ListPage = serde_json::from_value(json!({})).unwrap();
        assert!(page.documents.is_empty());
        assert!(page.next_page_token.is_none());
    }
}
