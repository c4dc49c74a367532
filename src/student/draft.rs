//! Boundary validation of create/update payloads.
//!
//! A [`StudentDraft`] is what arrives from a form or a request body: every
//! field optional, the grade still raw JSON. [`StudentDraft::validate`] turns
//! it into a [`NewStudent`] or rejects it with a [`ValidationError`]. Invalid
//! grades are rejected, never coerced to zero.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::types::{NewStudent, Status};
use crate::error::ValidationError;

/// Unvalidated create/update payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudentDraft {
    /// Student name.
    #[serde(default)]
    pub name: Option<String>,
    /// Section.
    #[serde(default)]
    pub section: Option<String>,
    /// Grade as submitted: a JSON number or a numeric string.
    #[serde(default)]
    pub grade: Option<Value>,
    /// Status; the configured default applies when absent.
    #[serde(default)]
    pub status: Option<String>,
}

impl StudentDraft {
    /// Create an empty draft.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set section.
    #[must_use]
    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    /// Set grade from any JSON value.
    #[must_use]
    pub fn with_grade(mut self, grade: impl Into<Value>) -> Self {
        self.grade = Some(grade.into());
        self
    }

    /// Set status.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Validate into a [`NewStudent`].
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if:
    /// - `name` or `section` is missing or blank
    /// - `grade` is missing, not numeric, or not finite
    /// - `status` is present but not one of the recognized values
    pub fn validate(&self, default_status: &Status) -> Result<NewStudent, ValidationError> {
        let name = required_text("name", self.name.as_deref())?;
        let section = required_text("section", self.section.as_deref())?;
        let grade = parse_grade(self.grade.as_ref())?;

        let status = match self.status.as_deref() {
            None => default_status.clone(),
            Some(s) => Status::from_str(s.trim()).ok_or_else(|| ValidationError::InvalidValue {
                field: "status".into(),
                reason: format!("must be one of Passed, Conditional, At Risk (got '{s}')"),
            })?,
        };

        Ok(NewStudent {
            name,
            section,
            grade,
            status,
        })
    }
}

fn required_text(field: &str, value: Option<&str>) -> Result<String, ValidationError> {
    let value = value.ok_or_else(|| ValidationError::MissingField {
        field: field.into(),
    })?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::InvalidValue {
            field: field.into(),
            reason: "must not be empty".into(),
        });
    }
    Ok(trimmed.to_string())
}

fn parse_grade(value: Option<&Value>) -> Result<f64, ValidationError> {
    let invalid = |reason: &str| ValidationError::InvalidValue {
        field: "grade".into(),
        reason: reason.into(),
    };

    let grade = match value {
        None | Some(Value::Null) => {
            return Err(ValidationError::MissingField {
                field: "grade".into(),
            })
        }
        Some(Value::Number(n)) => n.as_f64().ok_or_else(|| invalid("must be a number"))?,
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| invalid("must be a number"))?,
        Some(_) => return Err(invalid("must be a number")),
    };

    if !grade.is_finite() {
        return Err(invalid("must be a finite number"));
    }
    Ok(grade)
}
