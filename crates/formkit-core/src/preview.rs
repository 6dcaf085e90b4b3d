//! Preview-mode submission checks.
//!
//! In preview mode the form is rendered from the field list and a user can
//! try submitting it. This module validates such a submission against the
//! fields' `required` flags and validation rules and produces either the
//! normalized values or the per-field violations. It only reads fields; the
//! store is never touched.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use std::collections::HashMap;
use std::sync::OnceLock;

use itertools::Itertools;
use regex::{Regex, RegexBuilder};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

use crate::domain::{Field, FieldId, FieldKind};

static WHITESPACE_RUN: OnceLock<Option<Regex>> = OnceLock::new();
static EMAIL: OnceLock<Option<Regex>> = OnceLock::new();

// ============================================================================
// VALUES
// ============================================================================

/// A value entered into one rendered input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl FieldValue {
    fn is_blank(&self) -> bool {
        matches!(self, Self::Text(text) if text.trim().is_empty())
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Entered values keyed by field id, as posted by the preview form.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Submission {
    values: HashMap<FieldId, FieldValue>,
}

impl Submission {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, id: FieldId, value: impl Into<FieldValue>) -> Self {
        self.insert(id, value);
        self
    }

    pub fn insert(&mut self, id: FieldId, value: impl Into<FieldValue>) {
        self.values.insert(id, value.into());
    }

    #[must_use]
    pub fn get(&self, id: &FieldId) -> Option<&FieldValue> {
        self.values.get(id)
    }
}

impl FromIterator<(FieldId, FieldValue)> for Submission {
    fn from_iter<I: IntoIterator<Item = (FieldId, FieldValue)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// The submitted value of a select/radio choice.
///
/// `"Option 1"` becomes `"option-1"`.
#[must_use]
pub fn option_value(option: &str) -> String {
    let lower = option.to_lowercase();
    WHITESPACE_RUN
        .get_or_init(|| Regex::new(r"\s+").ok())
        .as_ref()
        .map_or_else(
            || lower.split_whitespace().join("-"),
            |re| re.replace_all(&lower, "-").into_owned(),
        )
}

// ============================================================================
// OUTCOMES
// ============================================================================

/// Normalized values of a valid submission, in field order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AcceptedSubmission {
    values: Vec<(FieldId, FieldValue)>,
}

impl AcceptedSubmission {
    #[must_use]
    pub fn get(&self, id: &FieldId) -> Option<&FieldValue> {
        self.values
            .iter()
            .find_map(|(field_id, value)| (field_id == id).then_some(value))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FieldId, &FieldValue)> {
        self.values.iter().map(|(id, value)| (id, value))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Serialize for AcceptedSubmission {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (id, value) in &self.values {
            map.serialize_entry(id, value)?;
        }
        map.end()
    }
}

/// Why one field's value was refused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field_id: FieldId,
    pub label: String,
    pub message: String,
}

/// A submission with at least one violation, one entry per failing field.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{} field(s) failed validation: {}", .violations.len(), summary(.violations))]
pub struct SubmissionRejected {
    pub violations: Vec<FieldViolation>,
}

fn summary(violations: &[FieldViolation]) -> String {
    violations.iter().map(|v| &v.message).join("; ")
}

// ============================================================================
// VALIDATION
// ============================================================================

/// Check `submission` against `fields` (normally `store.fields()`).
///
/// Each field reports at most its first violation. Values for ids that are
/// not in `fields` are ignored.
///
/// # Errors
///
/// Returns `SubmissionRejected` listing every failing field.
pub fn validate_submission<'a>(
    fields: impl IntoIterator<Item = &'a Field>,
    submission: &Submission,
) -> Result<AcceptedSubmission, SubmissionRejected> {
    let mut accepted = Vec::new();
    let mut violations = Vec::new();

    for field in fields {
        match check_field(field, submission.get(field.id())) {
            Ok(Some(value)) => accepted.push((field.id().clone(), value)),
            Ok(None) => {}
            Err(message) => violations.push(FieldViolation {
                field_id: field.id().clone(),
                label: field.label().to_string(),
                message,
            }),
        }
    }

    if violations.is_empty() {
        tracing::debug!(values = accepted.len(), "submission accepted");
        Ok(AcceptedSubmission { values: accepted })
    } else {
        tracing::debug!(violations = violations.len(), "submission rejected");
        Err(SubmissionRejected { violations })
    }
}

/// `Ok(None)` means a blank optional value, omitted from the output.
fn check_field(field: &Field, value: Option<&FieldValue>) -> Result<Option<FieldValue>, String> {
    let label = field.label();

    if field.kind() == FieldKind::Checkbox {
        return match value {
            None => checkbox(field, false),
            Some(FieldValue::Bool(checked)) => checkbox(field, *checked),
            Some(_) => Err(format!("{label} has an invalid value")),
        };
    }

    let Some(value) = value.filter(|v| !v.is_blank()) else {
        return if field.is_required() {
            Err(format!("{label} is required"))
        } else {
            Ok(None)
        };
    };

    match field.kind() {
        FieldKind::Text | FieldKind::Textarea => check_text(field, value).map(Some),
        FieldKind::Email => check_email(field, value).map(Some),
        FieldKind::Number => check_number(field, value).map(Some),
        FieldKind::Select | FieldKind::Radio => check_choice(field, value).map(Some),
        FieldKind::Checkbox => Ok(None),
    }
}

fn checkbox(field: &Field, checked: bool) -> Result<Option<FieldValue>, String> {
    if field.is_required() && !checked {
        Err(format!("{} must be checked", field.label()))
    } else {
        Ok(Some(FieldValue::Bool(checked)))
    }
}

fn text_of<'v>(field: &Field, value: &'v FieldValue) -> Result<&'v str, String> {
    match value {
        FieldValue::Text(text) => Ok(text),
        _ => Err(format!("{} has an invalid value", field.label())),
    }
}

fn check_text(field: &Field, value: &FieldValue) -> Result<FieldValue, String> {
    let text = text_of(field, value)?;
    let Some(rules) = field.validation() else {
        return Ok(value.clone());
    };

    let length = text.chars().count();
    if let Some(min) = rules.min_length {
        if length < min as usize {
            return Err(format!("Minimum length is {min} characters"));
        }
    }
    if let Some(max) = rules.max_length {
        if length > max as usize {
            return Err(format!("Maximum length is {max} characters"));
        }
    }
    if let Some(pattern) = &rules.pattern {
        match Regex::new(pattern) {
            Ok(re) if !re.is_match(text) => {
                return Err(format!("{} does not match the required pattern", field.label()));
            }
            Ok(_) => {}
            Err(e) => tracing::warn!(field_id = %field.id(), error = %e, "skipping uncompilable pattern"),
        }
    }
    Ok(value.clone())
}

fn check_email(field: &Field, value: &FieldValue) -> Result<FieldValue, String> {
    let text = text_of(field, value)?;
    let valid = EMAIL
        .get_or_init(|| {
            RegexBuilder::new(r"^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$")
                .case_insensitive(true)
                .build()
                .ok()
        })
        .as_ref()
        .is_some_and(|re| re.is_match(text));

    if valid {
        Ok(value.clone())
    } else {
        Err("Invalid email address".to_string())
    }
}

fn check_number(field: &Field, value: &FieldValue) -> Result<FieldValue, String> {
    let number = match value {
        FieldValue::Number(n) => Some(*n),
        FieldValue::Text(text) => text.trim().parse::<f64>().ok(),
        FieldValue::Bool(_) => return Err(format!("{} has an invalid value", field.label())),
    };

    number
        .filter(|n| n.is_finite())
        .map(FieldValue::Number)
        .ok_or_else(|| format!("{} must be a number", field.label()))
}

fn check_choice(field: &Field, value: &FieldValue) -> Result<FieldValue, String> {
    let text = text_of(field, value)?;
    let known = field
        .options()
        .unwrap_or_default()
        .iter()
        .any(|option| option_value(option) == text);

    if known {
        Ok(value.clone())
    } else {
        Err(format!("{} has an invalid selection", field.label()))
    }
}
