//! Field model: kinds, specs, partial updates and option edits.
//!
//! # Invariants
//!
//! 1. `options` is present if and only if the kind is select or radio
//! 2. `validation` is only stored for text and textarea
//! 3. Checkbox fields never carry a placeholder
//! 4. `id` and `kind` never change after creation
//!
//! Every constructor and mutator checks the full change before touching the
//! field, so a rejected update leaves it exactly as it was.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use strum::{Display, EnumIter, EnumString};
use thiserror::Error;

use super::identifiers::FieldId;

// ============================================================================
// DOMAIN ERRORS
// ============================================================================

/// Errors raised when a field spec or update violates the field shape rules.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// Options supplied for a kind that has none
    #[error("{kind} fields do not take options")]
    OptionsNotSupported { kind: FieldKind },

    /// Length/pattern validation supplied for a kind that does not use it
    #[error("{kind} fields do not take length or pattern validation")]
    ValidationNotSupported { kind: FieldKind },

    /// `min_length` is greater than `max_length`
    #[error("min_length ({min}) exceeds max_length ({max})")]
    InvalidLengthBounds { min: u32, max: u32 },

    /// The validation pattern does not compile
    #[error("invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// An option is blank after trimming
    #[error("option text cannot be blank")]
    EmptyOption,

    /// Option index does not exist
    #[error("option index {index} out of range ({len} options)")]
    OptionIndexOutOfRange { index: usize, len: usize },
}

// ============================================================================
// FIELD KIND
// ============================================================================

/// The closed set of input kinds a form can contain.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    EnumString,
    EnumIter,
    Display,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Textarea,
    Select,
    Checkbox,
    Radio,
    Number,
    Email,
}

impl FieldKind {
    /// Whether fields of this kind carry an options list.
    #[must_use]
    pub const fn has_options(self) -> bool {
        matches!(self, Self::Select | Self::Radio)
    }

    /// Whether min/max length and pattern validation apply.
    #[must_use]
    pub const fn supports_length_validation(self) -> bool {
        matches!(self, Self::Text | Self::Textarea)
    }

    /// Whether a placeholder is rendered for this kind.
    #[must_use]
    pub const fn supports_placeholder(self) -> bool {
        !matches!(self, Self::Checkbox)
    }

    /// Palette title.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Text => "Text Input",
            Self::Textarea => "Text Area",
            Self::Select => "Select",
            Self::Checkbox => "Checkbox",
            Self::Radio => "Radio Group",
            Self::Number => "Number",
            Self::Email => "Email",
        }
    }

    /// Palette description.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Text => "Single line text input",
            Self::Textarea => "Multi-line text input",
            Self::Select => "Dropdown selection",
            Self::Checkbox => "Single checkbox",
            Self::Radio => "Multiple choice selection",
            Self::Number => "Numeric input",
            Self::Email => "Email address input",
        }
    }
}

// ============================================================================
// VALIDATION
// ============================================================================

/// Length and pattern constraints for text inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Validation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

impl Validation {
    #[must_use]
    pub fn with_min_length(mut self, min: u32) -> Self {
        self.min_length = Some(min);
        self
    }

    #[must_use]
    pub fn with_max_length(mut self, max: u32) -> Self {
        self.max_length = Some(max);
        self
    }

    #[must_use]
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// True when no constraint is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.min_length.is_none() && self.max_length.is_none() && self.pattern.is_none()
    }

    /// Drop unset constraints: a zero bound on either side counts as unset,
    /// as does an empty pattern.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            min_length: self.min_length.filter(|min| *min > 0),
            max_length: self.max_length.filter(|max| *max > 0),
            pattern: self.pattern.filter(|p| !p.is_empty()),
        }
    }

    /// Check the constraints are coherent.
    ///
    /// # Errors
    ///
    /// Returns `FieldError::InvalidLengthBounds` if min exceeds max, or
    /// `FieldError::InvalidPattern` if the pattern does not compile.
    pub fn check(&self) -> Result<(), FieldError> {
        if let (Some(min), Some(max)) = (self.min_length, self.max_length) {
            if min > max {
                return Err(FieldError::InvalidLengthBounds { min, max });
            }
        }

        if let Some(pattern) = &self.pattern {
            Regex::new(pattern).map_err(|e| FieldError::InvalidPattern {
                pattern: pattern.clone(),
                reason: e.to_string(),
            })?;
        }

        Ok(())
    }
}

// ============================================================================
// SHAPE RULES
// ============================================================================

fn normalize_placeholder(kind: FieldKind, placeholder: Option<String>) -> Option<String> {
    if !kind.supports_placeholder() {
        return None;
    }
    placeholder.filter(|p| !p.is_empty())
}

/// Options are stored trimmed and never blank.
fn clean_option(value: &str) -> Result<String, FieldError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(FieldError::EmptyOption);
    }
    Ok(value.to_string())
}

fn check_options(
    kind: FieldKind,
    options: Option<Vec<String>>,
) -> Result<Option<Vec<String>>, FieldError> {
    match (kind.has_options(), options) {
        (true, None) => Ok(Some(Vec::new())),
        (true, Some(options)) => options
            .iter()
            .map(|o| clean_option(o))
            .collect::<Result<Vec<_>, _>>()
            .map(Some),
        (false, None) => Ok(None),
        (false, Some(_)) => Err(FieldError::OptionsNotSupported { kind }),
    }
}

fn check_validation(
    kind: FieldKind,
    validation: Option<Validation>,
) -> Result<Option<Validation>, FieldError> {
    let Some(validation) = validation
        .map(Validation::normalized)
        .filter(|v| !v.is_empty())
    else {
        return Ok(None);
    };

    if !kind.supports_length_validation() {
        return Err(FieldError::ValidationNotSupported { kind });
    }

    validation.check()?;
    Ok(Some(validation))
}

// ============================================================================
// FIELD SPEC
// ============================================================================

/// Everything needed to create a field except its id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldSpec {
    pub kind: FieldKind,
    pub label: String,
    #[serde(default)]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub options: Option<Vec<String>>,
    #[serde(default)]
    pub validation: Option<Validation>,
}

impl FieldSpec {
    /// Start a spec with just a kind and label.
    #[must_use]
    pub fn new(kind: FieldKind, label: impl Into<String>) -> Self {
        Self {
            kind,
            label: label.into(),
            placeholder: None,
            required: false,
            options: None,
            validation: None,
        }
    }

    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    #[must_use]
    pub const fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    #[must_use]
    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = Some(options.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn with_validation(mut self, validation: Validation) -> Self {
        self.validation = Some(validation);
        self
    }

    /// Check the spec against the shape rules and attach an id.
    pub(crate) fn into_field(self, id: FieldId) -> Result<Field, FieldError> {
        let options = check_options(self.kind, self.options)?;
        let validation = check_validation(self.kind, self.validation)?;

        Ok(Field {
            id,
            kind: self.kind,
            label: self.label,
            placeholder: normalize_placeholder(self.kind, self.placeholder),
            required: self.required,
            options,
            validation,
        })
    }
}

// ============================================================================
// FIELD
// ============================================================================

/// A single form input specification.
///
/// Owned exclusively by the store; collaborators only ever see `&Field`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    id: FieldId,
    kind: FieldKind,
    label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    placeholder: Option<String>,
    required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    validation: Option<Validation>,
}

impl Field {
    #[must_use]
    pub const fn id(&self) -> &FieldId {
        &self.id
    }

    #[must_use]
    pub const fn kind(&self) -> FieldKind {
        self.kind
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn placeholder(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.required
    }

    /// Options, present only for select and radio fields.
    #[must_use]
    pub fn options(&self) -> Option<&[String]> {
        self.options.as_deref()
    }

    #[must_use]
    pub const fn validation(&self) -> Option<&Validation> {
        self.validation.as_ref()
    }

    /// Merge a partial update. All parts are checked before any is applied.
    pub(crate) fn apply(&mut self, update: FieldUpdate) -> Result<(), FieldError> {
        let FieldUpdate {
            label,
            placeholder,
            required,
            options,
            validation,
        } = update;

        let options = match options {
            Some(options) => check_options(self.kind, Some(options))?,
            None => None,
        };
        let validation = validation
            .map(|v| check_validation(self.kind, v))
            .transpose()?;

        if let Some(label) = label {
            self.label = label;
        }
        if let Some(placeholder) = placeholder {
            self.placeholder = normalize_placeholder(self.kind, placeholder);
        }
        if let Some(required) = required {
            self.required = required;
        }
        if let Some(options) = options {
            self.options = Some(options);
        }
        if let Some(validation) = validation {
            self.validation = validation;
        }

        Ok(())
    }

    /// Append, remove or replace a single option.
    pub(crate) fn edit_options(&mut self, edit: OptionEdit) -> Result<(), FieldError> {
        let kind = self.kind;
        let options = self
            .options
            .as_mut()
            .ok_or(FieldError::OptionsNotSupported { kind })?;
        let len = options.len();

        match edit {
            OptionEdit::Append { value } => {
                options.push(clean_option(&value)?);
            }
            OptionEdit::Remove { index } => {
                if index >= len {
                    return Err(FieldError::OptionIndexOutOfRange { index, len });
                }
                options.remove(index);
            }
            OptionEdit::Replace { index, value } => {
                let slot = options
                    .get_mut(index)
                    .ok_or(FieldError::OptionIndexOutOfRange { index, len })?;
                *slot = clean_option(&value)?;
            }
        }

        Ok(())
    }
}

// ============================================================================
// PARTIAL UPDATES
// ============================================================================

/// Distinguish an absent key (`None`) from an explicit `null` (`Some(None)`).
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Attribute subset merged into an existing field.
///
/// Has no `kind` member: kind is fixed at creation.
/// Outer `None` means "leave untouched"; for placeholder and validation,
/// `Some(None)` clears the attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FieldUpdate {
    pub label: Option<String>,
    #[serde(deserialize_with = "double_option")]
    pub placeholder: Option<Option<String>>,
    pub required: Option<bool>,
    pub options: Option<Vec<String>>,
    #[serde(deserialize_with = "double_option")]
    pub validation: Option<Option<Validation>>,
}

impl FieldUpdate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(Some(placeholder.into()));
        self
    }

    #[must_use]
    pub fn clear_placeholder(mut self) -> Self {
        self.placeholder = Some(None);
        self
    }

    #[must_use]
    pub const fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    #[must_use]
    pub fn options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = Some(options.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn validation(mut self, validation: Validation) -> Self {
        self.validation = Some(Some(validation));
        self
    }

    #[must_use]
    pub fn clear_validation(mut self) -> Self {
        self.validation = Some(None);
        self
    }

    /// True when the update would not touch anything.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.label.is_none()
            && self.placeholder.is_none()
            && self.required.is_none()
            && self.options.is_none()
            && self.validation.is_none()
    }
}

/// A single edit to a select/radio options list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum OptionEdit {
    /// Append trimmed text; blank text is rejected
    Append { value: String },
    /// Remove the option at `index`
    Remove { index: usize },
    /// Replace the option at `index` verbatim
    Replace { index: usize, value: String },
}
