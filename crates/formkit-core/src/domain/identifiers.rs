//! Semantic newtypes for field identifiers
//!
//! # Parse-at-Boundaries Pattern
//!
//! `FieldId` validates its input on construction, cannot represent an invalid
//! identifier, and re-validates when deserialized. Ids minted inside the
//! store come from [`FieldIdGenerator`], which combines a wall-clock stamp
//! with an in-process counter so that two fields added within the same
//! millisecond still receive distinct ids.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// IDENTIFIER ERROR
// ============================================================================

/// Error type for identifier validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdentifierError {
    /// Identifier is empty or contains only whitespace
    #[error("identifier cannot be empty")]
    Empty,

    /// Identifier exceeds maximum length
    #[error("identifier too long: {actual} characters (max {max})")]
    TooLong {
        /// The maximum allowed length
        max: usize,
        /// The actual length provided
        actual: usize,
    },

    /// Identifier contains invalid characters
    #[error("identifier contains invalid characters: {details}")]
    InvalidCharacters {
        /// Human-readable explanation of what's invalid
        details: String,
    },
}

impl IdentifierError {
    /// Create a `TooLong` error variant
    #[must_use]
    pub const fn too_long(max: usize, actual: usize) -> Self {
        Self::TooLong { max, actual }
    }

    /// Create an `InvalidCharacters` error variant
    #[must_use]
    pub fn invalid_characters(details: impl Into<String>) -> Self {
        Self::InvalidCharacters {
            details: details.into(),
        }
    }
}

/// Validate an identifier fragment
///
/// Rules:
/// - Must be 1-`max` characters
/// - Can contain ASCII letters, numbers, hyphens, underscores
fn validate_fragment(s: &str, max: usize) -> Result<(), IdentifierError> {
    if s.trim().is_empty() {
        return Err(IdentifierError::Empty);
    }

    if s.len() > max {
        return Err(IdentifierError::too_long(max, s.len()));
    }

    if !s
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(IdentifierError::invalid_characters(format!(
            "'{s}' must contain only letters, numbers, hyphens, or underscores"
        )));
    }

    Ok(())
}

// ============================================================================
// FIELD ID
// ============================================================================

/// Opaque, unique identifier of a field within a form definition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FieldId(String);

impl FieldId {
    /// Maximum length for field ids.
    pub const MAX_LENGTH: usize = 128;

    /// Parse and validate a field id.
    ///
    /// # Errors
    ///
    /// Returns `IdentifierError` if the input is empty, too long or contains
    /// characters outside `[A-Za-z0-9_-]`.
    pub fn parse(s: impl Into<String>) -> Result<Self, IdentifierError> {
        let s = s.into();
        validate_fragment(&s, Self::MAX_LENGTH)?;
        Ok(Self(s))
    }

    /// Get the id as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FieldId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for FieldId {
    type Error = IdentifierError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<FieldId> for String {
    fn from(id: FieldId) -> Self {
        id.0
    }
}

impl std::str::FromStr for FieldId {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// ============================================================================
// FIELD ID GENERATOR
// ============================================================================

/// Mints session-unique field ids of the form `{prefix}-{millis:x}-{seq}`.
///
/// Uniqueness rests on `seq`, which only ever grows. The millisecond stamp
/// keeps ids readable and distinct across sessions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIdGenerator {
    prefix: String,
    seq: u64,
}

impl FieldIdGenerator {
    /// Default id prefix.
    pub const DEFAULT_PREFIX: &'static str = "field";

    /// Longest prefix accepted, leaving room for the stamp and sequence.
    pub const MAX_PREFIX_LENGTH: usize = 64;

    /// Create a generator with a validated prefix.
    ///
    /// # Errors
    ///
    /// Returns `IdentifierError` if the prefix is not a valid id fragment.
    pub fn new(prefix: impl Into<String>) -> Result<Self, IdentifierError> {
        let prefix = prefix.into();
        validate_prefix(&prefix)?;
        Ok(Self { prefix, seq: 0 })
    }

    /// The prefix every minted id starts with.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Number of ids issued so far.
    #[must_use]
    pub const fn issued(&self) -> u64 {
        self.seq
    }

    /// Mint the next id.
    pub fn next_id(&mut self) -> FieldId {
        self.seq = self.seq.saturating_add(1);
        let millis = Utc::now().timestamp_millis().max(0);
        // prefix is validated on construction, and the stamp and sequence
        // only add `[0-9a-f-]`, so the result is always a valid id.
        FieldId(format!("{}-{millis:x}-{}", self.prefix, self.seq))
    }
}

impl Default for FieldIdGenerator {
    fn default() -> Self {
        Self {
            prefix: Self::DEFAULT_PREFIX.to_string(),
            seq: 0,
        }
    }
}

/// Validate a generator prefix.
///
/// # Errors
///
/// Returns `IdentifierError` if the prefix is empty, longer than
/// [`FieldIdGenerator::MAX_PREFIX_LENGTH`] or has invalid characters.
pub fn validate_prefix(prefix: &str) -> Result<(), IdentifierError> {
    validate_fragment(prefix, FieldIdGenerator::MAX_PREFIX_LENGTH)
}
