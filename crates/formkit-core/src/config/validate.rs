//! Configuration validation
//!
//! Raw config keeps palette keys as strings so an unknown kind surfaces as
//! a readable validation error rather than a TOML type error.

use std::str::FromStr;

use itertools::Itertools;
use strum::IntoEnumIterator;

use super::types::{Config, PaletteOverride};
use crate::domain::field::FieldKind;
use crate::domain::identifiers::{validate_prefix, FieldIdGenerator};
use crate::{Error, Result};

// ═══════════════════════════════════════════════════════════════════════════
// VALIDATION LOGIC
// ═══════════════════════════════════════════════════════════════════════════

impl Config {
    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` if the id prefix is not a valid id
    /// fragment or a palette override does not fit its kind.
    pub fn validate(&self) -> Result<()> {
        validate_prefix(&self.ids.prefix)
            .map_err(|e| Error::invalid_config(format!("ids.prefix: {e}")))?;
        self.palette_overrides().map(|_| ())
    }

    /// Palette overrides keyed by parsed kind.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` for an unknown kind name, options on a
    /// kind without options, or a blank option.
    pub fn palette_overrides(&self) -> Result<Vec<(FieldKind, &PaletteOverride)>> {
        self.palette
            .iter()
            .map(|(name, patch)| -> Result<_> {
                let kind = FieldKind::from_str(name).map_err(|_| {
                    Error::invalid_config(format!(
                        "palette.{name}: unknown field kind (expected one of {})",
                        FieldKind::iter().join(", ")
                    ))
                })?;
                check_override(kind, patch)
                    .map_err(|reason| Error::invalid_config(format!("palette.{name}: {reason}")))?;
                Ok((kind, patch))
            })
            .collect()
    }

    /// An id generator using the configured prefix.
    ///
    /// # Errors
    ///
    /// Returns `Error::Identifier` if the prefix is invalid.
    pub fn id_generator(&self) -> Result<FieldIdGenerator> {
        Ok(FieldIdGenerator::new(self.ids.prefix.clone())?)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// HELPER FUNCTIONS
// ═══════════════════════════════════════════════════════════════════════════

fn check_override(kind: FieldKind, patch: &PaletteOverride) -> std::result::Result<(), String> {
    if let Some(label) = &patch.label {
        if label.trim().is_empty() {
            return Err("label cannot be empty".to_string());
        }
    }
    if let Some(options) = &patch.options {
        if !kind.has_options() {
            return Err(format!("{kind} fields do not take options"));
        }
        if options.iter().any(|o| o.trim().is_empty()) {
            return Err("options cannot be blank".to_string());
        }
    }
    if patch.placeholder.is_some() && !kind.supports_placeholder() {
        return Err(format!("{kind} fields do not take a placeholder"));
    }
    Ok(())
}
