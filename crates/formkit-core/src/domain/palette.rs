//! Component palette: the default configuration each kind starts with.
//!
//! Palette buttons never construct fields themselves. They ask the palette
//! for a [`FieldSpec`] and hand it to `FormDefinitionStore::add_field`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

use std::collections::BTreeMap;

use serde::Serialize;
use strum::IntoEnumIterator;

use super::field::{FieldKind, FieldSpec};
use crate::config::{Config, PaletteOverride};
use crate::Result;

const DEFAULT_OPTIONS: [&str; 3] = ["Option 1", "Option 2", "Option 3"];

/// Starting attributes for a newly added field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDefaults {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

impl FieldDefaults {
    fn standard(kind: FieldKind) -> Self {
        let (label, placeholder) = match kind {
            FieldKind::Text => ("Text Input Field", Some("Enter text...")),
            FieldKind::Textarea => ("Text Area Field", Some("Enter your message...")),
            FieldKind::Select => ("Select Field", Some("Select an option")),
            FieldKind::Checkbox => ("Checkbox Field", None),
            FieldKind::Radio => ("Radio Group Field", None),
            FieldKind::Number => ("Number Field", Some("Enter a number")),
            FieldKind::Email => ("Email Field", Some("Enter your email")),
        };

        Self {
            label: label.to_string(),
            placeholder: placeholder.map(String::from),
            required: false,
            options: kind
                .has_options()
                .then(|| DEFAULT_OPTIONS.iter().map(|o| (*o).to_string()).collect()),
        }
    }

    // Callers have already checked the override's options against the kind.
    fn overridden(mut self, patch: &PaletteOverride) -> Self {
        if let Some(label) = &patch.label {
            self.label.clone_from(label);
        }
        if let Some(placeholder) = &patch.placeholder {
            self.placeholder = Some(placeholder.clone());
        }
        if let Some(required) = patch.required {
            self.required = required;
        }
        if let Some(options) = &patch.options {
            self.options = Some(options.clone());
        }
        self
    }
}

/// One palette button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaletteEntry<'a> {
    pub kind: FieldKind,
    pub title: &'static str,
    pub description: &'static str,
    pub defaults: &'a FieldDefaults,
}

/// Kind → default configuration mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    defaults: BTreeMap<FieldKind, FieldDefaults>,
}

impl Palette {
    /// The built-in defaults.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            defaults: FieldKind::iter()
                .map(|kind| (kind, FieldDefaults::standard(kind)))
                .collect(),
        }
    }

    /// Built-in defaults with the config's `[palette.<kind>]` overrides.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` if an override names an unknown kind
    /// or gives options to a kind without them.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut palette = Self::standard();
        for (kind, patch) in config.palette_overrides()? {
            let defaults = palette.defaults_for(kind).overridden(patch);
            palette.defaults.insert(kind, defaults);
        }
        Ok(palette)
    }

    /// Defaults for `kind`.
    #[must_use]
    pub fn defaults_for(&self, kind: FieldKind) -> FieldDefaults {
        self.defaults
            .get(&kind)
            .cloned()
            .unwrap_or_else(|| FieldDefaults::standard(kind))
    }

    /// A ready-to-add spec for `kind`.
    #[must_use]
    pub fn spec_for(&self, kind: FieldKind) -> FieldSpec {
        let defaults = self.defaults_for(kind);
        FieldSpec {
            kind,
            label: defaults.label,
            placeholder: defaults.placeholder,
            required: defaults.required,
            options: defaults.options,
            validation: None,
        }
    }

    /// Palette buttons in kind order.
    pub fn entries(&self) -> impl Iterator<Item = PaletteEntry<'_>> {
        self.defaults.iter().map(|(kind, defaults)| PaletteEntry {
            kind: *kind,
            title: kind.display_name(),
            description: kind.description(),
            defaults,
        })
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::standard()
    }
}
