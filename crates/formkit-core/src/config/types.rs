//! Configuration type definitions
//!
//! Pure data holders; behavior lives in `load`, `merge` and `validate`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::identifiers::FieldIdGenerator;

// ═══════════════════════════════════════════════════════════════════════════
// MAIN CONFIGURATION
// ═══════════════════════════════════════════════════════════════════════════

/// Root configuration structure
///
/// Loaded from defaults → global → project → env vars
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub ids: IdConfig,
    /// Keyed by lowercase kind name (`text`, `select`, ...)
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub palette: BTreeMap<String, PaletteOverride>,
}

// ═══════════════════════════════════════════════════════════════════════════
// NESTED CONFIGURATION STRUCTURES
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct IdConfig {
    /// First segment of every minted field id
    pub prefix: String,
}

impl Default for IdConfig {
    fn default() -> Self {
        Self {
            prefix: FieldIdGenerator::DEFAULT_PREFIX.to_string(),
        }
    }
}

/// Per-kind palette defaults; unset members keep the built-in value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct PaletteOverride {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}
