//! Configuration merging logic (Immutable functional pattern)
//!
//! Later configs override earlier ones (defaults → global → project → env).

use super::types::{Config, IdConfig, PaletteOverride};

// ═══════════════════════════════════════════════════════════════════════════
// MERGE IMPLEMENTATIONS (Immutable pattern)
// ═══════════════════════════════════════════════════════════════════════════

impl Config {
    /// Merge another config into this one (other takes precedence) - immutable pattern
    ///
    /// Palette overrides merge per kind and per member: a project file that
    /// only sets `[palette.select] required = true` keeps a label set
    /// globally for `select`.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        let palette = other
            .palette
            .into_iter()
            .fold(self.palette, |mut acc, (kind, patch)| {
                let merged = acc.remove(&kind).unwrap_or_default().merge(patch);
                acc.insert(kind, merged);
                acc
            });

        Self {
            ids: self.ids.merge(other.ids),
            palette,
        }
    }
}

impl IdConfig {
    fn merge(self, other: Self) -> Self {
        if other == Self::default() {
            self
        } else {
            other
        }
    }
}

impl PaletteOverride {
    fn merge(self, other: Self) -> Self {
        Self {
            label: other.label.or(self.label),
            placeholder: other.placeholder.or(self.placeholder),
            required: other.required.or(self.required),
            options: other.options.or(self.options),
        }
    }
}
