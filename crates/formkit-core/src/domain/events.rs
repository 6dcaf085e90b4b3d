//! Domain events recorded by the form-definition store
//!
//! Each effective mutation appends one event. Observers drain the buffer
//! after dispatching an operation to learn what changed without diffing the
//! field list. Operations that turn out to be no-ops record nothing.
//!
//! # Usage
//!
//! ```rust
//! use formkit_core::{FieldKind, FieldSpec, FormDefinitionStore, FormEvent};
//!
//! let mut store = FormDefinitionStore::new();
//! store.add_field(FieldSpec::new(FieldKind::Text, "Name"))?;
//!
//! let events = store.drain_events();
//! assert!(matches!(events[0].event, FormEvent::FieldAdded { .. }));
//! # Ok::<(), formkit_core::StoreError>(())
//! ```

#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::field::FieldKind;
use super::identifiers::FieldId;
use super::store::EditorMode;

// ============================================================================
// Form Event Enum
// ============================================================================

/// Something that changed in the form definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event_type", content = "data", rename_all = "snake_case")]
pub enum FormEvent {
    /// A field was appended and selected
    FieldAdded { field_id: FieldId, kind: FieldKind },

    /// Attributes of a field were merged
    FieldUpdated { field_id: FieldId },

    /// A select/radio options list was edited
    OptionsEdited { field_id: FieldId },

    /// A field was removed from `index`
    FieldDeleted { field_id: FieldId, index: usize },

    /// A field moved from one position to another
    FieldsReordered { from: usize, to: usize },

    /// The selection changed
    SelectionChanged { field_id: Option<FieldId> },

    /// Edit/preview mode flipped
    ModeToggled { mode: EditorMode },

    /// Every field was removed
    FormCleared { removed: usize },
}

impl FormEvent {
    /// Get the event type as a string
    #[must_use]
    pub const fn event_type(&self) -> &'static str {
        match self {
            Self::FieldAdded { .. } => "field_added",
            Self::FieldUpdated { .. } => "field_updated",
            Self::OptionsEdited { .. } => "options_edited",
            Self::FieldDeleted { .. } => "field_deleted",
            Self::FieldsReordered { .. } => "fields_reordered",
            Self::SelectionChanged { .. } => "selection_changed",
            Self::ModeToggled { .. } => "mode_toggled",
            Self::FormCleared { .. } => "form_cleared",
        }
    }

    /// Whether the event changed the field collection itself, as opposed to
    /// selection or mode.
    #[must_use]
    pub const fn touches_fields(&self) -> bool {
        !matches!(
            self,
            Self::SelectionChanged { .. } | Self::ModeToggled { .. }
        )
    }
}

/// An event stamped with the store revision it produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedEvent {
    /// Store revision after the mutation
    pub revision: u64,
    /// When the mutation happened
    pub at: DateTime<Utc>,
    /// What happened
    pub event: FormEvent,
}

impl RecordedEvent {
    #[must_use]
    pub fn new(revision: u64, event: FormEvent) -> Self {
        Self {
            revision,
            at: Utc::now(),
            event,
        }
    }
}
