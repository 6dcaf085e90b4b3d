//! Form-definition aggregate root.
//!
//! The store owns the ordered field collection, the selected field id and
//! the edit/preview mode flag. It is the single source of truth every
//! renderer reads, and the only place fields are mutated.
//!
//! # Invariants
//!
//! 1. Field ids are unique within the collection (ids come from a
//!    per-store generator that is never reset)
//! 2. Collection order only changes through `reorder_fields` and the
//!    removals of `delete_field` / `clear_form`
//! 3. `selected_field_id` never outlives a deleted field
//! 4. Every field satisfies the shape rules of [`crate::domain::field`]
//!
//! # Policies
//!
//! - Unknown ids passed to `update_field`, `edit_options` or `delete_field`
//!   are absorbed as no-ops.
//! - Out-of-range indices passed to `reorder_fields` are rejected with
//!   [`StoreError::IndexOutOfRange`] and the collection is left untouched.
//! - Malformed specs and updates are rejected with [`StoreError::Field`].
//! - At most [`EVENT_LOG_CAPACITY`] undrained events are kept; the oldest
//!   are dropped first.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use std::collections::VecDeque;

use im::Vector;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::events::{FormEvent, RecordedEvent};
use super::field::{Field, FieldError, FieldSpec, FieldUpdate, OptionEdit};
use super::identifiers::{FieldId, FieldIdGenerator};

// ============================================================================
// DOMAIN ERRORS
// ============================================================================

/// Errors that can occur during store operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The spec or update violates the field shape rules
    #[error("field rejected: {0}")]
    Field(#[from] FieldError),

    /// A reorder index does not address an existing field
    #[error("index {index} out of range for {len} fields")]
    IndexOutOfRange { index: usize, len: usize },
}

// ============================================================================
// EDITOR MODE
// ============================================================================

/// Builder canvas mode. Only `toggle_preview_mode` moves between the two.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditorMode {
    #[default]
    Edit,
    Preview,
}

impl EditorMode {
    /// The other mode.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Edit => Self::Preview,
            Self::Preview => Self::Edit,
        }
    }

    #[must_use]
    pub const fn is_preview(self) -> bool {
        matches!(self, Self::Preview)
    }
}

impl std::fmt::Display for EditorMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Edit => write!(f, "edit"),
            Self::Preview => write!(f, "preview"),
        }
    }
}

// ============================================================================
// SNAPSHOT
// ============================================================================

/// Read-only view of the store handed to renderers.
///
/// The field list shares structure with the store, so taking a snapshot is
/// cheap and later mutations do not show through it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormSnapshot {
    pub revision: u64,
    pub fields: Vector<Field>,
    pub selected_field_id: Option<FieldId>,
    pub mode: EditorMode,
}

// ============================================================================
// FORM DEFINITION STORE
// ============================================================================

/// Undrained events kept before the oldest are discarded.
pub const EVENT_LOG_CAPACITY: usize = 1024;

/// Form-definition aggregate root.
#[derive(Debug, Clone, Default)]
pub struct FormDefinitionStore {
    fields: Vector<Field>,
    selected_field_id: Option<FieldId>,
    mode: EditorMode,
    ids: FieldIdGenerator,
    revision: u64,
    events: VecDeque<RecordedEvent>,
}

impl FormDefinitionStore {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Empty form, nothing selected, edit mode.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty form minting ids with the given generator.
    #[must_use]
    pub fn with_id_generator(ids: FieldIdGenerator) -> Self {
        Self {
            ids,
            ..Self::default()
        }
    }

    // ========================================================================
    // QUERY METHODS
    // ========================================================================

    /// Fields in display order.
    #[must_use]
    pub const fn fields(&self) -> &Vector<Field> {
        &self.fields
    }

    #[must_use]
    pub fn field(&self, id: &FieldId) -> Option<&Field> {
        self.fields.iter().find(|f| f.id() == id)
    }

    /// Current position of a field, for resolving drag targets.
    #[must_use]
    pub fn index_of(&self, id: &FieldId) -> Option<usize> {
        self.fields.iter().position(|f| f.id() == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    #[must_use]
    pub const fn selected_field_id(&self) -> Option<&FieldId> {
        self.selected_field_id.as_ref()
    }

    /// The selected field, if the selection points at an existing one.
    #[must_use]
    pub fn selected_field(&self) -> Option<&Field> {
        self.selected_field_id
            .as_ref()
            .and_then(|id| self.field(id))
    }

    #[must_use]
    pub const fn mode(&self) -> EditorMode {
        self.mode
    }

    #[must_use]
    pub const fn preview_mode(&self) -> bool {
        self.mode.is_preview()
    }

    /// Incremented once per effective mutation.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// "1 field" / "N fields".
    #[must_use]
    pub fn field_count_label(&self) -> String {
        match self.fields.len() {
            1 => "1 field".to_string(),
            n => format!("{n} fields"),
        }
    }

    /// Clearing is offered only with something to clear, and only while
    /// editing.
    #[must_use]
    pub fn can_clear(&self) -> bool {
        !self.fields.is_empty() && !self.preview_mode()
    }

    #[must_use]
    pub fn snapshot(&self) -> FormSnapshot {
        FormSnapshot {
            revision: self.revision,
            fields: self.fields.clone(),
            selected_field_id: self.selected_field_id.clone(),
            mode: self.mode,
        }
    }

    /// Take the events recorded since the last drain, oldest first.
    ///
    /// Only the latest [`EVENT_LOG_CAPACITY`] are returned; revisions tell a
    /// caller whether any were dropped.
    pub fn drain_events(&mut self) -> Vec<RecordedEvent> {
        self.events.drain(..).collect()
    }

    // ========================================================================
    // MUTATIONS
    // ========================================================================

    /// Append a new field built from `spec` and select it.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Field` if the spec violates the shape rules. No
    /// id is consumed in that case.
    pub fn add_field(&mut self, spec: FieldSpec) -> Result<FieldId, StoreError> {
        let kind = spec.kind;
        let mut probe = self.ids.clone();
        let field = spec.into_field(probe.next_id()).map_err(|e| {
            tracing::warn!(%kind, error = %e, "rejected field spec");
            StoreError::from(e)
        })?;
        self.ids = probe;

        let id = field.id().clone();
        self.fields.push_back(field);
        self.selected_field_id = Some(id.clone());

        tracing::debug!(field_id = %id, %kind, "field added");
        self.record(FormEvent::FieldAdded {
            field_id: id.clone(),
            kind,
        });
        Ok(id)
    }

    /// Merge `update` into the field with `id`.
    ///
    /// Unknown ids and empty updates are no-ops. Order and selection are
    /// never affected.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Field` if the update violates the shape rules;
    /// the field is left unchanged.
    pub fn update_field(&mut self, id: &FieldId, update: FieldUpdate) -> Result<(), StoreError> {
        if update.is_empty() {
            return Ok(());
        }
        let Some(field) = self.field_mut(id) else {
            tracing::debug!(field_id = %id, "update for unknown field ignored");
            return Ok(());
        };

        field.apply(update).map_err(|e| {
            tracing::warn!(field_id = %id, error = %e, "rejected field update");
            StoreError::from(e)
        })?;

        tracing::debug!(field_id = %id, "field updated");
        self.record(FormEvent::FieldUpdated {
            field_id: id.clone(),
        });
        Ok(())
    }

    /// Append, remove or replace one option of a select/radio field.
    ///
    /// Unknown ids are no-ops.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Field` for blank appends, bad indices, or fields
    /// without options.
    pub fn edit_options(&mut self, id: &FieldId, edit: OptionEdit) -> Result<(), StoreError> {
        let Some(field) = self.field_mut(id) else {
            tracing::debug!(field_id = %id, "option edit for unknown field ignored");
            return Ok(());
        };

        field.edit_options(edit).map_err(|e| {
            tracing::warn!(field_id = %id, error = %e, "rejected option edit");
            StoreError::from(e)
        })?;

        self.record(FormEvent::OptionsEdited {
            field_id: id.clone(),
        });
        Ok(())
    }

    /// Remove the field with `id`, clearing the selection if it pointed
    /// there. Returns the removed field; unknown ids return `None`.
    pub fn delete_field(&mut self, id: &FieldId) -> Option<Field> {
        let Some(index) = self.index_of(id) else {
            tracing::debug!(field_id = %id, "delete for unknown field ignored");
            return None;
        };

        let removed = self.fields.remove(index);
        if self.selected_field_id.as_ref() == Some(id) {
            self.selected_field_id = None;
        }

        tracing::debug!(field_id = %id, index, "field deleted");
        self.record(FormEvent::FieldDeleted {
            field_id: id.clone(),
            index,
        });
        Some(removed)
    }

    /// Move the field at `from` so that it ends up at `to`.
    ///
    /// Move semantics, not swap: `[A,B,C,D]` with `(0, 2)` becomes
    /// `[B,C,A,D]`. Both indices must address the collection as it is at
    /// call time.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::IndexOutOfRange` if either index is `>= len()`.
    pub fn reorder_fields(&mut self, from: usize, to: usize) -> Result<(), StoreError> {
        let len = self.fields.len();
        if let Some(index) = [from, to].into_iter().find(|&i| i >= len) {
            tracing::warn!(from, to, len, "rejected out-of-range reorder");
            return Err(StoreError::IndexOutOfRange { index, len });
        }
        if from == to {
            return Ok(());
        }

        let moved = self.fields.remove(from);
        self.fields.insert(to, moved);

        tracing::debug!(from, to, "fields reordered");
        self.record(FormEvent::FieldsReordered { from, to });
        Ok(())
    }

    /// Set the selection. Existence is not checked.
    pub fn select_field(&mut self, id: Option<FieldId>) {
        if self.selected_field_id == id {
            return;
        }
        self.selected_field_id = id.clone();
        self.record(FormEvent::SelectionChanged { field_id: id });
    }

    /// Flip between edit and preview. Fields and selection are untouched.
    pub fn toggle_preview_mode(&mut self) -> EditorMode {
        self.mode = self.mode.toggled();
        tracing::debug!(mode = %self.mode, "mode toggled");
        self.record(FormEvent::ModeToggled { mode: self.mode });
        self.mode
    }

    /// Remove every field and clear the selection. Mode is kept.
    /// Returns how many fields were removed.
    pub fn clear_form(&mut self) -> usize {
        let removed = self.fields.len();
        if removed == 0 && self.selected_field_id.is_none() {
            return 0;
        }

        self.fields.clear();
        self.selected_field_id = None;

        tracing::debug!(removed, "form cleared");
        self.record(FormEvent::FormCleared { removed });
        removed
    }

    // ========================================================================
    // INTERNALS
    // ========================================================================

    fn field_mut(&mut self, id: &FieldId) -> Option<&mut Field> {
        let index = self.index_of(id)?;
        self.fields.get_mut(index)
    }

    fn record(&mut self, event: FormEvent) {
        self.revision += 1;
        if self.events.len() == EVENT_LOG_CAPACITY {
            self.events.pop_front();
        }
        self.events.push_back(RecordedEvent::new(self.revision, event));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::field::{FieldKind, Validation};

    fn labels(store: &FormDefinitionStore) -> Vec<&str> {
        store.fields().iter().map(Field::label).collect()
    }

    fn store_with(names: &[&str]) -> (FormDefinitionStore, Vec<FieldId>) {
        let mut store = FormDefinitionStore::new();
        let ids = names
            .iter()
            .filter_map(|n| store.add_field(FieldSpec::new(FieldKind::Text, *n)).ok())
            .collect();
        (store, ids)
    }

    #[test]
    fn starts_empty_in_edit_mode() {
        let store = FormDefinitionStore::new();
        assert!(store.is_empty());
        assert_eq!(store.selected_field_id(), None);
        assert!(!store.preview_mode());
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn add_appends_and_selects() {
        let (store, ids) = store_with(&["A", "B"]);
        assert_eq!(labels(&store), vec!["A", "B"]);
        assert_eq!(store.selected_field_id(), ids.get(1));
    }

    #[test]
    fn rejected_add_leaves_store_untouched() {
        let (mut store, ids) = store_with(&["A"]);
        let result = store.add_field(FieldSpec::new(FieldKind::Email, "E").with_options(["x"]));
        assert!(matches!(result, Err(StoreError::Field(_))));
        assert_eq!(store.len(), 1);
        assert_eq!(store.selected_field_id(), ids.first());
        assert_eq!(store.revision(), 1);
    }

    #[test]
    fn reorder_moves_forward() {
        let (mut store, _) = store_with(&["A", "B", "C", "D"]);
        assert!(store.reorder_fields(0, 2).is_ok());
        assert_eq!(labels(&store), vec!["B", "C", "A", "D"]);
    }

    #[test]
    fn reorder_moves_backward() {
        let (mut store, _) = store_with(&["A", "B", "C", "D"]);
        assert!(store.reorder_fields(3, 0).is_ok());
        assert_eq!(labels(&store), vec!["D", "A", "B", "C"]);
    }

    #[test]
    fn reorder_out_of_range_is_rejected() {
        let (mut store, _) = store_with(&["A", "B"]);
        let revision = store.revision();
        assert_eq!(
            store.reorder_fields(0, 2),
            Err(StoreError::IndexOutOfRange { index: 2, len: 2 })
        );
        assert_eq!(
            store.reorder_fields(5, 0),
            Err(StoreError::IndexOutOfRange { index: 5, len: 2 })
        );
        assert_eq!(labels(&store), vec!["A", "B"]);
        assert_eq!(store.revision(), revision);
    }

    #[test]
    fn reorder_on_empty_store_is_rejected() {
        let mut store = FormDefinitionStore::new();
        assert_eq!(
            store.reorder_fields(0, 0),
            Err(StoreError::IndexOutOfRange { index: 0, len: 0 })
        );
    }

    #[test]
    fn reorder_same_index_is_noop() {
        let (mut store, _) = store_with(&["A", "B"]);
        let revision = store.revision();
        assert!(store.reorder_fields(1, 1).is_ok());
        assert_eq!(store.revision(), revision);
    }

    #[test]
    fn delete_selected_clears_selection() {
        let (mut store, ids) = store_with(&["A", "B"]);
        let selected = ids[1].clone();
        assert!(store.delete_field(&selected).is_some());
        assert_eq!(store.selected_field_id(), None);
        assert_eq!(labels(&store), vec!["A"]);
    }

    #[test]
    fn delete_other_keeps_selection() {
        let (mut store, ids) = store_with(&["A", "B", "C"]);
        assert!(store.delete_field(&ids[0]).is_some());
        assert_eq!(store.selected_field_id(), Some(&ids[2]));
        assert_eq!(labels(&store), vec!["B", "C"]);
    }

    #[test]
    fn delete_unknown_is_noop() {
        let (mut store, _) = store_with(&["A"]);
        let revision = store.revision();
        let ghost = FieldId::parse("ghost").unwrap_or_else(|e| panic!("{e}"));
        assert!(store.delete_field(&ghost).is_none());
        assert_eq!(store.len(), 1);
        assert_eq!(store.revision(), revision);
    }

    #[test]
    fn update_unknown_is_noop() {
        let (mut store, _) = store_with(&["A"]);
        let ghost = FieldId::parse("ghost").unwrap_or_else(|e| panic!("{e}"));
        assert!(store
            .update_field(&ghost, FieldUpdate::new().label("X"))
            .is_ok());
        assert_eq!(labels(&store), vec!["A"]);
    }

    #[test]
    fn update_keeps_order_and_selection() {
        let (mut store, ids) = store_with(&["A", "B", "C"]);
        assert!(store
            .update_field(&ids[0], FieldUpdate::new().label("AA").required(true))
            .is_ok());
        assert_eq!(labels(&store), vec!["AA", "B", "C"]);
        assert_eq!(store.selected_field_id(), Some(&ids[2]));
        assert!(store.field(&ids[0]).is_some_and(Field::is_required));
    }

    #[test]
    fn rejected_update_keeps_revision() {
        let (mut store, ids) = store_with(&["A"]);
        let revision = store.revision();
        let result = store.update_field(
            &ids[0],
            FieldUpdate::new().validation(Validation::default().with_pattern("[")),
        );
        assert!(result.is_err());
        assert_eq!(store.revision(), revision);
    }

    #[test]
    fn select_accepts_unknown_ids() {
        let (mut store, _) = store_with(&["A"]);
        let ghost = FieldId::parse("ghost").unwrap_or_else(|e| panic!("{e}"));
        store.select_field(Some(ghost.clone()));
        assert_eq!(store.selected_field_id(), Some(&ghost));
        assert!(store.selected_field().is_none());
        store.select_field(None);
        assert_eq!(store.selected_field_id(), None);
    }

    #[test]
    fn preview_toggle_keeps_fields_and_selection() {
        let (mut store, ids) = store_with(&["A", "B"]);
        assert_eq!(store.toggle_preview_mode(), EditorMode::Preview);
        assert_eq!(store.selected_field_id(), Some(&ids[1]));
        assert!(!store.can_clear());
        assert_eq!(store.toggle_preview_mode(), EditorMode::Edit);
        assert_eq!(labels(&store), vec!["A", "B"]);
    }

    #[test]
    fn clear_is_idempotent_and_keeps_mode() {
        let (mut store, _) = store_with(&["A", "B"]);
        store.toggle_preview_mode();
        assert_eq!(store.clear_form(), 2);
        assert_eq!(store.clear_form(), 0);
        assert!(store.is_empty());
        assert_eq!(store.selected_field_id(), None);
        assert!(store.preview_mode());
    }

    #[test]
    fn ids_stay_unique_across_clear() {
        let (mut store, first) = store_with(&["A"]);
        store.clear_form();
        let second = store
            .add_field(FieldSpec::new(FieldKind::Text, "A"))
            .unwrap_or_else(|e| panic!("{e}"));
        assert_ne!(first[0], second);
    }

    #[test]
    fn field_count_label_pluralizes() {
        let (mut store, ids) = store_with(&["A", "B"]);
        assert_eq!(store.field_count_label(), "2 fields");
        store.delete_field(&ids[0]);
        assert_eq!(store.field_count_label(), "1 field");
        store.clear_form();
        assert_eq!(store.field_count_label(), "0 fields");
    }

    #[test]
    fn snapshot_is_isolated_from_later_mutations() {
        let (mut store, _) = store_with(&["A"]);
        let snapshot = store.snapshot();
        store.clear_form();
        assert_eq!(snapshot.fields.len(), 1);
        assert_eq!(snapshot.revision, 1);
    }

    #[test]
    fn events_follow_mutations() {
        let (mut store, ids) = store_with(&["A", "B"]);
        store.drain_events();

        assert!(store.reorder_fields(0, 1).is_ok());
        store.delete_field(&ids[0]);
        store.toggle_preview_mode();

        let kinds: Vec<&str> = store
            .drain_events()
            .iter()
            .map(|e| e.event.event_type())
            .collect();
        assert_eq!(
            kinds,
            vec!["fields_reordered", "field_deleted", "mode_toggled"]
        );
        assert!(store.drain_events().is_empty());
    }

    #[test]
    fn undrained_events_stay_bounded() {
        let mut store = FormDefinitionStore::new();
        let total = EVENT_LOG_CAPACITY + 10;
        for _ in 0..total {
            store.toggle_preview_mode();
        }

        let last = u64::try_from(total).unwrap_or_else(|e| panic!("{e}"));
        let events = store.drain_events();
        assert_eq!(events.len(), EVENT_LOG_CAPACITY);
        assert_eq!(events.first().map(|e| e.revision), Some(11));
        assert_eq!(events.last().map(|e| e.revision), Some(last));
        assert_eq!(store.snapshot().revision, last);
    }
}
