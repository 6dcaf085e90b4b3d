//! Drag-to-reorder gesture resolution.
//!
//! The list renderer reports gestures by field id. Ids are turned into
//! indices against the collection as it is when the gesture ends, right
//! before `reorder_fields` runs, since indices captured at drag start may be
//! stale by then.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use serde::Serialize;

use super::field::Field;
use super::identifiers::FieldId;
use super::store::{FormDefinitionStore, StoreError};

/// How a finished gesture was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DragOutcome {
    /// `reorder_fields(from, to)` was applied
    Moved { from: usize, to: usize },
    /// Nothing changed: no target, dropped on itself, or stale ids
    Cancelled,
}

/// Tracks the field being dragged between gesture start and end.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragSession {
    active: Option<FieldId>,
}

impl DragSession {
    #[must_use]
    pub const fn new() -> Self {
        Self { active: None }
    }

    /// A drag started on `id`.
    pub fn start(&mut self, id: FieldId) {
        self.active = Some(id);
    }

    #[must_use]
    pub const fn active_id(&self) -> Option<&FieldId> {
        self.active.as_ref()
    }

    /// The field to draw in the drag overlay.
    #[must_use]
    pub fn active_field<'a>(&self, store: &'a FormDefinitionStore) -> Option<&'a Field> {
        self.active.as_ref().and_then(|id| store.field(id))
    }

    /// Abandon the gesture.
    pub fn cancel(&mut self) {
        self.active = None;
    }

    /// Finish the gesture over `over` (or over nothing).
    ///
    /// The session is reset whatever the outcome.
    ///
    /// # Errors
    ///
    /// Propagates `StoreError` from `reorder_fields`; indices are resolved
    /// from the live collection, so this only happens if the store breaks
    /// its own invariants.
    pub fn finish(
        &mut self,
        store: &mut FormDefinitionStore,
        over: Option<&FieldId>,
    ) -> Result<DragOutcome, StoreError> {
        let Some(active) = self.active.take() else {
            return Ok(DragOutcome::Cancelled);
        };
        let Some(over) = over.filter(|over| **over != active) else {
            return Ok(DragOutcome::Cancelled);
        };

        let (Some(from), Some(to)) = (store.index_of(&active), store.index_of(over)) else {
            tracing::debug!(active = %active, over = %over, "drag over stale field ignored");
            return Ok(DragOutcome::Cancelled);
        };

        store.reorder_fields(from, to)?;
        Ok(DragOutcome::Moved { from, to })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::field::{FieldKind, FieldSpec};

    fn store_with(names: &[&str]) -> (FormDefinitionStore, Vec<FieldId>) {
        let mut store = FormDefinitionStore::new();
        let ids = names
            .iter()
            .filter_map(|n| store.add_field(FieldSpec::new(FieldKind::Text, *n)).ok())
            .collect();
        (store, ids)
    }

    fn labels(store: &FormDefinitionStore) -> Vec<&str> {
        store.fields().iter().map(Field::label).collect()
    }

    #[test]
    fn drop_on_other_field_moves() {
        let (mut store, ids) = store_with(&["A", "B", "C"]);
        let mut drag = DragSession::new();
        drag.start(ids[0].clone());
        assert_eq!(
            drag.active_field(&store).map(Field::label),
            Some("A")
        );

        let outcome = drag.finish(&mut store, Some(&ids[2]));
        assert_eq!(outcome, Ok(DragOutcome::Moved { from: 0, to: 2 }));
        assert_eq!(labels(&store), vec!["B", "C", "A"]);
        assert_eq!(drag.active_id(), None);
    }

    #[test]
    fn drop_on_nothing_or_self_cancels() {
        let (mut store, ids) = store_with(&["A", "B"]);
        let mut drag = DragSession::new();

        drag.start(ids[0].clone());
        assert_eq!(drag.finish(&mut store, None), Ok(DragOutcome::Cancelled));

        drag.start(ids[0].clone());
        assert_eq!(
            drag.finish(&mut store, Some(&ids[0])),
            Ok(DragOutcome::Cancelled)
        );
        assert_eq!(labels(&store), vec!["A", "B"]);
    }

    #[test]
    fn indices_resolve_at_drop_time() {
        let (mut store, ids) = store_with(&["A", "B", "C", "D"]);
        let mut drag = DragSession::new();
        drag.start(ids[3].clone());

        // The collection shifts while the drag is in flight.
        store.delete_field(&ids[0]);

        let outcome = drag.finish(&mut store, Some(&ids[1]));
        assert_eq!(outcome, Ok(DragOutcome::Moved { from: 2, to: 0 }));
        assert_eq!(labels(&store), vec!["D", "B", "C"]);
    }

    #[test]
    fn stale_ids_cancel() {
        let (mut store, ids) = store_with(&["A", "B"]);
        let mut drag = DragSession::new();
        drag.start(ids[0].clone());
        store.delete_field(&ids[0]);
        assert_eq!(
            drag.finish(&mut store, Some(&ids[1])),
            Ok(DragOutcome::Cancelled)
        );
    }

    #[test]
    fn finish_without_start_cancels() {
        let (mut store, ids) = store_with(&["A", "B"]);
        let mut drag = DragSession::new();
        assert_eq!(
            drag.finish(&mut store, Some(&ids[0])),
            Ok(DragOutcome::Cancelled)
        );
    }
}
