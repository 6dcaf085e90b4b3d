//! Scripted builder sessions
//!
//! A script is the list of operations a user would perform in the builder,
//! written as JSON:
//!
//! ```json
//! {"operations": [
//!   {"op": "add", "kind": "text", "label": "Name", "required": true},
//!   {"op": "add", "kind": "select", "options": ["Red", "Blue"]},
//!   {"op": "reorder", "from": 0, "to": 1},
//!   {"op": "update", "id": "$1", "changes": {"label": "Favorite Color"}}
//! ]}
//! ```
//!
//! `"$N"` addresses the id issued by the N-th `add` (0-based); anything else
//! is taken as a literal field id.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]

use std::path::Path;

use anyhow::{Context, Result};
use formkit_core::{
    DragOutcome, DragSession, FieldId, FieldKind, FieldSpec, FieldUpdate, FormDefinitionStore,
    OptionEdit, Palette, Validation,
};
use serde::Deserialize;

/// A parsed script
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Script {
    pub operations: Vec<Operation>,
}

/// A field id as written in a script: literal or `$N`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct IdRef(String);

impl IdRef {
    fn resolve(&self, issued: &[FieldId]) -> Result<FieldId> {
        match self.0.strip_prefix('$') {
            Some(index) => {
                let index: usize = index
                    .parse()
                    .with_context(|| format!("Invalid id reference '{}'", self.0))?;
                issued.get(index).cloned().with_context(|| {
                    format!(
                        "Id reference '{}' points past the {} field(s) added so far",
                        self.0,
                        issued.len()
                    )
                })
            }
            None => FieldId::parse(self.0.as_str())
                .with_context(|| format!("Invalid field id '{}'", self.0)),
        }
    }
}

/// One builder operation
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case", deny_unknown_fields)]
pub enum Operation {
    /// Palette defaults for `kind`, with any member given here overriding
    Add {
        kind: FieldKind,
        #[serde(default)]
        label: Option<String>,
        #[serde(default)]
        placeholder: Option<String>,
        #[serde(default)]
        required: Option<bool>,
        #[serde(default)]
        options: Option<Vec<String>>,
        #[serde(default)]
        validation: Option<Validation>,
    },
    Update {
        id: IdRef,
        changes: FieldUpdate,
    },
    EditOptions {
        id: IdRef,
        edit: OptionEdit,
    },
    Delete {
        id: IdRef,
    },
    Reorder {
        from: usize,
        to: usize,
    },
    Select {
        #[serde(default)]
        id: Option<IdRef>,
    },
    TogglePreview,
    Clear,
    /// A full drag gesture: start on `active`, drop on `over`
    Drag {
        active: IdRef,
        #[serde(default)]
        over: Option<IdRef>,
    },
}

impl Operation {
    /// Script name of the operation
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Add { .. } => "add",
            Self::Update { .. } => "update",
            Self::EditOptions { .. } => "edit_options",
            Self::Delete { .. } => "delete",
            Self::Reorder { .. } => "reorder",
            Self::Select { .. } => "select",
            Self::TogglePreview => "toggle_preview",
            Self::Clear => "clear",
            Self::Drag { .. } => "drag",
        }
    }
}

impl Script {
    /// Read and parse a script file
    ///
    /// # Errors
    /// Returns an error if the file is unreadable or not a valid script
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid script {}", path.display()))
    }

    /// Parse a script from JSON text
    ///
    /// # Errors
    /// Returns an error if the JSON does not describe a script
    pub fn parse(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("Failed to parse script JSON")
    }

    /// Apply every operation to `store` in order, stopping at the first
    /// rejected one
    ///
    /// Returns the ids issued by `add`, in order, for resolving `$N` in
    /// later inputs.
    ///
    /// # Errors
    /// Returns an error naming the operation that could not be applied
    pub fn apply(
        &self,
        store: &mut FormDefinitionStore,
        palette: &Palette,
    ) -> Result<Vec<FieldId>> {
        let mut issued = Vec::new();
        for (index, operation) in self.operations.iter().enumerate() {
            apply_one(store, palette, operation, &mut issued)
                .with_context(|| format!("Operation #{index} ({}) failed", operation.name()))?;
        }
        tracing::info!(
            operations = self.operations.len(),
            fields = store.len(),
            "script applied"
        );
        Ok(issued)
    }
}

fn apply_one(
    store: &mut FormDefinitionStore,
    palette: &Palette,
    operation: &Operation,
    issued: &mut Vec<FieldId>,
) -> Result<()> {
    match operation {
        Operation::Add {
            kind,
            label,
            placeholder,
            required,
            options,
            validation,
        } => {
            let spec = add_spec(
                palette.spec_for(*kind),
                label.clone(),
                placeholder.clone(),
                *required,
                options.clone(),
                validation.clone(),
            );
            issued.push(store.add_field(spec)?);
        }
        Operation::Update { id, changes } => {
            store.update_field(&id.resolve(issued)?, changes.clone())?;
        }
        Operation::EditOptions { id, edit } => {
            store.edit_options(&id.resolve(issued)?, edit.clone())?;
        }
        Operation::Delete { id } => {
            store.delete_field(&id.resolve(issued)?);
        }
        Operation::Reorder { from, to } => store.reorder_fields(*from, *to)?,
        Operation::Select { id } => {
            let id = id.as_ref().map(|id| id.resolve(issued)).transpose()?;
            store.select_field(id);
        }
        Operation::TogglePreview => {
            store.toggle_preview_mode();
        }
        Operation::Clear => {
            store.clear_form();
        }
        Operation::Drag { active, over } => {
            let over = over.as_ref().map(|id| id.resolve(issued)).transpose()?;
            let mut drag = DragSession::new();
            drag.start(active.resolve(issued)?);
            if drag.finish(store, over.as_ref())? == DragOutcome::Cancelled {
                tracing::debug!("drag cancelled");
            }
        }
    }
    Ok(())
}

fn add_spec(
    base: FieldSpec,
    label: Option<String>,
    placeholder: Option<String>,
    required: Option<bool>,
    options: Option<Vec<String>>,
    validation: Option<Validation>,
) -> FieldSpec {
    FieldSpec {
        kind: base.kind,
        label: label.unwrap_or(base.label),
        placeholder: placeholder.or(base.placeholder),
        required: required.unwrap_or(base.required),
        options: options.or(base.options),
        validation: validation.or(base.validation),
    }
}

/// Resolve `$N` keys of a submission object against issued ids
///
/// # Errors
/// Returns an error for a `$N` past the issued ids or a malformed id
pub fn resolve_keys(
    object: serde_json::Map<String, serde_json::Value>,
    issued: &[FieldId],
) -> Result<serde_json::Map<String, serde_json::Value>> {
    object
        .into_iter()
        .map(|(key, value)| {
            let id = IdRef(key).resolve(issued)?;
            Ok((id.to_string(), value))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(json: &str) -> Result<(FormDefinitionStore, Vec<FieldId>)> {
        let mut store = FormDefinitionStore::new();
        let issued = Script::parse(json)?.apply(&mut store, &Palette::standard())?;
        Ok((store, issued))
    }

    fn labels(store: &FormDefinitionStore) -> Vec<String> {
        store.fields().iter().map(|f| f.label().to_string()).collect()
    }

    #[test]
    fn add_uses_palette_defaults_with_overrides() -> Result<()> {
        let (store, _) = apply(
            r#"{"operations": [
                {"op": "add", "kind": "radio"},
                {"op": "add", "kind": "text", "label": "Name", "required": true}
            ]}"#,
        )?;
        let fields = store.fields();
        assert_eq!(fields[0].label(), "Radio Group Field");
        assert_eq!(fields[0].options().map(<[String]>::len), Some(3));
        assert_eq!(fields[1].label(), "Name");
        assert!(fields[1].is_required());
        assert_eq!(fields[1].placeholder(), Some("Enter text..."));
        Ok(())
    }

    #[test]
    fn dollar_references_follow_add_order() -> Result<()> {
        let (store, issued) = apply(
            r#"{"operations": [
                {"op": "add", "kind": "text", "label": "Name"},
                {"op": "add", "kind": "select", "label": "Color", "options": ["Red", "Blue"]},
                {"op": "reorder", "from": 0, "to": 1},
                {"op": "update", "id": "$1", "changes": {"label": "Favorite Color"}},
                {"op": "edit_options", "id": "$1", "edit": {"action": "append", "value": "Green"}},
                {"op": "delete", "id": "$0"}
            ]}"#,
        )?;
        assert_eq!(labels(&store), vec!["Favorite Color"]);
        assert_eq!(
            store.fields()[0].options(),
            Some(&["Red".to_string(), "Blue".to_string(), "Green".to_string()][..])
        );
        assert_eq!(store.selected_field_id(), issued.get(1));
        Ok(())
    }

    #[test]
    fn drag_and_select_ops() -> Result<()> {
        let (store, _) = apply(
            r#"{"operations": [
                {"op": "add", "kind": "text", "label": "A"},
                {"op": "add", "kind": "text", "label": "B"},
                {"op": "add", "kind": "text", "label": "C"},
                {"op": "drag", "active": "$2", "over": "$0"},
                {"op": "drag", "active": "$1"},
                {"op": "select"},
                {"op": "toggle_preview"}
            ]}"#,
        )?;
        assert_eq!(labels(&store), vec!["C", "A", "B"]);
        assert_eq!(store.selected_field_id(), None);
        assert!(store.preview_mode());
        Ok(())
    }

    #[test]
    fn rejected_operation_names_its_position() {
        let err = apply(
            r#"{"operations": [
                {"op": "add", "kind": "text"},
                {"op": "reorder", "from": 0, "to": 5}
            ]}"#,
        )
        .err()
        .map(|e| format!("{e:#}"))
        .unwrap_or_default();
        assert!(err.contains("Operation #1 (reorder) failed"), "{err}");
    }

    #[test]
    fn kind_cannot_be_changed_by_update() {
        let result = Script::parse(
            r#"{"operations": [
                {"op": "update", "id": "$0", "changes": {"kind": "email"}}
            ]}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn dangling_reference_is_an_error() {
        assert!(apply(r#"{"operations": [{"op": "delete", "id": "$0"}]}"#).is_err());
    }

    #[test]
    fn literal_unknown_id_is_a_no_op() -> Result<()> {
        let (store, _) = apply(
            r#"{"operations": [
                {"op": "add", "kind": "email"},
                {"op": "delete", "id": "field-nope-1"}
            ]}"#,
        )?;
        assert_eq!(store.len(), 1);
        Ok(())
    }

    #[test]
    fn submission_keys_resolve() -> Result<()> {
        let issued = vec![FieldId::parse("field-a-1")?];
        let object: serde_json::Map<String, serde_json::Value> =
            serde_json::from_str(r#"{"$0": "x", "other-id": 1}"#)?;
        let resolved = resolve_keys(object, &issued)?;
        assert!(resolved.contains_key("field-a-1"));
        assert!(resolved.contains_key("other-id"));
        Ok(())
    }
}
