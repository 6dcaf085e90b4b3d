//! `formkit replay`: apply a scripted session and show the resulting form

use std::path::Path;

use anyhow::Result;
use formkit_core::{Config, FieldId, FormDefinitionStore, FormSnapshot, Palette, RecordedEvent};
use serde::Serialize;

use super::script::Script;

/// Store state after a replay, plus what happened along the way
#[derive(Debug, Clone, Serialize)]
pub struct ReplayReport {
    pub snapshot: FormSnapshot,
    pub events: Vec<RecordedEvent>,
}

impl ReplayReport {
    /// Events that changed the field list, as opposed to selection or mode
    #[must_use]
    pub fn field_changes(&self) -> usize {
        self.events
            .iter()
            .filter(|recorded| recorded.event.touches_fields())
            .count()
    }
}

/// A store configured from `config`, with the script applied
///
/// Also returns the ids issued by the script's `add` operations.
///
/// # Errors
/// Returns an error if the config is invalid or the script fails
pub fn replay_script(
    config: &Config,
    script: &Script,
) -> Result<(FormDefinitionStore, Vec<FieldId>)> {
    let palette = Palette::from_config(config)?;
    let mut store = FormDefinitionStore::with_id_generator(config.id_generator()?);
    let issued = script.apply(&mut store, &palette)?;
    Ok((store, issued))
}

/// Replay `script_path` and print the final form
///
/// # Errors
/// Returns an error if the script cannot be loaded or applied
pub fn run(config: &Config, script_path: &Path, json: bool) -> Result<()> {
    let script = Script::load(script_path)?;
    let (mut store, _) = replay_script(config, &script)?;
    let report = ReplayReport {
        snapshot: store.snapshot(),
        events: store.drain_events(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_text(&store, &report);
    }
    Ok(())
}

fn print_text(store: &FormDefinitionStore, report: &ReplayReport) {
    println!(
        "{} ({} mode, revision {})",
        store.field_count_label(),
        store.mode(),
        store.revision()
    );
    for (index, field) in store.fields().iter().enumerate() {
        let marker = if store.selected_field_id() == Some(field.id()) {
            '*'
        } else {
            ' '
        };
        let required = if field.is_required() { " (required)" } else { "" };
        println!(
            "{marker} {index}. [{}] {}{required}  {}",
            field.kind(),
            field.label(),
            field.id()
        );
    }
    println!(
        "{} event(s), {} changed the field list",
        report.events.len(),
        report.field_changes()
    );
}
