//! `formkit submit`: check a preview submission against a replayed form

use std::path::Path;

use anyhow::{Context, Result};
use formkit_core::{validate_submission, Config, FieldId, Submission};

use super::replay::replay_script;
use super::script::{resolve_keys, Script};

/// Replay the script, validate the submission and print the outcome as JSON
///
/// Accepted values print as an object in field order. Violations print as
/// a list and the command fails.
///
/// # Errors
/// Returns an error if loading fails or the submission has violations
pub fn run(config: &Config, script_path: &Path, submission_path: &Path) -> Result<()> {
    let script = Script::load(script_path)?;
    let (store, issued) = replay_script(config, &script)?;
    let submission = load_submission(submission_path, &issued)?;

    match validate_submission(store.fields(), &submission) {
        Ok(accepted) => {
            println!("{}", serde_json::to_string_pretty(&accepted)?);
            Ok(())
        }
        Err(rejected) => {
            println!("{}", serde_json::to_string_pretty(&rejected.violations)?);
            Err(rejected.into())
        }
    }
}

fn load_submission(path: &Path, issued: &[FieldId]) -> Result<Submission> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read submission {}", path.display()))?;
    let object: serde_json::Map<String, serde_json::Value> = serde_json::from_str(&content)
        .with_context(|| format!("Submission {} is not a JSON object", path.display()))?;
    let resolved = resolve_keys(object, issued)?;
    serde_json::from_value(serde_json::Value::Object(resolved))
        .with_context(|| format!("Invalid submission values in {}", path.display()))
}
