//! `formkit palette`: the field kinds a form can be built from

use anyhow::Result;
use formkit_core::{Config, Palette};
use itertools::Itertools;

/// Print every palette entry with its starting configuration
///
/// # Errors
/// Returns an error if the config's palette overrides are invalid or the
/// JSON output cannot be produced
pub fn run(config: &Config, json: bool) -> Result<()> {
    let palette = Palette::from_config(config)?;

    if json {
        let entries: Vec<_> = palette.entries().collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    for entry in palette.entries() {
        println!("{:<10} {} - {}", entry.kind, entry.title, entry.description);
        println!("           label: {}", entry.defaults.label);
        if let Some(placeholder) = &entry.defaults.placeholder {
            println!("           placeholder: {placeholder}");
        }
        if entry.defaults.required {
            println!("           required");
        }
        if let Some(options) = &entry.defaults.options {
            println!("           options: {}", options.iter().join(", "));
        }
    }
    Ok(())
}
