use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::ArgMatches;

use super::setup;
use crate::commands::{palette, replay, submit};

pub fn dispatch(matches: &ArgMatches) -> Result<()> {
    setup::init_tracing(matches.get_flag("verbose"))?;
    let config = setup::load_config(matches.get_one::<String>("config").map(Path::new))?;

    match matches.subcommand() {
        Some(("palette", sub_m)) => palette::run(&config, sub_m.get_flag("json")),
        Some(("replay", sub_m)) => replay::run(
            &config,
            &required_path(sub_m, "script")?,
            sub_m.get_flag("json"),
        ),
        Some(("submit", sub_m)) => submit::run(
            &config,
            &required_path(sub_m, "script")?,
            &required_path(sub_m, "submission")?,
        ),
        _ => anyhow::bail!("Unknown command. Run 'formkit --help' for usage."),
    }
}

fn required_path(matches: &ArgMatches, name: &str) -> Result<PathBuf> {
    matches
        .get_one::<String>(name)
        .map(PathBuf::from)
        .ok_or_else(|| anyhow::anyhow!("Missing required argument: {name}"))
}
