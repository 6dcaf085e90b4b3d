//! Process setup shared by every subcommand

use std::path::Path;

use anyhow::{Context, Result};
use formkit_core::Config;

/// Initialize tracing subscriber
///
/// `RUST_LOG` is honored; `verbose` adds a debug directive for the core.
///
/// # Errors
/// Returns an error if a global subscriber is already installed
pub fn init_tracing(verbose: bool) -> Result<()> {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing subscriber: {e}"))
}

/// Load layered configuration, honoring `--config`
///
/// # Errors
/// Returns an error if any config layer is unreadable or invalid
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let config = formkit_core::config::load_config(explicit).context("Failed to load config")?;
    tracing::debug!(prefix = %config.ids.prefix, overrides = config.palette.len(), "config loaded");
    Ok(config)
}
