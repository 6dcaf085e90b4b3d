//! Configuration loading from files and environment (Immutable functional pattern)
//!
//! This module handles loading configuration from:
//! 1. Built-in defaults
//! 2. Global config: ~/.config/formkit/config.toml
//! 3. Project config: .formkit/config.toml, or a path given explicitly
//! 4. Environment variables: FORMKIT_*

use std::path::{Path, PathBuf};

use super::types::Config;
use crate::{Error, Result};

/// Overrides `ids.prefix`
pub const ENV_ID_PREFIX: &str = "FORMKIT_ID_PREFIX";

// ═══════════════════════════════════════════════════════════════════════════
// PUBLIC API
// ═══════════════════════════════════════════════════════════════════════════

/// Load configuration from all sources with hierarchy
///
/// When `explicit` is given it replaces the project config lookup and must
/// exist.
///
/// # Errors
///
/// Returns error if:
/// - A config file is malformed TOML or cannot be read
/// - The explicit config path does not exist
/// - Config values fail validation
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let project = match explicit {
        Some(path) if !path.exists() => {
            return Err(Error::io_error(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        Some(path) => path.to_path_buf(),
        None => project_config_path()?,
    };

    load_layers(global_config_path().as_deref(), &project)
}

/// Merge defaults, the two file layers (each optional on disk) and the
/// environment, then validate.
pub(crate) fn load_layers(global: Option<&Path>, project: &Path) -> Result<Config> {
    let config = Config::default();

    let config = match global.filter(|path| path.exists()) {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading global config");
            config.merge(load_toml_file(path)?)
        }
        None => config,
    };

    let config = if project.exists() {
        tracing::debug!(path = %project.display(), "loading project config");
        config.merge(load_toml_file(project)?)
    } else {
        config
    };

    let config = config.apply_env_vars()?;
    config.validate()?;
    Ok(config)
}

// ═══════════════════════════════════════════════════════════════════════════
// PATH HELPERS
// ═══════════════════════════════════════════════════════════════════════════

/// Get path to global config file
#[must_use]
pub fn global_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "formkit")
        .map(|proj_dirs| proj_dirs.config_dir().join("config.toml"))
}

/// Get path to project config file
///
/// # Errors
///
/// Returns error if current directory cannot be determined
pub fn project_config_path() -> Result<PathBuf> {
    std::env::current_dir()
        .map(|dir| dir.join(".formkit/config.toml"))
        .map_err(|e| Error::io_error(format!("Failed to get current directory: {e}")))
}

/// Load a TOML file into a partial Config
///
/// # Errors
///
/// Returns error if:
/// - File cannot be read
/// - Path is a directory instead of a file
/// - TOML is malformed or has unknown keys
pub fn load_toml_file(path: &Path) -> Result<Config> {
    if path.is_dir() {
        return Err(Error::io_error(format!(
            "Config path is a directory, not a file: {}",
            path.display()
        )));
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::io_error(format!(
            "Failed to read config file {}: {e}",
            path.display()
        ))
    })?;

    toml::from_str(&content).map_err(|e| {
        Error::parse_error(format!(
            "Failed to parse config file {}: {e}",
            path.display()
        ))
    })
}

// ═══════════════════════════════════════════════════════════════════════════
// ENVIRONMENT VARIABLE OVERRIDES (Immutable pattern)
// ═══════════════════════════════════════════════════════════════════════════

impl Config {
    /// Apply environment variable overrides - immutable pattern
    ///
    /// # Errors
    ///
    /// Returns error if an environment variable value is invalid
    pub fn apply_env_vars(mut self) -> Result<Self> {
        if let Ok(value) = std::env::var(ENV_ID_PREFIX) {
            if value.trim().is_empty() {
                return Err(Error::invalid_config(format!(
                    "{ENV_ID_PREFIX} cannot be empty - unset the variable or provide a prefix"
                )));
            }
            self.ids.prefix = value;
        }
        Ok(self)
    }
}
