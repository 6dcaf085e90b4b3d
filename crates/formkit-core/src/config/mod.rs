//! Configuration loading and management
//!
//! # Hierarchy
//!
//! Configuration is loaded in this order (later overrides earlier):
//! 1. Built-in defaults
//! 2. Global config: ~/.config/formkit/config.toml
//! 3. Project config: .formkit/config.toml (or an explicit `--config` path)
//! 4. Environment variables: FORMKIT_*
//!
//! # Example Config
//!
//! ```toml
//! [ids]
//! prefix = "q"
//!
//! [palette.select]
//! label = "Pick one"
//! options = ["Red", "Green", "Blue"]
//! ```
//!
//! # Module Structure
//!
//! - `types`: Configuration structure definitions
//! - `load`: Loading from files and environment
//! - `merge`: Configuration merging logic
//! - `validate`: Validation and typed views over raw values

mod load;
mod merge;
mod types;
mod validate;

#[cfg(test)]
mod tests_loading;
#[cfg(test)]
mod tests_validation;

pub use load::{global_config_path, load_config, load_toml_file, project_config_path};
pub use types::{Config, IdConfig, PaletteOverride};
