//! Loading-focused tests for configuration
//!
//! File parsing, layer precedence and environment overrides.

#[cfg(test)]
mod loading_tests {
    use std::path::Path;

    use serial_test::serial;
    use tempfile::TempDir;

    use crate::config::load::{load_layers, ENV_ID_PREFIX};
    use crate::config::{load_config, load_toml_file, project_config_path, Config};
    use crate::{Error, Result};

    fn write(dir: &TempDir, name: &str, content: &str) -> Result<std::path::PathBuf> {
        let path = dir.path().join(name);
        std::fs::write(&path, content)
            .map_err(|e| Error::io_error(format!("Failed to write test file: {e}")))?;
        Ok(path)
    }

    fn temp_dir() -> Result<TempDir> {
        tempfile::tempdir().map_err(|e| Error::io_error(format!("Failed to create temp dir: {e}")))
    }

    #[test]
    #[serial]
    fn no_files_yields_defaults() -> Result<()> {
        std::env::remove_var(ENV_ID_PREFIX);
        let dir = temp_dir()?;
        let config = load_layers(None, &dir.path().join("missing.toml"))?;
        assert_eq!(config, Config::default());
        assert_eq!(config.ids.prefix, "field");
        Ok(())
    }

    #[test]
    #[serial]
    fn project_overrides_global() -> Result<()> {
        std::env::remove_var(ENV_ID_PREFIX);
        let dir = temp_dir()?;
        let global = write(
            &dir,
            "global.toml",
            "[ids]\nprefix = \"g\"\n\n[palette.text]\nlabel = \"Name\"\n",
        )?;
        let project = write(&dir, "project.toml", "[ids]\nprefix = \"p\"\n")?;

        let config = load_layers(Some(&global), &project)?;
        assert_eq!(config.ids.prefix, "p");
        assert_eq!(
            config
                .palette
                .get("text")
                .and_then(|o| o.label.as_deref()),
            Some("Name")
        );
        Ok(())
    }

    #[test]
    #[serial]
    fn env_overrides_files() -> Result<()> {
        let dir = temp_dir()?;
        let project = write(&dir, "project.toml", "[ids]\nprefix = \"p\"\n")?;

        std::env::set_var(ENV_ID_PREFIX, "env");
        let result = load_layers(None, &project);
        std::env::remove_var(ENV_ID_PREFIX);

        assert_eq!(result?.ids.prefix, "env");
        Ok(())
    }

    #[test]
    #[serial]
    fn empty_env_prefix_is_rejected() {
        std::env::set_var(ENV_ID_PREFIX, "  ");
        let result = Config::default().apply_env_vars();
        std::env::remove_var(ENV_ID_PREFIX);

        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn malformed_toml_returns_parse_error() -> Result<()> {
        let dir = temp_dir()?;
        let path = write(&dir, "bad.toml", "[ids\nprefix = ")?;
        assert!(matches!(load_toml_file(&path), Err(Error::ParseError(_))));
        Ok(())
    }

    #[test]
    fn unknown_keys_are_rejected() -> Result<()> {
        let dir = temp_dir()?;
        let path = write(&dir, "typo.toml", "[idz]\nprefix = \"x\"\n")?;
        assert!(matches!(load_toml_file(&path), Err(Error::ParseError(_))));
        Ok(())
    }

    #[test]
    fn directory_path_is_io_error() -> Result<()> {
        let dir = temp_dir()?;
        assert!(matches!(load_toml_file(dir.path()), Err(Error::Io(_))));
        Ok(())
    }

    #[test]
    fn missing_explicit_path_is_error() {
        let result = load_config(Some(Path::new("/definitely/not/here/formkit.toml")));
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    #[serial]
    fn invalid_layer_fails_validation() -> Result<()> {
        std::env::remove_var(ENV_ID_PREFIX);
        let dir = temp_dir()?;
        let project = write(&dir, "project.toml", "[ids]\nprefix = \"has space\"\n")?;
        assert!(matches!(
            load_layers(None, &project),
            Err(Error::InvalidConfig(_))
        ));
        Ok(())
    }

    #[test]
    fn project_path_is_under_dot_formkit() -> Result<()> {
        let path = project_config_path()?;
        assert!(path.ends_with(".formkit/config.toml"));
        Ok(())
    }
}
