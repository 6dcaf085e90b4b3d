//! Validation-focused tests for configuration

#[cfg(test)]
mod validation_tests {
    use crate::config::{Config, PaletteOverride};
    use crate::domain::field::FieldKind;
    use crate::Error;

    fn with_override(kind: &str, patch: PaletteOverride) -> Config {
        Config {
            palette: [(kind.to_string(), patch)].into_iter().collect(),
            ..Config::default()
        }
    }

    #[test]
    fn defaults_are_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn prefix_must_be_id_fragment() {
        let mut config = Config::default();
        config.ids.prefix = "bad/prefix".to_string();
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn unknown_kind_names_the_valid_kinds() {
        let config = with_override("slider", PaletteOverride::default());
        let message = config.validate().map_err(|e| e.to_string()).err();
        let message = message.unwrap_or_default();
        assert!(message.contains("palette.slider"), "{message}");
        assert!(message.contains("checkbox"), "{message}");
    }

    #[test]
    fn options_only_for_option_kinds() {
        let patch = PaletteOverride {
            options: Some(vec!["A".to_string()]),
            ..PaletteOverride::default()
        };
        assert!(with_override("radio", patch.clone()).validate().is_ok());
        assert!(with_override("number", patch).validate().is_err());
    }

    #[test]
    fn blank_label_and_blank_options_rejected() {
        let blank_label = PaletteOverride {
            label: Some("  ".to_string()),
            ..PaletteOverride::default()
        };
        assert!(with_override("text", blank_label).validate().is_err());

        let blank_option = PaletteOverride {
            options: Some(vec!["A".to_string(), String::new()]),
            ..PaletteOverride::default()
        };
        assert!(with_override("select", blank_option).validate().is_err());
    }

    #[test]
    fn checkbox_placeholder_rejected() {
        let patch = PaletteOverride {
            placeholder: Some("Tick".to_string()),
            ..PaletteOverride::default()
        };
        assert!(with_override("checkbox", patch).validate().is_err());
    }

    #[test]
    fn overrides_parse_kind_keys() {
        let config = with_override("email", PaletteOverride::default());
        let kinds: Vec<FieldKind> = config
            .palette_overrides()
            .map(|pairs| pairs.into_iter().map(|(kind, _)| kind).collect())
            .unwrap_or_default();
        assert_eq!(kinds, vec![FieldKind::Email]);
    }

    #[test]
    fn id_generator_uses_prefix() {
        let mut config = Config::default();
        config.ids.prefix = "q".to_string();
        let mut ids = config
            .id_generator()
            .unwrap_or_else(|e| panic!("valid prefix rejected: {e}"));
        assert!(ids.next_id().as_str().starts_with("q-"));
    }

    #[test]
    fn id_generator_reports_identifier_error() {
        let mut config = Config::default();
        config.ids.prefix = "bad prefix".to_string();
        let result = config.id_generator();
        assert!(matches!(result, Err(Error::Identifier(_))));
        let message = result.err().map(|e| e.to_string()).unwrap_or_default();
        assert!(message.starts_with("Identifier error:"), "{message}");
    }
}
