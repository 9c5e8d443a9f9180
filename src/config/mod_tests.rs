//! Tests for registration and value access.

use std::path::Path;

use indexmap::IndexMap;

use super::defaults::VERSION_KEY;
use super::{Config, ConfigError, LoadOutcome};
use crate::format::{FormatRegistry, JsonFormat, WriteOptions, YamlFormat};
use crate::option::ConfigOption;
use crate::value::Value;

fn yaml_config() -> Config {
    Config::new("unused.yml", YamlFormat::new())
}

mod registration {
    use super::*;

    #[test]
    fn register_seeds_default_value() {
        let mut config = yaml_config();
        let option = config.register(ConfigOption::new("port", 8080_u16)).unwrap();

        assert_eq!(config.raw("port"), Some(&Value::Int(8080)));
        assert_eq!(config.get(&option), 8080);
        assert!(config.is_registered("port"));
    }

    #[test]
    fn duplicate_key_is_rejected_without_side_effects() {
        let mut config = yaml_config();
        config.option_of("name", "first".to_string()).unwrap();

        let err = config.register(ConfigOption::new("name", 2_i32)).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateOption { key } if key == "name"));
        assert_eq!(config.raw("name"), Some(&Value::from("first")));
        assert_eq!(config.keys().collect::<Vec<_>>(), ["name"]);
    }

    #[test]
    fn register_all_stops_at_first_duplicate() {
        let mut config = yaml_config();
        let result = config.register_all([
            ConfigOption::new("a", 1_i32),
            ConfigOption::new("b", 2_i32),
            ConfigOption::new("a", 3_i32),
            ConfigOption::new("c", 4_i32),
        ]);

        assert!(result.is_err());
        assert_eq!(config.keys().collect::<Vec<_>>(), ["a", "b"]);
    }

    #[test]
    fn keys_follow_registration_order() {
        let mut config = yaml_config();
        config.option_of("z", true).unwrap();
        config.option_of("a", true).unwrap();
        config.option_of("m", true).unwrap();
        assert_eq!(config.keys().collect::<Vec<_>>(), ["z", "a", "m"]);
    }
}

mod access {
    use super::*;

    #[test]
    fn fresh_registry_returns_defaults_for_every_type() {
        let mut config = yaml_config();
        let flag = config.option_of("flag", true).unwrap();
        let ratio = config.option_of("ratio", 0.25_f64).unwrap();
        let letter = config.option_of("letter", 'x').unwrap();
        let list = config
            .option_of("list", vec!["a".to_string(), "b".to_string()])
            .unwrap();
        let mut defaults = IndexMap::new();
        defaults.insert(1_i32, "one".to_string());
        let map = config.option_of("map", defaults.clone()).unwrap();

        assert!(config.get(&flag));
        assert!((config.get(&ratio) - 0.25).abs() < f64::EPSILON);
        assert_eq!(config.get(&letter), 'x');
        assert_eq!(config.get(&list), ["a", "b"]);
        assert_eq!(config.get(&map), defaults);
    }

    #[test]
    fn set_overrides_and_reset_restores_default() {
        let mut config = yaml_config();
        let option = config.option_of("count", 3_i32).unwrap();

        config.set(&option, 10).unwrap();
        assert_eq!(config.get(&option), 10);

        config.reset(&option).unwrap();
        assert_eq!(config.raw("count"), None);
        assert_eq!(config.get(&option), 3);
        assert_eq!(config.get_or_none(&option), None);
    }

    #[test]
    fn set_requires_registration() {
        let mut config = yaml_config();
        let stray = ConfigOption::new("stray", 1_i32);

        let err = config.set(&stray, 2).unwrap_err();
        assert!(matches!(err, ConfigError::UnregisteredOption { key } if key == "stray"));
        assert!(config.reset(&stray).is_err());
        assert_eq!(config.raw("stray"), None);
    }

    #[test]
    fn get_of_unregistered_option_is_its_default() {
        let config = yaml_config();
        assert_eq!(config.get(&ConfigOption::new("missing", 7_i64)), 7);
    }

    #[test]
    fn get_or_none_distinguishes_mismatched_values() {
        let mut config = yaml_config();
        let number = config.option_of("n", 1_i32).unwrap();
        let as_text = ConfigOption::new("n", String::new());

        assert_eq!(config.get_or_none(&number), Some(1));
        assert_eq!(config.get_or_none(&as_text), None);
        assert_eq!(config.get(&as_text), "");
    }
}

mod settings {
    use super::*;

    #[test]
    fn header_and_footer_are_trimmed() {
        let config = yaml_config().with_header("\n Header \n").with_footer("Footer\n");
        assert_eq!(config.header(), Some("Header"));
        assert_eq!(config.footer(), Some("Footer"));
    }

    #[test]
    fn version_registers_reserved_option_once() {
        let mut config = yaml_config().with_version(2);
        config.set_version(3);

        assert_eq!(config.version(), Some(3));
        assert_eq!(config.current_version(), None);
        assert_eq!(config.keys().collect::<Vec<_>>(), [VERSION_KEY]);
        assert_eq!(config.raw(VERSION_KEY), Some(&Value::Int(0)));
    }

    #[test]
    fn write_options_start_from_format_defaults() {
        assert_eq!(yaml_config().write_options(), WriteOptions::new());

        let json = Config::new("c.json", JsonFormat::json());
        assert_eq!(json.write_options(), WriteOptions::compact());

        let tuned = Config::new("c.jsonc", JsonFormat::jsonc())
            .with_separate_options(false)
            .with_comments(false);
        assert_eq!(tuned.write_options(), WriteOptions::compact());
    }

    #[test]
    fn from_path_picks_format_by_extension() {
        let formats = FormatRegistry::with_defaults();
        let config = Config::from_path("dir/settings.toml", &formats).unwrap();
        assert_eq!(config.format().name(), "TOML");
        assert_eq!(config.path(), Some(Path::new("dir/settings.toml")));

        let err = Config::from_path("settings.ini", &formats).unwrap_err();
        assert!(matches!(err, ConfigError::Format(_)));
    }

    #[test]
    fn detached_config_has_no_file() {
        let mut config = Config::detached(YamlFormat::new());
        assert!(!config.exists());
        assert_eq!(config.load(), LoadOutcome::NoFile);
        assert!(matches!(config.try_save(), Err(ConfigError::NoFile)));
    }

    #[test]
    fn config_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Config>();
    }
}
