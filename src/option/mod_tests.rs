//! Tests for option descriptors.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use indexmap::IndexMap;

use super::{ConfigOption, RegisteredOption};
use crate::value::{TypeHint, Value};

mod identity {
    use super::*;

    #[test]
    fn equality_is_by_key_only() {
        let a = ConfigOption::new("name", 1).with_description("first");
        let b = ConfigOption::new("name", 2).hidden();
        let c = ConfigOption::new("other", 1);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn hash_is_by_key_only() {
        let mut set = HashSet::new();
        set.insert(ConfigOption::new("name", 1));
        assert!(!set.insert(ConfigOption::new("name", 99)));
        assert!(set.insert(ConfigOption::new("other", 1)));
    }

    #[test]
    fn type_hint_follows_default_type() {
        let option = ConfigOption::new("list", vec!["a".to_string()]);
        assert_eq!(option.type_hint(), TypeHint::list(TypeHint::String));
    }
}

mod documentation {
    use super::*;

    #[test]
    fn texts_are_trimmed() {
        let option = ConfigOption::new("x", true)
            .with_description("\n  Boolean value.\n")
            .with_header("  Header ")
            .with_footer("Footer\n\n");
        assert_eq!(option.description(), Some("Boolean value."));
        assert_eq!(option.header(), Some("Header"));
        assert_eq!(option.footer(), Some("Footer"));
    }

    #[test]
    fn append_default_value_uses_new_line() {
        let option = ConfigOption::new("test", 5)
            .with_description("Test value")
            .append_default_value();
        assert_eq!(option.description(), Some("Test value\nDefault: 5"));
    }

    #[test]
    fn append_default_value_without_description() {
        let option = ConfigOption::new("name", "Player".to_string()).append_default_value();
        assert_eq!(option.description(), Some("Default: Player"));
    }

    #[test]
    fn inlined_default_value() {
        let option = ConfigOption::new("enabled", true)
            .with_description("Boolean value.\n")
            .append_inlined_default_value();
        assert_eq!(option.description(), Some("Boolean value. Default: true"));
    }

    #[test]
    fn parenthesized_default_value() {
        let option = ConfigOption::new("ratio", 0.75)
            .with_description("Ratio")
            .append_parenthesized_default_value();
        assert_eq!(option.description(), Some("Ratio (Default: 0.75)"));

        let bare = ConfigOption::new("n", 1).append_parenthesized_default_value();
        assert_eq!(bare.description(), Some("(Default: 1)"));
    }

    #[test]
    fn list_default_renders_in_brackets() {
        let option = ConfigOption::new(
            "list",
            vec!["a".to_string(), "b".to_string(), "c".to_string()],
        )
        .append_default_value();
        assert_eq!(option.description(), Some("Default: [a, b, c]"));
    }
}

mod resolution {
    use super::*;

    #[test]
    fn missing_and_null_resolve_to_none() {
        let option = ConfigOption::new("n", 3_i32);
        assert_eq!(option.resolve(None), None);
        assert_eq!(option.resolve(Some(&Value::Null)), None);
        assert_eq!(option.resolve_or_default(None), 3);
    }

    #[test]
    fn wrong_type_resolves_to_default() {
        let option = ConfigOption::new("n", 3_i32);
        assert_eq!(option.resolve(Some(&Value::from("three"))), None);
        assert_eq!(option.resolve_or_default(Some(&Value::from("three"))), 3);
    }

    #[test]
    fn matching_value_resolves() {
        let option = ConfigOption::new("map", IndexMap::<String, bool>::new());
        let mut raw = IndexMap::new();
        raw.insert("k".to_string(), Value::Bool(true));
        let resolved = option.resolve(Some(&Value::Map(raw))).unwrap();
        assert_eq!(resolved.get("k"), Some(&true));
    }
}

mod erased {
    use super::*;

    #[test]
    fn exposes_metadata_without_type() {
        let option = ConfigOption::new("port", 8080_u16)
            .with_old_key("listen-port")
            .hidden();
        let erased: &dyn RegisteredOption = &option;
        assert_eq!(erased.key(), "port");
        assert_eq!(erased.default_raw(), Value::Int(8080));
        assert!(erased.is_hidden());
        assert_eq!(erased.old_keys(), ["listen-port".to_string()]);
    }

    #[test]
    fn notify_runs_every_listener_in_order() {
        let calls = Arc::new(AtomicUsize::new(0));
        let first = Arc::clone(&calls);
        let second = Arc::clone(&calls);
        let option = ConfigOption::new("n", 1_i64)
            .on_load(move |value| {
                assert_eq!(*value, 7);
                assert_eq!(first.fetch_add(1, Ordering::SeqCst), 0);
            })
            .on_load(move |_| {
                assert_eq!(second.fetch_add(1, Ordering::SeqCst), 1);
            });

        RegisteredOption::notify(&option, Some(&Value::Int(7)));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn notify_passes_default_for_invalid_value() {
        let seen = Arc::new(AtomicUsize::new(0));
        let sink = Arc::clone(&seen);
        let option = ConfigOption::new("n", 5_u8)
            .on_load(move |value| sink.store(usize::from(*value), Ordering::SeqCst));

        RegisteredOption::notify(&option, Some(&Value::from("bad")));
        assert_eq!(seen.load(Ordering::SeqCst), 5);
    }
}
