//! Tests for the dynamic value type.

use indexmap::IndexMap;

use super::Value;

fn strings(items: &[&str]) -> Value {
    items.iter().copied().map(Value::from).collect()
}

mod display {
    use super::*;

    #[test]
    fn scalars_render_plainly() {
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::Int(5).to_string(), "5");
        assert_eq!(Value::Float(1.23).to_string(), "1.23");
        assert_eq!(Value::from("Player").to_string(), "Player");
        assert_eq!(Value::Char('A').to_string(), "A");
        assert_eq!(Value::Null.to_string(), "null");
    }

    #[test]
    fn integral_float_keeps_decimal_point() {
        assert_eq!(Value::Float(2.0).to_string(), "2.0");
    }

    #[test]
    fn sequences_render_in_brackets() {
        assert_eq!(strings(&["a", "b", "c"]).to_string(), "[a, b, c]");
        assert_eq!(Value::Set(vec![Value::Int(1)]).to_string(), "[1]");
        assert_eq!(Value::List(vec![]).to_string(), "[]");
    }

    #[test]
    fn nested_sequences_render_recursively() {
        let nested = Value::List(vec![strings(&["a"]), strings(&["b", "c"])]);
        assert_eq!(nested.to_string(), "[[a], [b, c]]");
    }

    #[test]
    fn maps_render_in_braces() {
        let mut map = IndexMap::new();
        map.insert("key".to_string(), Value::from("value"));
        map.insert("n".to_string(), Value::Int(2));
        assert_eq!(Value::Map(map).to_string(), "{key: value, n: 2}");
    }
}

mod construction {
    use super::*;

    #[test]
    fn set_of_drops_later_duplicates() {
        let set = Value::set_of([Value::Int(3), Value::Int(1), Value::Int(3), Value::Int(2)]);
        assert_eq!(
            set,
            Value::Set(vec![Value::Int(3), Value::Int(1), Value::Int(2)])
        );
    }

    #[test]
    fn collect_builds_list() {
        let list: Value = [1, 2].into_iter().map(Value::Int).collect();
        assert_eq!(list, Value::List(vec![Value::Int(1), Value::Int(2)]));
    }

    #[test]
    fn default_is_null() {
        assert!(Value::default().is_null());
    }
}

mod accessors {
    use super::*;

    #[test]
    fn typed_accessors_match_only_their_variant() {
        assert_eq!(Value::Bool(true).as_bool(), Some(true));
        assert_eq!(Value::Int(1).as_bool(), None);
        assert_eq!(Value::Int(7).as_int(), Some(7));
        assert_eq!(Value::Float(7.0).as_int(), None);
        assert_eq!(Value::from("x").as_str(), Some("x"));
        assert_eq!(Value::Char('x').as_str(), None);
    }

    #[test]
    fn as_seq_covers_lists_and_sets() {
        assert_eq!(strings(&["a"]).as_seq().map(<[Value]>::len), Some(1));
        assert_eq!(Value::Set(vec![]).as_seq().map(<[Value]>::len), Some(0));
        assert!(Value::Map(IndexMap::new()).as_seq().is_none());
    }

    #[test]
    fn kind_names() {
        assert_eq!(Value::Null.kind(), "null");
        assert_eq!(Value::from("s").kind(), "string");
        assert_eq!(Value::Map(IndexMap::new()).kind(), "map");
        assert!(Value::Set(vec![]).is_collection());
        assert!(!Value::Int(0).is_collection());
    }

    #[test]
    fn map_equality_ignores_order() {
        let mut a = IndexMap::new();
        a.insert("x".to_string(), Value::Int(1));
        a.insert("y".to_string(), Value::Int(2));
        let mut b = IndexMap::new();
        b.insert("y".to_string(), Value::Int(2));
        b.insert("x".to_string(), Value::Int(1));
        assert_eq!(Value::Map(a), Value::Map(b));
    }
}
