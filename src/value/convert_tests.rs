//! Tests for Rust <-> value conversion.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use indexmap::{IndexMap, IndexSet};

use super::{CoercionError, ConfigKey, ConfigValue, FloatKind, IntKind, TypeHint, Value};

mod hints {
    use super::*;

    #[test]
    fn scalar_hints() {
        assert_eq!(bool::type_hint(), TypeHint::Bool);
        assert_eq!(i8::type_hint(), TypeHint::Int(IntKind::I8));
        assert_eq!(u32::type_hint(), TypeHint::Int(IntKind::U32));
        assert_eq!(f32::type_hint(), TypeHint::Float(FloatKind::F32));
        assert_eq!(String::type_hint(), TypeHint::String);
        assert_eq!(char::type_hint(), TypeHint::Char);
        assert_eq!(Value::type_hint(), TypeHint::Any);
    }

    #[test]
    fn collection_hints_carry_element_types() {
        assert_eq!(
            Vec::<String>::type_hint(),
            TypeHint::list(TypeHint::String)
        );
        assert_eq!(
            HashSet::<i32>::type_hint(),
            TypeHint::set(TypeHint::Int(IntKind::I32))
        );
        assert_eq!(
            BTreeMap::<String, Vec<u8>>::type_hint(),
            TypeHint::map(TypeHint::String, TypeHint::list(TypeHint::Int(IntKind::U8)))
        );
        assert_eq!(
            IndexMap::<i64, f64>::type_hint().to_string(),
            "map<i64, f64>"
        );
    }
}

mod scalars {
    use super::*;

    #[test]
    fn integers_round_trip() {
        assert_eq!(i32::from_value(&42_i32.to_value()), Ok(42));
        assert_eq!(i8::from_value(&(-7_i8).to_value()), Ok(-7));
        assert_eq!(u16::from_value(&Value::Int(65_535)), Ok(65_535));
        assert_eq!(u64::from_value(&u64::MAX.to_value()), Ok(u64::MAX));
    }

    #[test]
    fn out_of_range_integer_is_rejected() {
        assert_eq!(
            u8::from_value(&Value::Int(256)),
            Err(CoercionError::OutOfRange {
                value: "256".to_string(),
                target: "u8",
            })
        );
    }

    #[test]
    fn float_is_not_an_integer_without_coercion() {
        assert!(i64::from_value(&Value::Float(1.0)).is_err());
    }

    #[test]
    fn f32_is_stored_by_shortest_decimal() {
        assert_eq!(4.56_f32.to_value(), Value::Float(4.56));
        assert_eq!(f32::from_value(&Value::Float(4.56)), Ok(4.56_f32));
    }

    #[test]
    fn strings_and_chars() {
        assert_eq!(
            String::from_value(&Value::from("Jane Doe")),
            Ok("Jane Doe".to_string())
        );
        assert_eq!(char::from_value(&Value::Char('Z')), Ok('Z'));
        assert!(char::from_value(&Value::from("Z")).is_err());
    }

    #[test]
    fn mismatch_names_expected_type() {
        let err = bool::from_value(&Value::from("yes")).unwrap_err();
        assert_eq!(err.to_string(), "expected boolean, found string");
    }
}

mod collections {
    use super::*;

    #[test]
    fn vec_round_trips_in_order() {
        let list = vec!["x".to_string(), "y".to_string(), "x".to_string()];
        assert_eq!(Vec::<String>::from_value(&list.to_value()), Ok(list));
    }

    #[test]
    fn sets_are_written_as_set_values() {
        let set: IndexSet<i32> = [4, 5, 6].into_iter().collect();
        assert_eq!(
            set.to_value(),
            Value::Set(vec![Value::Int(4), Value::Int(5), Value::Int(6)])
        );
    }

    #[test]
    fn sets_read_from_lists() {
        let raw = Value::List(vec![Value::Int(3), Value::Int(1)]);
        let set = BTreeSet::<u8>::from_value(&raw).unwrap();
        assert_eq!(set.into_iter().collect::<Vec<_>>(), [1, 3]);
        assert_eq!(HashSet::<u8>::from_value(&raw).unwrap().len(), 2);
    }

    #[test]
    fn maps_round_trip_with_typed_keys() {
        let mut map = BTreeMap::new();
        map.insert(1_u32, "one".to_string());
        map.insert(2_u32, "two".to_string());
        let value = map.to_value();
        assert_eq!(value.as_map().unwrap().get("2"), Some(&Value::from("two")));
        assert_eq!(BTreeMap::<u32, String>::from_value(&value), Ok(map));
    }

    #[test]
    fn index_map_preserves_order() {
        let mut map = IndexMap::new();
        map.insert("z".to_string(), true);
        map.insert("a".to_string(), false);
        let back = IndexMap::<String, bool>::from_value(&map.to_value()).unwrap();
        assert_eq!(back.keys().collect::<Vec<_>>(), ["z", "a"]);
    }

    #[test]
    fn bad_nested_value_reports_entry() {
        let mut raw = IndexMap::new();
        raw.insert("k".to_string(), Value::from("not a number"));
        let err = HashMap::<String, i32>::from_value(&Value::Map(raw)).unwrap_err();
        assert!(matches!(err, CoercionError::Entry { ref key, .. } if key == "k"));
    }
}

mod keys {
    use super::*;

    #[test]
    fn keys_parse_from_strings() {
        assert_eq!(i32::from_key(" 12 "), Ok(12));
        assert_eq!(bool::from_key("true"), Ok(true));
        assert_eq!(char::from_key("x"), Ok('x'));
        assert_eq!(String::from_key("any thing"), Ok("any thing".to_string()));
    }

    #[test]
    fn invalid_keys_are_rejected() {
        assert!(char::from_key("xy").is_err());
        assert!(u8::from_key("-1").is_err());
        assert_eq!(
            bool::from_key("maybe"),
            Err(CoercionError::InvalidKey {
                key: "maybe".to_string(),
                expected: "boolean".to_string(),
            })
        );
    }

    #[test]
    fn keys_render_canonically() {
        assert_eq!(42_u64.to_key(), "42");
        assert_eq!('k'.to_key(), "k");
    }
}
