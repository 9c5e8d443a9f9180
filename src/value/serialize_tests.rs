//! Tests for serde support on values.

use super::Value;

mod deserialize {
    use super::*;

    #[test]
    fn json_object_keeps_key_order() {
        let value: Value = serde_json::from_str(r#"{"b": 1, "a": [true, null], "c": 1.5}"#).unwrap();
        let map = value.as_map().unwrap();
        assert_eq!(map.keys().collect::<Vec<_>>(), ["b", "a", "c"]);
        assert_eq!(map["a"], Value::List(vec![Value::Bool(true), Value::Null]));
        assert_eq!(map["c"], Value::Float(1.5));
    }

    #[test]
    fn yaml_scalar_keys_become_strings() {
        let value: Value = serde_yaml::from_str("1: one\ntrue: yes\n").unwrap();
        let map = value.as_map().unwrap();
        assert_eq!(map.get("1"), Some(&Value::from("one")));
        assert!(map.contains_key("true"));
    }

    #[test]
    fn yaml_collection_keys_are_rejected() {
        let result = serde_yaml::from_str::<Value>("? [a, b]\n: value\n");
        assert!(result.is_err());
    }

    #[test]
    fn huge_unsigned_becomes_float() {
        let value: Value = serde_json::from_str("18446744073709551615").unwrap();
        assert!(matches!(value, Value::Float(_)));
    }

    #[test]
    fn toml_tables_become_maps() {
        let value: Value = toml::from_str("name = \"x\"\n[inner]\nn = 2\n").unwrap();
        let map = value.as_map().unwrap();
        assert_eq!(map["name"], Value::from("x"));
        assert_eq!(map["inner"].as_map().unwrap()["n"], Value::Int(2));
    }

    #[test]
    fn toml_datetimes_become_strings() {
        let value: Value = toml::from_str("at = 1979-05-27T07:32:00Z\n").unwrap();
        assert_eq!(value.as_map().unwrap()["at"], Value::from("1979-05-27T07:32:00Z"));
    }
}

mod serialize {
    use super::*;

    #[test]
    fn chars_serialize_as_strings() {
        assert_eq!(serde_json::to_string(&Value::Char('A')).unwrap(), r#""A""#);
        assert_eq!(serde_yaml::to_string(&Value::Char('A')).unwrap(), "A\n");
    }

    #[test]
    fn sets_serialize_as_sequences() {
        let set = Value::Set(vec![Value::Int(1), Value::Int(2)]);
        assert_eq!(serde_json::to_string(&set).unwrap(), "[1,2]");
    }

    #[test]
    fn null_serializes_as_null() {
        assert_eq!(serde_json::to_string(&Value::Null).unwrap(), "null");
    }
}
