//! Integration tests for serde support of dynamic values.

#![cfg(feature = "serde")]

use dynwalk::value::{ArrayRef, MapRef, ObjectRef, SetRef, Symbol, Value};
use rstest::rstest;

fn to_json(value: &Value) -> String {
    serde_json::to_string(value).unwrap()
}

// =============================================================================
// Serialize
// =============================================================================

#[rstest]
#[case::undefined(Value::Undefined, "null")]
#[case::null(Value::Null, "null")]
#[case::boolean(Value::from(true), "true")]
#[case::integer(Value::from(42), "42")]
#[case::negative_zero(Value::from(-0.0), "0")]
#[case::fraction(Value::from(1.5), "1.5")]
#[case::unsafe_integer(Value::from(1e20), "1e20")]
#[case::bigint(Value::from(12_345_678_901_234_567_890_i128), "12345678901234567890")]
#[case::text(Value::from("hi"), "\"hi\"")]
#[case::symbol(Value::from(Symbol::new("s")), "null")]
#[case::function(Value::function(|_| Value::Undefined), "null")]
fn test_serialize_primitives(#[case] value: Value, #[case] expected: &str) {
    assert_eq!(to_json(&value), expected);
}

#[rstest]
fn test_serialize_sparse_array() {
    let sparse = Value::sparse_array(vec![Some(Value::from(1)), None, Some(Value::from(3))]);
    assert_eq!(to_json(&sparse), "[1,null,3]");
}

#[rstest]
fn test_serialize_object_own_enumerable_entries() {
    let prototype = ObjectRef::from_entries([("inherited", Value::from(0))]);
    let object = ObjectRef::with_prototype(&prototype);
    object.set("b", Value::from(2));
    object.set("a", Value::array([Value::from("x")]));
    object.define_hidden("hidden", Value::from(3));
    assert_eq!(to_json(&Value::from(object)), r#"{"b":2,"a":["x"]}"#);
}

#[rstest]
fn test_serialize_boxed_primitive() {
    assert_eq!(to_json(&Value::boxed(Value::from("text"))), "\"text\"");
}

#[rstest]
fn test_serialize_map_and_set() {
    let map = MapRef::from_entries([
        (Value::from("a"), Value::from(1)),
        (Value::from(2), Value::from("b")),
    ]);
    assert_eq!(to_json(&Value::from(map)), r#"[["a",1],[2,"b"]]"#);

    let set = SetRef::from_values([Value::from(3), Value::from(1), Value::from(3)]);
    assert_eq!(to_json(&Value::from(set)), "[3,1]");
}

#[rstest]
fn test_serialize_cycle_through_object_fails() {
    let object = ObjectRef::new();
    let array = ArrayRef::new();
    array.push(Value::from(object.clone()));
    object.set("items", Value::from(array));

    let error = serde_json::to_string(&Value::from(object)).unwrap_err();
    assert!(error.to_string().contains("cannot serialize a cyclic"));
}

// =============================================================================
// Deserialize
// =============================================================================

#[rstest]
fn test_deserialize_nested_json() {
    let value: Value =
        serde_json::from_str(r#"{"a":[{"b":{"c":3}}],"flag":true,"none":null,"text":"t"}"#).unwrap();
    let object = value.as_object().unwrap();

    assert_eq!(object.get(&"flag".into()), Value::from(true));
    assert_eq!(object.get(&"none".into()), Value::Null);
    assert_eq!(object.get(&"text".into()), Value::from("t"));
    assert_eq!(
        object
            .own_enumerable_keys()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>(),
        vec!["a", "flag", "none", "text"]
    );
}

#[rstest]
#[case("42", Value::from(42))]
#[case("-7", Value::from(-7))]
#[case("2.5", Value::from(2.5))]
#[case("\"x\"", Value::from("x"))]
#[case("null", Value::Null)]
fn test_deserialize_primitives(#[case] json: &str, #[case] expected: Value) {
    let value: Value = serde_json::from_str(json).unwrap();
    assert_eq!(value, expected);
}

#[rstest]
fn test_json_round_trip_is_structurally_equal() {
    let json = r#"{"list":[1,"two",null,[3]],"nested":{"k":false}}"#;
    let value: Value = serde_json::from_str(json).unwrap();
    assert_eq!(to_json(&value), json);
}

#[cfg(feature = "path")]
#[rstest]
fn test_deserialized_value_resolves_paths() {
    let value: Value = serde_json::from_str(r#"{"a":[{"b":{"c":3}}]}"#).unwrap();
    assert_eq!(dynwalk::get(&value, "a[0].b.c"), Ok(Value::from(3)));
}
