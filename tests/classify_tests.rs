//! Integration tests for collection classification.

use dynwalk::classify::{is_array_like, is_array_like_object, is_length, sequence_length};
use dynwalk::value::{ObjectRef, Symbol, Value};
use dynwalk::{CollectionKind, classify};
use rstest::rstest;

// =============================================================================
// is_array_like_object
// =============================================================================

#[rstest]
fn test_array_is_array_like_object() {
    assert!(is_array_like_object(&Value::array([
        Value::from(1),
        Value::from(2),
        Value::from(3)
    ])));
}

#[rstest]
fn test_arguments_is_array_like_object() {
    let arguments = Value::arguments([Value::from(1), Value::from(2), Value::from(3)]);
    assert!(is_array_like_object(&arguments));
}

#[rstest]
fn test_object_with_length_and_indices() {
    let array_like = Value::object([
        ("0", Value::from("a")),
        ("1", Value::from("b")),
        ("length", Value::from(2)),
    ]);
    assert!(is_array_like_object(&array_like));
    assert_eq!(sequence_length(&array_like), Some(2));
}

#[rstest]
fn test_sparse_array_is_array_like_object() {
    let sparse = Value::sparse_array(vec![Some(Value::from(1)), None, Some(Value::from(3))]);
    assert!(is_array_like_object(&sparse));
}

#[rstest]
#[case::text(Value::from("abc"))]
#[case::function(Value::function(|_| Value::Undefined))]
#[case::no_length(Value::object([("a", Value::from(1)), ("b", Value::from(2))]))]
#[case::text_length(Value::object([("0", Value::from("a")), ("length", Value::from("2"))]))]
#[case::negative_length(Value::object([("0", Value::from("a")), ("length", Value::from(-1))]))]
#[case::fractional_length(Value::object([("0", Value::from("a")), ("length", Value::from(1.5))]))]
#[case::null(Value::Null)]
#[case::undefined(Value::Undefined)]
#[case::number(Value::from(123))]
#[case::boolean(Value::from(false))]
#[case::symbol(Value::from(Symbol::new("test")))]
#[case::bigint(Value::from(10_i128))]
fn test_is_not_array_like_object(#[case] value: Value) {
    assert!(!is_array_like_object(&value));
}

// =============================================================================
// classify
// =============================================================================

#[rstest]
#[case(Value::array([]), CollectionKind::Sequence)]
#[case(Value::arguments([]), CollectionKind::SequenceLike)]
#[case(Value::map([]), CollectionKind::Mapping)]
#[case(Value::set([]), CollectionKind::Set)]
#[case(Value::from("hello"), CollectionKind::Text)]
#[case(Value::object([("a", Value::from(1))]), CollectionKind::None)]
#[case(Value::function(|_| Value::Undefined), CollectionKind::None)]
fn test_classify(#[case] value: Value, #[case] expected: CollectionKind) {
    assert_eq!(classify(&value), expected);
}

#[rstest]
fn test_classification_is_pure() {
    let object = ObjectRef::from_entries([("length", Value::from(1))]);
    let value = Value::from(object.clone());
    assert_eq!(classify(&value), CollectionKind::SequenceLike);
    assert_eq!(classify(&value), CollectionKind::SequenceLike);

    object.set("length", Value::from("1"));
    assert_eq!(classify(&value), CollectionKind::None);
}

#[rstest]
fn test_text_is_array_like_but_not_object() {
    let text = Value::from("abc");
    assert!(is_array_like(&text));
    assert!(!is_array_like_object(&text));
    assert_eq!(sequence_length(&text), Some(3));
}

// =============================================================================
// is_length
// =============================================================================

#[rstest]
#[case(Value::from(0), true)]
#[case(Value::from(9_007_199_254_740_991.0), true)]
#[case(Value::from(9_007_199_254_740_992.0), false)]
#[case(Value::from(-0.0), true)]
#[case(Value::from(f64::NAN), false)]
#[case(Value::from(f64::INFINITY), false)]
#[case(Value::from(2_i128), false)]
#[case(Value::Null, false)]
fn test_is_length(#[case] value: Value, #[case] expected: bool) {
    assert_eq!(is_length(&value), expected);
}
