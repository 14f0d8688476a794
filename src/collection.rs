//! Collection operations over dynamic values.
//!
//! This module provides `map`, `filter`, `reduce`, and `is_empty` for any
//! [`Value`]. Each iterating operation comes in two forms:
//!
//! - a closure form (`map_with`, `filter_with`, `reduce_with`) taking a Rust
//!   closure, which cannot fail on the iteratee's type;
//! - a dynamic form (`map`, `filter`, `reduce`) taking the iteratee as a
//!   [`Value`], which must be a function.
//!
//! Iteratees receive `(value, key, collection)`; `reduce` iteratees receive
//! `(accumulator, value, key, collection)`. Entries follow the rules of
//! [`iterate`](crate::iterate()), so an iteratee may mutate the collection
//! and later entries observe the change.
//!
//! # Examples
//!
//! ```rust
//! use dynwalk::collection::{filter_with, map_with, reduce_with};
//! use dynwalk::value::Value;
//!
//! fn number(value: &Value) -> f64 {
//!     value.as_number().unwrap_or(0.0)
//! }
//!
//! let numbers = Value::array([Value::from(1), Value::from(2), Value::from(3)]);
//!
//! let doubled = map_with(&numbers, |element, _, _| Value::from(number(element) * 2.0));
//! assert_eq!(
//!     doubled.as_array().unwrap().to_vec(),
//!     vec![Value::from(2), Value::from(4), Value::from(6)]
//! );
//!
//! let odd = filter_with(&numbers, |element, _, _| number(element) % 2.0 == 1.0);
//! assert_eq!(odd.as_array().unwrap().len(), 2);
//!
//! let sum = reduce_with(
//!     &numbers,
//!     |accumulator, element, _, _| Value::from(number(&accumulator) + number(element)),
//!     Some(Value::from(0)),
//! );
//! assert_eq!(sum, Ok(Value::from(6)));
//! ```

use crate::classify::{CollectionKind, classify, sequence_length};
use crate::error::CollectionError;
use crate::iterate::Entries;
use crate::value::{ArrayRef, Function, Value};

// =============================================================================
// map
// =============================================================================

/// Builds a new array from `transform` applied to every entry.
///
/// The result is always a fresh array, even for an identity transform.
/// Holes are visited as `undefined`, and the result holds whatever the
/// transform returned for them. Non-collections produce an empty array.
pub fn map_with<F>(collection: &Value, mut transform: F) -> Value
where
    F: FnMut(&Value, &Value, &Value) -> Value,
{
    let entries = Entries::new(collection);
    let result = ArrayRef::new();
    for entry in entries {
        result.push(transform(&entry.value, &entry.key, &entry.source));
    }
    Value::Array(result)
}

/// Builds a new array from `iteratee` called on every entry.
///
/// # Errors
///
/// Returns [`CollectionError::InvalidArgument`] if `iteratee` is not a
/// function, regardless of `collection`.
///
/// # Examples
///
/// ```rust
/// use dynwalk::map;
/// use dynwalk::value::{Value, argument};
///
/// let upper = Value::function(|arguments| {
///     Value::from(argument(arguments, 0).to_string().to_uppercase())
/// });
/// let array_like = Value::object([
///     ("0", Value::from("a")),
///     ("1", Value::from("b")),
///     ("length", Value::from(2)),
/// ]);
///
/// let result = map(&array_like, &upper).unwrap();
/// assert_eq!(result.as_array().unwrap().to_vec(), vec![Value::from("A"), Value::from("B")]);
/// assert!(map(&array_like, &Value::Null).is_err());
/// ```
pub fn map(collection: &Value, iteratee: &Value) -> Result<Value, CollectionError> {
    let function = expect_function("map", "iteratee", iteratee)?;
    Ok(map_with(collection, |value, key, source| {
        function.call(&[value.clone(), key.clone(), source.clone()])
    }))
}

// =============================================================================
// filter
// =============================================================================

/// Builds a new array of the entry values for which `predicate` holds, in
/// iteration order. Non-collections produce an empty array.
pub fn filter_with<P>(collection: &Value, mut predicate: P) -> Value
where
    P: FnMut(&Value, &Value, &Value) -> bool,
{
    let entries = Entries::new(collection);
    let result = ArrayRef::new();
    for entry in entries {
        if predicate(&entry.value, &entry.key, &entry.source) {
            result.push(entry.value);
        }
    }
    Value::Array(result)
}

/// Builds a new array of the entry values for which `predicate` returns a
/// truthy value.
///
/// # Errors
///
/// Returns [`CollectionError::InvalidArgument`] if `predicate` is not a
/// function.
///
/// # Examples
///
/// ```rust
/// use dynwalk::filter;
/// use dynwalk::value::{Value, argument};
///
/// let even_index = Value::function(|arguments| {
///     Value::from(argument(arguments, 1).as_number().unwrap_or(1.0) % 2.0 == 0.0)
/// });
/// let numbers = Value::array((1..=5).map(|number| Value::from(number * 10)));
///
/// let result = filter(&numbers, &even_index).unwrap();
/// assert_eq!(
///     result.as_array().unwrap().to_vec(),
///     vec![Value::from(10), Value::from(30), Value::from(50)]
/// );
/// ```
pub fn filter(collection: &Value, predicate: &Value) -> Result<Value, CollectionError> {
    let function = expect_function("filter", "predicate", predicate)?;
    Ok(filter_with(collection, |value, key, source| {
        function
            .call(&[value.clone(), key.clone(), source.clone()])
            .is_truthy()
    }))
}

// =============================================================================
// reduce
// =============================================================================

/// Folds the entries from left to right.
///
/// Without a `seed`, the first entry's value seeds the accumulator and
/// folding starts at the second entry. A non-collection with a seed folds
/// nothing and returns the seed, except for plain objects, which are folded
/// over their own enumerable properties with the property names as keys.
///
/// # Errors
///
/// Returns [`CollectionError::EmptyReduction`] if there are no entries and
/// no seed. This includes every primitive and nullish collection.
pub fn reduce_with<F>(
    collection: &Value,
    mut combine: F,
    seed: Option<Value>,
) -> Result<Value, CollectionError>
where
    F: FnMut(Value, &Value, &Value, &Value) -> Value,
{
    let mut entries = fold_entries(collection);
    let mut accumulator = match seed {
        Some(seed) => seed,
        None => match entries.next() {
            Some(first) => first.value,
            None => {
                let error = CollectionError::EmptyReduction;
                tracing::debug!(collection = collection.type_name(), %error, "reduce failed");
                return Err(error);
            }
        },
    };
    for entry in entries {
        accumulator = combine(accumulator, &entry.value, &entry.key, &entry.source);
    }
    Ok(accumulator)
}

/// Folds the entries from left to right with a dynamic iteratee.
///
/// # Errors
///
/// Returns [`CollectionError::InvalidArgument`] if `iteratee` is not a
/// function, and [`CollectionError::EmptyReduction`] as described for
/// [`reduce_with`].
///
/// # Examples
///
/// ```rust
/// use dynwalk::{CollectionError, reduce};
/// use dynwalk::value::{Value, argument};
///
/// let sum = Value::function(|arguments| {
///     let accumulator = argument(arguments, 0).as_number().unwrap_or(0.0);
///     let element = argument(arguments, 1).as_number().unwrap_or(0.0);
///     Value::from(accumulator + element)
/// });
///
/// let object = Value::object([("a", Value::from(2)), ("b", Value::from(3)), ("c", Value::from(4))]);
/// assert_eq!(reduce(&object, &sum, None), Ok(Value::from(9)));
/// assert_eq!(reduce(&Value::array([]), &sum, Some(Value::from(0))), Ok(Value::from(0)));
/// assert_eq!(reduce(&Value::array([]), &sum, None), Err(CollectionError::EmptyReduction));
/// ```
pub fn reduce(
    collection: &Value,
    iteratee: &Value,
    seed: Option<Value>,
) -> Result<Value, CollectionError> {
    let function = expect_function("reduce", "iteratee", iteratee)?;
    reduce_with(
        collection,
        |accumulator, value, key, source| {
            function.call(&[accumulator, value.clone(), key.clone(), source.clone()])
        },
        seed,
    )
}

fn fold_entries(collection: &Value) -> Entries {
    match (classify(collection), collection) {
        (CollectionKind::None, Value::Object(object)) => Entries::own_properties(object),
        (kind, _) => Entries::with_kind(collection, kind),
    }
}

// =============================================================================
// is_empty
// =============================================================================

/// Returns `true` if `value` has no content.
///
/// | Value | Empty when |
/// |-------|------------|
/// | `null`, `undefined`, booleans, numbers, big integers, symbols, functions | always |
/// | text | it has no code units |
/// | array | it has no present elements (holes do not count) |
/// | arguments object, boxed text | its `length` is `0` |
/// | map, set | its size is `0` |
/// | any other object | it has no own enumerable properties |
///
/// # Examples
///
/// ```rust
/// use dynwalk::is_empty;
/// use dynwalk::value::{ArrayRef, Value};
///
/// assert!(is_empty(&Value::from(42)));
/// assert!(is_empty(&Value::from(ArrayRef::with_length(3))));
/// assert!(!is_empty(&Value::array([Value::Undefined])));
/// assert!(!is_empty(&Value::object([("length", Value::from(0)), ("size", Value::from(0))])));
/// ```
#[must_use]
pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::String(text) => text.is_empty(),
        Value::Array(array) => array.present_count() == 0,
        Value::Map(map) => map.is_empty(),
        Value::Set(set) => set.is_empty(),
        Value::Object(object)
            if object.is_arguments() || matches!(object.boxed_value(), Some(Value::String(_))) =>
        {
            sequence_length(value).unwrap_or(0) == 0
        }
        Value::Object(object) => object.own_enumerable_len() == 0,
        _ => true,
    }
}

fn expect_function(
    operation: &'static str,
    argument: &'static str,
    iteratee: &Value,
) -> Result<Function, CollectionError> {
    iteratee.as_function().cloned().ok_or_else(|| {
        let error = CollectionError::InvalidArgument {
            operation,
            argument,
            found: iteratee.type_name(),
        };
        tracing::debug!(%error, "iteratee rejected");
        error
    })
}
