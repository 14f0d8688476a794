//! SameValueZero equality.
//!
//! [`eq`] is the single equality primitive of the crate. It is also what
//! `Value`'s [`PartialEq`], [`Eq`], and [`Hash`] implementations use, so
//! map keys and set members are unique under exactly the same rule.
//!
//! # Rules
//!
//! - composites (arrays, objects, maps, sets, functions) are equal only to
//!   themselves, never to a different instance with the same contents;
//! - `NaN` equals `NaN`, and `0` equals `-0`;
//! - other primitives are equal when they have the same type and value
//!   (text by code units, symbols by identity);
//! - values of different types are never equal, which includes a primitive
//!   and its boxed wrapper.
//!
//! No comparison recurses into contents, so circular structures are fine.
//!
//! # Laws
//!
//! `eq` is an equivalence relation, and
//! `eq(a, b)` implies `hash(a) == hash(b)`.
//!
//! # Examples
//!
//! ```rust
//! use dynwalk::eq;
//! use dynwalk::value::Value;
//!
//! assert!(eq(&Value::from(f64::NAN), &Value::from(f64::NAN)));
//! assert!(eq(&Value::from(0.0), &Value::from(-0.0)));
//! assert!(!eq(&Value::from(42), &Value::from("42")));
//! assert!(!eq(&Value::from("a"), &Value::boxed(Value::from("a"))));
//!
//! let object = Value::object([("a", Value::from(1))]);
//! assert!(eq(&object, &object.clone()));
//! assert!(!eq(&object, &Value::object([("a", Value::from(1))])));
//! ```

use std::hash::{Hash, Hasher};
use std::mem::discriminant;

use crate::value::Value;

/// Compares two values with SameValueZero semantics.
#[must_use]
pub fn eq(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
        (Value::Bool(left), Value::Bool(right)) => left == right,
        (Value::Number(left), Value::Number(right)) => {
            (left.is_nan() && right.is_nan()) || left == right
        }
        (Value::BigInt(left), Value::BigInt(right)) => left == right,
        (Value::String(left), Value::String(right)) => left == right,
        (Value::Symbol(left), Value::Symbol(right)) => left.ptr_eq(right),
        (Value::Array(left), Value::Array(right)) => left.ptr_eq(right),
        (Value::Object(left), Value::Object(right)) => left.ptr_eq(right),
        (Value::Map(left), Value::Map(right)) => left.ptr_eq(right),
        (Value::Set(left), Value::Set(right)) => left.ptr_eq(right),
        (Value::Function(left), Value::Function(right)) => left.ptr_eq(right),
        _ => false,
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        eq(self, other)
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        discriminant(self).hash(state);
        match self {
            Self::Undefined | Self::Null => {}
            Self::Bool(boolean) => boolean.hash(state),
            Self::Number(number) => normalized_bits(*number).hash(state),
            Self::BigInt(integer) => integer.hash(state),
            Self::String(text) => text.hash(state),
            Self::Symbol(symbol) => symbol.hash(state),
            composite => {
                if let Some(address) = composite.address() {
                    std::ptr::hash(address, state);
                }
            }
        }
    }
}

/// Collapses every `NaN` to one bit pattern and `-0` to `0`.
fn normalized_bits(number: f64) -> u64 {
    if number.is_nan() {
        f64::NAN.to_bits()
    } else if number == 0.0 {
        0
    } else {
        number.to_bits()
    }
}
