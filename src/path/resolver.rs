//! Path resolution.
//!
//! [`get_or`] walks a key list left to right, one [`get_property`] read per
//! key. The walk tolerates missing links: the first read that yields
//! `undefined`, or any read against `null`/`undefined`, ends it with the
//! caller's default. Termination depends only on the path length, so
//! circular structures are walked like any other.

use crate::error::CollectionError;
use crate::value::{PropertyKey, Value};

use super::parser::{PathExpression, parse_path};

/// Resolves `path` against `value`, with [`Value::Undefined`] as the default.
///
/// # Errors
///
/// Returns [`CollectionError::InvalidRoot`] if `value` is a boolean, number,
/// big integer, text, or symbol.
///
/// # Examples
///
/// ```rust
/// use dynwalk::path::get;
/// use dynwalk::value::{ObjectRef, Value};
///
/// let circular = ObjectRef::new();
/// circular.set("self", Value::from(circular.clone()));
/// let root = Value::from(circular);
///
/// assert_eq!(get(&root, "self.self.self").unwrap(), root);
/// assert_eq!(get(&root, "missing").unwrap(), Value::Undefined);
/// assert!(get(&Value::from(42), "a.b").is_err());
/// ```
pub fn get<P: Into<PathExpression>>(value: &Value, path: P) -> Result<Value, CollectionError> {
    get_or(value, path, Value::Undefined)
}

/// Resolves `path` against `value`, returning `default` when the path does
/// not lead to a defined value.
///
/// - a `null` or `undefined` root yields `default`;
/// - an unresolvable path or an empty key list yields `default`;
/// - `null`, `0`, `false`, and empty text at the end of the path are
///   returned as they are; only `undefined` is replaced.
///
/// # Errors
///
/// Returns [`CollectionError::InvalidRoot`] if `value` is a boolean, number,
/// big integer, text, or symbol. The root is checked before the path.
///
/// # Examples
///
/// ```rust
/// use dynwalk::path::get_or;
/// use dynwalk::value::Value;
///
/// let object = Value::object([("a", Value::from(1)), ("n", Value::Null)]);
///
/// assert_eq!(get_or(&object, "b", Value::from(42)).unwrap(), Value::from(42));
/// assert_eq!(get_or(&object, "n", Value::from(42)).unwrap(), Value::Null);
/// assert_eq!(get_or(&object, "", Value::from("d")).unwrap(), Value::from("d"));
/// assert_eq!(get_or(&Value::Null, "a", Value::from("d")).unwrap(), Value::from("d"));
/// ```
pub fn get_or<P: Into<PathExpression>>(
    value: &Value,
    path: P,
    default: Value,
) -> Result<Value, CollectionError> {
    if value.is_nullish() {
        tracing::trace!(root = value.type_name(), "nullish root, using default");
        return Ok(default);
    }
    if value.is_primitive() {
        let error = CollectionError::InvalidRoot {
            found: value.type_name(),
        };
        tracing::debug!(%error, "path resolution failed");
        return Err(error);
    }

    let Some(keys) = parse_path(path) else {
        tracing::trace!("unresolvable path, using default");
        return Ok(default);
    };
    if keys.is_empty() {
        tracing::trace!("empty path, using default");
        return Ok(default);
    }

    let mut current = value.clone();
    for (depth, key) in keys.iter().enumerate() {
        if current.is_nullish() {
            tracing::trace!(depth, %key, "nullish link, using default");
            return Ok(default);
        }
        current = get_property(&current, key);
        if current.is_undefined() {
            tracing::trace!(depth, %key, "missing link, using default");
            return Ok(default);
        }
    }
    Ok(current)
}

/// Reads a single property.
///
/// | Value | Readable keys |
/// |-------|---------------|
/// | array | indices, `length` |
/// | object | own properties, then the prototype chain |
/// | map, set | `size` |
/// | text | indices (one code unit each), `length` |
///
/// Every other read yields [`Value::Undefined`].
///
/// ```rust
/// use dynwalk::path::get_property;
/// use dynwalk::value::{PropertyKey, Value};
///
/// let text = Value::from("abc");
/// assert_eq!(get_property(&text, &PropertyKey::Index(1)), Value::from("b"));
/// assert_eq!(get_property(&text, &PropertyKey::name("length")), Value::from(3));
///
/// let set = Value::set([Value::from(1), Value::from(2)]);
/// assert_eq!(get_property(&set, &PropertyKey::name("size")), Value::from(2));
/// ```
#[must_use]
pub fn get_property(value: &Value, key: &PropertyKey) -> Value {
    match (value, key) {
        (Value::Array(array), PropertyKey::Index(index)) => array.get(*index),
        (Value::Array(array), length) if length.is_named("length") => Value::from(array.len()),
        (Value::Object(object), key) => object.get(key),
        (Value::Map(map), size) if size.is_named("size") => Value::from(map.len()),
        (Value::Set(set), size) if size.is_named("size") => Value::from(set.len()),
        (Value::String(text), PropertyKey::Index(index)) => {
            text.code_unit_at(*index).map_or(Value::Undefined, Value::String)
        }
        (Value::String(text), length) if length.is_named("length") => Value::from(text.len()),
        _ => Value::Undefined,
    }
}
