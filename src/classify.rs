//! Collection classification.
//!
//! [`classify`] sorts every [`Value`] into exactly one [`CollectionKind`].
//! The decision depends only on the value's current shape (its variant and,
//! for objects, its `length` property) and is recomputed on every call.
//!
//! | Kind | Values |
//! |------|--------|
//! | `Sequence` | arrays |
//! | `SequenceLike` | non-function objects whose `length` is a valid length |
//! | `Mapping` | maps |
//! | `Set` | sets |
//! | `Text` | text |
//! | `None` | everything else |
//!
//! # Examples
//!
//! ```rust
//! use dynwalk::{CollectionKind, classify};
//! use dynwalk::value::Value;
//!
//! assert_eq!(classify(&Value::array([])), CollectionKind::Sequence);
//! assert_eq!(
//!     classify(&Value::object([("0", Value::from("a")), ("length", Value::from(1))])),
//!     CollectionKind::SequenceLike
//! );
//! assert_eq!(classify(&Value::object([("length", Value::from("2"))])), CollectionKind::None);
//! assert_eq!(classify(&Value::from("abc")), CollectionKind::Text);
//! assert_eq!(classify(&Value::Null), CollectionKind::None);
//! ```

use crate::value::{PropertyKey, Value};

/// The largest integer a length may take, `2^53 - 1`.
pub const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// The collection kind of a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    /// A native array.
    Sequence,
    /// An object with integer-keyed elements and a valid `length`.
    SequenceLike,
    /// An insertion-ordered map.
    Mapping,
    /// An insertion-ordered set.
    Set,
    /// UTF-16 text.
    Text,
    /// Not a collection.
    None,
}

impl CollectionKind {
    /// Returns `true` for every kind except [`CollectionKind::None`].
    #[must_use]
    pub const fn is_collection(self) -> bool {
        !matches!(self, Self::None)
    }

    /// Returns `true` for the kinds whose entries are keyed by position:
    /// sequences, sequence-likes, and text.
    #[must_use]
    pub const fn is_indexed(self) -> bool {
        matches!(self, Self::Sequence | Self::SequenceLike | Self::Text)
    }
}

/// Classifies a value.
///
/// Never fails; anything unrecognised is [`CollectionKind::None`].
#[must_use]
pub fn classify(value: &Value) -> CollectionKind {
    let kind = match value {
        Value::Array(_) => CollectionKind::Sequence,
        Value::Map(_) => CollectionKind::Mapping,
        Value::Set(_) => CollectionKind::Set,
        Value::String(_) => CollectionKind::Text,
        Value::Object(_) if object_length(value).is_some() => CollectionKind::SequenceLike,
        _ => CollectionKind::None,
    };
    tracing::trace!(value_type = value.type_name(), ?kind, "classified value");
    kind
}

/// Returns `true` if `value` is a valid length: a non-negative integral
/// number no greater than [`MAX_SAFE_INTEGER`].
///
/// ```rust
/// use dynwalk::classify::is_length;
/// use dynwalk::value::Value;
///
/// assert!(is_length(&Value::from(0)));
/// assert!(is_length(&Value::from(3)));
/// assert!(!is_length(&Value::from(-1)));
/// assert!(!is_length(&Value::from(1.5)));
/// assert!(!is_length(&Value::from(f64::INFINITY)));
/// assert!(!is_length(&Value::from("2")));
/// ```
#[must_use]
pub fn is_length(value: &Value) -> bool {
    value.as_number().is_some_and(|number| {
        number.is_finite() && number >= 0.0 && number.fract() == 0.0 && number <= MAX_SAFE_INTEGER
    })
}

/// Returns the number of positions of an indexed value: the length of an
/// array, the `length` of a sequence-like, or the code-unit count of text.
#[must_use]
pub fn sequence_length(value: &Value) -> Option<usize> {
    match value {
        Value::Array(array) => Some(array.len()),
        Value::String(text) => Some(text.len()),
        Value::Object(_) => object_length(value),
        _ => None,
    }
}

/// Returns `true` for sequences, sequence-likes, and text.
#[must_use]
pub fn is_array_like(value: &Value) -> bool {
    classify(value).is_indexed()
}

/// Returns `true` for sequences and sequence-likes, but not text.
///
/// ```rust
/// use dynwalk::classify::is_array_like_object;
/// use dynwalk::value::Value;
///
/// assert!(is_array_like_object(&Value::array([Value::from(1)])));
/// assert!(is_array_like_object(&Value::arguments([Value::from(1)])));
/// assert!(!is_array_like_object(&Value::from("abc")));
/// assert!(!is_array_like_object(&Value::function(|_| Value::Undefined)));
/// ```
#[must_use]
pub fn is_array_like_object(value: &Value) -> bool {
    matches!(
        classify(value),
        CollectionKind::Sequence | CollectionKind::SequenceLike
    )
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn object_length(value: &Value) -> Option<usize> {
    let object = value.as_object()?;
    let length = object.get(&PropertyKey::name("length"));
    is_length(&length)
        .then(|| length.as_number())
        .flatten()
        .map(|number| number as usize)
}
