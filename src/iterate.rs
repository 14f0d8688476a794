//! Polymorphic iteration.
//!
//! [`iterate`] yields one [`IterationEntry`] per element of any classified
//! collection:
//!
//! | Kind | Key | Value | Order |
//! |------|-----|-------|-------|
//! | `Sequence`, `SequenceLike` | index as a number | element (holes are `undefined`) | `0..length` |
//! | `Mapping` | the entry's key | the entry's value | insertion |
//! | `Set` | `undefined` | the member | insertion |
//! | `Text` | index as a number | one-code-unit text | `0..length` |
//! | `None` | | | empty |
//!
//! # Live iteration
//!
//! [`Entries`] holds a handle to the collection itself, not a copy, and
//! reads through it on every step. The number of steps is fixed when the
//! iterator is created, so iteration always terminates, but element values
//! are read as they are at the moment of the step: writes made between
//! steps are observed. No borrow of the collection is held between steps,
//! so the consumer may mutate the collection freely.
//!
//! Maps and sets are walked by table slot rather than by ordinal. Removing
//! the entry being visited, or any earlier one, does not shift the entries
//! still to come.
//!
//! # Examples
//!
//! ```rust
//! use dynwalk::iterate;
//! use dynwalk::value::Value;
//!
//! let array = Value::array([Value::from(1), Value::from(2), Value::from(3)]);
//! let mut entries = iterate(&array);
//!
//! let first = entries.next().unwrap();
//! assert_eq!(first.key, Value::from(0));
//! assert_eq!(first.value, Value::from(1));
//!
//! // A write between steps is visible to the next step.
//! array.as_array().unwrap().set(1, Value::from(20));
//! assert_eq!(entries.next().unwrap().value, Value::from(20));
//! ```

use std::iter::FusedIterator;

use crate::classify::{CollectionKind, classify, sequence_length};
use crate::value::{ArrayRef, MapRef, ObjectRef, PropertyKey, SetRef, Text, Value};

/// One step of an iteration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IterationEntry {
    /// The entry's key: an index, a map key, or `undefined` for sets.
    pub key: Value,
    /// The entry's value.
    pub value: Value,
    /// The collection being iterated (the same instance).
    pub source: Value,
    /// The ordinal of the step, starting at zero.
    pub position: usize,
}

enum Strategy {
    Sequence(ArrayRef),
    SequenceLike(ObjectRef),
    Mapping(MapRef),
    Set(SetRef),
    Text(Text),
    OwnProperties(ObjectRef, Vec<PropertyKey>),
    Empty,
}

/// A live iterator over the entries of a collection.
///
/// Created by [`iterate`], [`Value::entries`], or
/// [`Entries::own_properties`].
pub struct Entries {
    source: Value,
    strategy: Strategy,
    position: usize,
    length: usize,
    // Next table slot to read, for maps and sets.
    slot: usize,
}

impl Entries {
    /// Creates an iterator over `value`, classifying it first.
    #[must_use]
    pub fn new(value: &Value) -> Self {
        Self::with_kind(value, classify(value))
    }

    /// Creates an iterator over `value` using an already computed `kind`.
    ///
    /// A `kind` that does not match the value's variant yields an empty
    /// iterator.
    #[must_use]
    pub fn with_kind(value: &Value, kind: CollectionKind) -> Self {
        let strategy = match (kind, value) {
            (CollectionKind::Sequence, Value::Array(array)) => Strategy::Sequence(array.clone()),
            (CollectionKind::SequenceLike, Value::Object(object)) => {
                Strategy::SequenceLike(object.clone())
            }
            (CollectionKind::Mapping, Value::Map(map)) => {
                map.open_iterator();
                Strategy::Mapping(map.clone())
            }
            (CollectionKind::Set, Value::Set(set)) => {
                set.open_iterator();
                Strategy::Set(set.clone())
            }
            (CollectionKind::Text, Value::String(text)) => Strategy::Text(text.clone()),
            _ => Strategy::Empty,
        };
        let length = match &strategy {
            Strategy::Sequence(_) | Strategy::SequenceLike(_) | Strategy::Text(_) => {
                sequence_length(value).unwrap_or(0)
            }
            Strategy::Mapping(map) => map.len(),
            Strategy::Set(set) => set.len(),
            Strategy::OwnProperties(..) | Strategy::Empty => 0,
        };
        Self {
            source: value.clone(),
            strategy,
            position: 0,
            length,
            slot: 0,
        }
    }

    /// Creates an iterator over the own enumerable index and name
    /// properties of an object, in property-key order.
    ///
    /// Keys are fixed when the iterator is created and are yielded as text;
    /// values are read live, so a property deleted mid-iteration reads as
    /// `undefined`.
    ///
    /// ```rust
    /// use dynwalk::iterate::Entries;
    /// use dynwalk::value::{ObjectRef, Value};
    ///
    /// let object = ObjectRef::from_entries([("a", Value::from(1)), ("1", Value::from(2))]);
    /// let keys: Vec<Value> = Entries::own_properties(&object).map(|entry| entry.key).collect();
    /// assert_eq!(keys, vec![Value::from("1"), Value::from("a")]);
    /// ```
    #[must_use]
    pub fn own_properties(object: &ObjectRef) -> Self {
        let keys = object.own_enumerable_keys();
        let length = keys.len();
        Self {
            source: Value::Object(object.clone()),
            strategy: Strategy::OwnProperties(object.clone(), keys),
            position: 0,
            length,
            slot: 0,
        }
    }

    /// Returns the collection being iterated.
    #[must_use]
    pub const fn source(&self) -> &Value {
        &self.source
    }

    fn read(&mut self, position: usize) -> Option<(Value, Value)> {
        match &self.strategy {
            Strategy::Sequence(array) => Some((Value::from(position), array.get(position))),
            Strategy::SequenceLike(object) => Some((
                Value::from(position),
                object.get(&PropertyKey::from(position)),
            )),
            Strategy::Text(text) => Some((
                Value::from(position),
                text.code_unit_at(position)
                    .map_or(Value::Undefined, Value::String),
            )),
            Strategy::Mapping(map) => map.next_entry(self.slot).map(|(slot, key, value)| {
                self.slot = slot + 1;
                (key, value)
            }),
            Strategy::Set(set) => set.next_member(self.slot).map(|(slot, member)| {
                self.slot = slot + 1;
                (Value::Undefined, member)
            }),
            Strategy::OwnProperties(object, keys) => keys.get(position).map(|key| {
                (
                    key.to_value(),
                    object.get_own(key).unwrap_or_default(),
                )
            }),
            Strategy::Empty => None,
        }
    }
}

impl Iterator for Entries {
    type Item = IterationEntry;

    fn next(&mut self) -> Option<Self::Item> {
        if self.position >= self.length {
            return None;
        }
        let position = self.position;
        if let Some((key, value)) = self.read(position) {
            self.position += 1;
            Some(IterationEntry {
                key,
                value,
                source: self.source.clone(),
                position,
            })
        } else {
            // The collection shrank below the current position.
            self.position = self.length;
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.length - self.position;
        match self.strategy {
            Strategy::Mapping(_) | Strategy::Set(_) => (0, Some(remaining)),
            _ => (remaining, Some(remaining)),
        }
    }
}

impl FusedIterator for Entries {}

impl Drop for Entries {
    fn drop(&mut self) {
        match &self.strategy {
            Strategy::Mapping(map) => map.close_iterator(),
            Strategy::Set(set) => set.close_iterator(),
            _ => {}
        }
    }
}

impl std::fmt::Debug for Entries {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("Entries")
            .field("source", &self.source.type_name())
            .field("position", &self.position)
            .field("length", &self.length)
            .finish()
    }
}

/// Iterates over any value; non-collections yield no entries.
#[must_use]
pub fn iterate(value: &Value) -> Entries {
    Entries::new(value)
}

impl Value {
    /// Iterates over this value's entries. See [`iterate`].
    #[must_use]
    pub fn entries(&self) -> Entries {
        Entries::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn values(value: &Value) -> Vec<Value> {
        iterate(value).map(|entry| entry.value).collect()
    }

    #[rstest]
    fn test_sparse_array_visits_holes() {
        let array = Value::sparse_array(vec![Some(Value::from(1)), None, Some(Value::from(3))]);
        assert_eq!(
            values(&array),
            vec![Value::from(1), Value::Undefined, Value::from(3)]
        );
    }

    #[rstest]
    fn test_set_keys_are_undefined() {
        let set = Value::set([Value::from("a"), Value::from("b")]);
        let entries: Vec<IterationEntry> = iterate(&set).collect();
        assert!(entries.iter().all(|entry| entry.key.is_undefined()));
        assert_eq!(entries[1].position, 1);
        assert_eq!(entries[1].source, set);
    }

    #[rstest]
    fn test_text_iterates_code_units() {
        let text = Value::from("a\u{1F600}");
        assert_eq!(iterate(&text).count(), 3);
    }

    #[rstest]
    #[case(Value::Null)]
    #[case(Value::Undefined)]
    #[case(Value::from(42))]
    #[case(Value::object([("a", Value::from(1))]))]
    #[case(Value::function(|_| Value::Undefined))]
    fn test_non_collections_are_empty(#[case] value: Value) {
        assert_eq!(iterate(&value).next(), None);
    }

    #[rstest]
    fn test_shrunken_map_stops_early() {
        let map = MapRef::from_entries([
            (Value::from("a"), Value::from(1)),
            (Value::from("b"), Value::from(2)),
        ]);
        let mut entries = iterate(&Value::from(map.clone()));
        assert!(entries.next().is_some());
        map.clear();
        assert_eq!(entries.next(), None);
        assert_eq!(entries.next(), None);
    }

    #[rstest]
    fn test_shrunken_array_reads_undefined() {
        let array = ArrayRef::from_values([Value::from(1), Value::from(2)]);
        let mut entries = iterate(&Value::from(array.clone()));
        array.set_len(0);
        assert_eq!(entries.next().map(|entry| entry.value), Some(Value::Undefined));
        assert_eq!(entries.size_hint(), (1, Some(1)));
    }

    #[rstest]
    fn test_length_is_fixed_at_start() {
        let array = ArrayRef::from_values([Value::from(1)]);
        let entries = iterate(&Value::from(array.clone()));
        array.push(Value::from(2));
        assert_eq!(entries.count(), 1);
    }

    #[rstest]
    fn test_mismatched_kind_is_empty() {
        let array = Value::array([Value::from(1)]);
        assert_eq!(Entries::with_kind(&array, CollectionKind::Mapping).count(), 0);
    }
}
