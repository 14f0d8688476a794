//! Insertion-ordered maps keyed by any value.
//!
//! Keys are compared with SameValueZero (see [`crate::equality`]): `NaN`
//! finds `NaN`, `-0` finds `0`, and composite keys match only themselves.
//!
//! # Time Complexity
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | `get`     | O(1)       |
//! | `insert`  | O(1)       |
//! | `remove`  | O(n), O(1) while an iterator is open |
//! | `entry_at`| O(n)       |

use std::cell::RefCell;
use std::rc::Rc;

use super::Value;
use super::ordered::OrderedTable;

/// A shared, interior-mutable, insertion-ordered map.
///
/// Entries keep their place when an iterator from
/// [`iterate`](crate::iterate()) removes them mid-walk, so removing the
/// entry being visited never causes a later entry to be skipped.
///
/// # Examples
///
/// ```rust
/// use dynwalk::value::{MapRef, Value};
///
/// let map = MapRef::new();
/// map.insert(Value::from("b"), Value::from(2));
/// map.insert(Value::from("a"), Value::from(1));
/// map.insert(Value::from(f64::NAN), Value::from("nan"));
///
/// assert_eq!(map.get(&Value::from(f64::NAN)), Some(Value::from("nan")));
/// assert_eq!(map.keys(), vec![Value::from("b"), Value::from("a"), Value::from(f64::NAN)]);
/// ```
#[derive(Clone, Default)]
pub struct MapRef(Rc<RefCell<OrderedTable<Value>>>);

impl MapRef {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a map from key-value pairs; later duplicates overwrite
    /// earlier values but keep the first position.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Value, Value)>,
    {
        let map = Self::new();
        for (key, value) in entries {
            map.insert(key, value);
        }
        map
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    /// Returns `true` if the map has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Looks up a key.
    #[must_use]
    pub fn get(&self, key: &Value) -> Option<Value> {
        self.0.borrow().get(key).cloned()
    }

    /// Returns `true` if the key is present.
    #[must_use]
    pub fn contains_key(&self, key: &Value) -> bool {
        self.0.borrow().contains(key)
    }

    /// Inserts or overwrites an entry, returning the previous value.
    pub fn insert(&self, key: Value, value: Value) -> Option<Value> {
        self.0.borrow_mut().insert(key, value)
    }

    /// Removes an entry, returning its value.
    pub fn remove(&self, key: &Value) -> Option<Value> {
        self.0.borrow_mut().remove(key)
    }

    /// Removes every entry.
    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    /// Returns the entry at insertion position `position`.
    #[must_use]
    pub fn entry_at(&self, position: usize) -> Option<(Value, Value)> {
        self.0.borrow().iter().nth(position).cloned()
    }

    /// Copies out the keys in insertion order.
    #[must_use]
    pub fn keys(&self) -> Vec<Value> {
        self.0.borrow().iter().map(|(key, _)| key.clone()).collect()
    }

    /// Copies out the entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> Vec<(Value, Value)> {
        self.0.borrow().iter().cloned().collect()
    }

    /// Returns `true` if both handles refer to the same map.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn address(&self) -> *const () {
        Rc::as_ptr(&self.0).cast::<()>()
    }

    /// Returns the first live entry at or after `slot`, with its slot.
    pub(crate) fn next_entry(&self, slot: usize) -> Option<(usize, Value, Value)> {
        self.0
            .borrow()
            .next_from(slot)
            .map(|(slot, (key, value))| (slot, key.clone(), value.clone()))
    }

    pub(crate) fn open_iterator(&self) {
        self.0.borrow_mut().open_iterator();
    }

    pub(crate) fn close_iterator(&self) {
        self.0.borrow_mut().close_iterator();
    }
}

impl FromIterator<(Value, Value)> for MapRef {
    fn from_iter<I: IntoIterator<Item = (Value, Value)>>(iter: I) -> Self {
        Self::from_entries(iter)
    }
}
