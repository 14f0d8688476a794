//! Insertion-ordered sets of unique values.
//!
//! Uniqueness is SameValueZero: `NaN` is stored once, `0` and `-0` are the
//! same member, and composite members are distinct unless they are the same
//! instance.
//!
//! # Examples
//!
//! ```rust
//! use dynwalk::value::{SetRef, Value};
//!
//! let set = SetRef::from_values([Value::from(3), Value::from(1), Value::from(3)]);
//! assert_eq!(set.len(), 2);
//! assert_eq!(set.values(), vec![Value::from(3), Value::from(1)]);
//!
//! // Insertion order, not sorted order
//! set.insert(Value::from(2));
//! assert_eq!(set.member_at(2), Some(Value::from(2)));
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use super::Value;
use super::ordered::OrderedTable;

/// A shared, interior-mutable, insertion-ordered set.
///
/// Like [`MapRef`](super::MapRef), members keep their place while an
/// iterator over the set is open.
#[derive(Clone, Default)]
pub struct SetRef(Rc<RefCell<OrderedTable<()>>>);

impl SetRef {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a set from values, dropping duplicates after their first
    /// occurrence.
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = Value>,
    {
        let set = Self::new();
        for value in values {
            set.insert(value);
        }
        set
    }

    /// Returns the number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    /// Returns `true` if the set has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if `value` is a member.
    #[must_use]
    pub fn contains(&self, value: &Value) -> bool {
        self.0.borrow().contains(value)
    }

    /// Adds a member. Returns `false` if it was already present.
    pub fn insert(&self, value: Value) -> bool {
        let mut set = self.0.borrow_mut();
        if set.contains(&value) {
            return false;
        }
        set.insert(value, ());
        true
    }

    /// Removes a member. Returns `true` if it was present.
    pub fn remove(&self, value: &Value) -> bool {
        self.0.borrow_mut().remove(value).is_some()
    }

    /// Removes every member.
    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    /// Returns the member at insertion position `position`.
    #[must_use]
    pub fn member_at(&self, position: usize) -> Option<Value> {
        self.0.borrow().iter().nth(position).map(|(member, ())| member.clone())
    }

    /// Copies out the members in insertion order.
    #[must_use]
    pub fn values(&self) -> Vec<Value> {
        self.0.borrow().iter().map(|(member, ())| member.clone()).collect()
    }

    /// Returns `true` if both handles refer to the same set.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn address(&self) -> *const () {
        Rc::as_ptr(&self.0).cast::<()>()
    }

    /// Returns the first live member at or after `slot`, with its slot.
    pub(crate) fn next_member(&self, slot: usize) -> Option<(usize, Value)> {
        self.0
            .borrow()
            .next_from(slot)
            .map(|(slot, (member, ()))| (slot, member.clone()))
    }

    pub(crate) fn open_iterator(&self) {
        self.0.borrow_mut().open_iterator();
    }

    pub(crate) fn close_iterator(&self) {
        self.0.borrow_mut().close_iterator();
    }
}

impl FromIterator<Value> for SetRef {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self::from_values(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ArrayRef;
    use rstest::rstest;

    #[rstest]
    fn test_nan_is_stored_once() {
        let set = SetRef::from_values([Value::from(f64::NAN), Value::from(f64::NAN)]);
        assert_eq!(set.len(), 1);
        assert!(set.contains(&Value::from(f64::NAN)));
    }

    #[rstest]
    fn test_signed_zeros_are_one_member() {
        let set = SetRef::from_values([Value::from(0.0), Value::from(-0.0)]);
        assert_eq!(set.len(), 1);
    }

    #[rstest]
    fn test_distinct_arrays_are_distinct_members() {
        let array = Value::from(ArrayRef::new());
        let set = SetRef::from_values([array.clone(), Value::from(ArrayRef::new()), array]);
        assert_eq!(set.len(), 2);
    }

    #[rstest]
    fn test_remove_keeps_order_of_rest() {
        let set: SetRef = (1..=4).map(Value::from).collect();
        assert!(set.remove(&Value::from(2)));
        assert!(!set.remove(&Value::from(2)));
        assert_eq!(set.values(), vec![Value::from(1), Value::from(3), Value::from(4)]);
        assert!(set.contains(&Value::from(4)));
        assert!(set.remove(&Value::from(4)));
        assert_eq!(set.len(), 2);
    }

    #[rstest]
    fn test_text_members_compare_by_content() {
        let set = SetRef::from_values([Value::from("a"), Value::from(String::from("a"))]);
        assert_eq!(set.len(), 1);
    }
}
