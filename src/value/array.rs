//! Shared sparse arrays.

use std::cell::RefCell;
use std::rc::Rc;

use super::Value;

/// A shared, interior-mutable, possibly sparse array.
///
/// Each slot is either present or a *hole*. Reading a hole, or reading past
/// the end, yields [`Value::Undefined`]; holes still count toward
/// [`len`](Self::len).
///
/// Cloning an `ArrayRef` clones the handle, not the elements: both handles
/// observe the same mutations.
///
/// # Examples
///
/// ```rust
/// use dynwalk::value::{ArrayRef, Value};
///
/// let array = ArrayRef::from_slots(vec![Some(Value::from(1)), None, Some(Value::from(3))]);
/// assert_eq!(array.len(), 3);
/// assert_eq!(array.get(1), Value::Undefined);
/// assert!(!array.has(1));
/// assert_eq!(array.present_count(), 2);
///
/// let alias = array.clone();
/// alias.set(1, Value::from(2));
/// assert_eq!(array.get(1), Value::from(2));
/// ```
#[derive(Clone, Default)]
pub struct ArrayRef(Rc<RefCell<Vec<Option<Value>>>>);

impl ArrayRef {
    /// Creates an empty array.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a dense array from values.
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = Value>,
    {
        Self::from_slots(values.into_iter().map(Some).collect())
    }

    /// Creates an array from slots, where `None` is a hole.
    #[must_use]
    pub fn from_slots(slots: Vec<Option<Value>>) -> Self {
        Self(Rc::new(RefCell::new(slots)))
    }

    /// Creates an array of `length` holes.
    #[must_use]
    pub fn with_length(length: usize) -> Self {
        Self::from_slots(vec![None; length])
    }

    /// Returns the length, holes included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    /// Returns `true` if the length is zero.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reads the element at `index`; holes and out-of-range reads yield
    /// [`Value::Undefined`].
    #[must_use]
    pub fn get(&self, index: usize) -> Value {
        self.0
            .borrow()
            .get(index)
            .and_then(Clone::clone)
            .unwrap_or_default()
    }

    /// Returns `true` if `index` holds a present element.
    #[must_use]
    pub fn has(&self, index: usize) -> bool {
        matches!(self.0.borrow().get(index), Some(Some(_)))
    }

    /// Writes `value` at `index`, growing the array with holes if needed.
    pub fn set(&self, index: usize, value: Value) {
        let mut slots = self.0.borrow_mut();
        if index >= slots.len() {
            slots.resize(index + 1, None);
        }
        slots[index] = Some(value);
    }

    /// Appends a value.
    pub fn push(&self, value: Value) {
        self.0.borrow_mut().push(Some(value));
    }

    /// Turns the slot at `index` into a hole. Returns `true` if an element
    /// was removed.
    pub fn delete(&self, index: usize) -> bool {
        self.0
            .borrow_mut()
            .get_mut(index)
            .and_then(Option::take)
            .is_some()
    }

    /// Sets the length, truncating or padding with holes.
    pub fn set_len(&self, length: usize) {
        self.0.borrow_mut().resize(length, None);
    }

    /// Returns the number of present (non-hole) elements.
    #[must_use]
    pub fn present_count(&self) -> usize {
        self.0.borrow().iter().filter(|slot| slot.is_some()).count()
    }

    /// Copies the elements out, with holes as [`Value::Undefined`].
    #[must_use]
    pub fn to_vec(&self) -> Vec<Value> {
        self.0
            .borrow()
            .iter()
            .map(|slot| slot.clone().unwrap_or_default())
            .collect()
    }

    /// Copies the slots out, holes included.
    #[must_use]
    pub fn to_slots(&self) -> Vec<Option<Value>> {
        self.0.borrow().clone()
    }

    /// Returns `true` if both handles refer to the same array.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn address(&self) -> *const () {
        Rc::as_ptr(&self.0).cast::<()>()
    }
}

impl FromIterator<Value> for ArrayRef {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self::from_values(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_with_length_is_all_holes() {
        let array = ArrayRef::with_length(3);
        assert_eq!(array.len(), 3);
        assert_eq!(array.present_count(), 0);
        assert_eq!(array.get(0), Value::Undefined);
    }

    #[rstest]
    fn test_set_past_end_pads_with_holes() {
        let array = ArrayRef::new();
        array.set(2, Value::from(9));
        assert_eq!(array.len(), 3);
        assert!(!array.has(0));
        assert!(array.has(2));
    }

    #[rstest]
    fn test_delete_punches_hole() {
        let array = ArrayRef::from_values([Value::from(1), Value::from(2)]);
        assert!(array.delete(0));
        assert!(!array.delete(0));
        assert_eq!(array.len(), 2);
        assert_eq!(array.present_count(), 1);
    }

    #[rstest]
    fn test_set_len_truncates() {
        let array = ArrayRef::from_values([Value::from(1), Value::from(2)]);
        array.set_len(1);
        assert_eq!(array.to_vec(), vec![Value::from(1)]);
    }

    #[rstest]
    fn test_present_undefined_is_not_a_hole() {
        let array = ArrayRef::from_values([Value::Undefined]);
        assert!(array.has(0));
        assert_eq!(array.present_count(), 1);
    }
}
