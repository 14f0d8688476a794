//! The insertion-ordered hash table behind [`MapRef`](super::MapRef) and
//! [`SetRef`](super::SetRef).
//!
//! Entries live in a slot vector indexed by a hash map from key to slot.
//! While no iterator is open, removal compacts the slots right away. While
//! at least one is open, removal leaves an empty slot (a tombstone) so that
//! slot numbers held by the open iterators stay valid; the slots are
//! compacted when the last iterator closes.

// Keys hash by identity, never by their interior contents.
#![allow(clippy::mutable_key_type)]

use rustc_hash::FxHashMap;

use super::Value;

pub(super) struct OrderedTable<V> {
    slots: Vec<Option<(Value, V)>>,
    positions: FxHashMap<Value, usize>,
    open_iterators: usize,
}

impl<V> Default for OrderedTable<V> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            positions: FxHashMap::default(),
            open_iterators: 0,
        }
    }
}

impl<V> OrderedTable<V> {
    pub(super) fn len(&self) -> usize {
        self.positions.len()
    }

    pub(super) fn contains(&self, key: &Value) -> bool {
        self.positions.contains_key(key)
    }

    pub(super) fn get(&self, key: &Value) -> Option<&V> {
        let slot = *self.positions.get(key)?;
        self.slots[slot].as_ref().map(|(_, value)| value)
    }

    /// Inserts a new entry at the end, or overwrites the value of an
    /// existing one in place.
    pub(super) fn insert(&mut self, key: Value, value: V) -> Option<V> {
        if let Some(slot) = self.positions.get(&key).copied()
            && let Some((_, existing)) = &mut self.slots[slot]
        {
            return Some(std::mem::replace(existing, value));
        }
        self.positions.insert(key.clone(), self.slots.len());
        self.slots.push(Some((key, value)));
        None
    }

    pub(super) fn remove(&mut self, key: &Value) -> Option<V> {
        let slot = self.positions.remove(key)?;
        let (_, value) = self.slots[slot].take()?;
        if self.open_iterators == 0 {
            self.compact();
        }
        Some(value)
    }

    pub(super) fn clear(&mut self) {
        self.positions.clear();
        if self.open_iterators == 0 {
            self.slots.clear();
        } else {
            self.slots.iter_mut().for_each(|slot| *slot = None);
        }
    }

    /// Live entries in insertion order.
    pub(super) fn iter(&self) -> impl Iterator<Item = &(Value, V)> {
        self.slots.iter().flatten()
    }

    /// Returns the first live entry at or after slot `from`, with its slot.
    pub(super) fn next_from(&self, from: usize) -> Option<(usize, &(Value, V))> {
        self.slots
            .get(from..)?
            .iter()
            .enumerate()
            .find_map(|(offset, slot)| slot.as_ref().map(|entry| (from + offset, entry)))
    }

    pub(super) const fn open_iterator(&mut self) {
        self.open_iterators += 1;
    }

    pub(super) fn close_iterator(&mut self) {
        self.open_iterators = self.open_iterators.saturating_sub(1);
        if self.open_iterators == 0 && self.slots.len() != self.positions.len() {
            self.compact();
        }
    }

    fn compact(&mut self) {
        self.slots.retain(Option::is_some);
        for (index, (key, _)) in self.slots.iter().flatten().enumerate() {
            if let Some(slot) = self.positions.get_mut(key) {
                *slot = index;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn table(keys: &[i32]) -> OrderedTable<()> {
        let mut table = OrderedTable::default();
        for key in keys {
            table.insert(Value::from(*key), ());
        }
        table
    }

    fn keys(table: &OrderedTable<()>) -> Vec<Value> {
        table.iter().map(|(key, ())| key.clone()).collect()
    }

    #[rstest]
    fn test_remove_without_iterators_compacts() {
        let mut table = table(&[1, 2, 3]);
        table.remove(&Value::from(2));
        assert_eq!(table.slots.len(), 2);
        assert_eq!(table.next_from(1).map(|(slot, _)| slot), Some(1));
        assert!(table.contains(&Value::from(3)));
    }

    #[rstest]
    fn test_remove_with_open_iterator_leaves_tombstone() {
        let mut table = table(&[1, 2, 3]);
        table.open_iterator();
        table.remove(&Value::from(1));
        assert_eq!(table.slots.len(), 3);
        assert_eq!(table.next_from(0).map(|(slot, _)| slot), Some(1));

        table.close_iterator();
        assert_eq!(table.slots.len(), 2);
        assert_eq!(keys(&table), vec![Value::from(2), Value::from(3)]);
        assert_eq!(table.positions.get(&Value::from(3)), Some(&1));
    }

    #[rstest]
    fn test_reinsert_after_removal_goes_last() {
        let mut table = table(&[1, 2]);
        table.open_iterator();
        table.remove(&Value::from(1));
        table.insert(Value::from(1), ());
        table.close_iterator();
        assert_eq!(keys(&table), vec![Value::from(2), Value::from(1)]);
    }

    #[rstest]
    fn test_clear_with_open_iterator() {
        let mut table = table(&[1, 2]);
        table.open_iterator();
        table.clear();
        assert_eq!(table.len(), 0);
        assert!(table.next_from(0).is_none());
        table.close_iterator();
        assert!(table.slots.is_empty());
    }
}
