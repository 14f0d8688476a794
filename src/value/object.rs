//! Shared keyed objects.
//!
//! An [`ObjectRef`] holds own properties in property-key order: index keys
//! ascending, then named keys in insertion order, then symbol keys in
//! insertion order. Each property carries an `enumerable` flag. Reads fall
//! back to an optional prototype object.
//!
//! # Examples
//!
//! ```rust
//! use dynwalk::value::{ObjectRef, PropertyKey, Value};
//!
//! let prototype = ObjectRef::new();
//! prototype.set("inherited", Value::from("value"));
//!
//! let object = ObjectRef::with_prototype(&prototype);
//! object.set("b", Value::from(2));
//! object.set("1", Value::from(1));
//!
//! assert_eq!(object.get(&PropertyKey::name("inherited")), Value::from("value"));
//! assert_eq!(
//!     object.own_enumerable_keys(),
//!     vec![PropertyKey::Index(1), PropertyKey::name("b")]
//! );
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use super::{PropertyKey, Value};

/// The flavour of an object.
#[derive(Clone, Debug, Default)]
pub enum ObjectKind {
    /// A plain keyed object.
    #[default]
    Ordinary,
    /// An argument-list pseudo-array: index properties plus a
    /// non-enumerable `length`.
    Arguments,
    /// A wrapper object around a primitive value.
    Boxed(Value),
}

#[derive(Clone)]
struct Property {
    key: PropertyKey,
    value: Value,
    enumerable: bool,
}

#[derive(Default)]
struct ObjectData {
    kind: ObjectKind,
    properties: Vec<Property>,
    prototype: Option<ObjectRef>,
}

/// A shared, interior-mutable keyed object.
///
/// Cloning an `ObjectRef` clones the handle; every clone sees the same
/// properties.
#[derive(Clone, Default)]
pub struct ObjectRef(Rc<RefCell<ObjectData>>);

impl ObjectRef {
    /// Creates an empty ordinary object without a prototype.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty ordinary object whose reads fall back to
    /// `prototype`.
    #[must_use]
    pub fn with_prototype(prototype: &Self) -> Self {
        let object = Self::new();
        object.0.borrow_mut().prototype = Some(prototype.clone());
        object
    }

    /// Creates an ordinary object from enumerable properties.
    pub fn from_entries<K, I>(entries: I) -> Self
    where
        K: Into<PropertyKey>,
        I: IntoIterator<Item = (K, Value)>,
    {
        let object = Self::new();
        for (key, value) in entries {
            object.set(key, value);
        }
        object
    }

    /// Creates an argument-list pseudo-array.
    ///
    /// ```rust
    /// use dynwalk::value::{ObjectRef, PropertyKey, Value};
    ///
    /// let arguments = ObjectRef::arguments([Value::from(1), Value::from(2)]);
    /// assert_eq!(arguments.get(&PropertyKey::name("length")), Value::from(2));
    /// assert_eq!(arguments.own_enumerable_len(), 2);
    /// ```
    pub fn arguments<I>(values: I) -> Self
    where
        I: IntoIterator<Item = Value>,
    {
        let object = Self::new();
        let mut count = 0_usize;
        for (index, value) in values.into_iter().enumerate() {
            object.set(index, value);
            count = index + 1;
        }
        object.define_hidden("length", Value::from(count));
        object.0.borrow_mut().kind = ObjectKind::Arguments;
        object
    }

    /// Wraps a primitive in an object.
    ///
    /// A boxed text exposes `length` and one-unit index reads.
    #[must_use]
    pub fn boxed(primitive: Value) -> Self {
        let object = Self::new();
        object.0.borrow_mut().kind = ObjectKind::Boxed(primitive);
        object
    }

    /// Returns the object's kind.
    #[must_use]
    pub fn kind(&self) -> ObjectKind {
        self.0.borrow().kind.clone()
    }

    /// Returns `true` for argument-list pseudo-arrays.
    #[must_use]
    pub fn is_arguments(&self) -> bool {
        matches!(self.0.borrow().kind, ObjectKind::Arguments)
    }

    /// Returns the wrapped primitive of a boxed object.
    #[must_use]
    pub fn boxed_value(&self) -> Option<Value> {
        match &self.0.borrow().kind {
            ObjectKind::Boxed(primitive) => Some(primitive.clone()),
            _ => None,
        }
    }

    /// Sets an own property. A new key is enumerable; an existing key keeps
    /// its position and its enumerability.
    pub fn set(&self, key: impl Into<PropertyKey>, value: Value) {
        self.define(key.into(), value, true);
    }

    /// Sets a non-enumerable own property.
    pub fn define_hidden(&self, key: impl Into<PropertyKey>, value: Value) {
        self.define(key.into(), value, false);
    }

    fn define(&self, key: PropertyKey, value: Value, enumerable: bool) {
        let mut data = self.0.borrow_mut();
        if let Some(property) = data.properties.iter_mut().find(|property| property.key == key) {
            property.value = value;
            property.enumerable &= enumerable;
            return;
        }
        let position = insertion_point(&data.properties, &key);
        data.properties.insert(
            position,
            Property {
                key,
                value,
                enumerable,
            },
        );
    }

    /// Reads an own property.
    #[must_use]
    pub fn get_own(&self, key: &PropertyKey) -> Option<Value> {
        let data = self.0.borrow();
        if let ObjectKind::Boxed(Value::String(text)) = &data.kind {
            match key {
                PropertyKey::Index(index) => {
                    if let Some(unit) = text.code_unit_at(*index) {
                        return Some(Value::String(unit));
                    }
                }
                length if length.is_named("length") => return Some(Value::from(text.len())),
                _ => {}
            }
        }
        data.properties
            .iter()
            .find(|property| &property.key == key)
            .map(|property| property.value.clone())
    }

    /// Reads a property, consulting the prototype chain when the object
    /// has no own property `key`. Missing properties read as
    /// [`Value::Undefined`].
    #[must_use]
    pub fn get(&self, key: &PropertyKey) -> Value {
        let mut current = Some(self.clone());
        while let Some(object) = current {
            if let Some(value) = object.get_own(key) {
                return value;
            }
            current = object.prototype();
        }
        Value::Undefined
    }

    /// Returns `true` if `key` is an own property.
    #[must_use]
    pub fn has_own(&self, key: &PropertyKey) -> bool {
        self.get_own(key).is_some()
    }

    /// Removes an own property. Returns `true` if it existed.
    pub fn delete(&self, key: &PropertyKey) -> bool {
        let mut data = self.0.borrow_mut();
        let before = data.properties.len();
        data.properties.retain(|property| &property.key != key);
        data.properties.len() != before
    }

    /// Returns the own enumerable index and name keys, in property-key
    /// order. Symbol keys are not included.
    #[must_use]
    pub fn own_enumerable_keys(&self) -> Vec<PropertyKey> {
        self.0
            .borrow()
            .properties
            .iter()
            .filter(|property| property.enumerable && property.key.is_textual())
            .map(|property| property.key.clone())
            .collect()
    }

    /// Copies out the own enumerable index and name properties, in
    /// property-key order.
    #[must_use]
    pub fn own_enumerable_entries(&self) -> Vec<(PropertyKey, Value)> {
        self.0
            .borrow()
            .properties
            .iter()
            .filter(|property| property.enumerable && property.key.is_textual())
            .map(|property| (property.key.clone(), property.value.clone()))
            .collect()
    }

    /// Returns the number of own enumerable index and name keys.
    #[must_use]
    pub fn own_enumerable_len(&self) -> usize {
        self.0
            .borrow()
            .properties
            .iter()
            .filter(|property| property.enumerable && property.key.is_textual())
            .count()
    }

    /// Returns the prototype.
    #[must_use]
    pub fn prototype(&self) -> Option<Self> {
        self.0.borrow().prototype.clone()
    }

    /// Replaces the prototype.
    ///
    /// Returns `false`, leaving the object unchanged, if the new prototype
    /// chain would lead back to this object.
    ///
    /// ```rust
    /// use dynwalk::value::ObjectRef;
    ///
    /// let parent = ObjectRef::new();
    /// let child = ObjectRef::with_prototype(&parent);
    /// assert!(!parent.set_prototype(Some(&child)));
    /// assert!(parent.set_prototype(None));
    /// ```
    pub fn set_prototype(&self, prototype: Option<&Self>) -> bool {
        let mut ancestor = prototype.cloned();
        while let Some(object) = ancestor {
            if object.ptr_eq(self) {
                return false;
            }
            ancestor = object.prototype();
        }
        self.0.borrow_mut().prototype = prototype.cloned();
        true
    }

    /// Returns `true` if both handles refer to the same object.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn address(&self) -> *const () {
        Rc::as_ptr(&self.0).cast::<()>()
    }
}

fn insertion_point(properties: &[Property], key: &PropertyKey) -> usize {
    let position = match key {
        PropertyKey::Index(index) => properties.iter().position(|property| {
            !matches!(property.key, PropertyKey::Index(existing) if existing < *index)
        }),
        PropertyKey::Name(_) => properties
            .iter()
            .position(|property| matches!(property.key, PropertyKey::Symbol(_))),
        PropertyKey::Symbol(_) => None,
    };
    position.unwrap_or(properties.len())
}
