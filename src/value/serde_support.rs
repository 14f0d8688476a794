//! Serde support for [`Value`].
//!
//! Serialization maps the value model onto the serde data model:
//!
//! | Value | Serialized as |
//! |-------|---------------|
//! | `undefined`, `null`, symbols, functions | unit |
//! | booleans, big integers, text | themselves (text lossily as UTF-8) |
//! | numbers | integers when integral and safe, floats otherwise |
//! | arrays | sequences, holes as unit |
//! | objects | maps of their own enumerable properties |
//! | boxed primitives | the primitive |
//! | maps | sequences of `[key, value]` pairs |
//! | sets | sequences |
//!
//! A composite that contains itself cannot be serialized; the serializer
//! reports an error instead of recursing forever.
//!
//! Deserialization accepts JSON-like data and produces arrays, ordinary
//! objects, numbers, text, booleans, and `null`.

use std::cell::RefCell;

use serde::de::{MapAccess, SeqAccess, Visitor};
use serde::ser::{Error as _, SerializeMap, SerializeSeq};

use super::{ArrayRef, ObjectRef, Value};
use crate::classify::MAX_SAFE_INTEGER;

// =============================================================================
// Serialize
// =============================================================================

impl serde::Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let ancestors = RefCell::new(Vec::new());
        Tracked {
            value: self,
            ancestors: &ancestors,
        }
        .serialize(serializer)
    }
}

/// A value paired with the composites currently being serialized above it.
struct Tracked<'a> {
    value: &'a Value,
    ancestors: &'a RefCell<Vec<*const ()>>,
}

impl<'a> Tracked<'a> {
    const fn child(&self, value: &'a Value) -> Self {
        Self {
            value,
            ancestors: self.ancestors,
        }
    }
}

impl serde::Serialize for Tracked<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let Some(address) = self.value.address() else {
            return serialize_primitive(self.value, serializer);
        };
        if self.ancestors.borrow().contains(&address) {
            return Err(S::Error::custom(format!(
                "cannot serialize a cyclic {}",
                self.value.type_name()
            )));
        }
        self.ancestors.borrow_mut().push(address);
        let result = self.serialize_composite(serializer);
        self.ancestors.borrow_mut().pop();
        result
    }
}

impl Tracked<'_> {
    fn serialize_composite<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self.value {
            Value::Array(array) => {
                let slots = array.to_slots();
                let mut sequence = serializer.serialize_seq(Some(slots.len()))?;
                for slot in &slots {
                    match slot {
                        Some(element) => sequence.serialize_element(&self.child(element))?,
                        None => sequence.serialize_element(&())?,
                    }
                }
                sequence.end()
            }
            Value::Object(object) => {
                if let Some(primitive) = object.boxed_value() {
                    return serialize_primitive(&primitive, serializer);
                }
                let entries = object.own_enumerable_entries();
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, element) in &entries {
                    map.serialize_entry(&key.to_string(), &self.child(element))?;
                }
                map.end()
            }
            Value::Map(source) => {
                let entries = source.entries();
                let mut sequence = serializer.serialize_seq(Some(entries.len()))?;
                for (key, element) in &entries {
                    sequence.serialize_element(&(self.child(key), self.child(element)))?;
                }
                sequence.end()
            }
            Value::Set(set) => {
                let members = set.values();
                let mut sequence = serializer.serialize_seq(Some(members.len()))?;
                for member in &members {
                    sequence.serialize_element(&self.child(member))?;
                }
                sequence.end()
            }
            _ => serializer.serialize_unit(),
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn serialize_primitive<S>(value: &Value, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match value {
        Value::Bool(boolean) => serializer.serialize_bool(*boolean),
        Value::Number(number)
            if number.is_finite() && number.fract() == 0.0 && number.abs() <= MAX_SAFE_INTEGER =>
        {
            serializer.serialize_i64(*number as i64)
        }
        Value::Number(number) => serializer.serialize_f64(*number),
        Value::BigInt(integer) => serializer.serialize_i128(*integer),
        Value::String(text) => serializer.serialize_str(&text.to_string_lossy()),
        _ => serializer.serialize_unit(),
    }
}

// =============================================================================
// Deserialize
// =============================================================================

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("a JSON-like value")
    }

    fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Value::Bool(value))
    }

    #[allow(clippy::cast_precision_loss)]
    fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Value::Number(value as f64))
    }

    #[allow(clippy::cast_precision_loss)]
    fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Value::Number(value as f64))
    }

    fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Value::Number(value))
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Value::from(value))
    }

    fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Value::from(value))
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Value::Null)
    }

    fn visit_none<E>(self) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Value::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        serde::Deserialize::deserialize(deserializer)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let array = ArrayRef::new();
        while let Some(element) = seq.next_element::<Value>()? {
            array.push(element);
        }
        Ok(Value::Array(array))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let object = ObjectRef::new();
        while let Some((key, element)) = map.next_entry::<String, Value>()? {
            object.set(key, element);
        }
        Ok(Value::Object(object))
    }
}

impl<'de> serde::Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_any(ValueVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_integral_numbers_serialize_as_integers() {
        let array = Value::array([Value::from(1), Value::from(1.5), Value::from(-0.0)]);
        assert_eq!(serde_json::to_string(&array).unwrap(), "[1,1.5,0]");
    }

    #[rstest]
    fn test_cycle_is_an_error() {
        let array = ArrayRef::new();
        array.push(Value::Array(array.clone()));
        assert!(serde_json::to_string(&Value::Array(array)).is_err());
    }

    #[rstest]
    fn test_shared_non_cyclic_reference_is_fine() {
        let shared = Value::array([Value::from(1)]);
        let outer = Value::array([shared.clone(), shared]);
        assert_eq!(serde_json::to_string(&outer).unwrap(), "[[1],[1]]");
    }
}
