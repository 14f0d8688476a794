//! The dynamic value model.
//!
//! [`Value`] is a closed tagged union over every kind of input the crate
//! classifies, resolves paths through, and iterates:
//!
//! - primitives: [`Value::Undefined`], [`Value::Null`], booleans, IEEE-754
//!   numbers, big integers, UTF-16 [`Text`], and unique [`Symbol`]s;
//! - composites: sparse arrays ([`ArrayRef`]), keyed objects
//!   ([`ObjectRef`]), insertion-ordered maps ([`MapRef`]) and sets
//!   ([`SetRef`]), and callables ([`Function`]).
//!
//! Composites are shared handles. Cloning a composite `Value` produces a
//! second handle to the *same* instance, so identity survives cloning and
//! mutations through one handle are visible through every other. Values are
//! single-threaded: they are neither `Send` nor `Sync`. Self-referential
//! structures are allowed but leak unless the cycle is broken (see
//! [`Value`]).
//!
//! # Examples
//!
//! ```rust
//! use dynwalk::value::Value;
//!
//! let array = Value::array([Value::from(1), Value::from("two")]);
//! let alias = array.clone();
//!
//! alias.as_array().unwrap().push(Value::Null);
//! assert_eq!(array.as_array().unwrap().len(), 3);
//! assert_eq!(array, alias);
//! assert_ne!(array, Value::array([Value::from(1), Value::from("two"), Value::Null]));
//! ```

mod array;
mod function;
mod key;
mod map;
mod object;
mod ordered;
#[cfg(feature = "serde")]
mod serde_support;
mod set;
mod symbol;
mod text;

use std::fmt;

pub use array::ArrayRef;
pub use function::{Function, argument};
pub use key::{MAX_ARRAY_INDEX, PropertyKey};
pub use map::MapRef;
pub use object::{ObjectKind, ObjectRef};
pub use set::SetRef;
pub use symbol::Symbol;
pub use text::Text;

/// Nesting depth past which `Debug` output elides composite contents.
const DEBUG_DEPTH_LIMIT: usize = 4;

/// A dynamically typed value.
///
/// # Reference cycles
///
/// Composites are reference counted without a cycle collector. A
/// structure that reaches itself is never freed once the last outside
/// handle is dropped, unless the cycle is broken first:
///
/// ```rust
/// use dynwalk::value::{ObjectRef, PropertyKey, Value};
///
/// let circular = ObjectRef::new();
/// circular.set("self", Value::from(circular.clone()));
/// // ... use it ...
/// circular.delete(&PropertyKey::name("self"));
/// ```
#[derive(Clone, Default)]
pub enum Value {
    /// The absent value.
    #[default]
    Undefined,
    /// The null value.
    Null,
    /// A boolean.
    Bool(bool),
    /// A double-precision number.
    Number(f64),
    /// A big integer, bounded to `i128`.
    BigInt(i128),
    /// UTF-16 text.
    String(Text),
    /// A unique symbol.
    Symbol(Symbol),
    /// A sparse array.
    Array(ArrayRef),
    /// A keyed object.
    Object(ObjectRef),
    /// An insertion-ordered map.
    Map(MapRef),
    /// An insertion-ordered set.
    Set(SetRef),
    /// A callable.
    Function(Function),
}

static_assertions::assert_not_impl_any!(Value: Send, Sync);

impl Value {
    /// Creates a dense array value.
    pub fn array<I>(values: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        Self::Array(ArrayRef::from_values(values))
    }

    /// Creates an array value from slots, where `None` is a hole.
    #[must_use]
    pub fn sparse_array(slots: Vec<Option<Self>>) -> Self {
        Self::Array(ArrayRef::from_slots(slots))
    }

    /// Creates an ordinary object value from enumerable properties.
    pub fn object<K, I>(entries: I) -> Self
    where
        K: Into<PropertyKey>,
        I: IntoIterator<Item = (K, Self)>,
    {
        Self::Object(ObjectRef::from_entries(entries))
    }

    /// Creates a map value.
    pub fn map<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Self, Self)>,
    {
        Self::Map(MapRef::from_entries(entries))
    }

    /// Creates a set value.
    pub fn set<I>(values: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        Self::Set(SetRef::from_values(values))
    }

    /// Creates an argument-list pseudo-array value.
    pub fn arguments<I>(values: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        Self::Object(ObjectRef::arguments(values))
    }

    /// Wraps a primitive in an object.
    #[must_use]
    pub fn boxed(primitive: Self) -> Self {
        Self::Object(ObjectRef::boxed(primitive))
    }

    /// Creates a function value.
    pub fn function<F>(function: F) -> Self
    where
        F: Fn(&[Self]) -> Self + 'static,
    {
        Self::Function(Function::new(function))
    }

    /// Returns `true` for [`Value::Undefined`].
    #[must_use]
    pub const fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    /// Returns `true` for [`Value::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` for [`Value::Undefined`] and [`Value::Null`].
    #[must_use]
    pub const fn is_nullish(&self) -> bool {
        matches!(self, Self::Undefined | Self::Null)
    }

    /// Returns `true` for every non-composite value.
    #[must_use]
    pub const fn is_primitive(&self) -> bool {
        matches!(
            self,
            Self::Undefined
                | Self::Null
                | Self::Bool(_)
                | Self::Number(_)
                | Self::BigInt(_)
                | Self::String(_)
                | Self::Symbol(_)
        )
    }

    /// Returns `true` for functions.
    #[must_use]
    pub const fn is_function(&self) -> bool {
        matches!(self, Self::Function(_))
    }

    /// Returns the truthiness of the value.
    ///
    /// `undefined`, `null`, `false`, `0`, `-0`, `NaN`, `0n`, and empty text
    /// are falsy; every other value, including every composite, is truthy.
    ///
    /// ```rust
    /// use dynwalk::value::Value;
    ///
    /// assert!(!Value::from(f64::NAN).is_truthy());
    /// assert!(!Value::from("").is_truthy());
    /// assert!(Value::from(" ").is_truthy());
    /// assert!(Value::array([]).is_truthy());
    /// ```
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Undefined | Self::Null => false,
            Self::Bool(boolean) => *boolean,
            Self::Number(number) => !(number.is_nan() || *number == 0.0),
            Self::BigInt(integer) => *integer != 0,
            Self::String(text) => !text.is_empty(),
            _ => true,
        }
    }

    /// Returns a short name for the value's type, used in diagnostics.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::BigInt(_) => "bigint",
            Self::String(_) => "string",
            Self::Symbol(_) => "symbol",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
            Self::Map(_) => "map",
            Self::Set(_) => "set",
            Self::Function(_) => "function",
        }
    }

    /// Returns the boolean, if this is one.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(boolean) => Some(*boolean),
            _ => None,
        }
    }

    /// Returns the number, if this is one.
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(number) => Some(*number),
            _ => None,
        }
    }

    /// Returns the text, if this is text.
    #[must_use]
    pub const fn as_text(&self) -> Option<&Text> {
        match self {
            Self::String(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the array handle, if this is an array.
    #[must_use]
    pub const fn as_array(&self) -> Option<&ArrayRef> {
        match self {
            Self::Array(array) => Some(array),
            _ => None,
        }
    }

    /// Returns the object handle, if this is an object.
    #[must_use]
    pub const fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Self::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Returns the map handle, if this is a map.
    #[must_use]
    pub const fn as_map(&self) -> Option<&MapRef> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Returns the set handle, if this is a set.
    #[must_use]
    pub const fn as_set(&self) -> Option<&SetRef> {
        match self {
            Self::Set(set) => Some(set),
            _ => None,
        }
    }

    /// Returns the function, if this is one.
    #[must_use]
    pub const fn as_function(&self) -> Option<&Function> {
        match self {
            Self::Function(function) => Some(function),
            _ => None,
        }
    }

    /// Returns the instance address of a composite value.
    pub(crate) fn address(&self) -> Option<*const ()> {
        match self {
            Self::Array(array) => Some(array.address()),
            Self::Object(object) => Some(object.address()),
            Self::Map(map) => Some(map.address()),
            Self::Set(set) => Some(set.address()),
            Self::Function(function) => Some(function.address()),
            _ => None,
        }
    }
}

/// Formats a number the way it reads as a property name or display text.
///
/// Integral values print without a fractional part, both zeros print as
/// `0`, and the non-finite values print as `NaN`, `Infinity`, and
/// `-Infinity`.
#[must_use]
pub fn format_number(number: f64) -> String {
    if number.is_nan() {
        "NaN".to_string()
    } else if number.is_infinite() {
        (if number > 0.0 { "Infinity" } else { "-Infinity" }).to_string()
    } else if number == 0.0 {
        "0".to_string()
    } else if number.fract() == 0.0 && number.abs() < 1e21 {
        format!("{number:.0}")
    } else {
        format!("{number}")
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<bool> for Value {
    fn from(boolean: bool) -> Self {
        Self::Bool(boolean)
    }
}

impl From<f64> for Value {
    fn from(number: f64) -> Self {
        Self::Number(number)
    }
}

impl From<i32> for Value {
    fn from(number: i32) -> Self {
        Self::Number(f64::from(number))
    }
}

impl From<u32> for Value {
    fn from(number: u32) -> Self {
        Self::Number(f64::from(number))
    }
}

impl From<usize> for Value {
    #[allow(clippy::cast_precision_loss)]
    fn from(number: usize) -> Self {
        Self::Number(number as f64)
    }
}

impl From<i128> for Value {
    fn from(integer: i128) -> Self {
        Self::BigInt(integer)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Self::String(Text::from(text))
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Self::String(Text::from(text))
    }
}

impl From<Text> for Value {
    fn from(text: Text) -> Self {
        Self::String(text)
    }
}

impl From<Symbol> for Value {
    fn from(symbol: Symbol) -> Self {
        Self::Symbol(symbol)
    }
}

impl From<ArrayRef> for Value {
    fn from(array: ArrayRef) -> Self {
        Self::Array(array)
    }
}

impl From<ObjectRef> for Value {
    fn from(object: ObjectRef) -> Self {
        Self::Object(object)
    }
}

impl From<MapRef> for Value {
    fn from(map: MapRef) -> Self {
        Self::Map(map)
    }
}

impl From<SetRef> for Value {
    fn from(set: SetRef) -> Self {
        Self::Set(set)
    }
}

impl From<Function> for Value {
    fn from(function: Function) -> Self {
        Self::Function(function)
    }
}

impl From<Vec<Self>> for Value {
    fn from(values: Vec<Self>) -> Self {
        Self::array(values)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(option: Option<T>) -> Self {
        option.map_or(Self::Undefined, Into::into)
    }
}

// =============================================================================
// Formatting
// =============================================================================

impl fmt::Display for Value {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_display(self, formatter, &mut Vec::new())
    }
}

/// Arrays join their elements with `,`; nullish elements and arrays already
/// being written (cycles) contribute nothing.
fn write_display(
    value: &Value,
    formatter: &mut fmt::Formatter<'_>,
    ancestors: &mut Vec<*const ()>,
) -> fmt::Result {
    match value {
        Value::Undefined => formatter.write_str("undefined"),
        Value::Null => formatter.write_str("null"),
        Value::Bool(boolean) => write!(formatter, "{boolean}"),
        Value::Number(number) => formatter.write_str(&format_number(*number)),
        Value::BigInt(integer) => write!(formatter, "{integer}"),
        Value::String(text) => write!(formatter, "{text}"),
        Value::Symbol(symbol) => write!(formatter, "{symbol}"),
        Value::Array(array) => {
            if ancestors.contains(&array.address()) {
                return Ok(());
            }
            ancestors.push(array.address());
            for (position, element) in array.to_vec().iter().enumerate() {
                if position > 0 {
                    formatter.write_str(",")?;
                }
                if !element.is_nullish() {
                    write_display(element, formatter, ancestors)?;
                }
            }
            ancestors.pop();
            Ok(())
        }
        Value::Object(object) => match object.kind() {
            ObjectKind::Boxed(primitive) => write_display(&primitive, formatter, ancestors),
            ObjectKind::Arguments => formatter.write_str("[object Arguments]"),
            ObjectKind::Ordinary => formatter.write_str("[object Object]"),
        },
        Value::Map(_) => formatter.write_str("[object Map]"),
        Value::Set(_) => formatter.write_str("[object Set]"),
        Value::Function(_) => formatter.write_str("function"),
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_debug(self, formatter, 0)
    }
}

fn write_debug(value: &Value, formatter: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
    if depth > DEBUG_DEPTH_LIMIT && !value.is_primitive() {
        return write!(formatter, "{}(..)", value.type_name());
    }
    match value {
        Value::Undefined => formatter.write_str("Undefined"),
        Value::Null => formatter.write_str("Null"),
        Value::Bool(boolean) => write!(formatter, "Bool({boolean})"),
        Value::Number(number) => write!(formatter, "Number({number:?})"),
        Value::BigInt(integer) => write!(formatter, "BigInt({integer})"),
        Value::String(text) => write!(formatter, "String({text:?})"),
        Value::Symbol(symbol) => write!(formatter, "{symbol:?}"),
        Value::Array(array) => {
            formatter.write_str("Array[")?;
            for (position, slot) in array.to_slots().iter().enumerate() {
                if position > 0 {
                    formatter.write_str(", ")?;
                }
                match slot {
                    Some(element) => write_debug(element, formatter, depth + 1)?,
                    None => formatter.write_str("<hole>")?,
                }
            }
            formatter.write_str("]")
        }
        Value::Object(object) => {
            match object.kind() {
                ObjectKind::Ordinary => formatter.write_str("Object{")?,
                ObjectKind::Arguments => formatter.write_str("Arguments{")?,
                ObjectKind::Boxed(primitive) => {
                    formatter.write_str("Boxed(")?;
                    write_debug(&primitive, formatter, depth + 1)?;
                    formatter.write_str("){")?;
                }
            }
            for (position, (key, element)) in object.own_enumerable_entries().iter().enumerate() {
                if position > 0 {
                    formatter.write_str(", ")?;
                }
                write!(formatter, "{key}: ")?;
                write_debug(element, formatter, depth + 1)?;
            }
            formatter.write_str("}")
        }
        Value::Map(map) => {
            formatter.write_str("Map{")?;
            for (position, (key, element)) in map.entries().iter().enumerate() {
                if position > 0 {
                    formatter.write_str(", ")?;
                }
                write_debug(key, formatter, depth + 1)?;
                formatter.write_str(" => ")?;
                write_debug(element, formatter, depth + 1)?;
            }
            formatter.write_str("}")
        }
        Value::Set(set) => {
            formatter.write_str("Set{")?;
            for (position, member) in set.values().iter().enumerate() {
                if position > 0 {
                    formatter.write_str(", ")?;
                }
                write_debug(member, formatter, depth + 1)?;
            }
            formatter.write_str("}")
        }
        Value::Function(function) => write!(formatter, "{function:?}"),
    }
}
