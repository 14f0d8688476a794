//! Property keys.
//!
//! A [`PropertyKey`] names a single property of a composite value: an
//! integer index, a textual name, or a [`Symbol`]. Names that spell a
//! canonical array index (`"0"`, `"17"`, but not `"01"` or `"-1"`)
//! normalize to [`PropertyKey::Index`], so `"0"` and `0` address the same
//! slot.
//!
//! # Examples
//!
//! ```rust
//! use dynwalk::value::PropertyKey;
//!
//! assert_eq!(PropertyKey::from("3"), PropertyKey::Index(3));
//! assert_eq!(PropertyKey::from("03"), PropertyKey::name("03"));
//! assert_eq!(PropertyKey::from(3_usize).to_string(), "3");
//! ```

use std::fmt;
use std::rc::Rc;

use super::{Symbol, Text, Value, format_number};

/// The largest integer that is a valid array index.
pub const MAX_ARRAY_INDEX: usize = 4_294_967_294;

/// The key of a single property.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum PropertyKey {
    /// An integer index.
    Index(usize),
    /// A textual name that is not a canonical index.
    Name(Rc<str>),
    /// A symbol.
    Symbol(Symbol),
}

impl PropertyKey {
    /// Creates a key from a name, normalizing canonical indices.
    #[must_use]
    pub fn name(name: &str) -> Self {
        canonical_index(name).map_or_else(|| Self::Name(Rc::from(name)), Self::Index)
    }

    /// Returns the index if this key is an index key.
    #[must_use]
    pub const fn as_index(&self) -> Option<usize> {
        match self {
            Self::Index(index) => Some(*index),
            _ => None,
        }
    }

    /// Returns `true` for index and name keys, `false` for symbols.
    #[must_use]
    pub const fn is_textual(&self) -> bool {
        !matches!(self, Self::Symbol(_))
    }

    /// Returns `true` if this is the name `name`.
    #[must_use]
    pub fn is_named(&self, name: &str) -> bool {
        matches!(self, Self::Name(own) if &**own == name)
    }

    /// Converts the key into a value: text for indices and names, the
    /// symbol itself for symbol keys.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Symbol(symbol) => Value::Symbol(symbol.clone()),
            textual => Value::String(Text::from(textual.to_string())),
        }
    }

    /// Converts an arbitrary value into a key.
    ///
    /// Text is treated as a name, symbols stay symbols, integral numbers in
    /// index range become indices, and anything else is keyed by its
    /// textual form.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Symbol(symbol) => Self::Symbol(symbol.clone()),
            Value::String(text) => Self::name(&text.to_string_lossy()),
            Value::Number(number) => Self::name(&format_number(*number)),
            other => Self::name(&other.to_string()),
        }
    }
}

fn canonical_index(name: &str) -> Option<usize> {
    let bytes = name.as_bytes();
    let well_formed = !bytes.is_empty()
        && bytes.iter().all(u8::is_ascii_digit)
        && (bytes.len() == 1 || bytes[0] != b'0');
    if !well_formed {
        return None;
    }
    name.parse::<usize>()
        .ok()
        .filter(|index| *index <= MAX_ARRAY_INDEX)
}

impl From<&str> for PropertyKey {
    fn from(name: &str) -> Self {
        Self::name(name)
    }
}

impl From<String> for PropertyKey {
    fn from(name: String) -> Self {
        Self::name(&name)
    }
}

impl From<usize> for PropertyKey {
    fn from(index: usize) -> Self {
        if index <= MAX_ARRAY_INDEX {
            Self::Index(index)
        } else {
            Self::Name(Rc::from(index.to_string()))
        }
    }
}

impl From<Symbol> for PropertyKey {
    fn from(symbol: Symbol) -> Self {
        Self::Symbol(symbol)
    }
}

impl From<&Value> for PropertyKey {
    fn from(value: &Value) -> Self {
        Self::from_value(value)
    }
}

impl fmt::Display for PropertyKey {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(index) => write!(formatter, "{index}"),
            Self::Name(name) => formatter.write_str(name),
            Self::Symbol(symbol) => write!(formatter, "{symbol}"),
        }
    }
}

impl fmt::Debug for PropertyKey {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(index) => write!(formatter, "Index({index})"),
            Self::Name(name) => write!(formatter, "Name({name:?})"),
            Self::Symbol(symbol) => write!(formatter, "Symbol({symbol:?})"),
        }
    }
}
