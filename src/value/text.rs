//! Immutable UTF-16 text.
//!
//! [`Text`] stores its contents as UTF-16 code units rather than UTF-8
//! bytes. Text is indexed, measured, and iterated by code unit, so a
//! character outside the Basic Multilingual Plane occupies two positions
//! and a lone surrogate is a perfectly valid value.
//!
//! # Examples
//!
//! ```rust
//! use dynwalk::value::Text;
//!
//! let text = Text::from("a😀");
//! assert_eq!(text.len(), 3);
//! assert_eq!(text.code_unit_at(0), Some(Text::from("a")));
//! assert_eq!(text.to_string(), "a😀");
//! ```

use std::fmt;
use std::rc::Rc;

/// A shared, immutable sequence of UTF-16 code units.
///
/// Cloning a `Text` is cheap: the code units are reference counted.
/// Equality and hashing compare code units, never identity.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Text(Rc<[u16]>);

impl Text {
    /// Creates a `Text` from a Rust string.
    #[must_use]
    pub fn new(source: &str) -> Self {
        Self(source.encode_utf16().collect::<Vec<_>>().into())
    }

    /// Creates a `Text` from raw UTF-16 code units.
    ///
    /// The units are not validated; unpaired surrogates are kept as-is.
    #[must_use]
    pub fn from_code_units(units: Vec<u16>) -> Self {
        Self(units.into())
    }

    /// Returns the number of UTF-16 code units.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the text has no code units.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the underlying code units.
    #[must_use]
    pub fn code_units(&self) -> &[u16] {
        &self.0
    }

    /// Returns the code unit at `index` as a one-unit `Text`.
    ///
    /// ```rust
    /// use dynwalk::value::Text;
    ///
    /// let text = Text::from("abc");
    /// assert_eq!(text.code_unit_at(1), Some(Text::from("b")));
    /// assert_eq!(text.code_unit_at(3), None);
    /// ```
    #[must_use]
    pub fn code_unit_at(&self, index: usize) -> Option<Self> {
        self.0
            .get(index)
            .map(|unit| Self::from_code_units(vec![*unit]))
    }

    /// Converts to a Rust `String`, replacing unpaired surrogates with
    /// `U+FFFD`.
    #[must_use]
    pub fn to_string_lossy(&self) -> String {
        String::from_utf16_lossy(&self.0)
    }
}

impl Default for Text {
    fn default() -> Self {
        Self::from_code_units(Vec::new())
    }
}

impl From<&str> for Text {
    fn from(source: &str) -> Self {
        Self::new(source)
    }
}

impl From<String> for Text {
    fn from(source: String) -> Self {
        Self::new(&source)
    }
}

impl PartialEq<str> for Text {
    fn eq(&self, other: &str) -> bool {
        self.0.iter().copied().eq(other.encode_utf16())
    }
}

impl PartialEq<&str> for Text {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl fmt::Display for Text {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        for decoded in char::decode_utf16(self.0.iter().copied()) {
            let character = decoded.unwrap_or(char::REPLACEMENT_CHARACTER);
            fmt::Write::write_char(formatter, character)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Text {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{:?}", self.to_string_lossy())
    }
}
