//! Path expression parsing.
//!
//! [`tokenize`] turns dotted and bracketed text into an ordered list of
//! [`PropertyKey`]s:
//!
//! - `.` separates names; empty segments are kept as empty names
//!   (`"a..b"` is `a`, ``, `b`);
//! - `[...]` holds a bare key (`[0]`, `[name]`) or a quoted one
//!   (`['a.b']`, `["x\"y"]`) where `\` escapes the next character;
//! - an unterminated bracket or quote makes the rest of the text part of
//!   the current name (`"a[0"` is the single name `a[0`).
//!
//! Keys that spell a canonical array index normalize to
//! [`PropertyKey::Index`].
//!
//! # Examples
//!
//! ```rust
//! use dynwalk::path::tokenize;
//! use dynwalk::value::PropertyKey;
//!
//! let keys = tokenize("a[0].b['c.d']");
//! assert_eq!(
//!     keys.as_slice(),
//!     &[
//!         PropertyKey::name("a"),
//!         PropertyKey::Index(0),
//!         PropertyKey::name("b"),
//!         PropertyKey::name("c.d"),
//!     ]
//! );
//! assert!(tokenize("").is_empty());
//! ```

use smallvec::SmallVec;

use crate::value::{PropertyKey, Symbol, Value};

/// An owned, ordered list of property keys.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PathKeys(SmallVec<[PropertyKey; 4]>);

impl PathKeys {
    /// Creates an empty key list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys.
    pub fn iter(&self) -> std::slice::Iter<'_, PropertyKey> {
        self.0.iter()
    }

    /// Returns the keys as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[PropertyKey] {
        &self.0
    }

    fn push(&mut self, key: PropertyKey) {
        self.0.push(key);
    }
}

impl FromIterator<PropertyKey> for PathKeys {
    fn from_iter<I: IntoIterator<Item = PropertyKey>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for PathKeys {
    type Item = PropertyKey;
    type IntoIter = smallvec::IntoIter<[PropertyKey; 4]>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a PathKeys {
    type Item = &'a PropertyKey;
    type IntoIter = std::slice::Iter<'a, PropertyKey>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// A path as given by a caller.
///
/// Text is parsed with [`tokenize`]; explicit key lists are used unchanged,
/// without re-parsing their entries. A path built from a value that cannot
/// name a property (a number, boolean, null, ...) is
/// [`PathExpression::Unresolvable`] and resolves as "not found".
///
/// # Examples
///
/// ```rust
/// use dynwalk::path::{PathExpression, parse_path};
/// use dynwalk::value::{PropertyKey, Value};
///
/// // An explicit key list is not split on dots.
/// let keys = parse_path(PathExpression::keys(["a.b"])).unwrap();
/// assert_eq!(keys.as_slice(), &[PropertyKey::name("a.b")]);
///
/// assert!(parse_path(&Value::from(42)).is_none());
/// assert!(parse_path(&Value::Null).is_none());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathExpression {
    /// Dotted and bracketed text.
    Text(String),
    /// An explicit list of keys.
    Keys(Vec<PropertyKey>),
    /// Something that does not name a path.
    Unresolvable,
}

impl PathExpression {
    /// Creates an explicit key-list path.
    pub fn keys<K, I>(keys: I) -> Self
    where
        K: Into<PropertyKey>,
        I: IntoIterator<Item = K>,
    {
        Self::Keys(keys.into_iter().map(Into::into).collect())
    }
}

impl From<&str> for PathExpression {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for PathExpression {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&String> for PathExpression {
    fn from(text: &String) -> Self {
        Self::Text(text.clone())
    }
}

impl<K: Into<PropertyKey>> From<Vec<K>> for PathExpression {
    fn from(keys: Vec<K>) -> Self {
        Self::keys(keys)
    }
}

impl<K: Into<PropertyKey>, const N: usize> From<[K; N]> for PathExpression {
    fn from(keys: [K; N]) -> Self {
        Self::keys(keys)
    }
}

impl From<PropertyKey> for PathExpression {
    fn from(key: PropertyKey) -> Self {
        Self::Keys(vec![key])
    }
}

impl From<Symbol> for PathExpression {
    fn from(symbol: Symbol) -> Self {
        Self::Keys(vec![PropertyKey::Symbol(symbol)])
    }
}

impl From<PathKeys> for PathExpression {
    fn from(keys: PathKeys) -> Self {
        Self::Keys(keys.into_iter().collect())
    }
}

impl From<&Value> for PathExpression {
    fn from(value: &Value) -> Self {
        match value {
            Value::String(text) => Self::Text(text.to_string_lossy()),
            Value::Symbol(symbol) => Self::from(symbol.clone()),
            Value::Array(array) => Self::Keys(
                array
                    .to_vec()
                    .iter()
                    .map(PropertyKey::from_value)
                    .collect(),
            ),
            _ => Self::Unresolvable,
        }
    }
}

impl From<Value> for PathExpression {
    fn from(value: Value) -> Self {
        Self::from(&value)
    }
}

/// Converts a path expression into keys.
///
/// Returns `None` for [`PathExpression::Unresolvable`].
pub fn parse_path<P: Into<PathExpression>>(path: P) -> Option<PathKeys> {
    match path.into() {
        PathExpression::Text(text) => Some(tokenize(&text)),
        PathExpression::Keys(keys) => Some(keys.into_iter().collect()),
        PathExpression::Unresolvable => None,
    }
}

/// Splits path text into keys.
#[must_use]
pub fn tokenize(path: &str) -> PathKeys {
    let mut keys = PathKeys::new();
    if path.is_empty() {
        return keys;
    }

    let mut current = String::new();
    // Set right after a bracket segment, so `a[0].b` does not produce an
    // empty name between `]` and `.`.
    let mut after_bracket = false;
    let mut cursor = 0;

    while let Some(character) = path[cursor..].chars().next() {
        match character {
            '.' => {
                if !(after_bracket && current.is_empty()) {
                    keys.push(PropertyKey::name(&current));
                }
                current.clear();
                after_bracket = false;
                cursor += 1;
            }
            '[' => {
                if let Some((key, consumed)) = read_bracket(&path[cursor + 1..]) {
                    if !current.is_empty() {
                        keys.push(PropertyKey::name(&current));
                        current.clear();
                    }
                    keys.push(key);
                    after_bracket = true;
                    cursor += 1 + consumed;
                } else {
                    current.push_str(&path[cursor..]);
                    after_bracket = false;
                    cursor = path.len();
                }
            }
            other => {
                current.push(other);
                after_bracket = false;
                cursor += other.len_utf8();
            }
        }
    }

    if !(after_bracket && current.is_empty()) {
        keys.push(PropertyKey::name(&current));
    }
    keys
}

/// Reads one bracket segment from the text following `[`.
///
/// Returns the key and the number of bytes consumed, closing `]` included,
/// or `None` if the segment is not terminated.
fn read_bracket(rest: &str) -> Option<(PropertyKey, usize)> {
    let mut characters = rest.char_indices();
    match characters.next()? {
        (_, quote @ ('\'' | '"')) => {
            let mut name = String::new();
            let mut escaped = false;
            for (offset, character) in characters {
                if escaped {
                    name.push(character);
                    escaped = false;
                } else if character == '\\' {
                    escaped = true;
                } else if character == quote {
                    let after_quote = offset + 1;
                    return rest[after_quote..]
                        .starts_with(']')
                        .then(|| (PropertyKey::name(&name), after_quote + 1));
                } else {
                    name.push(character);
                }
            }
            None
        }
        _ => {
            let end = rest.find(']')?;
            Some((PropertyKey::name(&rest[..end]), end + 1))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn names(keys: &PathKeys) -> Vec<String> {
        keys.iter().map(ToString::to_string).collect()
    }

    #[rstest]
    #[case("a", &["a"])]
    #[case("a.b.c", &["a", "b", "c"])]
    #[case("a[0].b.c", &["a", "0", "b", "c"])]
    #[case("a[0][1]", &["a", "0", "1"])]
    #[case("[0]", &["0"])]
    #[case("a..b", &["a", "", "b"])]
    #[case(".a", &["", "a"])]
    #[case("a.", &["a", ""])]
    #[case("a['b.c']", &["a", "b.c"])]
    #[case("a[\"b]c\"]", &["a", "b]c"])]
    #[case("a['it\\'s']", &["a", "it's"])]
    #[case("a[b]", &["a", "b"])]
    #[case("a[0", &["a[0"])]
    #[case("a['b]", &["a['b]"])]
    #[case("a[0][1", &["a", "0", "[1"])]
    #[case("ü.ö", &["ü", "ö"])]
    fn test_tokenize(#[case] path: &str, #[case] expected: &[&str]) {
        assert_eq!(names(&tokenize(path)), expected);
    }

    #[rstest]
    fn test_bracket_index_normalizes() {
        let keys = tokenize("a[3]");
        assert_eq!(keys.as_slice()[1], PropertyKey::Index(3));
        let keys = tokenize("a[03]");
        assert_eq!(keys.as_slice()[1], PropertyKey::name("03"));
    }

    #[rstest]
    fn test_empty_text_is_empty_list() {
        assert_eq!(parse_path(""), Some(PathKeys::new()));
    }

    #[rstest]
    fn test_key_list_is_not_reparsed() {
        let keys = parse_path(vec!["a[0]", "b.c"]).unwrap_or_default();
        assert_eq!(names(&keys), vec!["a[0]", "b.c"]);
    }

    #[rstest]
    #[case(Value::from(42))]
    #[case(Value::from(true))]
    #[case(Value::Null)]
    #[case(Value::Undefined)]
    #[case(Value::object([("a", Value::from(1))]))]
    fn test_unresolvable_values(#[case] path: Value) {
        assert_eq!(parse_path(&path), None);
    }

    #[rstest]
    fn test_value_array_becomes_key_list() {
        let path = Value::array([Value::from("a"), Value::from(0), Value::from("b.c")]);
        let keys = parse_path(&path).unwrap_or_default();
        assert_eq!(
            keys.as_slice(),
            &[
                PropertyKey::name("a"),
                PropertyKey::Index(0),
                PropertyKey::name("b.c"),
            ]
        );
    }

    #[rstest]
    fn test_symbol_is_single_key() {
        let symbol = Symbol::new("key");
        let keys = parse_path(&Value::from(symbol.clone())).unwrap_or_default();
        assert_eq!(keys.as_slice(), &[PropertyKey::Symbol(symbol)]);
    }
}
