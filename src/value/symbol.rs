//! Unique symbols.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

#[derive(Debug)]
struct SymbolData {
    description: Option<String>,
}

/// A unique identity token with an optional description.
///
/// Two symbols are equal only if they are clones of the same symbol;
/// the description plays no part in equality.
///
/// # Examples
///
/// ```rust
/// use dynwalk::value::Symbol;
///
/// let symbol = Symbol::new("key");
/// assert_eq!(symbol, symbol.clone());
/// assert_ne!(symbol, Symbol::new("key"));
/// ```
#[derive(Clone)]
pub struct Symbol(Rc<SymbolData>);

impl Symbol {
    /// Creates a fresh symbol with a description.
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self(Rc::new(SymbolData {
            description: Some(description.into()),
        }))
    }

    /// Creates a fresh symbol without a description.
    #[must_use]
    pub fn anonymous() -> Self {
        Self(Rc::new(SymbolData { description: None }))
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.0.description.as_deref()
    }

    /// Returns `true` if both handles refer to the same symbol.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Symbol {}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(Rc::as_ptr(&self.0), state);
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "Symbol({})", self.description().unwrap_or(""))
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, formatter)
    }
}
