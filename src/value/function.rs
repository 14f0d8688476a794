//! Callable values.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use super::Value;

type Callable = dyn Fn(&[Value]) -> Value;

/// A shared callable value.
///
/// A `Function` receives its arguments as a slice. Callers may pass fewer
/// arguments than the function reads; use [`argument`] to read a position
/// that may be missing.
///
/// Functions compare by identity.
///
/// # Examples
///
/// ```rust
/// use dynwalk::value::{Function, Value, argument};
///
/// let double = Function::new(|arguments| match argument(arguments, 0) {
///     Value::Number(number) => Value::Number(number * 2.0),
///     _ => Value::Undefined,
/// });
///
/// assert_eq!(double.call(&[Value::from(21)]), Value::from(42));
/// assert_eq!(double.call(&[]), Value::Undefined);
/// ```
#[derive(Clone)]
pub struct Function(Rc<Callable>);

impl Function {
    /// Wraps a closure as a callable value.
    pub fn new<F>(function: F) -> Self
    where
        F: Fn(&[Value]) -> Value + 'static,
    {
        Self(Rc::new(function))
    }

    /// Invokes the function.
    pub fn call(&self, arguments: &[Value]) -> Value {
        (self.0)(arguments)
    }

    /// Returns `true` if both handles refer to the same function.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.address(), other.address())
    }

    pub(crate) fn address(&self) -> *const () {
        Rc::as_ptr(&self.0).cast::<()>()
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Function {}

impl Hash for Function {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(self.address(), state);
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "Function@{:p}", self.address())
    }
}

/// Reads the argument at `index`, or [`Value::Undefined`] if it was not
/// passed.
#[must_use]
pub fn argument(arguments: &[Value], index: usize) -> Value {
    arguments.get(index).cloned().unwrap_or_default()
}
