//! Path-based property access.
//!
//! A path names a chain of property reads through nested data. Paths are
//! given either as text (`"a[0].b.c"`), which is parsed into keys, or as an
//! explicit key list, which is used as-is.
//!
//! # Components
//!
//! - [`parser`]: path expressions to [`PathKeys`]
//! - [`resolver`]: walking [`PathKeys`] through a [`Value`](crate::value::Value)
//!
//! # Example
//!
//! ```
//! use dynwalk::path::{get, get_or};
//! use dynwalk::value::Value;
//!
//! let inner = Value::object([("c", Value::from(3))]);
//! let data = Value::object([(
//!     "a",
//!     Value::array([Value::object([("b", inner)])]),
//! )]);
//!
//! assert_eq!(get(&data, "a[0].b.c").unwrap(), Value::from(3));
//! assert_eq!(get(&data, vec!["a", "0", "b", "c"]).unwrap(), Value::from(3));
//! assert_eq!(
//!     get_or(&data, "a.b.c", Value::from("default")).unwrap(),
//!     Value::from("default")
//! );
//! ```

pub mod parser;
pub mod resolver;

pub use parser::{PathExpression, PathKeys, parse_path, tokenize};
pub use resolver::{get, get_or, get_property};
