//! # dynwalk
//!
//! Classification, equality, path access, and polymorphic iteration over
//! dynamically typed values.
//!
//! ## Overview
//!
//! Heterogeneous inputs are carried by [`Value`](value::Value), a closed
//! tagged union whose composites (arrays, objects, maps, sets, functions)
//! are shared handles with reference identity. On top of it the crate
//! provides:
//!
//! - **Classification**: sort any value into a [`CollectionKind`]
//! - **Equality**: SameValueZero comparison with [`eq`]
//! - **Path access**: parse `"a[0].b"` style paths and resolve them with
//!   [`get`] and [`get_or`]
//! - **Iteration**: one uniform `(key, value, source)` sequence over every
//!   collection kind with [`iterate`]
//! - **Collection operations**: [`map`], [`filter`], [`reduce`], and
//!   [`is_empty`]
//!
//! ## Feature Flags
//!
//! - `path`: Path parser and resolver (default)
//! - `collection`: Iteration and collection operations (default)
//! - `serde`: `Serialize` and `Deserialize` for `Value`
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use dynwalk::prelude::*;
//!
//! let users = Value::array([
//!     Value::object([("user", Value::from("barney")), ("active", Value::from(true))]),
//!     Value::object([("user", Value::from("fred")), ("active", Value::from(false))]),
//! ]);
//!
//! let active = filter_with(&users, |user, _, _| {
//!     get(user, "active").is_ok_and(|active| active.is_truthy())
//! });
//! assert_eq!(get(&active, "[0].user").unwrap(), Value::from("barney"));
//! assert_eq!(get(&active, "length").unwrap(), Value::from(1));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports the value model and every operation.
///
/// # Usage
///
/// ```rust
/// use dynwalk::prelude::*;
/// ```
pub mod prelude {
    pub use crate::classify::{CollectionKind, classify};
    pub use crate::equality::eq;
    pub use crate::error::CollectionError;
    pub use crate::value::{
        ArrayRef, Function, MapRef, ObjectKind, ObjectRef, PropertyKey, SetRef, Symbol, Text,
        Value, argument,
    };

    #[cfg(feature = "path")]
    pub use crate::path::{PathExpression, PathKeys, get, get_or, get_property, parse_path};

    #[cfg(feature = "collection")]
    pub use crate::collection::{
        filter, filter_with, is_empty, map, map_with, reduce, reduce_with,
    };
    #[cfg(feature = "collection")]
    pub use crate::iterate::{Entries, IterationEntry, iterate};
}

pub mod classify;
pub mod equality;
pub mod error;
pub mod value;

#[cfg(feature = "path")]
pub mod path;

#[cfg(feature = "collection")]
pub mod collection;

#[cfg(feature = "collection")]
pub mod iterate;

pub use classify::{CollectionKind, classify};
pub use equality::eq;
pub use error::CollectionError;

#[cfg(feature = "path")]
pub use path::{get, get_or, get_property, parse_path};

#[cfg(feature = "collection")]
pub use collection::{filter, filter_with, is_empty, map, map_with, reduce, reduce_with};
#[cfg(feature = "collection")]
pub use iterate::{Entries, IterationEntry, iterate};
