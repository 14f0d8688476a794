//! Error types for path resolution and collection operations.
//!
//! Failures are raised synchronously where they are detected. Everything
//! that is not an error degrades to a documented default instead: missing
//! path links resolve to the caller's default, and non-collections iterate
//! as empty.

/// Represents errors raised by path resolution and collection operations.
///
/// # Examples
///
/// ```rust
/// use dynwalk::CollectionError;
///
/// let error = CollectionError::InvalidArgument {
///     operation: "map",
///     argument: "iteratee",
///     found: "number",
/// };
/// assert_eq!(
///     format!("{error}"),
///     "map: expected a function for `iteratee`, found number"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionError {
    /// An iteratee that must be callable was not a function.
    InvalidArgument {
        /// The operation that received the argument.
        operation: &'static str,
        /// The name of the offending argument.
        argument: &'static str,
        /// The type name of the value that was passed.
        found: &'static str,
    },
    /// A fold over zero entries was started without a seed.
    EmptyReduction,
    /// A path was resolved against a bare primitive.
    InvalidRoot {
        /// The type name of the root.
        found: &'static str,
    },
}

impl std::fmt::Display for CollectionError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidArgument {
                operation,
                argument,
                found,
            } => write!(
                formatter,
                "{operation}: expected a function for `{argument}`, found {found}"
            ),
            Self::EmptyReduction => {
                write!(formatter, "reduce: no entries to fold and no seed given")
            }
            Self::InvalidRoot { found } => {
                write!(formatter, "get: cannot resolve a path against a {found}")
            }
        }
    }
}

impl std::error::Error for CollectionError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_display() {
        let error = CollectionError::InvalidArgument {
            operation: "filter",
            argument: "predicate",
            found: "string",
        };
        assert_eq!(
            format!("{error}"),
            "filter: expected a function for `predicate`, found string"
        );
    }

    #[test]
    fn test_empty_reduction_display() {
        assert_eq!(
            format!("{}", CollectionError::EmptyReduction),
            "reduce: no entries to fold and no seed given"
        );
    }

    #[test]
    fn test_invalid_root_display() {
        let error = CollectionError::InvalidRoot { found: "number" };
        assert_eq!(
            format!("{error}"),
            "get: cannot resolve a path against a number"
        );
    }

    #[test]
    fn test_equality() {
        assert_eq!(
            CollectionError::InvalidRoot { found: "boolean" },
            CollectionError::InvalidRoot { found: "boolean" }
        );
        assert_ne!(
            CollectionError::EmptyReduction,
            CollectionError::InvalidRoot { found: "boolean" }
        );
    }

    #[test]
    fn test_is_std_error() {
        let error: Box<dyn std::error::Error> = Box::new(CollectionError::EmptyReduction);
        assert!(error.source().is_none());
    }
}
