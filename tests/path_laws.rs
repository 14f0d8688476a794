//! Property-based tests for the path tokenizer and resolver.

#![cfg(feature = "path")]

use dynwalk::path::{get, tokenize};
use dynwalk::value::{PropertyKey, Value};
use proptest::prelude::*;

fn name_strategy() -> impl Strategy<Value = String> {
    "[a-z_][a-z0-9_]{0,7}"
}

proptest! {
    /// Joining names with dots and tokenizing gives the names back.
    #[test]
    fn prop_dot_join_split(names in prop::collection::vec(name_strategy(), 1..8)) {
        let keys = tokenize(&names.join("."));
        let expected: Vec<PropertyKey> = names.iter().map(|name| PropertyKey::name(name)).collect();
        prop_assert_eq!(keys.as_slice(), expected.as_slice());
    }

    /// Bracketed indices tokenize to index keys.
    #[test]
    fn prop_bracket_indices(
        name in name_strategy(),
        indices in prop::collection::vec(0_usize..10_000, 1..6)
    ) {
        let path = indices
            .iter()
            .fold(name.clone(), |path, index| format!("{path}[{index}]"));
        let keys = tokenize(&path);

        prop_assert_eq!(keys.len(), indices.len() + 1);
        prop_assert_eq!(&keys.as_slice()[0], &PropertyKey::name(&name));
        for (key, index) in keys.iter().skip(1).zip(&indices) {
            prop_assert_eq!(key, &PropertyKey::Index(*index));
        }
    }

    /// Quoted bracket keys survive any characters, dots included.
    #[test]
    fn prop_quoted_bracket_is_literal(content in "[a-z.\\[\\] ]{0,12}") {
        let escaped = content.replace('\\', "\\\\").replace('\'', "\\'");
        let keys = tokenize(&format!("root['{escaped}']"));
        prop_assert_eq!(keys.len(), 2);
        prop_assert_eq!(&keys.as_slice()[1], &PropertyKey::name(&content));
    }

    /// A value stored under a nested dotted path is found by that path.
    #[test]
    fn prop_get_finds_nested_value(
        names in prop::collection::vec(name_strategy(), 1..6),
        leaf in any::<i32>()
    ) {
        let root = names
            .iter()
            .rev()
            .fold(Value::from(leaf), |inner, name| Value::object([(name.as_str(), inner)]));
        prop_assert_eq!(get(&root, names.join(".")), Ok(Value::from(leaf)));
    }
}
