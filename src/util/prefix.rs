//! Ordered column-list prefix matching used by the index linters.
//!
//! Column order matters: `(a, b)` is a prefix of `(a, b, c)` but not of
//! `(b, a, c)`. An empty list never matches anything.

/// True if `prefix` is a non-empty leading run of `list`, or equal to it.
pub fn starts_with<A, B>(list: &[A], prefix: &[B]) -> bool
where
    A: AsRef<str>,
    B: AsRef<str>,
{
    if prefix.is_empty() || list.is_empty() || prefix.len() > list.len() {
        return false;
    }
    list.iter()
        .zip(prefix)
        .all(|(a, b)| a.as_ref() == b.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EMPTY: [&str; 0] = [];

    #[test]
    fn test_prefix_matches_leading_columns() {
        assert!(starts_with(&["a", "b", "c"], &["a"]));
        assert!(starts_with(&["a", "b", "c"], &["a", "b"]));
        assert!(starts_with(&["a", "b"], &["a", "b"]));
    }

    #[test]
    fn test_prefix_respects_order() {
        assert!(!starts_with(&["b", "a"], &["a", "b"]));
        assert!(!starts_with(&["a", "b"], &["b"]));
        assert!(!starts_with(&["a"], &["a", "b"]));
    }

    #[test]
    fn test_empty_lists_never_match() {
        assert!(!starts_with(&EMPTY, &EMPTY));
        assert!(!starts_with(&["a"], &EMPTY));
        assert!(!starts_with(&EMPTY, &["a"]));
    }

    #[test]
    fn test_mixed_string_types() {
        let owned = vec!["id".to_string(), "name".to_string()];
        assert!(starts_with(&owned, &["id"]));
        assert!(starts_with(&owned, &["id", "name"]));
    }

    proptest! {
        #[test]
        fn every_nonempty_leading_slice_is_a_prefix(
            cols in prop::collection::vec("[a-d]{1,3}", 1..8),
            cut in 1usize..8,
        ) {
            let cut = cut.min(cols.len());
            prop_assert!(starts_with(&cols, &cols[..cut]));
        }

        #[test]
        fn prefix_is_never_longer_than_list(
            list in prop::collection::vec("[a-c]", 0..5),
            prefix in prop::collection::vec("[a-c]", 0..8),
        ) {
            if starts_with(&list, &prefix) {
                prop_assert!(!prefix.is_empty());
                prop_assert!(prefix.len() <= list.len());
            }
        }
    }
}
