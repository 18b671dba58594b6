//! Property-based tests for path manipulation functions.
//!
//! These tests use proptest to generate random inputs and verify that
//! invariants hold for all possible inputs.

#[cfg(test)]
mod proptest_tests {
    use crate::path::{join, normalize, relative};
    use proptest::prelude::*;

    fn segment() -> impl Strategy<Value = String> {
        prop_oneof![
            4 => "[a-zA-Z0-9_-]{1,8}",
            1 => Just(".".to_string()),
            1 => Just("..".to_string()),
            1 => Just(String::new()),
        ]
    }

    fn absolute_path() -> impl Strategy<Value = String> {
        (
            prop_oneof![Just("/".to_string()), Just("C:/".to_string()), Just("D:\\".to_string())],
            prop::collection::vec(segment(), 0..8),
        )
            .prop_map(|(root, parts)| format!("{}{}", root, parts.join("/")))
    }

    fn clean_segments() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec("[a-z0-9]{1,6}", 0..5)
    }

    proptest! {
        /// Property: normalize never emits backslashes
        #[test]
        fn normalize_is_slash_form(input in absolute_path()) {
            prop_assert!(!normalize(&input).contains('\\'));
        }

        /// Property: normalize is idempotent
        #[test]
        fn normalize_is_idempotent(input in absolute_path()) {
            let once = normalize(&input);
            prop_assert_eq!(normalize(&once), once);
        }

        /// Property: normalized absolute paths contain no `.` or `..` segments
        #[test]
        fn normalize_folds_dot_segments(input in absolute_path()) {
            let result = normalize(&input);
            for part in result.split('/') {
                prop_assert!(part != "." && part != "..", "left {:?} in {:?}", part, result);
            }
        }

        /// Property: joining is deterministic
        #[test]
        fn join_is_deterministic(base in absolute_path(), parts in clean_segments()) {
            let refs: Vec<&str> = parts.iter().map(String::as_str).collect();
            prop_assert_eq!(join(&base, &refs), join(&base, &refs));
        }

        /// Property: a relative path resolves back to its target
        #[test]
        fn relative_round_trips(
            base in clean_segments(),
            from_tail in clean_segments(),
            to_tail in clean_segments(),
        ) {
            let base = format!("/{}", base.join("/"));
            let from_refs: Vec<&str> = from_tail.iter().map(String::as_str).collect();
            let to_refs: Vec<&str> = to_tail.iter().map(String::as_str).collect();
            let from = join(&base, &from_refs);
            let to = join(&base, &to_refs);

            let rel = relative(&from, &to);
            prop_assert_eq!(join(&from, &[rel.as_str()]), normalize(&to));
        }
    }
}
