//! Property-based tests for parameter resolution.
//!
//! These tests use proptest to generate folder names and descriptions and
//! verify the derivation rules hold for all of them.

#[cfg(test)]
mod proptest_tests {
    use crate::defaults::REPO_PREFIX;
    use crate::params::{capitalize_first, derive_repo_name, RepoParams, Visibility};
    use proptest::prelude::*;

    proptest! {
        /// Property: "x.y" always yields prefix + lowercase(y)
        #[test]
        fn repo_name_is_prefix_plus_lowercased_segment(
            group in "[A-Za-z0-9_-]{1,12}",
            name in "[A-Za-z0-9_-]{1,24}",
        ) {
            let folder = format!("{}.{}", group, name);
            let repo = derive_repo_name(&folder, REPO_PREFIX).unwrap();
            prop_assert_eq!(repo, format!("{}{}", REPO_PREFIX, name.to_lowercase()));
        }

        /// Property: folder names without a dot never resolve
        #[test]
        fn folder_without_dot_is_rejected(folder in "[A-Za-z0-9_-]{0,24}") {
            prop_assert!(RepoParams::resolve(Some(folder.as_str()), None, None, REPO_PREFIX).is_err());
        }

        /// Property: only the first character of the description changes
        #[test]
        fn description_tail_is_untouched(first in "[a-z]", rest in ".{0,40}") {
            let input = format!("{}{}", first, rest);
            let output = capitalize_first(&input);
            prop_assert_eq!(output, format!("{}{}", first.to_uppercase(), rest));
        }

        /// Property: capitalizing twice is the same as capitalizing once
        #[test]
        fn capitalize_first_is_idempotent(input in "[a-zA-Z0-9 ]{0,40}") {
            let once = capitalize_first(&input);
            prop_assert_eq!(capitalize_first(&once), once.clone());
        }

        /// Property: any casing of a known visibility resolves to its lowercase form
        #[test]
        fn visibility_is_lowercased(
            value in prop::sample::select(vec!["public", "private", "internal"]),
            upper_mask in prop::collection::vec(any::<bool>(), 8),
        ) {
            let mixed: String = value
                .chars()
                .zip(upper_mask.iter().cycle())
                .map(|(c, upper)| if *upper { c.to_ascii_uppercase() } else { c })
                .collect();
            let params = RepoParams::resolve(Some("a.b"), None, Some(mixed.as_str()), REPO_PREFIX).unwrap();
            prop_assert_eq!(params.visibility.as_str(), value);
            prop_assert_eq!(params.visibility == Visibility::Public, value == "public");
        }
    }
}
