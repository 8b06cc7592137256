//! Property tests for shell path normalization.

use proptest::prelude::*;

use deployto::{clean_drive_letter, to_unix_path};

fn path_segment() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9 _.\\-]{1,12}").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Unix paths never contain backslashes other than space escapes.
    #[test]
    fn property_unix_path_only_escapes_spaces(
        segments in proptest::collection::vec(path_segment(), 1..=6),
    ) {
        let windows = format!("C:\\{}", segments.join("\\"));
        let unix = to_unix_path(&windows);

        prop_assert!(unix.starts_with("/c/"));
        for (i, _) in unix.match_indices('\\') {
            prop_assert_eq!(unix.as_bytes().get(i + 1), Some(&b' '));
        }
    }

    /// PROPERTY: Removing the escapes recovers the forward-slash form of the input.
    #[test]
    fn property_unix_path_is_reversible(
        segments in proptest::collection::vec(path_segment(), 1..=6),
    ) {
        let joined = segments.join("\\");
        let trimmed = joined.trim();
        prop_assume!(!trimmed.starts_with("C:"));

        let unix = to_unix_path(&joined);

        prop_assert_eq!(unix.replace("\\ ", " "), trimmed.replace('\\', "/"));
    }

    /// PROPERTY: Cleaning a drive letter only touches the first three bytes.
    #[test]
    fn property_clean_drive_letter_keeps_tail(
        letter in proptest::char::range('a', 'z'),
        upper in any::<bool>(),
        tail in "[A-Za-z0-9/_.]{0,30}",
    ) {
        let letter = if upper { letter.to_ascii_uppercase() } else { letter };
        let path = format!("{}:/{}", letter, tail);

        let cleaned = clean_drive_letter(&path);

        prop_assert_eq!(cleaned, format!("/{}/{}", letter.to_ascii_lowercase(), tail));
    }

    /// PROPERTY: Paths that already start with `/` are left alone.
    #[test]
    fn property_clean_drive_letter_ignores_unix_paths(tail in "[A-Za-z0-9/:_.]{0,30}") {
        let path = format!("/{}", tail);
        prop_assert_eq!(clean_drive_letter(&path), path);
    }
}
