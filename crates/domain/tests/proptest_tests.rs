//! Property-based tests for domain value objects
//!
//! These tests use proptest to verify invariants across many random inputs.

use domain::{
    ProficiencyLevel, ScratchFileName, TRUNCATION_MARKER, value_objects::AudioFormat,
    truncate_words,
};
use proptest::prelude::*;

// ============================================================================
// Truncation Property Tests
// ============================================================================

mod truncation_tests {
    use super::*;

    fn words() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec("[a-zA-Záéíóúñ¿?¡!,]{1,12}", 0..80)
    }

    proptest! {
        #[test]
        fn over_limit_keeps_exactly_max_words(words in words(), max in 1usize..60) {
            prop_assume!(words.len() > max);
            let text = words.join(" ");

            let result = truncate_words(&text, max);

            prop_assert!(result.truncated);
            prop_assert!(result.text.ends_with(TRUNCATION_MARKER));
            let body = result.text.strip_suffix(TRUNCATION_MARKER).unwrap();
            let kept: Vec<&str> = body.split_whitespace().collect();
            prop_assert_eq!(kept.len(), max);
            let expected: Vec<&str> = words.iter().take(max).map(String::as_str).collect();
            prop_assert_eq!(kept, expected);
        }

        #[test]
        fn at_or_under_limit_is_identity(words in words(), extra in 0usize..10) {
            let text = words.join("  ");
            let max = words.len() + extra;

            let result = truncate_words(&text, max);

            prop_assert!(!result.truncated);
            prop_assert_eq!(result.text, text);
        }
    }
}

// ============================================================================
// Proficiency Level Property Tests
// ============================================================================

mod proficiency_level_tests {
    use super::*;

    proptest! {
        #[test]
        fn unknown_codes_resolve_to_default(code in "[a-zA-Z0-9 ]{0,8}") {
            let known = ProficiencyLevel::all().iter().any(|l| l.code() == code);
            prop_assume!(!known);

            let level = ProficiencyLevel::resolve(Some(&code));

            prop_assert_eq!(level, ProficiencyLevel::A1);
            prop_assert_eq!(level.instruction(), ProficiencyLevel::A1.instruction());
        }
    }
}

// ============================================================================
// Scratch File Name Property Tests
// ============================================================================

mod scratch_file_name_tests {
    use super::*;

    proptest! {
        #[test]
        fn names_with_separators_are_rejected(
            prefix in "[a-z0-9]{0,10}",
            sep in prop_oneof![Just('/'), Just('\\')],
            suffix in "[a-z0-9.]{0,10}",
        ) {
            let name = format!("{prefix}{sep}{suffix}");
            prop_assert!(ScratchFileName::parse(&name).is_err());
        }

        #[test]
        fn plain_names_are_accepted(stem in "[a-z0-9-]{1,40}") {
            let name = format!("{stem}.mp3");
            let parsed = ScratchFileName::parse(&name);
            prop_assert!(parsed.is_ok());
            prop_assert_eq!(parsed.unwrap().format(), Some(AudioFormat::Mp3));
        }
    }

    #[test]
    fn generated_names_never_collide() {
        let names: std::collections::HashSet<_> = (0..1000)
            .map(|_| ScratchFileName::generate(AudioFormat::Mp3))
            .collect();
        assert_eq!(names.len(), 1000);
    }
}
