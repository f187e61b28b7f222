//! Property tests for guess validation.

use proptest::prelude::*;

use crate::domain::guess::validate_guess;
use crate::domain::rules::CODE_LENGTH;
use crate::domain::{test_gens, test_prelude};
use crate::errors::domain::ValidationKind;

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Property: every unique code of the right length validates and keeps its text
    #[test]
    fn prop_unique_codes_validate(code in test_gens::unique_code(CODE_LENGTH)) {
        let text = code.to_string();
        let guess = validate_guess(&text).unwrap();
        prop_assert_eq!(guess.text(), text);
        prop_assert_eq!(guess.code(), &code);
    }

    /// Property: wrong lengths are always reported as InvalidLength, whatever the content
    #[test]
    fn prop_wrong_length_first(s in "[0-9a-z]{0,12}") {
        prop_assume!(s.chars().count() != CODE_LENGTH);
        let err = validate_guess(&s).unwrap_err();
        let is_invalid_length = matches!(
            err.validation_kind(),
            Some(ValidationKind::InvalidLength { .. })
        );
        prop_assert!(is_invalid_length);
    }

    /// Property: a non-digit anywhere in a right-length guess is NonNumeric
    #[test]
    fn prop_non_digit_rejected(s in test_gens::text_with_non_digit(CODE_LENGTH)) {
        let err = validate_guess(&s).unwrap_err();
        let is_non_numeric = matches!(
            err.validation_kind(),
            Some(ValidationKind::NonNumeric { .. })
        );
        prop_assert!(is_non_numeric);
    }

    /// Property: any code with a repeat is RepeatedDigits
    #[test]
    fn prop_repeats_rejected(code in test_gens::any_code(CODE_LENGTH)) {
        let text = code.to_string();
        let mut seen = [false; 10];
        let has_repeat = code.digits().iter().any(|d| std::mem::replace(&mut seen[*d as usize], true));
        let result = validate_guess(&text);
        if has_repeat {
            let is_repeat = matches!(
                result.as_ref().map_err(|e| e.validation_kind()),
                Err(Some(ValidationKind::RepeatedDigits { .. }))
            );
            prop_assert!(is_repeat);
        } else {
            prop_assert!(result.is_ok());
        }
    }
}
