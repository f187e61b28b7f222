//! Guess validation: shape checks that run before any evaluation.

use std::fmt;

use crate::domain::code::Code;
use crate::domain::rules::{CodeRules, ALPHABET_MAX, ALPHABET_MIN};
use crate::errors::domain::{DomainError, ValidationKind};

/// A guess that passed validation for some [`CodeRules`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Guess(Code);

impl Guess {
    pub fn code(&self) -> &Code {
        &self.0
    }

    /// Canonical text form, as recorded on attempts.
    pub fn text(&self) -> String {
        self.0.to_string()
    }
}

impl fmt::Display for Guess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Validate a guess against the standard rules.
pub fn validate_guess(input: &str) -> Result<Guess, DomainError> {
    validate_guess_with(input, &CodeRules::STANDARD)
}

/// Validate a guess against `rules`.
///
/// Checks run in a fixed order and the first failure wins:
/// length, digit characters, alphabet range, uniqueness.
pub fn validate_guess_with(input: &str, rules: &CodeRules) -> Result<Guess, DomainError> {
    let actual = input.chars().count();
    if actual != rules.length {
        return Err(DomainError::validation(
            ValidationKind::InvalidLength {
                expected: rules.length,
                actual,
            },
            format!("Guess must be {} digits long (got {actual})", rules.length),
        ));
    }

    let mut digits = Vec::with_capacity(actual);
    for c in input.chars() {
        let digit = c.to_digit(10).ok_or_else(|| {
            DomainError::validation(
                ValidationKind::NonNumeric { found: c },
                format!("'{c}' is not a digit"),
            )
        })?;
        digits.push(digit as u8);
    }

    if let Some(&digit) = digits
        .iter()
        .find(|d| !(ALPHABET_MIN..=ALPHABET_MAX).contains(*d))
    {
        return Err(DomainError::validation(
            ValidationKind::OutOfRange {
                digit,
                min: ALPHABET_MIN,
                max: ALPHABET_MAX,
            },
            format!("Digit {digit} is outside {ALPHABET_MIN}-{ALPHABET_MAX}"),
        ));
    }

    if rules.requires_unique {
        let mut seen = [false; 10];
        for &digit in &digits {
            let slot = &mut seen[digit as usize];
            if *slot {
                return Err(DomainError::validation(
                    ValidationKind::RepeatedDigits { digit },
                    format!("Digit {digit} is repeated; every digit must be different"),
                ));
            }
            *slot = true;
        }
    }

    Ok(Guess(Code::from_digits(digits)))
}
