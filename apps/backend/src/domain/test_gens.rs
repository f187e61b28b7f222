// Proptest generators for codes and guesses.
// Valid inputs are generated by construction rather than filtered.

use proptest::prelude::*;

use crate::domain::code::Code;
use crate::domain::rules::{ALPHABET_MAX, ALPHABET_MIN, ALPHABET_SIZE};

/// Distinct digits of length `len` (`len <= ALPHABET_SIZE`).
pub fn unique_code(len: usize) -> impl Strategy<Value = Code> {
    Just((ALPHABET_MIN..=ALPHABET_MAX).collect::<Vec<u8>>())
        .prop_shuffle()
        .prop_map(move |mut digits| {
            digits.truncate(len);
            Code::from_digits(digits)
        })
}

/// Digits of length `len`, repeats allowed.
pub fn any_code(len: usize) -> impl Strategy<Value = Code> {
    proptest::collection::vec(ALPHABET_MIN..=ALPHABET_MAX, len).prop_map(Code::from_digits)
}

/// A length usable with unique digits, paired with two codes of that length.
pub fn code_pair() -> impl Strategy<Value = (Code, Code)> {
    (1..=ALPHABET_SIZE).prop_flat_map(|len| (any_code(len), any_code(len)))
}

/// Strings that are never valid guesses because they hold a non-digit character.
pub fn text_with_non_digit(len: usize) -> impl Strategy<Value = String> {
    (
        proptest::collection::vec(ALPHABET_MIN..=ALPHABET_MAX, len - 1),
        0..len,
        "[a-zA-Z !#%&*+,./:;=?@_~-]",
    )
        .prop_map(|(digits, at, bad)| {
            let mut s: String = digits.iter().map(|d| char::from(b'0' + d)).collect();
            s.insert_str(at, &bad);
            s
        })
}
