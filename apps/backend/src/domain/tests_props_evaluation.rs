//! Property tests for guess evaluation (pure domain, no DB).
//!
//! Properties tested:
//! - Counts stay within the code length
//! - A code evaluated against itself is fully exact
//! - Evaluation agrees with an independent count-based oracle
//! - The no-match flag is raised exactly when nothing matched
//! - Exact matches are invariant under swapping secret and guess

use proptest::prelude::*;

use crate::domain::code::Code;
use crate::domain::evaluation::{evaluate, evaluate_with_length};
use crate::domain::rules::{ALPHABET_SIZE, CODE_LENGTH};
use crate::domain::{test_gens, test_prelude};

/// Oracle: exact by position, total common digits by min of per-digit counts.
fn oracle(secret: &Code, guess: &Code) -> (u8, u8) {
    let exact = secret
        .digits()
        .iter()
        .zip(guess.digits())
        .filter(|(s, g)| s == g)
        .count();

    let mut s_counts = [0usize; ALPHABET_SIZE];
    let mut g_counts = [0usize; ALPHABET_SIZE];
    for d in secret.digits() {
        s_counts[*d as usize] += 1;
    }
    for d in guess.digits() {
        g_counts[*d as usize] += 1;
    }
    let common: usize = s_counts
        .iter()
        .zip(g_counts.iter())
        .map(|(a, b)| (*a).min(*b))
        .sum();

    (exact as u8, (common - exact) as u8)
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Property: exact + partial never exceeds the length
    #[test]
    fn prop_counts_bounded(
        secret in test_gens::unique_code(CODE_LENGTH),
        guess in test_gens::unique_code(CODE_LENGTH),
    ) {
        let e = evaluate(&secret, &guess).unwrap();
        prop_assert!(e.exact_count as usize <= CODE_LENGTH);
        prop_assert!(e.partial_count as usize <= CODE_LENGTH);
        prop_assert!(e.total_matches() as usize <= CODE_LENGTH);
    }

    /// Property: a code against itself is all exact, no partial
    #[test]
    fn prop_self_evaluation_solves(secret in test_gens::unique_code(CODE_LENGTH)) {
        let e = evaluate(&secret, &secret).unwrap();
        prop_assert_eq!(e.exact_count as usize, CODE_LENGTH);
        prop_assert_eq!(e.partial_count, 0);
        prop_assert!(!e.is_no_match);
    }

    /// Property: evaluation matches the oracle, duplicates included
    #[test]
    fn prop_matches_oracle((secret, guess) in test_gens::code_pair()) {
        let len = secret.len();
        let e = evaluate_with_length(&secret, &guess, len).unwrap();
        let (exact, partial) = oracle(&secret, &guess);
        prop_assert_eq!(e.exact_count, exact);
        prop_assert_eq!(e.partial_count, partial);
    }

    /// Property: no-match iff zero exact and zero partial
    #[test]
    fn prop_no_match_iff_nothing_matched(
        secret in test_gens::unique_code(CODE_LENGTH),
        guess in test_gens::unique_code(CODE_LENGTH),
    ) {
        let e = evaluate(&secret, &guess).unwrap();
        prop_assert_eq!(e.is_no_match, e.exact_count == 0 && e.partial_count == 0);
    }

    /// Property: evaluation is pure and symmetric in its match totals
    #[test]
    fn prop_pure_and_symmetric((secret, guess) in test_gens::code_pair()) {
        let len = secret.len();
        let first = evaluate_with_length(&secret, &guess, len).unwrap();
        let second = evaluate_with_length(&secret, &guess, len).unwrap();
        prop_assert_eq!(first, second);

        let swapped = evaluate_with_length(&guess, &secret, len).unwrap();
        prop_assert_eq!(first.exact_count, swapped.exact_count);
        prop_assert_eq!(first.total_matches(), swapped.total_matches());
    }
}
