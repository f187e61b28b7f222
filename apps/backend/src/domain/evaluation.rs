//! Guess evaluation: exact and partial match counting.

use serde::{Deserialize, Serialize};

use crate::domain::code::Code;
use crate::domain::rules::{CodeRules, ALPHABET_SIZE};
use crate::errors::domain::{ContractKind, DomainError};

/// Feedback for one guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub exact_count: u8,
    pub partial_count: u8,
    /// Display-only: raised when nothing matched at all.
    pub is_no_match: bool,
}

impl EvaluationResult {
    pub fn total_matches(&self) -> u8 {
        self.exact_count + self.partial_count
    }

    pub fn is_solved(&self, length: usize) -> bool {
        self.exact_count as usize == length
    }
}

/// Evaluate `guess` against `secret` under the standard rules.
pub fn evaluate(secret: &Code, guess: &Code) -> Result<EvaluationResult, DomainError> {
    evaluate_with_rules(secret, guess, &CodeRules::STANDARD)
}

/// Evaluate codes of an explicit `length` (e.g. the daily challenge).
pub fn evaluate_with_length(
    secret: &Code,
    guess: &Code,
    length: usize,
) -> Result<EvaluationResult, DomainError> {
    evaluate_with_rules(secret, guess, &CodeRules::STANDARD.with_length(length))
}

/// Evaluate under `rules`.
///
/// Exact matches are taken first in a single positional pass. Partial matches are
/// then counted from the leftovers with a frequency table, so one secret digit can
/// satisfy at most one guess digit even when digits repeat.
///
/// # Errors
///
/// `ContractKind::LengthMismatch` when either code is not `rules.length` long. Callers
/// validate guesses first, so this indicates a wiring bug. `ContractKind::InvalidConfiguration`
/// when `rules.length` exceeds what the `u8` counters can hold.
pub fn evaluate_with_rules(
    secret: &Code,
    guess: &Code,
    rules: &CodeRules,
) -> Result<EvaluationResult, DomainError> {
    if secret.len() != rules.length || guess.len() != rules.length {
        return Err(DomainError::contract(
            ContractKind::LengthMismatch {
                expected: rules.length,
                secret: secret.len(),
                guess: guess.len(),
            },
            format!(
                "Evaluator expects codes of length {}, got secret {} and guess {}",
                rules.length,
                secret.len(),
                guess.len()
            ),
        ));
    }

    // Every counter below is bounded by the length
    let max_length = usize::from(u8::MAX);
    if rules.length > max_length {
        return Err(DomainError::contract(
            ContractKind::InvalidConfiguration,
            format!(
                "Evaluator counts at most {max_length} positions, got length {}",
                rules.length
            ),
        ));
    }

    let mut exact = 0u8;
    let mut secret_rest = Vec::with_capacity(rules.length);
    let mut guess_rest = Vec::with_capacity(rules.length);

    for (&s, &g) in secret.digits().iter().zip(guess.digits()) {
        if s == g {
            exact += 1;
        } else {
            secret_rest.push(s);
            guess_rest.push(g);
        }
    }

    let mut remaining = [0u8; ALPHABET_SIZE];
    for d in secret_rest {
        remaining[d as usize] += 1;
    }

    let mut partial = 0u8;
    for d in guess_rest {
        let slot = &mut remaining[d as usize];
        if *slot > 0 {
            partial += 1;
            *slot -= 1;
        }
    }

    Ok(EvaluationResult {
        exact_count: exact,
        partial_count: partial,
        is_no_match: rules.show_no_match && exact + partial == 0,
    })
}
