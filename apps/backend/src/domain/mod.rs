//! Domain layer: pure game logic types and helpers.

pub mod code;
pub mod evaluation;
pub mod guess;
pub mod knowledge;
pub mod round;
pub mod rules;
pub mod secret;
pub mod seed_derivation;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod test_prelude;
#[cfg(test)]
mod tests_props_evaluation;
#[cfg(test)]
mod tests_props_guess;
#[cfg(test)]
mod tests_props_secret;

// Re-exports for ergonomics
pub use code::{Code, Secret};
pub use evaluation::{evaluate, evaluate_with_length, EvaluationResult};
pub use guess::{validate_guess, validate_guess_with, Guess};
pub use knowledge::{DigitMark, KnowledgeBoard};
pub use round::{
    Attempt, NewAttempt, Round, RoundId, RoundMode, RoundReview, RoundState, RoundSummary,
    RoundTransition, RoundView,
};
pub use rules::CodeRules;
pub use secret::{daily_secret, generate_for_rules, generate_secret};
