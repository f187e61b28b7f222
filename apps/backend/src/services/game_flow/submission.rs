use serde::Serialize;
use time::OffsetDateTime;
use tracing::{debug, error, info};

use super::GameFlowService;
use crate::domain::evaluation::{evaluate_with_rules, EvaluationResult};
use crate::domain::guess::validate_guess_with;
use crate::domain::round::{RoundId, RoundState};
use crate::error::AppError;
use crate::repos::rounds::RoundStore;

/// Outcome of one accepted guess.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmitResult {
    pub round_id: RoundId,
    /// 1-based position of this attempt within the round.
    pub attempt_no: usize,
    pub guess_text: String,
    pub feedback: EvaluationResult,
    pub is_repeated: bool,
    pub resulting_state: RoundState,
}

impl SubmitResult {
    pub fn did_win(&self) -> bool {
        self.resulting_state == RoundState::Won
    }
}

impl<S: RoundStore> GameFlowService<S> {
    /// Validate, evaluate and record a guess against the current round.
    ///
    /// Fails with `RoundNotActive` (carrying the round's state) once the round is
    /// won or abandoned, and with a validation error for malformed input. Neither
    /// failure records anything.
    pub async fn submit_guess(&self, input: &str) -> Result<SubmitResult, AppError> {
        let mut state = self.gate.lock().await;

        let round = self.current_round(&mut state).await?;
        round.ensure_active()?;

        let rules = round.rules();
        let guess = validate_guess_with(input, &rules)?;

        let feedback = match evaluate_with_rules(round.secret.reveal(), guess.code(), &rules) {
            Ok(f) => f,
            Err(e) => {
                error!(
                    round_id = round.id,
                    guess = %guess,
                    error = %e,
                    "evaluator contract violated"
                );
                return Err(e.into());
            }
        };

        let (attempt, transition) =
            round.plan_attempt(&guess, feedback, OffsetDateTime::now_utc())?;
        let is_repeated = attempt.is_repeated;
        let guess_text = attempt.guess_text.clone();

        if let Some(t) = &transition {
            debug!(round_id = round.id, from = %round.state, to = %t.to, "round transition");
        }

        let updated = self
            .store
            .append_attempt(round.id, attempt, transition)
            .await?;

        let attempt_no = updated.attempts.len();
        info!(
            round_id = updated.id,
            attempt_no,
            guess = %guess_text,
            exact = feedback.exact_count,
            partial = feedback.partial_count,
            repeated = is_repeated,
            state = %updated.state,
            "guess recorded"
        );
        if updated.state == RoundState::Won {
            info!(round_id = updated.id, attempts = attempt_no, "round won");
        }

        Ok(SubmitResult {
            round_id: updated.id,
            attempt_no,
            guess_text,
            feedback,
            is_repeated,
            resulting_state: updated.state,
        })
    }
}

