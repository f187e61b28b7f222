//! Hint generation through an external text service.
//!
//! The provider only ever sees the attempts and their feedback, never the secret.
//! Hints are read-only: nothing here mutates a round.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::domain::round::{RoundState, RoundView};
use crate::domain::rules::{ALPHABET_MAX, ALPHABET_MIN};
use crate::error::AppError;
use crate::repos::rounds::RoundStore;
use crate::services::game_flow::GameFlowService;

/// One past guess as the hint service sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HintAttempt {
    pub guess: String,
    pub exact: u8,
    pub partial: u8,
}

/// Everything a hint generator is told about the round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HintRequest {
    pub code_length: usize,
    pub alphabet_min: u8,
    pub alphabet_max: u8,
    pub unique_digits: bool,
    pub attempts: Vec<HintAttempt>,
}

impl HintRequest {
    /// Built from the round's own mode and secret length.
    pub fn from_view(view: &RoundView) -> Self {
        let rules = view.mode.rules();
        Self {
            code_length: view.code_length,
            alphabet_min: ALPHABET_MIN,
            alphabet_max: ALPHABET_MAX,
            unique_digits: rules.requires_unique,
            attempts: view
                .attempts
                .iter()
                .map(|a| HintAttempt {
                    guess: a.guess_text.clone(),
                    exact: a.exact_count,
                    partial: a.partial_count,
                })
                .collect(),
        }
    }
}

#[async_trait]
pub trait HintProvider: Send + Sync {
    async fn generate(&self, request: &HintRequest) -> Result<String, AppError>;
}

pub struct HintService<P: HintProvider> {
    provider: P,
    timeout: Duration,
}

impl<P: HintProvider> HintService<P> {
    pub fn new(provider: P, timeout: Duration) -> Self {
        Self { provider, timeout }
    }

    /// Ask the provider for a hint about the current round.
    ///
    /// Cancellation is honoured before reading the round, while reading it, and
    /// while waiting on the provider. The provider call is bounded by the timeout.
    pub async fn hint<S: RoundStore>(
        &self,
        flow: &GameFlowService<S>,
        cancel: &CancellationToken,
    ) -> Result<String, AppError> {
        if cancel.is_cancelled() {
            return Err(AppError::HintCancelled);
        }

        let view = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(AppError::HintCancelled),
            view = flow.active_round() => view?,
        };
        if view.state != RoundState::InProgress {
            return Err(AppError::RoundNotActive { state: view.state });
        }

        let request = HintRequest::from_view(&view);
        debug!(round_id = view.id, attempts = request.attempts.len(), "requesting hint");

        let outcome = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                info!(round_id = view.id, "hint request cancelled");
                return Err(AppError::HintCancelled);
            }
            r = tokio::time::timeout(self.timeout, self.provider.generate(&request)) => r,
        };

        match outcome {
            Ok(Ok(text)) => {
                let text = text.trim();
                if text.is_empty() {
                    warn!(round_id = view.id, "hint provider returned empty text");
                    return Err(AppError::hint_unavailable("No hint available right now"));
                }
                Ok(text.to_string())
            }
            Ok(Err(e)) => {
                warn!(round_id = view.id, error = %e, "hint provider failed");
                Err(e)
            }
            Err(_) => {
                warn!(
                    round_id = view.id,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "hint provider timed out"
                );
                Err(AppError::hint_unavailable("The hint service took too long"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;
    use crate::domain::round::{Attempt, RoundMode};

    #[test]
    fn request_carries_feedback_but_no_secret() {
        let view = RoundView {
            id: 7,
            mode: RoundMode::Standard,
            state: RoundState::InProgress,
            code_length: 5,
            created_at: datetime!(2026-10-18 09:00 UTC),
            finished_at: None,
            attempts: vec![Attempt {
                id: 1,
                guess_text: "15432".into(),
                exact_count: 1,
                partial_count: 4,
                is_no_match: false,
                is_repeated: false,
                created_at: datetime!(2026-10-18 09:01 UTC),
            }],
        };

        let request = HintRequest::from_view(&view);
        assert_eq!(request.code_length, 5);
        assert!(request.unique_digits);
        assert_eq!(
            request.attempts,
            vec![HintAttempt {
                guess: "15432".into(),
                exact: 1,
                partial: 4
            }]
        );

        let json = serde_json::to_value(&request).unwrap();
        let keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        assert!(!keys.iter().any(|k| k.contains("secret")));
    }
}
