use time::OffsetDateTime;
use tracing::{info, warn};

use super::GameFlowService;
use crate::domain::code::Code;
use crate::domain::round::{RoundId, RoundReview, RoundState, RoundSummary, RoundView};
use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};
use crate::repos::rounds::RoundStore;

impl<S: RoundStore> GameFlowService<S> {
    /// State of the current round, creating the very first round if needed.
    pub async fn current_state(&self) -> Result<RoundState, AppError> {
        let mut state = self.gate.lock().await;
        let round = self.current_round(&mut state).await?;
        Ok(round.state)
    }

    /// Abandon the active round (best effort) and start a new one.
    ///
    /// A failure to abandon is logged and does not stop the new round from being created.
    /// A day's challenge is dealt once: in daily mode this fails with `DailyRestart`
    /// once the day has a round, and nothing is abandoned.
    pub async fn reset_round(&self) -> Result<RoundView, AppError> {
        let mut state = self.gate.lock().await;

        if self.mode.daily_date().is_some() {
            if let Some(existing) = self.store.find_latest(self.mode).await? {
                info!(round_id = existing.id, mode = ?self.mode, "daily restart refused");
                return Err(DomainError::conflict(
                    ConflictKind::DailyRestart,
                    "Today's challenge cannot be restarted",
                )
                .into());
            }
        }

        if let Some(active) = self.store.find_active(self.mode).await? {
            let abandoned = match active.plan_abandon(OffsetDateTime::now_utc()) {
                Ok(transition) => self
                    .store
                    .update_round_state(active.id, transition)
                    .await
                    .map(|_| ()),
                Err(e) => Err(e),
            };
            match abandoned {
                Ok(()) => info!(
                    round_id = active.id,
                    attempts = active.attempts.len(),
                    "round abandoned"
                ),
                Err(e) => warn!(
                    round_id = active.id,
                    error = %e,
                    "failed to abandon round, starting a new one anyway"
                ),
            }
        }

        let secret = Self::next_secret(self.mode, &mut state)?;
        let round = self.store.create_round(self.mode, secret).await?;
        info!(round_id = round.id, mode = ?self.mode, "new round started");
        Ok(round.view())
    }

    /// Public view of the current round. Never includes the secret.
    pub async fn active_round(&self) -> Result<RoundView, AppError> {
        let mut state = self.gate.lock().await;
        let round = self.current_round(&mut state).await?;
        Ok(round.view())
    }

    /// Past and present rounds, newest first.
    pub async fn history(&self, limit: u64) -> Result<Vec<RoundSummary>, AppError> {
        let _state = self.gate.lock().await;
        Ok(self.store.list_summaries(limit).await?)
    }

    /// Review one round. The secret is only included for won rounds.
    pub async fn review(&self, round_id: RoundId) -> Result<RoundReview, AppError> {
        let _state = self.gate.lock().await;
        self.store.detail_snapshot(round_id).await?.ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Round, format!("Round {round_id} not found"))
                .into()
        })
    }

    /// The active round's secret, verbatim. Diagnostic only; needs debug tools enabled.
    pub async fn debug_secret(&self) -> Result<Code, AppError> {
        if !self.config.debug_tools {
            return Err(AppError::forbidden("Debug tools are disabled"));
        }

        let _state = self.gate.lock().await;
        let round = self.store.find_active(self.mode).await?.ok_or_else(|| {
            AppError::from(DomainError::not_found(
                NotFoundKind::ActiveRound,
                "No round is in progress",
            ))
        })?;
        warn!(round_id = round.id, "secret revealed through debug tools");
        Ok(round.secret.reveal().clone())
    }
}
