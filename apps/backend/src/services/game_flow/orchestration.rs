use tracing::{debug, info};

use super::{FlowState, GameFlowService, RoundMode};
use crate::domain::code::Secret;
use crate::domain::round::Round;
use crate::domain::secret::{daily_secret, generate_for_rules};
use crate::error::AppError;
use crate::errors::domain::DomainError;
use crate::repos::rounds::RoundStore;

impl<S: RoundStore> GameFlowService<S> {
    /// Draw the secret for a new round according to the service mode.
    pub(super) fn next_secret(
        mode: RoundMode,
        state: &mut FlowState,
    ) -> Result<Secret, DomainError> {
        match mode {
            RoundMode::Standard => generate_for_rules(&mode.rules(), state.rng.as_mut()),
            RoundMode::Daily(date) => daily_secret(date),
        }
    }

    /// The active round, created if none is in progress.
    pub(super) async fn fetch_or_create_active(
        &self,
        state: &mut FlowState,
    ) -> Result<Round, AppError> {
        let mode = self.mode;
        let mut make_secret = || Self::next_secret(mode, state);
        let round = self
            .store
            .find_active_or_create(mode, &mut make_secret)
            .await?;
        debug!(round_id = round.id, state = %round.state, "active round resolved");
        Ok(round)
    }

    /// The round the player is looking at.
    ///
    /// That is the active round of the service mode if there is one. Otherwise the
    /// most recent round of that mode, which stays current (won or abandoned) until
    /// the player resets. A round is only created here when the mode has none yet.
    pub(super) async fn current_round(&self, state: &mut FlowState) -> Result<Round, AppError> {
        if let Some(round) = self.store.find_active(self.mode).await? {
            return Ok(round);
        }

        if let Some(round) = self.store.find_latest(self.mode).await? {
            return Ok(round);
        }

        let round = self.fetch_or_create_active(state).await?;
        info!(round_id = round.id, mode = ?self.mode, "first round created");
        Ok(round)
    }
}
