//! Round persistence gateway.
//!
//! The orchestrator is generic over [`RoundStore`]; the SeaORM adapter and the
//! in-memory adapter both implement it. Every mutating call is one committed
//! step: either everything it describes is stored or nothing is.

use async_trait::async_trait;

use crate::domain::code::Secret;
use crate::domain::round::{
    NewAttempt, Round, RoundId, RoundMode, RoundReview, RoundSummary, RoundTransition,
};
use crate::errors::domain::DomainError;

/// Produces the secret for a round the store has to create.
/// Only called when no round of the requested mode is active.
pub type SecretSource<'a> = &'a mut (dyn FnMut() -> Result<Secret, DomainError> + Send);

#[async_trait]
pub trait RoundStore: Send + Sync {
    /// The active round of `mode`, if any. With more than one `InProgress` round the newest wins.
    ///
    /// Standard rounds and each day's daily rounds are separate: a round is only
    /// ever returned for the mode it was created in.
    async fn find_active(&self, mode: RoundMode) -> Result<Option<Round>, DomainError>;

    /// The active round of `mode`, or a freshly created one using `make_secret`. Atomic.
    async fn find_active_or_create(
        &self,
        mode: RoundMode,
        make_secret: SecretSource<'_>,
    ) -> Result<Round, DomainError>;

    /// Create a new `InProgress` round of `mode` unconditionally.
    async fn create_round(&self, mode: RoundMode, secret: Secret) -> Result<Round, DomainError>;

    /// The most recently created round of `mode`, whatever its state.
    async fn find_latest(&self, mode: RoundMode) -> Result<Option<Round>, DomainError>;

    async fn find_by_id(&self, round_id: RoundId) -> Result<Option<Round>, DomainError>;

    /// Append `attempt` and, when given, apply `transition` in the same commit.
    ///
    /// Fails with `RoundNotActive` if the stored round is no longer `InProgress`.
    async fn append_attempt(
        &self,
        round_id: RoundId,
        attempt: NewAttempt,
        transition: Option<RoundTransition>,
    ) -> Result<Round, DomainError>;

    async fn update_round_state(
        &self,
        round_id: RoundId,
        transition: RoundTransition,
    ) -> Result<Round, DomainError>;

    /// Newest first, at most `limit` entries.
    async fn list_summaries(&self, limit: u64) -> Result<Vec<RoundSummary>, DomainError>;

    async fn detail_snapshot(&self, round_id: RoundId)
        -> Result<Option<RoundReview>, DomainError>;
}
