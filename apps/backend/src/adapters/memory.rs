//! In-process round store.
//!
//! Holds everything behind one `parking_lot` mutex; no lock is held across an
//! await, so each call is atomic with respect to every other call.

use std::collections::BTreeMap;

use async_trait::async_trait;
use parking_lot::Mutex;
use time::OffsetDateTime;
use tracing::{debug, warn};

use crate::domain::code::Secret;
use crate::domain::round::{
    Attempt, NewAttempt, Round, RoundId, RoundMode, RoundReview, RoundState, RoundSummary,
    RoundTransition,
};
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::repos::rounds::{RoundStore, SecretSource};

#[derive(Debug, Default)]
struct Inner {
    next_round_id: RoundId,
    next_attempt_id: i64,
    rounds: BTreeMap<RoundId, Round>,
}

impl Inner {
    fn of_mode(&self, mode: RoundMode) -> impl Iterator<Item = &Round> {
        self.rounds.values().rev().filter(move |r| r.mode == mode)
    }

    fn active(&self, mode: RoundMode) -> Option<&Round> {
        let mut in_progress = self.of_mode(mode).filter(|r| r.is_active());
        let newest = in_progress.next()?;
        let others = in_progress.count();
        if others > 0 {
            warn!(
                ?mode,
                count = others + 1,
                newest = newest.id,
                "multiple rounds in progress, using newest"
            );
        }
        Some(newest)
    }

    fn insert(&mut self, mode: RoundMode, secret: Secret) -> Round {
        self.next_round_id += 1;
        let round = Round {
            id: self.next_round_id,
            mode,
            created_at: OffsetDateTime::now_utc(),
            finished_at: None,
            state: RoundState::InProgress,
            secret,
            attempts: Vec::new(),
        };
        self.rounds.insert(round.id, round.clone());
        debug!(round_id = round.id, "round created");
        round
    }

    fn get_mut(&mut self, round_id: RoundId) -> Result<&mut Round, DomainError> {
        self.rounds.get_mut(&round_id).ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Round, format!("Round {round_id} not found"))
        })
    }
}

#[derive(Debug, Default)]
pub struct InMemoryRoundStore {
    inner: Mutex<Inner>,
}

impl InMemoryRoundStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rounds ever created.
    pub fn len(&self) -> usize {
        self.inner.lock().rounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl RoundStore for InMemoryRoundStore {
    async fn find_active(&self, mode: RoundMode) -> Result<Option<Round>, DomainError> {
        Ok(self.inner.lock().active(mode).cloned())
    }

    async fn find_active_or_create(
        &self,
        mode: RoundMode,
        make_secret: SecretSource<'_>,
    ) -> Result<Round, DomainError> {
        let mut inner = self.inner.lock();
        if let Some(round) = inner.active(mode) {
            return Ok(round.clone());
        }
        let secret = make_secret()?;
        Ok(inner.insert(mode, secret))
    }

    async fn create_round(&self, mode: RoundMode, secret: Secret) -> Result<Round, DomainError> {
        Ok(self.inner.lock().insert(mode, secret))
    }

    async fn find_latest(&self, mode: RoundMode) -> Result<Option<Round>, DomainError> {
        Ok(self.inner.lock().of_mode(mode).next().cloned())
    }

    async fn find_by_id(&self, round_id: RoundId) -> Result<Option<Round>, DomainError> {
        Ok(self.inner.lock().rounds.get(&round_id).cloned())
    }

    async fn append_attempt(
        &self,
        round_id: RoundId,
        attempt: NewAttempt,
        transition: Option<RoundTransition>,
    ) -> Result<Round, DomainError> {
        let mut inner = self.inner.lock();
        let attempt_id = inner.next_attempt_id + 1;

        // Work on a copy so a rejected transition leaves the stored round untouched
        let mut round = inner.get_mut(round_id)?.clone();
        round.push_attempt(Attempt {
            id: attempt_id,
            guess_text: attempt.guess_text,
            exact_count: attempt.feedback.exact_count,
            partial_count: attempt.feedback.partial_count,
            is_no_match: attempt.feedback.is_no_match,
            is_repeated: attempt.is_repeated,
            created_at: attempt.created_at,
        })?;
        if let Some(t) = transition {
            round.apply_transition(t)?;
        }

        inner.next_attempt_id = attempt_id;
        *inner.get_mut(round_id)? = round.clone();
        Ok(round)
    }

    async fn update_round_state(
        &self,
        round_id: RoundId,
        transition: RoundTransition,
    ) -> Result<Round, DomainError> {
        let mut inner = self.inner.lock();
        let round = inner.get_mut(round_id)?;
        round.apply_transition(transition)?;
        Ok(round.clone())
    }

    async fn list_summaries(&self, limit: u64) -> Result<Vec<RoundSummary>, DomainError> {
        let inner = self.inner.lock();
        Ok(inner
            .rounds
            .values()
            .rev()
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .map(Round::summary)
            .collect())
    }

    async fn detail_snapshot(
        &self,
        round_id: RoundId,
    ) -> Result<Option<RoundReview>, DomainError> {
        Ok(self.inner.lock().rounds.get(&round_id).map(Round::review))
    }
}
