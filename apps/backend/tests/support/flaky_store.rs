//! Store wrapper whose state updates always fail.

use async_trait::async_trait;
use codebreaker::domain::code::Secret;
use codebreaker::domain::round::{
    NewAttempt, Round, RoundId, RoundMode, RoundReview, RoundSummary, RoundTransition,
};
use codebreaker::errors::domain::{DomainError, InfraErrorKind};
use codebreaker::repos::rounds::{RoundStore, SecretSource};

pub struct FailingUpdates<S> {
    pub inner: S,
}

impl<S> FailingUpdates<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<S: RoundStore> RoundStore for FailingUpdates<S> {
    async fn find_active(&self, mode: RoundMode) -> Result<Option<Round>, DomainError> {
        self.inner.find_active(mode).await
    }

    async fn find_active_or_create(
        &self,
        mode: RoundMode,
        make_secret: SecretSource<'_>,
    ) -> Result<Round, DomainError> {
        self.inner.find_active_or_create(mode, make_secret).await
    }

    async fn create_round(&self, mode: RoundMode, secret: Secret) -> Result<Round, DomainError> {
        self.inner.create_round(mode, secret).await
    }

    async fn find_latest(&self, mode: RoundMode) -> Result<Option<Round>, DomainError> {
        self.inner.find_latest(mode).await
    }

    async fn find_by_id(&self, round_id: RoundId) -> Result<Option<Round>, DomainError> {
        self.inner.find_by_id(round_id).await
    }

    async fn append_attempt(
        &self,
        round_id: RoundId,
        attempt: NewAttempt,
        transition: Option<RoundTransition>,
    ) -> Result<Round, DomainError> {
        self.inner.append_attempt(round_id, attempt, transition).await
    }

    async fn update_round_state(
        &self,
        _round_id: RoundId,
        _transition: RoundTransition,
    ) -> Result<Round, DomainError> {
        Err(DomainError::infra(
            InfraErrorKind::DbUnavailable,
            "update refused by test store",
        ))
    }

    async fn list_summaries(&self, limit: u64) -> Result<Vec<RoundSummary>, DomainError> {
        self.inner.list_summaries(limit).await
    }

    async fn detail_snapshot(
        &self,
        round_id: RoundId,
    ) -> Result<Option<RoundReview>, DomainError> {
        self.inner.detail_snapshot(round_id).await
    }
}
