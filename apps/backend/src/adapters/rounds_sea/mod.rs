//! SeaORM adapter for rounds and their attempts.

use async_trait::async_trait;
use sea_orm::sea_query::SimpleExpr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, NotSet,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::{debug, warn};

use crate::domain::code::{Code, Secret};
use crate::domain::round::{
    Attempt, NewAttempt, Round, RoundId, RoundMode, RoundReview, RoundSummary, RoundTransition,
};
use crate::entities::rounds::RoundState;
use crate::entities::{attempts, rounds};
use crate::errors::domain::{ConflictKind, ContractKind, DomainError};
use crate::infra::db_errors::{map_db_err, round_not_found};
use crate::repos::rounds::{RoundStore, SecretSource};

pub mod dto;

pub use dto::{AttemptCreate, RoundCreate, RoundStateUpdate};

// ----- Free functions over any connection or transaction -----

/// Find a round by ID
pub async fn find_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<Option<rounds::Model>, sea_orm::DbErr> {
    rounds::Entity::find_by_id(round_id).one(conn).await
}

/// Rows belonging to `mode`: standard rounds have no daily date.
fn mode_filter(mode: RoundMode) -> SimpleExpr {
    match mode.daily_date() {
        Some(date) => rounds::Column::DailyDate.eq(date),
        None => rounds::Column::DailyDate.is_null(),
    }
}

/// All `InProgress` rounds of `mode`, newest first.
pub async fn find_in_progress<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    mode: RoundMode,
) -> Result<Vec<rounds::Model>, sea_orm::DbErr> {
    rounds::Entity::find()
        .filter(rounds::Column::State.eq(RoundState::InProgress))
        .filter(mode_filter(mode))
        .order_by_desc(rounds::Column::Id)
        .all(conn)
        .await
}

/// Newest round of `mode` in any state.
pub async fn find_latest_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    mode: RoundMode,
) -> Result<Option<rounds::Model>, sea_orm::DbErr> {
    rounds::Entity::find()
        .filter(mode_filter(mode))
        .order_by_desc(rounds::Column::Id)
        .one(conn)
        .await
}

/// Attempts of a round in the order they were made.
pub async fn find_attempts<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<Vec<attempts::Model>, sea_orm::DbErr> {
    attempts::Entity::find()
        .filter(attempts::Column::RoundId.eq(round_id))
        .order_by_asc(attempts::Column::AttemptNo)
        .all(conn)
        .await
}

pub async fn count_attempts<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    attempts::Entity::find()
        .filter(attempts::Column::RoundId.eq(round_id))
        .count(conn)
        .await
}

/// Newest rounds first.
pub async fn list_rounds<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    limit: u64,
) -> Result<Vec<rounds::Model>, sea_orm::DbErr> {
    rounds::Entity::find()
        .order_by_desc(rounds::Column::Id)
        .limit(limit)
        .all(conn)
        .await
}

/// Create a new round
pub async fn create_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: RoundCreate,
) -> Result<rounds::Model, sea_orm::DbErr> {
    rounds::ActiveModel {
        id: NotSet,
        state: Set(RoundState::InProgress),
        secret: Set(dto.secret),
        daily_date: Set(dto.daily_date),
        created_at: Set(dto.created_at),
        finished_at: Set(None),
    }
    .insert(conn)
    .await
}

pub async fn create_attempt<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: AttemptCreate,
) -> Result<attempts::Model, sea_orm::DbErr> {
    attempts::ActiveModel {
        id: NotSet,
        round_id: Set(dto.round_id),
        attempt_no: Set(dto.attempt_no),
        guess_text: Set(dto.guess_text),
        exact_count: Set(dto.exact_count),
        partial_count: Set(dto.partial_count),
        is_no_match: Set(dto.is_no_match),
        is_repeated: Set(dto.is_repeated),
        created_at: Set(dto.created_at),
    }
    .insert(conn)
    .await
}

/// Set state and `finished_at` of a round
pub async fn set_round_state<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: RoundStateUpdate,
) -> Result<rounds::Model, sea_orm::DbErr> {
    let round = find_round(conn, dto.round_id)
        .await?
        .ok_or_else(|| round_not_found(dto.round_id))?;

    let mut active: rounds::ActiveModel = round.into();
    active.state = Set(dto.state);
    active.finished_at = Set(Some(dto.finished_at));
    active.update(conn).await
}

// ----- Conversions between SeaORM models and domain models -----

fn corrupt(detail: String) -> DomainError {
    DomainError::contract(ContractKind::CorruptRecord, detail)
}

fn small_to_u8(value: i16, column: &str, attempt_id: i64) -> Result<u8, DomainError> {
    u8::try_from(value)
        .map_err(|_| corrupt(format!("Attempt {attempt_id} has invalid {column}: {value}")))
}

fn attempt_from_model(model: attempts::Model) -> Result<Attempt, DomainError> {
    Ok(Attempt {
        id: model.id,
        exact_count: small_to_u8(model.exact_count, "exact_count", model.id)?,
        partial_count: small_to_u8(model.partial_count, "partial_count", model.id)?,
        guess_text: model.guess_text,
        is_no_match: model.is_no_match,
        is_repeated: model.is_repeated,
        created_at: model.created_at,
    })
}

fn round_from_models(
    round: rounds::Model,
    attempts: Vec<attempts::Model>,
) -> Result<Round, DomainError> {
    let secret = Code::from_stored(&round.secret)
        .map_err(|_| corrupt(format!("Round {} has an unreadable secret", round.id)))?;

    Ok(Round {
        id: round.id,
        mode: RoundMode::from_daily_date(round.daily_date),
        created_at: round.created_at,
        finished_at: round.finished_at,
        state: round.state,
        secret: Secret::new(secret),
        attempts: attempts
            .into_iter()
            .map(attempt_from_model)
            .collect::<Result<_, _>>()?,
    })
}

async fn load_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round: rounds::Model,
) -> Result<Round, DomainError> {
    let attempts = find_attempts(conn, round.id).await.map_err(map_db_err)?;
    round_from_models(round, attempts)
}

/// Newest `InProgress` round of `mode`; more than one means an earlier abandon was lost.
async fn load_active<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    mode: RoundMode,
) -> Result<Option<Round>, DomainError> {
    let mut candidates = find_in_progress(conn, mode).await.map_err(map_db_err)?;
    if candidates.len() > 1 {
        warn!(
            ?mode,
            count = candidates.len(),
            newest = candidates[0].id,
            "multiple rounds in progress, using newest"
        );
    }
    if candidates.is_empty() {
        return Ok(None);
    }
    let newest = candidates.swap_remove(0);
    load_round(conn, newest).await.map(Some)
}

/// Number for the attempt following `existing` stored ones.
fn next_attempt_no(round_id: RoundId, existing: u64) -> Result<i32, DomainError> {
    existing
        .checked_add(1)
        .and_then(|n| i32::try_from(n).ok())
        .ok_or_else(|| {
            DomainError::conflict(
                ConflictKind::AttemptLimit,
                format!("Round {round_id} cannot take any more attempts"),
            )
        })
}

// ----- RoundStore implementation -----

/// SeaORM implementation of [`RoundStore`].
#[derive(Debug, Clone)]
pub struct SeaRoundStore {
    db: DatabaseConnection,
}

impl SeaRoundStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait]
impl RoundStore for SeaRoundStore {
    async fn find_active(&self, mode: RoundMode) -> Result<Option<Round>, DomainError> {
        load_active(&self.db, mode).await
    }

    async fn find_active_or_create(
        &self,
        mode: RoundMode,
        make_secret: SecretSource<'_>,
    ) -> Result<Round, DomainError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        if let Some(round) = load_active(&txn, mode).await? {
            txn.commit().await.map_err(map_db_err)?;
            return Ok(round);
        }

        let secret = make_secret()?;
        let model = create_round(
            &txn,
            RoundCreate {
                secret: secret.reveal().to_string(),
                daily_date: mode.daily_date(),
                created_at: time::OffsetDateTime::now_utc(),
            },
        )
        .await
        .map_err(map_db_err)?;
        txn.commit().await.map_err(map_db_err)?;

        debug!(round_id = model.id, "round created");
        round_from_models(model, Vec::new())
    }

    async fn create_round(&self, mode: RoundMode, secret: Secret) -> Result<Round, DomainError> {
        let model = create_round(
            &self.db,
            RoundCreate {
                secret: secret.reveal().to_string(),
                daily_date: mode.daily_date(),
                created_at: time::OffsetDateTime::now_utc(),
            },
        )
        .await
        .map_err(map_db_err)?;

        debug!(round_id = model.id, "round created");
        round_from_models(model, Vec::new())
    }

    async fn find_latest(&self, mode: RoundMode) -> Result<Option<Round>, DomainError> {
        match find_latest_round(&self.db, mode).await.map_err(map_db_err)? {
            Some(model) => load_round(&self.db, model).await.map(Some),
            None => Ok(None),
        }
    }

    async fn find_by_id(&self, round_id: RoundId) -> Result<Option<Round>, DomainError> {
        match find_round(&self.db, round_id).await.map_err(map_db_err)? {
            Some(model) => load_round(&self.db, model).await.map(Some),
            None => Ok(None),
        }
    }

    async fn append_attempt(
        &self,
        round_id: RoundId,
        attempt: NewAttempt,
        transition: Option<RoundTransition>,
    ) -> Result<Round, DomainError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let model = find_round(&txn, round_id)
            .await
            .map_err(map_db_err)?
            .ok_or_else(|| map_db_err(round_not_found(round_id)))?;
        if model.state != RoundState::InProgress {
            return Err(DomainError::round_not_active(model.state));
        }
        if let Some(t) = &transition {
            model.state.check_transition(t.to)?;
        }

        let existing = count_attempts(&txn, round_id).await.map_err(map_db_err)?;
        let attempt_no = next_attempt_no(round_id, existing)?;

        create_attempt(
            &txn,
            AttemptCreate {
                round_id,
                attempt_no,
                guess_text: attempt.guess_text,
                exact_count: i16::from(attempt.feedback.exact_count),
                partial_count: i16::from(attempt.feedback.partial_count),
                is_no_match: attempt.feedback.is_no_match,
                is_repeated: attempt.is_repeated,
                created_at: attempt.created_at,
            },
        )
        .await
        .map_err(map_db_err)?;

        let model = match transition {
            Some(t) => set_round_state(
                &txn,
                RoundStateUpdate {
                    round_id,
                    state: t.to,
                    finished_at: t.at,
                },
            )
            .await
            .map_err(map_db_err)?,
            None => model,
        };

        let round = load_round(&txn, model).await?;
        txn.commit().await.map_err(map_db_err)?;
        Ok(round)
    }

    async fn update_round_state(
        &self,
        round_id: RoundId,
        transition: RoundTransition,
    ) -> Result<Round, DomainError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let model = find_round(&txn, round_id)
            .await
            .map_err(map_db_err)?
            .ok_or_else(|| map_db_err(round_not_found(round_id)))?;
        model.state.check_transition(transition.to)?;

        let model = set_round_state(
            &txn,
            RoundStateUpdate {
                round_id,
                state: transition.to,
                finished_at: transition.at,
            },
        )
        .await
        .map_err(map_db_err)?;

        let round = load_round(&txn, model).await?;
        txn.commit().await.map_err(map_db_err)?;
        Ok(round)
    }

    async fn list_summaries(&self, limit: u64) -> Result<Vec<RoundSummary>, DomainError> {
        let models = list_rounds(&self.db, limit).await.map_err(map_db_err)?;

        let mut out = Vec::with_capacity(models.len());
        for model in models {
            let attempt_count = count_attempts(&self.db, model.id)
                .await
                .map_err(map_db_err)?;
            out.push(RoundSummary {
                id: model.id,
                mode: RoundMode::from_daily_date(model.daily_date),
                state: model.state,
                attempt_count: attempt_count as usize,
                created_at: model.created_at,
                finished_at: model.finished_at,
            });
        }
        Ok(out)
    }

    async fn detail_snapshot(
        &self,
        round_id: RoundId,
    ) -> Result<Option<RoundReview>, DomainError> {
        Ok(self.find_by_id(round_id).await?.map(|r| r.review()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attempt_numbers_start_at_one() {
        assert_eq!(next_attempt_no(7, 0).unwrap(), 1);
        assert_eq!(next_attempt_no(7, 41).unwrap(), 42);
    }

    #[test]
    fn attempt_numbers_beyond_column_range_hit_the_limit() {
        let last = u64::try_from(i32::MAX).unwrap();
        assert_eq!(next_attempt_no(7, last - 1).unwrap(), i32::MAX);

        let err = next_attempt_no(7, last).unwrap_err();
        assert!(matches!(
            err,
            DomainError::Conflict(ConflictKind::AttemptLimit, _)
        ));
    }
}
