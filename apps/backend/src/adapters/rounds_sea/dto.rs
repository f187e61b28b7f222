//! DTOs for rounds_sea adapter.

use time::{Date, OffsetDateTime};

use crate::entities::rounds::RoundState;

/// DTO for creating a new round.
#[derive(Debug, Clone)]
pub struct RoundCreate {
    pub secret: String,
    pub daily_date: Option<Date>,
    pub created_at: OffsetDateTime,
}

/// DTO for appending an attempt.
#[derive(Debug, Clone)]
pub struct AttemptCreate {
    pub round_id: i64,
    pub attempt_no: i32,
    pub guess_text: String,
    pub exact_count: i16,
    pub partial_count: i16,
    pub is_no_match: bool,
    pub is_repeated: bool,
    pub created_at: OffsetDateTime,
}

/// DTO for moving a round to a terminal state.
#[derive(Debug, Clone)]
pub struct RoundStateUpdate {
    pub round_id: i64,
    pub state: RoundState,
    pub finished_at: OffsetDateTime,
}
