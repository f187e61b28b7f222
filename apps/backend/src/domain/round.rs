//! Round aggregate and its lifecycle.
//!
//! A round starts `InProgress` and becomes `Won` or `Abandoned` exactly once.
//! The functions here only decide what should change; stores apply and persist it.

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::domain::code::{Code, Secret};
use crate::domain::evaluation::EvaluationResult;
use crate::domain::guess::Guess;
use crate::domain::rules::CodeRules;
pub use crate::entities::rounds::RoundState;
use crate::errors::domain::{ConflictKind, DomainError};

pub type RoundId = i64;

/// Which secrets a round gets. Stored with the round, so a round is always
/// played under the rules it was dealt with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundMode {
    /// Fresh random secret under the standard rules.
    Standard,
    /// The shared secret of a calendar day, under the daily rules.
    Daily(Date),
}

impl RoundMode {
    pub fn rules(&self) -> CodeRules {
        match self {
            RoundMode::Standard => CodeRules::STANDARD,
            RoundMode::Daily(_) => CodeRules::DAILY,
        }
    }

    pub fn daily_date(&self) -> Option<Date> {
        match self {
            RoundMode::Standard => None,
            RoundMode::Daily(date) => Some(*date),
        }
    }

    /// Inverse of [`RoundMode::daily_date`], as stored on the `rounds` row.
    pub fn from_daily_date(date: Option<Date>) -> Self {
        date.map_or(RoundMode::Standard, RoundMode::Daily)
    }
}

impl RoundState {
    pub fn is_terminal(self) -> bool {
        !matches!(self, RoundState::InProgress)
    }

    /// Only `InProgress -> Won` and `InProgress -> Abandoned` exist.
    pub fn can_transition_to(self, next: RoundState) -> bool {
        matches!(
            (self, next),
            (RoundState::InProgress, RoundState::Won) | (RoundState::InProgress, RoundState::Abandoned)
        )
    }

    /// Check a transition, returning the domain error a caller should surface.
    pub fn check_transition(self, next: RoundState) -> Result<(), DomainError> {
        if self.can_transition_to(next) {
            return Ok(());
        }
        if self.is_terminal() {
            return Err(DomainError::round_not_active(self));
        }
        Err(DomainError::conflict(
            ConflictKind::Other("InvalidTransition".into()),
            format!("Round cannot move from {self} to {next}"),
        ))
    }
}

/// A recorded guess. Never mutated after it is stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attempt {
    pub id: i64,
    pub guess_text: String,
    pub exact_count: u8,
    pub partial_count: u8,
    pub is_no_match: bool,
    pub is_repeated: bool,
    pub created_at: OffsetDateTime,
}

impl Attempt {
    pub fn feedback(&self) -> EvaluationResult {
        EvaluationResult {
            exact_count: self.exact_count,
            partial_count: self.partial_count,
            is_no_match: self.is_no_match,
        }
    }
}

/// An attempt about to be appended. The store assigns id and ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAttempt {
    pub guess_text: String,
    pub feedback: EvaluationResult,
    pub is_repeated: bool,
    pub created_at: OffsetDateTime,
}

/// A state change to persist, stamped with the moment it happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundTransition {
    pub to: RoundState,
    pub at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    pub id: RoundId,
    pub mode: RoundMode,
    pub created_at: OffsetDateTime,
    pub finished_at: Option<OffsetDateTime>,
    pub state: RoundState,
    pub secret: Secret,
    pub attempts: Vec<Attempt>,
}

impl Round {
    pub fn is_active(&self) -> bool {
        self.state == RoundState::InProgress
    }

    pub fn ensure_active(&self) -> Result<(), DomainError> {
        if self.is_active() {
            Ok(())
        } else {
            Err(DomainError::round_not_active(self.state))
        }
    }

    pub fn code_length(&self) -> usize {
        self.secret.len()
    }

    /// Rules guesses against this round are validated and evaluated with.
    pub fn rules(&self) -> CodeRules {
        self.mode.rules().with_length(self.code_length())
    }

    pub fn has_guessed(&self, guess_text: &str) -> bool {
        self.attempts.iter().any(|a| a.guess_text == guess_text)
    }

    /// Decide what accepting `guess` with `feedback` records, and whether it ends the round.
    pub fn plan_attempt(
        &self,
        guess: &Guess,
        feedback: EvaluationResult,
        now: OffsetDateTime,
    ) -> Result<(NewAttempt, Option<RoundTransition>), DomainError> {
        self.ensure_active()?;

        let guess_text = guess.text();
        let attempt = NewAttempt {
            is_repeated: self.has_guessed(&guess_text),
            guess_text,
            feedback,
            created_at: now,
        };

        let transition = feedback
            .is_solved(self.code_length())
            .then_some(RoundTransition {
                to: RoundState::Won,
                at: now,
            });

        Ok((attempt, transition))
    }

    pub fn plan_abandon(&self, now: OffsetDateTime) -> Result<RoundTransition, DomainError> {
        self.state.check_transition(RoundState::Abandoned)?;
        Ok(RoundTransition {
            to: RoundState::Abandoned,
            at: now,
        })
    }

    /// Append a stored attempt. Attempts are frozen once the round is terminal.
    pub fn push_attempt(&mut self, attempt: Attempt) -> Result<(), DomainError> {
        self.ensure_active()?;
        self.attempts.push(attempt);
        Ok(())
    }

    /// Apply a transition; `finished_at` is stamped here and nowhere else.
    pub fn apply_transition(&mut self, transition: RoundTransition) -> Result<(), DomainError> {
        self.state.check_transition(transition.to)?;
        self.state = transition.to;
        self.finished_at = Some(transition.at);
        Ok(())
    }

    pub fn view(&self) -> RoundView {
        RoundView {
            id: self.id,
            mode: self.mode,
            state: self.state,
            code_length: self.code_length(),
            created_at: self.created_at,
            finished_at: self.finished_at,
            attempts: self.attempts.clone(),
        }
    }

    pub fn summary(&self) -> RoundSummary {
        RoundSummary {
            id: self.id,
            mode: self.mode,
            state: self.state,
            attempt_count: self.attempts.len(),
            created_at: self.created_at,
            finished_at: self.finished_at,
        }
    }

    /// Review snapshot. The secret is only disclosed once the round was won.
    pub fn review(&self) -> RoundReview {
        RoundReview {
            id: self.id,
            state: self.state,
            created_at: self.created_at,
            finished_at: self.finished_at,
            attempts: self.attempts.clone(),
            secret: (self.state == RoundState::Won).then(|| self.secret.reveal().clone()),
        }
    }
}

/// Player-facing view of a round. Carries no secret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundView {
    pub id: RoundId,
    pub mode: RoundMode,
    pub state: RoundState,
    pub code_length: usize,
    pub created_at: OffsetDateTime,
    pub finished_at: Option<OffsetDateTime>,
    pub attempts: Vec<Attempt>,
}

/// History list entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundSummary {
    pub id: RoundId,
    pub mode: RoundMode,
    pub state: RoundState,
    pub attempt_count: usize,
    pub created_at: OffsetDateTime,
    pub finished_at: Option<OffsetDateTime>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundReview {
    pub id: RoundId,
    pub state: RoundState,
    pub created_at: OffsetDateTime,
    pub finished_at: Option<OffsetDateTime>,
    pub attempts: Vec<Attempt>,
    pub secret: Option<Code>,
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;
    use crate::domain::evaluation::evaluate;
    use crate::domain::guess::validate_guess;

    const T0: OffsetDateTime = datetime!(2026-10-18 09:00 UTC);
    const T1: OffsetDateTime = datetime!(2026-10-18 09:05 UTC);

    fn round(secret: &str) -> Round {
        Round {
            id: 1,
            mode: RoundMode::Standard,
            created_at: T0,
            finished_at: None,
            state: RoundState::InProgress,
            secret: Secret::new(Code::from_stored(secret).unwrap()),
            attempts: Vec::new(),
        }
    }

    fn stored(id: i64, text: &str, feedback: EvaluationResult) -> Attempt {
        Attempt {
            id,
            guess_text: text.to_string(),
            exact_count: feedback.exact_count,
            partial_count: feedback.partial_count,
            is_no_match: feedback.is_no_match,
            is_repeated: false,
            created_at: T0,
        }
    }

    fn plan(r: &Round, text: &str) -> (NewAttempt, Option<RoundTransition>) {
        let guess = validate_guess(text).unwrap();
        let feedback = evaluate(r.secret.reveal(), guess.code()).unwrap();
        r.plan_attempt(&guess, feedback, T1).unwrap()
    }

    #[test]
    fn only_in_progress_has_outgoing_edges() {
        use RoundState::*;
        for from in [InProgress, Won, Abandoned] {
            for to in [InProgress, Won, Abandoned] {
                let expected = from == InProgress && to != InProgress;
                assert_eq!(from.can_transition_to(to), expected, "{from} -> {to}");
            }
        }
        assert!(!InProgress.is_terminal());
        assert!(Won.is_terminal());
        assert!(Abandoned.is_terminal());
    }

    #[test]
    fn leaving_a_terminal_state_reports_round_not_active() {
        let err = RoundState::Won
            .check_transition(RoundState::Abandoned)
            .unwrap_err();
        assert_eq!(err, DomainError::round_not_active(RoundState::Won));
    }

    #[test]
    fn solving_guess_plans_won_transition() {
        let r = round("12345");
        let (attempt, transition) = plan(&r, "12345");
        assert_eq!(attempt.feedback.exact_count, 5);
        assert!(!attempt.is_repeated);
        assert_eq!(
            transition,
            Some(RoundTransition {
                to: RoundState::Won,
                at: T1
            })
        );
    }

    #[test]
    fn partial_guess_keeps_round_open() {
        let r = round("12345");
        let (attempt, transition) = plan(&r, "15432");
        assert_eq!(attempt.guess_text, "15432");
        assert_eq!(attempt.feedback.exact_count, 1);
        assert_eq!(attempt.feedback.partial_count, 4);
        assert_eq!(transition, None);
    }

    #[test]
    fn repeated_guess_text_is_flagged() {
        let mut r = round("12345");
        let (first, _) = plan(&r, "67890");
        r.push_attempt(stored(1, &first.guess_text, first.feedback))
            .unwrap();

        let (again, _) = plan(&r, "67890");
        assert!(again.is_repeated);
        let (fresh, _) = plan(&r, "09876");
        assert!(!fresh.is_repeated);
    }

    #[test]
    fn terminal_round_rejects_attempts() {
        let mut r = round("12345");
        r.apply_transition(RoundTransition {
            to: RoundState::Won,
            at: T1,
        })
        .unwrap();

        let guess = validate_guess("67890").unwrap();
        let feedback = evaluate(r.secret.reveal(), guess.code()).unwrap();
        let err = r.plan_attempt(&guess, feedback, T1).unwrap_err();
        assert_eq!(err, DomainError::round_not_active(RoundState::Won));

        let err = r
            .push_attempt(stored(9, "67890", feedback))
            .unwrap_err();
        assert_eq!(err, DomainError::round_not_active(RoundState::Won));
        assert!(r.attempts.is_empty(), "attempts are frozen once terminal");
    }

    #[test]
    fn finished_at_is_set_exactly_once() {
        let mut r = round("12345");
        let t = r.plan_abandon(T1).unwrap();
        r.apply_transition(t).unwrap();
        assert_eq!(r.state, RoundState::Abandoned);
        assert_eq!(r.finished_at, Some(T1));

        let later = datetime!(2026-10-18 10:00 UTC);
        assert!(r
            .apply_transition(RoundTransition {
                to: RoundState::Won,
                at: later
            })
            .is_err());
        assert_eq!(r.finished_at, Some(T1));
        assert!(r.plan_abandon(later).is_err());
    }

    #[test]
    fn review_reveals_secret_only_after_a_win() {
        let mut open = round("12345");
        assert_eq!(open.review().secret, None);

        let mut abandoned = open.clone();
        abandoned
            .apply_transition(abandoned.plan_abandon(T1).unwrap())
            .unwrap();
        assert_eq!(abandoned.review().secret, None);

        open.apply_transition(RoundTransition {
            to: RoundState::Won,
            at: T1,
        })
        .unwrap();
        assert_eq!(
            open.review().secret.map(|c| c.to_string()),
            Some("12345".to_string())
        );
    }

    #[test]
    fn mode_round_trips_through_daily_date() {
        let day = time::macros::date!(2026 - 10 - 18);
        for mode in [RoundMode::Standard, RoundMode::Daily(day)] {
            assert_eq!(RoundMode::from_daily_date(mode.daily_date()), mode);
        }
        assert_eq!(RoundMode::Daily(day).rules(), CodeRules::DAILY);
    }

    #[test]
    fn round_rules_follow_its_own_secret() {
        let mut r = round("1234");
        r.mode = RoundMode::Daily(time::macros::date!(2026 - 10 - 18));
        assert_eq!(r.rules(), CodeRules::DAILY);
        assert_eq!(round("12345").rules(), CodeRules::STANDARD);
    }

    #[test]
    fn summary_and_view_hide_the_secret() {
        let r = round("12345");
        let summary = r.summary();
        assert_eq!(summary.attempt_count, 0);
        assert_eq!(summary.state, RoundState::InProgress);

        let view = r.view();
        assert_eq!(view.code_length, 5);
        assert_eq!(view.mode, RoundMode::Standard);
        let debug = format!("{r:?}");
        assert!(!debug.contains("12345"));
    }
}
