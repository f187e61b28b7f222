//! Domain-level error type used across services and adapters.
//!
//! This error type is storage-agnostic. Services return
//! `Result<T, crate::error::AppError>` and convert from `DomainError`
//! using the provided `From<DomainError> for AppError` implementation.
//!
//! Detail strings are shown to players. They may echo the submitted guess,
//! never the secret.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::domain::round::RoundState;

/// Why a submitted guess was rejected, in check order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    InvalidLength { expected: usize, actual: usize },
    NonNumeric { found: char },
    OutOfRange { digit: u8, min: u8, max: u8 },
    RepeatedDigits { digit: u8 },
}

/// Infra error kinds to distinguish operational failures
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InfraErrorKind {
    Timeout,
    DbUnavailable,
    DataCorruption,
    Other(String),
}

/// Domain-level not found entities
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Round,
    ActiveRound,
    Other(String),
}

/// Domain-level conflict kinds
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConflictKind {
    /// The round addressed is not `InProgress`; carries the state it is in.
    RoundNotActive { state: RoundState },
    /// Today's daily challenge already has a round; it cannot be dealt again.
    DailyRestart,
    /// A round holds as many attempts as storage can number.
    AttemptLimit,
    Other(String),
}

/// Programming-contract violations. These indicate a wiring bug, not bad input.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ContractKind {
    /// Evaluator received sequences whose lengths differ from the expected length.
    LengthMismatch {
        expected: usize,
        secret: usize,
        guess: usize,
    },
    /// Rules that cannot be satisfied, e.g. more unique digits than the alphabet holds.
    InvalidConfiguration,
    /// A persisted record failed to decode into a domain value.
    CorruptRecord,
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Input validation (bad guess shape)
    Validation(ValidationKind, String),
    /// Semantic conflict with the current round state
    Conflict(ConflictKind, String),
    /// Missing resource in domain terms
    NotFound(NotFoundKind, String),
    /// Broken internal contract
    Contract(ContractKind, String),
    /// Infrastructure/operational failures
    Infra(InfraErrorKind, String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(_, d) => write!(f, "validation error: {d}"),
            DomainError::Conflict(kind, d) => write!(f, "conflict {kind:?}: {d}"),
            DomainError::NotFound(kind, d) => write!(f, "not found {kind:?}: {d}"),
            DomainError::Contract(kind, d) => write!(f, "contract violation {kind:?}: {d}"),
            DomainError::Infra(kind, d) => write!(f, "infra {kind:?}: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }
    pub fn conflict(kind: ConflictKind, detail: impl Into<String>) -> Self {
        Self::Conflict(kind, detail.into())
    }
    pub fn round_not_active(state: RoundState) -> Self {
        Self::Conflict(
            ConflictKind::RoundNotActive { state },
            format!("Round is {state}, start a new round to keep playing"),
        )
    }
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }
    pub fn contract(kind: ContractKind, detail: impl Into<String>) -> Self {
        Self::Contract(kind, detail.into())
    }
    pub fn infra(kind: InfraErrorKind, detail: impl Into<String>) -> Self {
        Self::Infra(kind, detail.into())
    }

    /// The validation kind, if this is a validation failure.
    pub fn validation_kind(&self) -> Option<&ValidationKind> {
        match self {
            DomainError::Validation(kind, _) => Some(kind),
            _ => None,
        }
    }
}
