// Mapping from domain errors to service errors, without any store involved.
use std::collections::HashSet;

use crate::domain::round::RoundState;
use crate::errors::domain::{
    ConflictKind, ContractKind, DomainError, InfraErrorKind, NotFoundKind, ValidationKind,
};
use crate::{AppError, ErrorCode};

#[test]
fn maps_conflicts() {
    for state in [RoundState::Won, RoundState::Abandoned] {
        let app: AppError = DomainError::round_not_active(state).into();
        assert_eq!(app, AppError::RoundNotActive { state });
    }

    let other: AppError = DomainError::conflict(
        ConflictKind::Other("Unique".to_string()),
        "duplicate attempt number",
    )
    .into();
    assert_eq!(other.code(), ErrorCode::Conflict);
    assert!(!other.is_user_recoverable());

    let daily: AppError =
        DomainError::conflict(ConflictKind::DailyRestart, "already dealt today").into();
    assert_eq!(daily.code(), ErrorCode::DailyRestart);
    assert!(daily.is_user_recoverable());

    let full: AppError =
        DomainError::conflict(ConflictKind::AttemptLimit, "round is full").into();
    assert_eq!(full.code(), ErrorCode::AttemptLimit);
    assert!(!full.is_user_recoverable());
}

#[test]
fn maps_not_found_kinds() {
    let round: AppError = DomainError::not_found(NotFoundKind::Round, "Round 3 not found").into();
    assert_eq!(round.code(), ErrorCode::RoundNotFound);

    let active: AppError =
        DomainError::not_found(NotFoundKind::ActiveRound, "No round is in progress").into();
    assert_eq!(active.code(), ErrorCode::RoundNotFound);

    let other: AppError =
        DomainError::not_found(NotFoundKind::Other("Thing".into()), "missing").into();
    assert_eq!(other.code(), ErrorCode::NotFound);
}

#[test]
fn maps_infra_and_contract_kinds() {
    let cases = [
        (InfraErrorKind::Timeout, ErrorCode::DbTimeout),
        (InfraErrorKind::DbUnavailable, ErrorCode::DbUnavailable),
        (InfraErrorKind::DataCorruption, ErrorCode::DataCorruption),
        (InfraErrorKind::Other("Io".into()), ErrorCode::DbError),
    ];
    for (kind, code) in cases {
        let app: AppError = DomainError::infra(kind, "boom").into();
        assert_eq!(app.code(), code);
    }

    let corrupt: AppError =
        DomainError::contract(ContractKind::CorruptRecord, "secret is 'abcde'").into();
    assert_eq!(corrupt.code(), ErrorCode::DataCorruption);
    assert_eq!(corrupt.detail(), "Stored game data is damaged");

    let config: AppError =
        DomainError::contract(ContractKind::InvalidConfiguration, "length 0").into();
    assert_eq!(config.code(), ErrorCode::ContractViolation);
}

#[test]
fn repeated_digit_detail_is_kept() {
    let app: AppError = DomainError::validation(
        ValidationKind::RepeatedDigits { digit: 4 },
        "Digit 4 appears more than once",
    )
    .into();
    assert_eq!(app.detail(), "Digit 4 appears more than once");
}

#[test]
fn error_code_strings_are_unique() {
    let codes = [
        ErrorCode::InvalidLength,
        ErrorCode::NonNumeric,
        ErrorCode::OutOfRange,
        ErrorCode::RepeatedDigits,
        ErrorCode::RoundNotActive,
        ErrorCode::RoundNotFound,
        ErrorCode::DailyRestart,
        ErrorCode::AttemptLimit,
        ErrorCode::Conflict,
        ErrorCode::NotFound,
        ErrorCode::Forbidden,
        ErrorCode::HintCancelled,
        ErrorCode::HintUnavailable,
        ErrorCode::DbError,
        ErrorCode::DbUnavailable,
        ErrorCode::DbTimeout,
        ErrorCode::DataCorruption,
        ErrorCode::ContractViolation,
        ErrorCode::Internal,
        ErrorCode::ConfigError,
    ];
    let strings: HashSet<&str> = codes.iter().map(|c| c.as_str()).collect();
    assert_eq!(strings.len(), codes.len());
}
