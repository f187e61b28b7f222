use thiserror::Error;

use crate::domain::round::RoundState;
use crate::errors::domain::{
    ConflictKind, ContractKind, DomainError, InfraErrorKind, NotFoundKind, ValidationKind,
};
use crate::errors::ErrorCode;

/// Service-level error returned by the game flow and hint services.
///
/// `detail()` is always safe to show to a player.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppError {
    #[error("Validation error: {detail}")]
    Validation {
        code: ErrorCode,
        kind: ValidationKind,
        detail: String,
    },
    #[error("Round not active: {state}")]
    RoundNotActive { state: RoundState },
    #[error("Not found: {detail}")]
    NotFound { code: ErrorCode, detail: String },
    #[error("Conflict: {detail}")]
    Conflict { code: ErrorCode, detail: String },
    #[error("Contract violation: {detail}")]
    Contract { detail: String },
    #[error("Forbidden: {detail}")]
    Forbidden { detail: String },
    #[error("Hint request cancelled")]
    HintCancelled,
    #[error("Hint unavailable: {detail}")]
    HintUnavailable { detail: String },
    #[error("Database error: {detail}")]
    Db { detail: String },
    #[error("Database unavailable: {detail}")]
    DbUnavailable { detail: String },
    #[error("Database timeout: {detail}")]
    DbTimeout { detail: String },
    #[error("Data corruption: {detail}")]
    DataCorruption { detail: String },
    #[error("Internal error: {detail}")]
    Internal { detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
}

impl AppError {
    /// Error code for this variant
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation { code, .. } => *code,
            AppError::RoundNotActive { .. } => ErrorCode::RoundNotActive,
            AppError::NotFound { code, .. } => *code,
            AppError::Conflict { code, .. } => *code,
            AppError::Contract { .. } => ErrorCode::ContractViolation,
            AppError::Forbidden { .. } => ErrorCode::Forbidden,
            AppError::HintCancelled => ErrorCode::HintCancelled,
            AppError::HintUnavailable { .. } => ErrorCode::HintUnavailable,
            AppError::Db { .. } => ErrorCode::DbError,
            AppError::DbUnavailable { .. } => ErrorCode::DbUnavailable,
            AppError::DbTimeout { .. } => ErrorCode::DbTimeout,
            AppError::DataCorruption { .. } => ErrorCode::DataCorruption,
            AppError::Internal { .. } => ErrorCode::Internal,
            AppError::Config { .. } => ErrorCode::ConfigError,
        }
    }

    /// Human-readable description, safe for display
    pub fn detail(&self) -> String {
        match self {
            AppError::Validation { detail, .. } => detail.clone(),
            AppError::RoundNotActive { state } => match state {
                RoundState::Won => "You already cracked this code. Start a new round to play again".to_string(),
                RoundState::Abandoned => "This round was abandoned. Start a new round to play again".to_string(),
                RoundState::InProgress => "Round is still in progress".to_string(),
            },
            AppError::NotFound { detail, .. } => detail.clone(),
            AppError::Conflict { detail, .. } => detail.clone(),
            AppError::Contract { .. } => "Something went wrong on our side".to_string(),
            AppError::Forbidden { detail } => detail.clone(),
            AppError::HintCancelled => "Hint request cancelled".to_string(),
            AppError::HintUnavailable { detail } => detail.clone(),
            AppError::Db { .. } => "Storage error".to_string(),
            AppError::DbUnavailable { .. } => "Storage is unavailable".to_string(),
            AppError::DbTimeout { .. } => "Storage timed out".to_string(),
            AppError::DataCorruption { .. } => "Stored game data is damaged".to_string(),
            AppError::Internal { .. } => "Something went wrong on our side".to_string(),
            AppError::Config { detail } => detail.clone(),
        }
    }

    /// Errors that are part of normal play. The player recovers from them through input alone.
    pub fn is_user_recoverable(&self) -> bool {
        matches!(
            self,
            AppError::Validation { .. }
                | AppError::RoundNotActive { .. }
                | AppError::Conflict {
                    code: ErrorCode::DailyRestart,
                    ..
                }
        )
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    pub fn forbidden(detail: impl Into<String>) -> Self {
        Self::Forbidden {
            detail: detail.into(),
        }
    }

    pub fn hint_unavailable(detail: impl Into<String>) -> Self {
        Self::HintUnavailable {
            detail: detail.into(),
        }
    }
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Validation(kind, detail) => {
                let code = match &kind {
                    ValidationKind::InvalidLength { .. } => ErrorCode::InvalidLength,
                    ValidationKind::NonNumeric { .. } => ErrorCode::NonNumeric,
                    ValidationKind::OutOfRange { .. } => ErrorCode::OutOfRange,
                    ValidationKind::RepeatedDigits { .. } => ErrorCode::RepeatedDigits,
                };
                AppError::Validation { code, kind, detail }
            }
            DomainError::Conflict(ConflictKind::RoundNotActive { state }, _) => {
                AppError::RoundNotActive { state }
            }
            DomainError::Conflict(ConflictKind::DailyRestart, detail) => AppError::Conflict {
                code: ErrorCode::DailyRestart,
                detail,
            },
            DomainError::Conflict(ConflictKind::AttemptLimit, detail) => AppError::Conflict {
                code: ErrorCode::AttemptLimit,
                detail,
            },
            DomainError::Conflict(_, detail) => AppError::Conflict {
                code: ErrorCode::Conflict,
                detail,
            },
            DomainError::NotFound(NotFoundKind::Round | NotFoundKind::ActiveRound, detail) => {
                AppError::NotFound {
                    code: ErrorCode::RoundNotFound,
                    detail,
                }
            }
            DomainError::NotFound(_, detail) => AppError::NotFound {
                code: ErrorCode::NotFound,
                detail,
            },
            DomainError::Contract(ContractKind::CorruptRecord, detail) => {
                AppError::DataCorruption { detail }
            }
            DomainError::Contract(_, detail) => AppError::Contract { detail },
            DomainError::Infra(kind, detail) => match kind {
                InfraErrorKind::Timeout => AppError::DbTimeout { detail },
                InfraErrorKind::DbUnavailable => AppError::DbUnavailable { detail },
                InfraErrorKind::DataCorruption => AppError::DataCorruption { detail },
                _ => AppError::Db { detail },
            },
        }
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(e: sea_orm::DbErr) -> Self {
        crate::infra::db_errors::map_db_err(e).into()
    }
}
