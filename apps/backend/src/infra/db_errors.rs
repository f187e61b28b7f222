//! SeaORM -> DomainError translation helpers.
//!
//! Adapters should convert `sea_orm::DbErr` into `crate::errors::domain::DomainError`
//! here, and higher layers can then map `DomainError` to `AppError` via `From`.

use tracing::{error, warn};

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};

/// Prefix adapters use for a structured "round does not exist" error.
pub const ROUND_NOT_FOUND_PREFIX: &str = "ROUND_NOT_FOUND:";

fn mentions_sqlstate(msg: &str, code: &str) -> bool {
    msg.contains(code) || msg.contains(&format!("SQLSTATE({code})"))
}

/// Build the structured not-found error for `round_id`.
pub fn round_not_found(round_id: i64) -> sea_orm::DbErr {
    sea_orm::DbErr::Custom(format!("{ROUND_NOT_FOUND_PREFIX}{round_id}"))
}

/// Translate a `DbErr` into a `DomainError` with sanitized detail.
pub fn map_db_err(e: sea_orm::DbErr) -> DomainError {
    let error_msg = e.to_string();

    match &e {
        sea_orm::DbErr::RecordNotFound(_) => {
            return DomainError::not_found(
                NotFoundKind::Other("Record".into()),
                "Record not found",
            );
        }
        sea_orm::DbErr::Custom(msg) if msg.starts_with(ROUND_NOT_FOUND_PREFIX) => {
            if let Some(Ok(round_id)) = msg
                .strip_prefix(ROUND_NOT_FOUND_PREFIX)
                .map(str::parse::<i64>)
            {
                warn!(round_id, "Round not found");
                return DomainError::not_found(
                    NotFoundKind::Round,
                    format!("Round {round_id} not found"),
                );
            }
            warn!(raw_error = %msg, "Failed to parse ROUND_NOT_FOUND error");
            return DomainError::not_found(NotFoundKind::Round, "Round not found");
        }
        sea_orm::DbErr::ConnectionAcquire(_) | sea_orm::DbErr::Conn(_) => {
            warn!(raw_error = %error_msg, "Database unavailable");
            return DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable");
        }
        _ => {}
    }

    if mentions_sqlstate(&error_msg, "23505")
        || error_msg.contains("duplicate key value violates unique constraint")
        || error_msg.contains("UNIQUE constraint failed")
    {
        warn!(raw_error = %error_msg, "Unique constraint violation");
        return DomainError::conflict(
            ConflictKind::Other("Unique".into()),
            "Unique constraint violation",
        );
    }

    if mentions_sqlstate(&error_msg, "23503") || error_msg.contains("FOREIGN KEY constraint failed")
    {
        warn!(raw_error = %error_msg, "Foreign key constraint violation");
        return DomainError::not_found(NotFoundKind::Round, "Round not found");
    }

    if error_msg.contains("timeout") || error_msg.contains("timed out") {
        warn!(raw_error = %error_msg, "Database timeout");
        return DomainError::infra(InfraErrorKind::Timeout, "Database timeout");
    }

    if error_msg.contains("pool") || error_msg.contains("unavailable") {
        warn!(raw_error = %error_msg, "Database pool issue");
        return DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable");
    }

    error!(raw_error = %error_msg, "Unhandled database error");
    DomainError::infra(
        InfraErrorKind::Other("DbErr".into()),
        "Database operation failed",
    )
}
