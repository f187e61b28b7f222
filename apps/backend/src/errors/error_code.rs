//! Error codes for the codebreaker engine.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All error codes are SCREAMING_SNAKE_CASE.

use core::fmt;

/// Centralized error codes.
///
/// Each variant maps to a canonical SCREAMING_SNAKE_CASE string that callers
/// can match on to pick a user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Guess validation
    /// Guess has the wrong number of characters
    InvalidLength,
    /// Guess contains a character that is not a digit
    NonNumeric,
    /// Guess contains a digit outside the alphabet
    OutOfRange,
    /// Guess repeats a digit while uniqueness is required
    RepeatedDigits,

    // Round state
    /// Round is not in progress (won or abandoned)
    RoundNotActive,
    /// Round not found
    RoundNotFound,
    /// Today's daily challenge was already dealt
    DailyRestart,
    /// Round has reached the number of attempts storage can hold
    AttemptLimit,
    /// Generic conflict (fallback for unmatched conflicts)
    Conflict,
    /// General not found error
    NotFound,

    // Diagnostics
    /// Diagnostic tooling is disabled
    Forbidden,

    // Hints
    /// Hint request was cancelled by the caller
    HintCancelled,
    /// Hint service failed or timed out
    HintUnavailable,

    // System errors
    /// Database error
    DbError,
    /// Database unavailable
    DbUnavailable,
    /// Database timeout
    DbTimeout,
    /// Data corruption detected
    DataCorruption,
    /// Internal contract violation
    ContractViolation,
    /// Internal error
    Internal,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidLength => "INVALID_LENGTH",
            Self::NonNumeric => "NON_NUMERIC",
            Self::OutOfRange => "OUT_OF_RANGE",
            Self::RepeatedDigits => "REPEATED_DIGITS",

            Self::RoundNotActive => "ROUND_NOT_ACTIVE",
            Self::RoundNotFound => "ROUND_NOT_FOUND",
            Self::DailyRestart => "DAILY_RESTART",
            Self::AttemptLimit => "ATTEMPT_LIMIT",
            Self::Conflict => "CONFLICT",
            Self::NotFound => "NOT_FOUND",

            Self::Forbidden => "FORBIDDEN",

            Self::HintCancelled => "HINT_CANCELLED",
            Self::HintUnavailable => "HINT_UNAVAILABLE",

            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",
            Self::DataCorruption => "DATA_CORRUPTION",
            Self::ContractViolation => "CONTRACT_VIOLATION",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
