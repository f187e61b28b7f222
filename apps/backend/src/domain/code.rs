//! Digit sequences: the shared shape of secrets and guesses.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::rules::alphabet;
use crate::errors::domain::{ContractKind, DomainError};

/// Ordered sequence of alphabet digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Code(Vec<u8>);

impl Code {
    /// Wrap digits that are already known to be inside the alphabet.
    pub(crate) fn from_digits(digits: Vec<u8>) -> Self {
        debug_assert!(digits.iter().all(|d| alphabet().contains(d)));
        Self(digits)
    }

    pub fn digits(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parse a code read back from storage. Anything malformed is corruption, not user error.
    pub fn from_stored(text: &str) -> Result<Self, DomainError> {
        text.chars()
            .map(|c| {
                c.to_digit(10)
                    .map(|d| d as u8)
                    .filter(|d| alphabet().contains(d))
                    .ok_or_else(|| {
                        DomainError::contract(
                            ContractKind::CorruptRecord,
                            "Stored code contains a non-digit character",
                        )
                    })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for d in &self.0 {
            write!(f, "{d}")?;
        }
        Ok(())
    }
}

/// The hidden code of a round.
///
/// `Debug` is redacted so a round can be logged with `?round` without leaking the answer.
/// Use [`Secret::reveal`] where the digits are really needed.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Secret(Code);

impl Secret {
    pub fn new(code: Code) -> Self {
        Self(code)
    }

    pub fn reveal(&self) -> &Code {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Secret({})", "*".repeat(self.0.len()))
    }
}
