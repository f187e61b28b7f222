//! Digit knowledge board: the player's own notes about each digit.
//!
//! Purely an aide. Nothing here feeds evaluation.

use serde::{Deserialize, Serialize};

use crate::domain::rules::{ALPHABET_MIN, ALPHABET_SIZE};
use crate::errors::domain::{DomainError, ValidationKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DigitMark {
    #[default]
    Unknown,
    RuledOut,
    Present,
    Confirmed,
}

impl DigitMark {
    /// unknown -> ruled out -> present -> confirmed -> unknown
    pub fn next(self) -> Self {
        match self {
            DigitMark::Unknown => DigitMark::RuledOut,
            DigitMark::RuledOut => DigitMark::Present,
            DigitMark::Present => DigitMark::Confirmed,
            DigitMark::Confirmed => DigitMark::Unknown,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            DigitMark::Unknown => '.',
            DigitMark::RuledOut => 'x',
            DigitMark::Present => '?',
            DigitMark::Confirmed => '*',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct KnowledgeBoard {
    marks: [DigitMark; ALPHABET_SIZE],
}

impl KnowledgeBoard {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(digit: u8) -> Result<usize, DomainError> {
        let idx = digit.checked_sub(ALPHABET_MIN).map(usize::from);
        match idx {
            Some(i) if i < ALPHABET_SIZE => Ok(i),
            _ => Err(DomainError::validation(
                ValidationKind::OutOfRange {
                    digit,
                    min: ALPHABET_MIN,
                    max: ALPHABET_MIN + (ALPHABET_SIZE as u8 - 1),
                },
                format!("Digit {digit} is not on the board"),
            )),
        }
    }

    pub fn mark(&self, digit: u8) -> Result<DigitMark, DomainError> {
        Ok(self.marks[Self::slot(digit)?])
    }

    /// Advance `digit` to its next mark and return it.
    pub fn toggle(&mut self, digit: u8) -> Result<DigitMark, DomainError> {
        let i = Self::slot(digit)?;
        self.marks[i] = self.marks[i].next();
        Ok(self.marks[i])
    }

    pub fn reset(&mut self) {
        self.marks = [DigitMark::Unknown; ALPHABET_SIZE];
    }

    /// `(digit, mark)` pairs in alphabet order.
    pub fn entries(&self) -> impl Iterator<Item = (u8, DigitMark)> + '_ {
        self.marks
            .iter()
            .enumerate()
            .map(|(i, m)| (ALPHABET_MIN + i as u8, *m))
    }
}
