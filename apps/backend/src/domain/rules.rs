use std::ops::RangeInclusive;

pub const CODE_LENGTH: usize = 5;
pub const DAILY_CODE_LENGTH: usize = 4;
pub const ALPHABET_MIN: u8 = 0;
pub const ALPHABET_MAX: u8 = 9;
pub const ALPHABET_SIZE: usize = (ALPHABET_MAX - ALPHABET_MIN + 1) as usize;
pub const REQUIRES_UNIQUE_DIGITS: bool = true;
pub const SHOW_NO_MATCH_ONLY_WHEN_ZERO_MATCHES: bool = true;

/// Shape constraints for one flavour of code (standard round or daily challenge).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeRules {
    pub length: usize,
    pub requires_unique: bool,
    pub show_no_match: bool,
}

impl CodeRules {
    pub const STANDARD: CodeRules = CodeRules {
        length: CODE_LENGTH,
        requires_unique: REQUIRES_UNIQUE_DIGITS,
        show_no_match: SHOW_NO_MATCH_ONLY_WHEN_ZERO_MATCHES,
    };

    pub const DAILY: CodeRules = CodeRules {
        length: DAILY_CODE_LENGTH,
        ..CodeRules::STANDARD
    };

    /// Same rules, different length.
    pub const fn with_length(self, length: usize) -> Self {
        CodeRules { length, ..self }
    }
}

impl Default for CodeRules {
    fn default() -> Self {
        Self::STANDARD
    }
}

pub fn alphabet() -> RangeInclusive<u8> {
    ALPHABET_MIN..=ALPHABET_MAX
}
