//! Secret generation under the code rules.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use time::Date;

use crate::domain::code::{Code, Secret};
use crate::domain::rules::{alphabet, CodeRules};
use crate::domain::seed_derivation::derive_daily_seed;
use crate::errors::domain::{ContractKind, DomainError};

/// Every alphabet digit once, in ascending order.
fn alphabet_pool() -> Vec<u8> {
    alphabet().collect()
}

/// Generate a secret of `length` digits.
///
/// With `requires_unique` the alphabet is shuffled and the first `length`
/// digits are taken, which is uniform over all arrangements of distinct digits.
/// Without it each position is an independent uniform draw.
///
/// Only `rng` is consumed; the same seeded generator state yields the same secret.
///
/// # Errors
///
/// `ContractKind::InvalidConfiguration` when `length` is zero, or when uniqueness
/// is required and `length` exceeds the alphabet size.
pub fn generate_secret<R: Rng + ?Sized>(
    length: usize,
    requires_unique: bool,
    rng: &mut R,
) -> Result<Secret, DomainError> {
    let mut pool = alphabet_pool();

    if length == 0 {
        return Err(DomainError::contract(
            ContractKind::InvalidConfiguration,
            "Code length must be at least 1",
        ));
    }

    let digits = if requires_unique {
        if length > pool.len() {
            return Err(DomainError::contract(
                ContractKind::InvalidConfiguration,
                format!(
                    "Cannot draw {length} unique digits from an alphabet of {}",
                    pool.len()
                ),
            ));
        }
        pool.shuffle(rng);
        pool.truncate(length);
        pool
    } else {
        (0..length)
            .map(|_| pool[rng.random_range(0..pool.len())])
            .collect()
    };

    Ok(Secret::new(Code::from_digits(digits)))
}

/// Generate a secret shaped by `rules`.
pub fn generate_for_rules<R: Rng + ?Sized>(
    rules: &CodeRules,
    rng: &mut R,
) -> Result<Secret, DomainError> {
    generate_secret(rules.length, rules.requires_unique, rng)
}

/// The shared daily-challenge secret for `date`.
pub fn daily_secret(date: Date) -> Result<Secret, DomainError> {
    let mut rng = ChaCha8Rng::from_seed(derive_daily_seed(date));
    generate_for_rules(&CodeRules::DAILY, &mut rng)
}
