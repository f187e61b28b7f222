//! RNG seed derivation for deterministic secrets.
//!
//! A daily challenge must hand every player the same secret for a calendar day,
//! on every platform and across releases. The seed is therefore derived with a
//! keyed hash of the date instead of anything process-local.

use time::Date;

/// Domain-separation context for daily seeds. Changing it changes every daily secret.
const DAILY_SEED_CONTEXT: &str = "codebreaker daily-challenge seed v1";

/// Derive the 32-byte seed for the daily challenge of `date`.
///
/// # Arguments
///
/// * `date` - Calendar day (UTC) the challenge belongs to
///
/// # Returns
///
/// Seed that is identical for identical dates and unrelated across dates.
pub fn derive_daily_seed(date: Date) -> [u8; 32] {
    let material = format!("{}-{:03}", date.year(), date.ordinal());
    blake3::derive_key(DAILY_SEED_CONTEXT, material.as_bytes())
}
