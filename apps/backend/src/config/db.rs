use std::env;

use crate::error::AppError;

/// Environment variable holding the database URL.
pub const DB_URL_VAR: &str = "CODEBREAKER_DB_URL";

/// Used for the prod profile when `CODEBREAKER_DB_URL` is unset.
pub const DEFAULT_DB_URL: &str = "sqlite://codebreaker.db?mode=rwc";

/// Used for the test profile when `CODEBREAKER_DB_URL` is unset.
pub const TEST_DB_URL: &str = "sqlite::memory:";

/// Database profile enum for different environments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbProfile {
    /// Production database profile
    Prod,
    /// Test database profile - enforces safety rules
    Test,
}

/// Resolve the database URL for `profile` from the environment.
pub fn db_url(profile: DbProfile) -> Result<String, AppError> {
    let configured = env::var(DB_URL_VAR).ok().filter(|v| !v.trim().is_empty());

    match profile {
        DbProfile::Prod => Ok(configured.unwrap_or_else(|| DEFAULT_DB_URL.to_string())),
        DbProfile::Test => match configured {
            None => Ok(TEST_DB_URL.to_string()),
            Some(url) => {
                // Enforce safety: tests only ever touch throwaway databases
                if is_throwaway_url(&url) {
                    Ok(url)
                } else {
                    Err(AppError::config(format!(
                        "Test profile requires an in-memory SQLite URL or a path ending in '_test.db', but got: '{url}'"
                    )))
                }
            }
        },
    }
}

fn is_throwaway_url(url: &str) -> bool {
    if url.starts_with("sqlite::memory:") || url.contains("mode=memory") {
        return true;
    }
    let path = url.split('?').next().unwrap_or(url);
    path.starts_with("sqlite:") && path.ends_with("_test.db")
}
