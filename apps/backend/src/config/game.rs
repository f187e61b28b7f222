//! Game-level settings read from the environment.

use std::env;
use std::time::Duration;

use crate::error::AppError;

pub const DEBUG_TOOLS_VAR: &str = "CODEBREAKER_DEBUG_TOOLS";
pub const HINT_URL_VAR: &str = "CODEBREAKER_HINT_URL";
pub const HINT_TIMEOUT_VAR: &str = "CODEBREAKER_HINT_TIMEOUT_MS";

pub const DEFAULT_HINT_TIMEOUT_MS: u64 = 8_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Enables `debug_secret`. Off unless explicitly turned on.
    pub debug_tools: bool,
    /// HTTP endpoint of the hint generator, if any.
    pub hint_url: Option<String>,
    pub hint_timeout: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            debug_tools: false,
            hint_url: None,
            hint_timeout: Duration::from_millis(DEFAULT_HINT_TIMEOUT_MS),
        }
    }
}

impl GameConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let debug_tools = match env::var(DEBUG_TOOLS_VAR) {
            Ok(raw) => parse_flag(DEBUG_TOOLS_VAR, &raw)?,
            Err(_) => false,
        };

        let hint_url = env::var(HINT_URL_VAR)
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        if let Some(url) = &hint_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(AppError::config(format!(
                    "{HINT_URL_VAR} must be an http(s) URL, got '{url}'"
                )));
            }
        }

        let hint_timeout = match env::var(HINT_TIMEOUT_VAR) {
            Ok(raw) => {
                let ms = raw.trim().parse::<u64>().map_err(|_| {
                    AppError::config(format!(
                        "{HINT_TIMEOUT_VAR} must be a whole number of milliseconds, got '{raw}'"
                    ))
                })?;
                if ms == 0 {
                    return Err(AppError::config(format!(
                        "{HINT_TIMEOUT_VAR} must be greater than zero"
                    )));
                }
                Duration::from_millis(ms)
            }
            Err(_) => Duration::from_millis(DEFAULT_HINT_TIMEOUT_MS),
        };

        Ok(Self {
            debug_tools,
            hint_url,
            hint_timeout,
        })
    }
}

fn parse_flag(name: &str, raw: &str) -> Result<bool, AppError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        other => Err(AppError::config(format!(
            "{name} must be a boolean flag, got '{other}'"
        ))),
    }
}
