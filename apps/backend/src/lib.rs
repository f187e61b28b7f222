#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod config;
pub mod console;
pub mod domain;
pub mod entities;
pub mod error;
pub mod errors;
pub mod infra;
pub mod repos;
pub mod services;
pub mod telemetry;

#[cfg(test)]
pub mod test_bootstrap;

// Re-exports for public API
pub use adapters::hints_http::HttpHintProvider;
pub use adapters::memory::InMemoryRoundStore;
pub use adapters::rounds_sea::SeaRoundStore;
pub use config::db::{db_url, DbProfile};
pub use config::game::GameConfig;
pub use error::AppError;
pub use errors::{DomainError, ErrorCode};
pub use infra::db::{connect_db, connect_url};
pub use repos::rounds::RoundStore;
pub use services::game_flow::{GameFlowService, RoundMode, SubmitResult};
pub use services::hints::{HintProvider, HintRequest, HintService};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
