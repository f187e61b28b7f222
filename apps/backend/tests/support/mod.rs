#![allow(dead_code)]

pub mod flaky_store;

use codebreaker::adapters::memory::InMemoryRoundStore;
use codebreaker::adapters::rounds_sea::SeaRoundStore;
use codebreaker::config::game::GameConfig;
use codebreaker::domain::code::{Code, Secret};
use codebreaker::domain::round::RoundMode;
use codebreaker::infra::db::connect_url;
use codebreaker::repos::rounds::RoundStore;
use codebreaker::services::game_flow::GameFlowService;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub const SECRET: &str = "12345";

pub fn secret(digits: &str) -> Secret {
    Secret::new(Code::from_stored(digits).expect("test secret is digits"))
}

pub fn debug_config() -> GameConfig {
    GameConfig {
        debug_tools: true,
        ..GameConfig::default()
    }
}

/// Flow over `store` whose current round has `digits` as its secret.
pub async fn flow_with_secret<S: RoundStore>(
    store: S,
    digits: &str,
    config: GameConfig,
) -> GameFlowService<S> {
    store
        .create_round(RoundMode::Standard, secret(digits))
        .await
        .expect("seed round");
    GameFlowService::with_rng(store, config, ChaCha8Rng::seed_from_u64(7))
}

pub async fn memory_flow(digits: &str) -> GameFlowService<InMemoryRoundStore> {
    flow_with_secret(InMemoryRoundStore::new(), digits, debug_config()).await
}

pub async fn sqlite_store() -> SeaRoundStore {
    let db = connect_url("sqlite::memory:")
        .await
        .expect("connect sqlite memory db");
    SeaRoundStore::new(db)
}

pub async fn sqlite_flow(digits: &str) -> GameFlowService<SeaRoundStore> {
    flow_with_secret(sqlite_store().await, digits, debug_config()).await
}

/// Unique-digit five-digit guesses that never hit `SECRET` exactly.
pub fn losing_guesses(count: usize) -> Vec<String> {
    let mut out = Vec::new();
    for a in 5..=9u8 {
        for b in 0..=9u8 {
            for c in 0..=9u8 {
                let digits = [a, b, c, 0, 6];
                let mut seen = [false; 10];
                if digits.iter().any(|&d| std::mem::replace(&mut seen[d as usize], true)) {
                    continue;
                }
                out.push(digits.iter().map(|d| d.to_string()).collect());
                if out.len() == count {
                    return out;
                }
            }
        }
    }
    out
}
