//! Game flow orchestration service - bridges pure domain logic with round persistence.
//!
//! Every public operation takes the service gate first and holds it until the
//! operation has finished, store calls included. Concurrent callers therefore
//! observe operations one at a time, in the order they acquired the gate.

mod lifecycle;
mod orchestration;
mod submission;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use time::Date;
use tokio::sync::Mutex;

use crate::config::game::GameConfig;
use crate::domain::rules::CodeRules;
use crate::repos::rounds::RoundStore;

pub use crate::domain::round::RoundMode;
pub use submission::SubmitResult;

/// State only touched while the gate is held.
struct FlowState {
    rng: Box<dyn RngCore + Send>,
}

/// Game flow service, generic over the round store.
pub struct GameFlowService<S: RoundStore> {
    store: S,
    config: GameConfig,
    mode: RoundMode,
    gate: Mutex<FlowState>,
}

impl<S: RoundStore> GameFlowService<S> {
    /// Standard rounds with an OS-seeded generator.
    pub fn new(store: S, config: GameConfig) -> Self {
        Self::with_rng(store, config, StdRng::from_os_rng())
    }

    /// Standard rounds with an injected generator (seeded in tests).
    pub fn with_rng(store: S, config: GameConfig, rng: impl RngCore + Send + 'static) -> Self {
        Self {
            store,
            config,
            mode: RoundMode::Standard,
            gate: Mutex::new(FlowState { rng: Box::new(rng) }),
        }
    }

    /// Daily-challenge rounds for `date`.
    pub fn daily(store: S, config: GameConfig, date: Date) -> Self {
        let mut svc = Self::new(store, config);
        svc.mode = RoundMode::Daily(date);
        svc
    }

    pub fn mode(&self) -> RoundMode {
        self.mode
    }

    /// Rules for rounds this service creates. Existing rounds carry their own.
    pub fn rules(&self) -> CodeRules {
        self.mode.rules()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
