//! Game flow orchestration: bridges the pure round machine with the store.
//!
//! Every mutation loads the game, authenticates the caller, applies a domain
//! transition to a copy and commits it with a conditional update. A lost race
//! surfaces as `OPTIMISTIC_LOCK`; nothing is retried here.

use std::sync::Arc;

use crate::domain::rng::GameRng;
use crate::repos::games::GameStore;

mod lobby;
mod mutation;
mod player_actions;

pub use mutation::GameFlowMutationResult;

#[derive(Clone)]
pub struct GameFlowService {
    store: Arc<dyn GameStore>,
    rng: Arc<GameRng>,
}

impl GameFlowService {
    pub fn new(store: Arc<dyn GameStore>, rng: Arc<GameRng>) -> Self {
        Self { store, rng }
    }
}
