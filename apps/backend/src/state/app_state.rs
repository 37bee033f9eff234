use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::adapters::MemoryGameStore;
use crate::domain::rng::GameRng;
use crate::repos::games::GameStore;
use crate::services::{GameFlowService, GameService};

/// Shared resources handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn GameStore>,
    rng: Arc<GameRng>,
    /// Set when games live in a database; used by the health check.
    db: Option<DatabaseConnection>,
}

impl AppState {
    pub fn new(store: Arc<dyn GameStore>, rng: GameRng, db: Option<DatabaseConnection>) -> Self {
        Self {
            store,
            rng: Arc::new(rng),
            db,
        }
    }

    /// In-memory store with a fixed seed.
    pub fn in_memory(seed: u64) -> Self {
        Self::new(Arc::new(MemoryGameStore::new()), GameRng::seeded(seed), None)
    }

    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_ref()
    }

    pub fn store(&self) -> Arc<dyn GameStore> {
        Arc::clone(&self.store)
    }

    pub fn games(&self) -> GameService {
        GameService::new(self.store())
    }

    pub fn game_flow(&self) -> GameFlowService {
        GameFlowService::new(self.store(), Arc::clone(&self.rng))
    }

    pub fn store_label(&self) -> &'static str {
        if self.db.is_some() {
            "database"
        } else {
            "memory"
        }
    }
}
