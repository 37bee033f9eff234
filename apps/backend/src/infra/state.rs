use std::sync::Arc;

use crate::adapters::{MemoryGameStore, SeaGameStore};
use crate::config::store::StoreKind;
use crate::domain::rng::GameRng;
use crate::error::AppError;
use crate::infra::db::connect_and_migrate;
use crate::state::app_state::AppState;

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    store: StoreKind,
    seed: Option<u64>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            store: StoreKind::Memory,
            seed: None,
        }
    }

    pub fn with_store(mut self, store: StoreKind) -> Self {
        self.store = store;
        self
    }

    pub fn with_database(self, url: impl Into<String>) -> Self {
        self.with_store(StoreKind::Database { url: url.into() })
    }

    /// Deterministic role/leader draws; entropy when never called.
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_rng_seed_opt(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        let rng = GameRng::from_seed_opt(self.seed);
        match self.store {
            StoreKind::Memory => Ok(AppState::new(
                Arc::new(MemoryGameStore::new()),
                rng,
                None,
            )),
            StoreKind::Database { url } => {
                // single entrypoint: connect + migrate
                let conn = connect_and_migrate(&url).await?;
                let store = SeaGameStore::new(conn.clone());
                Ok(AppState::new(Arc::new(store), rng, Some(conn)))
            }
        }
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
