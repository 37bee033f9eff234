//! In-process game store.
//!
//! Each game lives in its own `DashMap` shard entry, so the conditional
//! update holds that entry's lock for the compare and the swap. Inserts take
//! an extra mutex so the active-name check and the insert cannot interleave.

use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::Mutex;
use uuid::Uuid;

use crate::domain::state::{Game, GameStatus};
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};
use crate::repos::games::{Fingerprint, GameSearch, GameStore};

#[derive(Debug, Default)]
pub struct MemoryGameStore {
    games: DashMap<Uuid, Game>,
    create_lock: Mutex<()>,
}

impl MemoryGameStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn name_taken(&self, name: &str) -> bool {
        let key = name.to_lowercase();
        self.games
            .iter()
            .any(|g| g.status != GameStatus::Ended && g.name.to_lowercase() == key)
    }
}

#[async_trait]
impl GameStore for MemoryGameStore {
    async fn insert(&self, game: Game) -> Result<Game, DomainError> {
        let _guard = self.create_lock.lock();
        if self.name_taken(&game.name) {
            return Err(DomainError::conflict(
                ConflictKind::NameTaken,
                format!("An active game named {} already exists", game.name),
            ));
        }
        self.games.insert(game.id, game.clone());
        Ok(game)
    }

    async fn load(&self, id: Uuid) -> Result<Option<Game>, DomainError> {
        Ok(self.games.get(&id).map(|g| g.value().clone()))
    }

    async fn atomic_update(
        &self,
        expected: &Fingerprint,
        mut next: Game,
    ) -> Result<Game, DomainError> {
        let mut entry = self.games.get_mut(&next.id).ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Game, format!("Game {} not found", next.id))
        })?;

        let actual = Fingerprint::of(&entry);
        if &actual != expected {
            return Err(DomainError::conflict(
                ConflictKind::OptimisticLock,
                format!(
                    "Game changed concurrently: expected version {}, found {}",
                    expected.lock_version, actual.lock_version
                ),
            ));
        }

        next.lock_version = entry.lock_version + 1;
        *entry = next.clone();
        Ok(next)
    }

    async fn search(&self, filter: &GameSearch) -> Result<Vec<Game>, DomainError> {
        let mut found: Vec<Game> = self
            .games
            .iter()
            .filter(|g| filter.matches(g))
            .map(|g| g.value().clone())
            .collect();
        found.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

        Ok(found
            .into_iter()
            .skip(filter.page as usize)
            .take(filter.limit as usize)
            .collect())
    }
}
