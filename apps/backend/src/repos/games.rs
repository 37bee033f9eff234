//! Game store contract.
//!
//! A store persists whole [`Game`] documents. Writes after creation go
//! through [`GameStore::atomic_update`], which only commits when the stored
//! game still matches the [`Fingerprint`] the caller read.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::state::{Game, GameStatus, RoundStatus, VotePhase};
use crate::errors::domain::{DomainError, NotFoundKind};

/// Snapshot of the fields a transition decided on.
///
/// `lock_version` changes on every committed write, so matching it implies
/// the round fields match too. They are kept so conflicts can be logged
/// with what actually moved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fingerprint {
    pub lock_version: i32,
    pub round_id: Option<Uuid>,
    pub round_status: Option<RoundStatus>,
    pub phase: Option<VotePhase>,
    pub ballots: usize,
}

impl Fingerprint {
    pub fn of(game: &Game) -> Self {
        let round = game.current_round.as_ref();
        Self {
            lock_version: game.lock_version,
            round_id: round.map(|r| r.id),
            round_status: round.map(|r| r.status),
            phase: round.map(|r| r.phase),
            ballots: round.map_or(0, |r| r.votes.len() + r.actions.len()),
        }
    }
}

pub const DEFAULT_LIMIT: u64 = 50;
pub const MAX_PAGE: i64 = 50;

/// Search filter. `page` is a row offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSearch {
    /// Lowercased substring to look for in the name.
    pub name: Option<String>,
    pub status: Option<GameStatus>,
    pub page: u64,
    pub limit: u64,
}

impl GameSearch {
    /// Build a filter, clamping paging the way the public API does:
    /// `page` outside 0..=50 becomes 0, `limit` outside 1..=50 becomes 50.
    pub fn new(
        name: Option<&str>,
        status: Option<GameStatus>,
        page: Option<i64>,
        limit: Option<i64>,
    ) -> Self {
        let name = name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_lowercase);
        let page = page
            .filter(|p| (0..=MAX_PAGE).contains(p))
            .map_or(0, |p| p as u64);
        let limit = limit
            .filter(|l| (1..=DEFAULT_LIMIT as i64).contains(l))
            .map_or(DEFAULT_LIMIT, |l| l as u64);
        Self {
            name,
            status,
            page,
            limit,
        }
    }

    pub fn matches(&self, game: &Game) -> bool {
        let name_ok = self
            .name
            .as_deref()
            .is_none_or(|n| game.name.to_lowercase().contains(n));
        let status_ok = self.status.is_none_or(|s| s == game.status);
        name_ok && status_ok
    }
}

impl Default for GameSearch {
    fn default() -> Self {
        Self::new(None, None, None, None)
    }
}

#[async_trait]
pub trait GameStore: Send + Sync {
    /// Persist a new game. Fails with `Conflict(NameTaken)` when a game that
    /// has not ended already uses the name (case-insensitive).
    async fn insert(&self, game: Game) -> Result<Game, DomainError>;

    async fn load(&self, id: Uuid) -> Result<Option<Game>, DomainError>;

    /// Replace the stored game with `next` if it still matches `expected`.
    ///
    /// Bumps `lock_version`. Fails with `Conflict(OptimisticLock)` when the
    /// game moved on, `NotFound` when it is gone.
    async fn atomic_update(
        &self,
        expected: &Fingerprint,
        next: Game,
    ) -> Result<Game, DomainError>;

    /// Matching games ordered by creation time.
    async fn search(&self, filter: &GameSearch) -> Result<Vec<Game>, DomainError>;
}

/// Load a game or fail with `NotFound`.
pub async fn require_game(store: &dyn GameStore, id: Uuid) -> Result<Game, DomainError> {
    store
        .load(id)
        .await?
        .ok_or_else(|| DomainError::not_found(NotFoundKind::Game, format!("Game {id} not found")))
}
