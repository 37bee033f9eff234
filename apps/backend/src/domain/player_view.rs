//! Player view of game state: what a given caller may see.
//!
//! The stored [`Game`] holds the password digest and the full enemy list;
//! neither leaves the service layer except through these views.

use std::collections::BTreeMap;

use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::outcome::{score, Score};
use crate::domain::state::{
    Faction, Game, GameStatus, Round, RoundResult, RoundStatus, VotePhase,
};

/// A game as seen by one viewer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameView {
    pub id: Uuid,
    pub name: String,
    pub owner: String,
    pub password: bool,
    pub players: Vec<String>,
    /// Only filled in for viewers who are enemies themselves.
    pub enemies: Vec<String>,
    pub status: GameStatus,
    pub current_round: Option<RoundView>,
    pub score: Score,
    pub winner: Option<Faction>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub started_at: Option<OffsetDateTime>,
}

impl GameView {
    pub fn for_viewer(game: &Game, viewer: Option<&str>) -> Self {
        let sees_enemies = viewer.is_some_and(|v| game.is_enemy(v));
        Self {
            id: game.id,
            name: game.name.clone(),
            owner: game.owner.clone(),
            password: game.is_protected(),
            players: game.players.clone(),
            enemies: if sees_enemies {
                game.enemies.clone()
            } else {
                Vec::new()
            },
            status: game.status,
            current_round: game.current_round.as_ref().map(RoundView::from),
            score: score(&game.round_history),
            winner: game.winner,
            created_at: game.created_at,
            updated_at: game.updated_at,
            started_at: game.started_at,
        }
    }
}

/// A round with actions anonymized.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundView {
    pub id: Uuid,
    pub number: u8,
    pub leader: String,
    pub status: RoundStatus,
    pub phase: VotePhase,
    pub result: RoundResult,
    pub group: Vec<String>,
    pub votes: BTreeMap<String, bool>,
    pub rejection_count: u8,
    /// Submitted actions without their authors, sabotage first.
    pub actions: Vec<bool>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<&Round> for RoundView {
    fn from(round: &Round) -> Self {
        let mut actions: Vec<bool> = round.actions.values().copied().collect();
        actions.sort_unstable();
        Self {
            id: round.id,
            number: round.number,
            leader: round.leader.clone(),
            status: round.status,
            phase: round.phase,
            result: round.result,
            group: round.group.clone(),
            votes: round.votes.clone(),
            rejection_count: round.rejection_count,
            actions,
            created_at: round.created_at,
            updated_at: round.updated_at,
        }
    }
}

/// Search result row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSummary {
    pub id: Uuid,
    pub name: String,
    pub owner: String,
    pub status: GameStatus,
    pub players: usize,
    pub password: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<&Game> for GameSummary {
    fn from(game: &Game) -> Self {
        Self {
            id: game.id,
            name: game.name.clone(),
            owner: game.owner.clone(),
            status: game.status,
            players: game.players.len(),
            password: game.is_protected(),
            created_at: game.created_at,
        }
    }
}
