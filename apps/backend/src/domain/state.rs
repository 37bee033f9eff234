//! Game aggregate: the single document persisted per game.
//!
//! Rounds are embedded (the active one in `current_round`, finished ones in
//! `round_history`) so that every transition commits as one atomic write.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::rules::{MAX_PLAYERS, MAX_ROUNDS};
use crate::errors::domain::{DomainError, InfraErrorKind};

/// Lifecycle of a game. `Ended` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameStatus {
    Lobby,
    Rounds,
    Ended,
}

impl GameStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Lobby => "lobby",
            Self::Rounds => "rounds",
            Self::Ended => "ended",
        }
    }

    /// Case-insensitive parse of the wire name.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "lobby" => Some(Self::Lobby),
            "rounds" => Some(Self::Rounds),
            "ended" => Some(Self::Ended),
            _ => None,
        }
    }
}

/// Lifecycle of a single round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoundStatus {
    WaitingOnLeader,
    Voting,
    WaitingOnGroup,
    Ended,
}

impl RoundStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::WaitingOnLeader => "waiting-on-leader",
            Self::Voting => "voting",
            Self::WaitingOnGroup => "waiting-on-group",
            Self::Ended => "ended",
        }
    }
}

/// Which voting attempt on the current round is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VotePhase {
    Vote1,
    Vote2,
    Vote3,
}

impl VotePhase {
    /// Phase for the attempt that follows `rejections` consecutive rejections.
    pub const fn after_rejections(rejections: u8) -> Self {
        match rejections {
            0 => Self::Vote1,
            1 => Self::Vote2,
            _ => Self::Vote3,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Vote1 => "vote1",
            Self::Vote2 => "vote2",
            Self::Vote3 => "vote3",
        }
    }
}

/// Outcome recorded on a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundResult {
    None,
    Citizens,
    Enemies,
}

/// The two factions a game can be won by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Faction {
    Citizens,
    Enemies,
}

impl From<Faction> for RoundResult {
    fn from(faction: Faction) -> Self {
        match faction {
            Faction::Citizens => RoundResult::Citizens,
            Faction::Enemies => RoundResult::Enemies,
        }
    }
}

/// A round, either active (`Game::current_round`) or frozen in history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Round {
    pub id: Uuid,
    /// 1-based position of this round within the game.
    pub number: u8,
    pub leader: String,
    pub status: RoundStatus,
    pub phase: VotePhase,
    pub result: RoundResult,
    pub group: Vec<String>,
    /// Ballots cast in the current voting attempt.
    pub votes: BTreeMap<String, bool>,
    /// Submissions from group members; `false` is sabotage.
    pub actions: BTreeMap<String, bool>,
    pub rejection_count: u8,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Round {
    /// Fresh round waiting on `leader` to propose a group.
    pub fn open(number: u8, leader: String, now: OffsetDateTime) -> Self {
        Self {
            id: Uuid::new_v4(),
            number,
            leader,
            status: RoundStatus::WaitingOnLeader,
            phase: VotePhase::Vote1,
            result: RoundResult::None,
            group: Vec::new(),
            votes: BTreeMap::new(),
            actions: BTreeMap::new(),
            rejection_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_ended(&self) -> bool {
        self.status == RoundStatus::Ended
    }
}

/// Root aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: Uuid,
    pub name: String,
    pub owner: String,
    /// blake3 digest (hex) of the join password, if the game is protected.
    pub password_digest: Option<String>,
    pub players: Vec<String>,
    pub enemies: Vec<String>,
    pub status: GameStatus,
    pub current_round: Option<Round>,
    pub round_history: Vec<Round>,
    pub winner: Option<Faction>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub started_at: Option<OffsetDateTime>,
    /// Bumped by the store on every committed write.
    pub lock_version: i32,
}

impl Game {
    /// New game in the lobby; the owner is always the first entrant.
    pub fn new(
        name: String,
        owner: String,
        password_digest: Option<String>,
        now: OffsetDateTime,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            players: vec![owner.clone()],
            owner,
            password_digest,
            enemies: Vec::new(),
            status: GameStatus::Lobby,
            current_round: None,
            round_history: Vec::new(),
            winner: None,
            created_at: now,
            updated_at: now,
            started_at: None,
            lock_version: 1,
        }
    }

    pub fn is_player(&self, player: &str) -> bool {
        self.players.iter().any(|p| p == player)
    }

    pub fn is_enemy(&self, player: &str) -> bool {
        self.enemies.iter().any(|p| p == player)
    }

    pub fn is_protected(&self) -> bool {
        self.password_digest.is_some()
    }

    /// Active round or history entry with the given id.
    pub fn find_round(&self, round_id: Uuid) -> Option<&Round> {
        self.current_round
            .iter()
            .chain(self.round_history.iter())
            .find(|r| r.id == round_id)
    }

    /// History followed by the active round, in play order.
    pub fn rounds(&self) -> Vec<&Round> {
        self.round_history
            .iter()
            .chain(self.current_round.iter())
            .collect()
    }
}

/// Check structural invariants of a game document.
///
/// Run on every decoded database row and on every mutated game before it is
/// committed. A failure means corrupted data, not bad input.
pub fn check_invariants(game: &Game) -> Result<(), DomainError> {
    let corrupt = |detail: String| DomainError::infra(InfraErrorKind::DataCorruption, detail);

    if game.players.len() > MAX_PLAYERS {
        return Err(corrupt(format!("{} players exceeds capacity", game.players.len())));
    }
    if game.players.first() != Some(&game.owner) {
        return Err(corrupt("owner must be the first player".into()));
    }
    for (i, p) in game.players.iter().enumerate() {
        if game.players[..i].contains(p) {
            return Err(corrupt(format!("duplicate player {p}")));
        }
    }
    if let Some(e) = game.enemies.iter().find(|e| !game.is_player(e)) {
        return Err(corrupt(format!("enemy {e} is not a player")));
    }
    if game.round_history.len() > MAX_ROUNDS {
        return Err(corrupt(format!("{} rounds in history", game.round_history.len())));
    }
    if let Some(r) = game.round_history.iter().find(|r| !r.is_ended()) {
        return Err(corrupt(format!("history round {} is not ended", r.id)));
    }

    match (game.status, &game.current_round) {
        (GameStatus::Rounds, Some(round)) if !round.is_ended() => check_round(game, round),
        (GameStatus::Rounds, _) => Err(corrupt("game in rounds without an active round".into())),
        (GameStatus::Lobby | GameStatus::Ended, Some(_)) => Err(corrupt(format!(
            "game in {} must not have an active round",
            game.status.as_str()
        ))),
        (GameStatus::Lobby | GameStatus::Ended, None) => Ok(()),
    }
}

fn check_round(game: &Game, round: &Round) -> Result<(), DomainError> {
    let corrupt = |detail: String| DomainError::infra(InfraErrorKind::DataCorruption, detail);

    if !game.is_player(&round.leader) {
        return Err(corrupt(format!("leader {} is not a player", round.leader)));
    }
    if let Some(m) = round.group.iter().find(|m| !game.is_player(m)) {
        return Err(corrupt(format!("group member {m} is not a player")));
    }
    if round.votes.len() > game.players.len() || round.votes.keys().any(|v| !game.is_player(v)) {
        return Err(corrupt("votes from non-players".into()));
    }
    if round.actions.keys().any(|a| !round.group.contains(a)) {
        return Err(corrupt("actions from outside the group".into()));
    }
    Ok(())
}
