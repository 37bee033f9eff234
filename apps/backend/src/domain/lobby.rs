//! Lobby transitions: joining and starting a game.

use rand::Rng;
use time::OffsetDateTime;

use crate::domain::game_transition::GameTransition;
use crate::domain::leader::initial_leader;
use crate::domain::roles::apply_roles;
use crate::domain::rules::{MAX_PLAYERS, MIN_PLAYERS};
use crate::domain::state::{Game, GameStatus, Round};
use crate::errors::domain::{
    ConflictKind, DomainError, ForbiddenKind, InfraErrorKind, PreconditionKind,
};

/// Seat `player` at the table.
pub fn join(
    game: &mut Game,
    player: &str,
    now: OffsetDateTime,
) -> Result<Vec<GameTransition>, DomainError> {
    if game.status != GameStatus::Lobby {
        return Err(DomainError::wrong_phase("Game already started"));
    }
    if game.players.len() >= MAX_PLAYERS {
        return Err(DomainError::precondition(
            PreconditionKind::CapacityExceeded,
            format!("Game is full ({MAX_PLAYERS} players)"),
        ));
    }
    if game.is_player(player) {
        return Err(DomainError::conflict(
            ConflictKind::PlayerTaken,
            format!("Player {player} already joined"),
        ));
    }

    game.players.push(player.to_string());
    game.updated_at = now;
    Ok(vec![GameTransition::PlayerJoined {
        player: player.to_string(),
    }])
}

/// Assign roles, pick the first leader and open round one.
pub fn start<R: Rng + ?Sized>(
    game: &mut Game,
    actor: &str,
    rng: &mut R,
    now: OffsetDateTime,
) -> Result<Vec<GameTransition>, DomainError> {
    if game.owner != actor {
        return Err(DomainError::forbidden(
            ForbiddenKind::NotOwner,
            "Only the owner can start the game",
        ));
    }
    if game.status != GameStatus::Lobby {
        return Err(DomainError::wrong_phase("Game already started"));
    }
    if game.players.len() < MIN_PLAYERS {
        return Err(DomainError::precondition(
            PreconditionKind::NotEnoughPlayers,
            format!(
                "Need at least {MIN_PLAYERS} players, have {}",
                game.players.len()
            ),
        ));
    }

    apply_roles(game, rng)?;
    let leader = initial_leader(&game.players, rng).ok_or_else(|| {
        DomainError::infra(InfraErrorKind::DataCorruption, "game has no players")
    })?;

    game.current_round = Some(Round::open(1, leader, now));
    game.status = GameStatus::Rounds;
    game.started_at = Some(now);
    game.updated_at = now;
    Ok(Vec::new())
}
