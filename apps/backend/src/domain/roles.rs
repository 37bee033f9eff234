//! Enemy assignment at game start.

use rand::seq::index;
use rand::Rng;

use crate::domain::rules::{enemy_count, MAX_PLAYERS, MIN_PLAYERS};
use crate::domain::state::Game;
use crate::errors::domain::{DomainError, PreconditionKind};

/// Pick the enemies for `players`, uniformly at random.
///
/// The result keeps the players' join order so it does not reveal the draw.
pub fn assign_enemies<R: Rng + ?Sized>(
    players: &[String],
    rng: &mut R,
) -> Result<Vec<String>, DomainError> {
    let count = enemy_count(players.len()).ok_or_else(|| {
        DomainError::precondition(
            PreconditionKind::NotEnoughPlayers,
            format!(
                "Need {MIN_PLAYERS} to {MAX_PLAYERS} players, have {}",
                players.len()
            ),
        )
    })?;

    let mut picked = index::sample(rng, players.len(), count).into_vec();
    picked.sort_unstable();

    Ok(picked.into_iter().map(|i| players[i].clone()).collect())
}

/// Assign enemies once per game. Returns `false` when they were already set.
pub fn apply_roles<R: Rng + ?Sized>(game: &mut Game, rng: &mut R) -> Result<bool, DomainError> {
    if !game.enemies.is_empty() {
        return Ok(false);
    }
    game.enemies = assign_enemies(&game.players, rng)?;
    Ok(true)
}
