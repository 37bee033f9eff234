//! Test-only game state helpers for domain unit tests.

use rand::Rng;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::lobby;
use crate::domain::round_machine::cast_vote;
use crate::domain::rules::group_size_for_round;
use crate::domain::state::Game;

pub fn now() -> OffsetDateTime {
    OffsetDateTime::UNIX_EPOCH
}

/// Lobby with `n` players named `player0..`; `player0` owns it.
pub fn lobby_with(n: usize) -> Game {
    let mut game = Game::new("table".into(), "player0".into(), None, now());
    for i in 1..n {
        game.players.push(format!("player{i}"));
    }
    game
}

/// Started game with `n` players.
pub fn started_with<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Game {
    let mut game = lobby_with(n);
    let owner = game.owner.clone();
    lobby::start(&mut game, &owner, rng, now()).expect("start");
    game
}

/// Id and leader of the active round.
pub fn current(game: &Game) -> (Uuid, String) {
    let round = game.current_round.as_ref().expect("active round");
    (round.id, round.leader.clone())
}

/// A valid group for the active round: the leader first, then seat order.
pub fn group_for_round(game: &Game) -> Vec<String> {
    let size = group_size_for_round(game.round_history.len(), game.players.len())
        .expect("supported table");
    let (_, leader) = current(game);
    std::iter::once(leader.clone())
        .chain(game.players.iter().filter(|p| **p != leader).cloned())
        .take(size)
        .collect()
}

/// Cast `ballots` in seat order on the active round.
pub fn vote_all<R: Rng + ?Sized>(game: &mut Game, ballots: &[bool], rng: &mut R) {
    let (id, _) = current(game);
    let players = game.players.clone();
    for (player, &vote) in players.iter().zip(ballots) {
        cast_vote(game, id, player, vote, rng, now()).expect("vote");
    }
}
