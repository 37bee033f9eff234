//! Leader selection.
//!
//! No long-term anti-repeat memory: only the leader who just finished is
//! excluded, so a player may lead again two rounds later.

use rand::seq::IndexedRandom;
use rand::Rng;

/// Uniformly random first leader.
pub fn initial_leader<R: Rng + ?Sized>(players: &[String], rng: &mut R) -> Option<String> {
    players.choose(rng).cloned()
}

/// Uniformly random leader among `players` other than `previous`.
pub fn next_leader<R: Rng + ?Sized>(
    players: &[String],
    previous: &str,
    rng: &mut R,
) -> Option<String> {
    let candidates: Vec<&String> = players.iter().filter(|p| *p != previous).collect();
    match candidates.choose(rng) {
        Some(p) => Some((*p).clone()),
        None => initial_leader(players, rng),
    }
}
