// Proptest generators for domain types.

use proptest::prelude::*;

use crate::domain::rules::{MAX_PLAYERS, MIN_PLAYERS};

/// Supported table size.
pub fn player_count() -> impl Strategy<Value = usize> {
    MIN_PLAYERS..=MAX_PLAYERS
}

/// Ballots for a table of `n`.
pub fn ballots(n: usize) -> impl Strategy<Value = Vec<bool>> {
    prop::collection::vec(any::<bool>(), n)
}

/// A scripted decision for one round: how many proposals get rejected
/// (3 means forfeit) and, if approved, the actions in group order.
#[derive(Debug, Clone)]
pub struct RoundScript {
    pub rejections: u8,
    pub actions: Vec<bool>,
}

pub fn round_script() -> impl Strategy<Value = RoundScript> {
    (0u8..=3, prop::collection::vec(any::<bool>(), 5)).prop_map(|(rejections, actions)| {
        RoundScript {
            rejections,
            actions,
        }
    })
}
