//! Transitions emitted by game mutations, for logging and callers.

use uuid::Uuid;

use crate::domain::state::{Faction, Game, GameStatus, RoundResult};

/// Lifecycle fields compared before and after a mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameLifecycleView {
    pub status: GameStatus,
    pub round: Option<(Uuid, u8)>,
    pub winner: Option<Faction>,
}

impl GameLifecycleView {
    pub fn of(game: &Game) -> Self {
        Self {
            status: game.status,
            round: game.current_round.as_ref().map(|r| (r.id, r.number)),
            winner: game.winner,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameTransition {
    /// Edge-triggered: Lobby -> Rounds.
    GameStarted,

    /// Edge-triggered: a new round became active.
    RoundStarted { round_id: Uuid, number: u8 },

    /// Edge-triggered: the game reached a winner.
    GameEnded { winner: Faction },

    /// Explicit: a player took a seat in the lobby.
    PlayerJoined { player: String },

    /// Explicit: the leader put a group to the vote.
    GroupProposed { round_id: Uuid, group: Vec<String> },

    /// Explicit: a ballot was accepted; the value stays hidden.
    VoteRecorded { round_id: Uuid, player: String },

    GroupApproved { round_id: Uuid },

    GroupRejected { round_id: Uuid, rejections: u8 },

    /// Explicit: third rejection handed the round to the enemies.
    RoundForfeited { round_id: Uuid },

    /// Explicit: a group member acted; the value stays hidden.
    ActionRecorded { round_id: Uuid, player: String },

    RoundResolved { round_id: Uuid, result: RoundResult },
}

/// Derive edge-triggered transitions from before/after lifecycle state.
pub fn derive_game_transitions(
    before: &GameLifecycleView,
    after: &GameLifecycleView,
) -> Vec<GameTransition> {
    let mut transitions = Vec::new();

    if before.status == GameStatus::Lobby && after.status == GameStatus::Rounds {
        transitions.push(GameTransition::GameStarted);
    }

    if let Some((round_id, number)) = after.round {
        if before.round.map(|(id, _)| id) != Some(round_id) {
            transitions.push(GameTransition::RoundStarted { round_id, number });
        }
    }

    if before.status != GameStatus::Ended && after.status == GameStatus::Ended {
        if let Some(winner) = after.winner {
            transitions.push(GameTransition::GameEnded { winner });
        }
    }

    transitions
}
