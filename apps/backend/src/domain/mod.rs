//! Domain layer: pure game logic types and helpers.

pub mod actions;
pub mod game_transition;
pub mod leader;
pub mod lobby;
pub mod outcome;
pub mod player_view;
pub mod rng;
pub mod roles;
pub mod round_machine;
pub mod rules;
pub mod state;
pub mod voting;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod test_state_helpers;
#[cfg(test)]
mod tests_props_rounds;

// Re-exports for ergonomics
pub use game_transition::{derive_game_transitions, GameLifecycleView, GameTransition};
pub use player_view::{GameSummary, GameView, RoundView};
pub use rng::GameRng;
pub use rules::{enemy_count, group_size_for_round};
pub use state::{Faction, Game, GameStatus, Round, RoundResult, RoundStatus, VotePhase};
