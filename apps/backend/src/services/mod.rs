//! Services: load, authorize, apply domain rules, commit.

pub mod credentials;
pub mod game_flow;
pub mod games;

pub use credentials::Actor;
pub use game_flow::{GameFlowMutationResult, GameFlowService};
pub use games::GameService;
