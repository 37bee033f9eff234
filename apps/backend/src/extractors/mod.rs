pub mod actor;
pub mod ids;
pub mod validated_json;

pub use actor::CurrentActor;
pub use ids::{GameId, GameRoundIds};
pub use validated_json::ValidatedJson;
