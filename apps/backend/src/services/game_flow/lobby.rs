use tracing::debug;
use uuid::Uuid;

use super::GameFlowService;
use crate::domain::lobby;
use crate::domain::player_view::GameView;
use crate::error::AppError;
use crate::errors::domain::ValidationKind;
use crate::services::credentials::{clean_name, Actor};

impl GameFlowService {
    /// Seat `new_player` (the actor when `None`) in the lobby.
    ///
    /// Check order: game exists, password, game still in the lobby, capacity,
    /// duplicate name.
    pub async fn join_game(
        &self,
        game_id: Uuid,
        actor: &Actor,
        new_player: Option<&str>,
    ) -> Result<GameView, AppError> {
        let player = match new_player {
            Some(raw) => clean_name(raw, ValidationKind::InvalidPlayer, "player")?,
            None => actor.player.clone(),
        };
        debug!(%game_id, actor = %actor.player, %player, "join game");

        let result = self
            .run_mutation(game_id, actor, |game, _rng, now| {
                lobby::join(game, &player, now)
            })
            .await?;
        Ok(GameView::for_viewer(&result.final_game, Some(&player)))
    }

    /// Owner-only: assign roles and open the first round.
    pub async fn start_game(&self, game_id: Uuid, actor: &Actor) -> Result<(), AppError> {
        debug!(%game_id, actor = %actor.player, "start game");
        self.run_mutation(game_id, actor, |game, rng, now| {
            lobby::start(game, &actor.player, rng, now)
        })
        .await?;
        Ok(())
    }
}
