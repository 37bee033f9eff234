use tracing::debug;
use uuid::Uuid;

use super::{GameFlowMutationResult, GameFlowService};
use crate::domain::player_view::RoundView;
use crate::domain::round_machine;
use crate::error::AppError;
use crate::errors::domain::{DomainError, InfraErrorKind};
use crate::services::credentials::Actor;

/// The round a mutation acted on, whether still active or just archived.
fn acted_round(result: &GameFlowMutationResult, round_id: Uuid) -> Result<RoundView, AppError> {
    result
        .final_game
        .find_round(round_id)
        .map(RoundView::from)
        .ok_or_else(|| {
            DomainError::infra(
                InfraErrorKind::DataCorruption,
                format!("round {round_id} vanished after commit"),
            )
            .into()
        })
}

impl GameFlowService {
    /// Leader proposes `group` for the active round.
    pub async fn propose_group(
        &self,
        game_id: Uuid,
        round_id: Uuid,
        actor: &Actor,
        group: Vec<String>,
    ) -> Result<RoundView, AppError> {
        let group: Vec<String> = group.iter().map(|m| m.trim().to_string()).collect();
        debug!(%game_id, %round_id, leader = %actor.player, ?group, "propose group");

        let result = self
            .run_mutation(game_id, actor, |game, _rng, now| {
                round_machine::propose_group(game, round_id, &actor.player, group, now)
            })
            .await?;
        acted_round(&result, round_id)
    }

    /// Cast a ballot on the proposed group.
    pub async fn submit_vote(
        &self,
        game_id: Uuid,
        round_id: Uuid,
        actor: &Actor,
        vote: bool,
    ) -> Result<RoundView, AppError> {
        debug!(%game_id, %round_id, player = %actor.player, "submit vote");

        let result = self
            .run_mutation(game_id, actor, |game, rng, now| {
                round_machine::cast_vote(game, round_id, &actor.player, vote, rng, now)
            })
            .await?;
        acted_round(&result, round_id)
    }

    /// Collaborate (`true`) or sabotage (`false`) as a group member.
    pub async fn submit_action(
        &self,
        game_id: Uuid,
        round_id: Uuid,
        actor: &Actor,
        action: bool,
    ) -> Result<RoundView, AppError> {
        debug!(%game_id, %round_id, player = %actor.player, "submit action");

        let result = self
            .run_mutation(game_id, actor, |game, rng, now| {
                round_machine::submit_action(game, round_id, &actor.player, action, rng, now)
            })
            .await?;
        acted_round(&result, round_id)
    }
}
