use rand_chacha::ChaCha8Rng;
use time::OffsetDateTime;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::domain::game_transition::{derive_game_transitions, GameLifecycleView, GameTransition};
use crate::domain::state::{check_invariants, Game};
use crate::error::AppError;
use crate::errors::domain::DomainError;
use crate::repos::games::{require_game, Fingerprint};
use crate::services::credentials::{verify_password, Actor};
use crate::services::game_flow::GameFlowService;

#[derive(Debug)]
pub struct GameFlowMutationResult {
    pub final_game: Game,
    pub old_version: i32,
    pub transitions: Vec<GameTransition>,
}

impl GameFlowMutationResult {
    pub fn final_version(&self) -> i32 {
        self.final_game.lock_version
    }
}

impl GameFlowService {
    /// Load, authenticate, mutate a copy, check its invariants, commit if
    /// nothing moved meanwhile.
    pub async fn run_mutation<F>(
        &self,
        game_id: Uuid,
        actor: &Actor,
        mutation: F,
    ) -> Result<GameFlowMutationResult, AppError>
    where
        F: FnOnce(
            &mut Game,
            &mut ChaCha8Rng,
            OffsetDateTime,
        ) -> Result<Vec<GameTransition>, DomainError>,
    {
        let current = require_game(self.store.as_ref(), game_id).await?;
        verify_password(&current, actor.password.as_deref())?;

        let expected = Fingerprint::of(&current);
        let before = GameLifecycleView::of(&current);
        let mut next = current;

        let now = OffsetDateTime::now_utc();
        let mut explicit = self.rng.with(|rng| mutation(&mut next, rng, now))?;
        if let Err(e) = check_invariants(&next) {
            error!(%game_id, player = %actor.player, error = %e, "mutation broke game invariants");
            return Err(e.into());
        }

        let after = GameLifecycleView::of(&next);
        let mut transitions = derive_game_transitions(&before, &after);
        transitions.append(&mut explicit);

        let final_game = match self.store.atomic_update(&expected, next).await {
            Ok(game) => game,
            Err(e) if e.is_optimistic_lock() => {
                warn!(
                    %game_id,
                    player = %actor.player,
                    expected_version = expected.lock_version,
                    round_id = ?expected.round_id,
                    "lost update race"
                );
                return Err(e.into());
            }
            Err(e) => return Err(e.into()),
        };

        log_transitions(game_id, &transitions);

        Ok(GameFlowMutationResult {
            final_game,
            old_version: expected.lock_version,
            transitions,
        })
    }
}

fn log_transitions(game_id: Uuid, transitions: &[GameTransition]) {
    for t in transitions {
        match t {
            GameTransition::GameStarted
            | GameTransition::GameEnded { .. }
            | GameTransition::RoundResolved { .. }
            | GameTransition::RoundForfeited { .. } => info!(%game_id, transition = ?t),
            _ => debug!(%game_id, transition = ?t),
        }
    }
}
