//! Game creation and read-only queries.

use std::sync::Arc;

use time::OffsetDateTime;
use tracing::info;
use uuid::Uuid;

use crate::domain::player_view::{GameSummary, GameView, RoundView};
use crate::domain::state::Game;
use crate::error::AppError;
use crate::errors::domain::{DomainError, NotFoundKind, ValidationKind};
use crate::repos::games::{require_game, GameSearch, GameStore};
use crate::services::credentials::{
    authorize_member, clean_name, clean_password, password_digest, verify_password, Actor,
};

#[derive(Clone)]
pub struct GameService {
    store: Arc<dyn GameStore>,
}

impl GameService {
    pub fn new(store: Arc<dyn GameStore>) -> Self {
        Self { store }
    }

    /// Create a game in the lobby with `owner` seated first.
    pub async fn create_game(
        &self,
        name: &str,
        owner: &str,
        password: Option<&str>,
    ) -> Result<GameView, AppError> {
        let name = clean_name(name, ValidationKind::InvalidName, "name")?;
        let owner = clean_name(owner, ValidationKind::InvalidPlayer, "owner")?;
        let password = clean_password(password)?;

        let mut game = Game::new(name, owner, None, OffsetDateTime::now_utc());
        game.password_digest = password.map(|p| password_digest(game.id, &p));

        let game = self.store.insert(game).await?;
        info!(game_id = %game.id, owner = %game.owner, protected = game.is_protected(), "game created");
        Ok(GameView::for_viewer(&game, Some(&game.owner)))
    }

    /// Game view for `actor` and the stored `lock_version`.
    /// Needs the password, not membership.
    pub async fn get_game(
        &self,
        game_id: Uuid,
        actor: &Actor,
    ) -> Result<(GameView, i32), AppError> {
        let game = require_game(self.store.as_ref(), game_id).await?;
        verify_password(&game, actor.password.as_deref())?;
        Ok((GameView::for_viewer(&game, Some(&actor.player)), game.lock_version))
    }

    /// All rounds in play order: history first, then the active one.
    pub async fn get_rounds(
        &self,
        game_id: Uuid,
        actor: &Actor,
    ) -> Result<Vec<RoundView>, AppError> {
        let game = require_game(self.store.as_ref(), game_id).await?;
        authorize_member(&game, actor)?;
        Ok(game.rounds().into_iter().map(RoundView::from).collect())
    }

    pub async fn get_round(
        &self,
        game_id: Uuid,
        round_id: Uuid,
        actor: &Actor,
    ) -> Result<RoundView, AppError> {
        let game = require_game(self.store.as_ref(), game_id).await?;
        authorize_member(&game, actor)?;
        game.find_round(round_id).map(RoundView::from).ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Round, format!("Round {round_id} not found"))
                .into()
        })
    }

    pub async fn search_games(&self, filter: &GameSearch) -> Result<Vec<GameSummary>, AppError> {
        let games = self.store.search(filter).await?;
        Ok(games.iter().map(GameSummary::from).collect())
    }
}
