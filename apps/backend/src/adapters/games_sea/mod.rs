//! SeaORM game store.
//!
//! One row per game with the aggregate in a JSON text column. Conditional
//! updates filter on `lock_version`, which every write bumps.

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, SqlErr,
};
use tracing::debug;
use uuid::Uuid;

use crate::domain::state::{Game, GameStatus};
use crate::entities::games;
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};
use crate::repos::games::{Fingerprint, GameSearch, GameStore};

pub mod dto;

pub use dto::GameRowParts;

/// Substring pattern over `name_key` that matches `needle` literally.
fn name_pattern(needle: &str) -> LikeExpr {
    let mut escaped = String::with_capacity(needle.len() + 2);
    escaped.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    LikeExpr::new(escaped).escape('\\')
}

#[derive(Debug, Clone)]
pub struct SeaGameStore {
    db: DatabaseConnection,
}

impl SeaGameStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }
}

fn name_taken(name: &str) -> DomainError {
    DomainError::conflict(
        ConflictKind::NameTaken,
        format!("An active game named {name} already exists"),
    )
}

/// Apply the update filtered by id and expected version, then refetch.
///
/// Zero rows affected means either the game is gone or its version moved;
/// a second read tells the two apart.
async fn optimistic_update_then_fetch(
    db: &DatabaseConnection,
    expected: &Fingerprint,
    next: &Game,
) -> Result<games::Model, DomainError> {
    let parts = GameRowParts::of(next)?;

    let result = games::Entity::update_many()
        .col_expr(games::Column::Name, Expr::value(next.name.clone()))
        .col_expr(games::Column::NameKey, Expr::value(parts.name_key))
        .col_expr(games::Column::Status, Expr::value(parts.status))
        .col_expr(games::Column::Document, Expr::value(parts.document))
        .col_expr(games::Column::UpdatedAt, Expr::value(next.updated_at))
        .col_expr(
            games::Column::LockVersion,
            Expr::col(games::Column::LockVersion).add(1),
        )
        .filter(games::Column::Id.eq(next.id))
        .filter(games::Column::LockVersion.eq(expected.lock_version))
        .exec(db)
        .await
        .map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => name_taken(&next.name),
            _ => DomainError::from(e),
        })?;

    if result.rows_affected == 0 {
        return match games::Entity::find_by_id(next.id).one(db).await? {
            Some(row) => Err(DomainError::conflict(
                ConflictKind::OptimisticLock,
                format!(
                    "Game changed concurrently: expected version {}, found {}",
                    expected.lock_version, row.lock_version
                ),
            )),
            None => Err(DomainError::not_found(
                NotFoundKind::Game,
                format!("Game {} not found", next.id),
            )),
        };
    }

    games::Entity::find_by_id(next.id)
        .one(db)
        .await?
        .ok_or_else(|| DbErr::RecordNotFound(format!("Game {} not found", next.id)).into())
}

#[async_trait]
impl GameStore for SeaGameStore {
    async fn insert(&self, game: Game) -> Result<Game, DomainError> {
        let taken = games::Entity::find()
            .filter(games::Column::NameKey.eq(game.name.to_lowercase()))
            .filter(games::Column::Status.ne(GameStatus::Ended.as_str()))
            .one(&self.db)
            .await?
            .is_some();
        if taken {
            return Err(name_taken(&game.name));
        }

        // The partial unique index catches a racing insert that passed the check.
        let row = dto::to_active_model(&game)?
            .insert(&self.db)
            .await
            .map_err(|e| match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => name_taken(&game.name),
                _ => DomainError::from(e),
            })?;
        debug!(game_id = %row.id, "game row inserted");
        dto::from_row(row)
    }

    async fn load(&self, id: Uuid) -> Result<Option<Game>, DomainError> {
        games::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(dto::from_row)
            .transpose()
    }

    async fn atomic_update(
        &self,
        expected: &Fingerprint,
        next: Game,
    ) -> Result<Game, DomainError> {
        let row = optimistic_update_then_fetch(&self.db, expected, &next).await?;
        dto::from_row(row)
    }

    async fn search(&self, filter: &GameSearch) -> Result<Vec<Game>, DomainError> {
        let mut query = games::Entity::find();
        if let Some(name) = &filter.name {
            query = query.filter(games::Column::NameKey.like(name_pattern(name)));
        }
        if let Some(status) = filter.status {
            query = query.filter(games::Column::Status.eq(status.as_str()));
        }

        query
            .order_by_asc(games::Column::CreatedAt)
            .order_by_asc(games::Column::Id)
            .offset(filter.page)
            .limit(filter.limit)
            .all(&self.db)
            .await?
            .into_iter()
            .map(dto::from_row)
            .collect()
    }
}
