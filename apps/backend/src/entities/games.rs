use sea_orm::entity::prelude::*;
use time::OffsetDateTime;

/// One row per game. `document` holds the whole aggregate as JSON; the other
/// columns are copies used for filtering and the conditional update.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "games")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    /// Lowercased name for case-insensitive search and uniqueness.
    #[sea_orm(column_name = "name_key")]
    pub name_key: String,
    pub owner: String,
    pub status: String,
    #[sea_orm(column_name = "lock_version")]
    pub lock_version: i32,
    #[sea_orm(column_type = "Text")]
    pub document: String,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    #[sea_orm(column_name = "updated_at")]
    pub updated_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
