use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Games {
    Table,
    Id,
    Name,
    NameKey,
    Owner,
    Status,
    LockVersion,
    Document,
    CreatedAt,
    UpdatedAt,
}

// Active game names are unique regardless of case. Ended games free their
// name. Partial indexes are supported by both Postgres and SQLite.
const ACTIVE_NAME_INDEX: &str = "CREATE UNIQUE INDEX IF NOT EXISTS ux_games_active_name_key \
     ON games (name_key) WHERE status <> 'ended'";

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Games::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Games::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Games::Name).string_len(20).not_null())
                    .col(ColumnDef::new(Games::NameKey).string_len(20).not_null())
                    .col(ColumnDef::new(Games::Owner).string_len(20).not_null())
                    .col(ColumnDef::new(Games::Status).string_len(16).not_null())
                    .col(
                        ColumnDef::new(Games::LockVersion)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(ColumnDef::new(Games::Document).text().not_null())
                    .col(
                        ColumnDef::new(Games::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Games::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_games_status_created_at")
                    .table(Games::Table)
                    .col(Games::Status)
                    .col(Games::CreatedAt)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(ACTIVE_NAME_INDEX)
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Games::Table).if_exists().to_owned())
            .await
    }
}
