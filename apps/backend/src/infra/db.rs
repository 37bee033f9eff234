use std::time::Duration;

use migration::{migrate, MigrationCommand};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use tracing::info;

use crate::error::AppError;

/// Open a connection pool to `url` and bring the schema up to date.
///
/// In-memory SQLite databases are private to a single connection, so the pool
/// is pinned to one connection for `sqlite::memory:` style URLs.
pub async fn connect_and_migrate(url: &str) -> Result<DatabaseConnection, AppError> {
    let mut opts = ConnectOptions::new(url.to_string());
    opts.connect_timeout(Duration::from_secs(5))
        .sqlx_logging(false);
    if is_sqlite_memory(url) {
        opts.max_connections(1).min_connections(1);
    }

    let conn = Database::connect(opts).await?;
    migrate(&conn, MigrationCommand::Up).await?;
    info!(backend = ?conn.get_database_backend(), "database ready");
    Ok(conn)
}

fn is_sqlite_memory(url: &str) -> bool {
    url.starts_with("sqlite:") && url.contains(":memory:")
}
