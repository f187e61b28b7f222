use migration::{migrate, MigrationCommand};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use tracing::info;

use crate::config::db::{db_url, DbProfile};
use crate::error::AppError;

/// Connect to the database for `profile` and apply pending migrations.
pub async fn connect_db(profile: DbProfile) -> Result<DatabaseConnection, AppError> {
    let url = db_url(profile)?;
    connect_url(&url).await
}

/// Connect to an explicit URL and apply pending migrations.
pub async fn connect_url(url: &str) -> Result<DatabaseConnection, AppError> {
    let mut opts = ConnectOptions::new(url.to_owned());
    opts.sqlx_logging(false);
    if is_sqlite_memory(url) {
        // Every pooled connection would otherwise open its own empty database
        opts.max_connections(1).min_connections(1);
    }

    let conn = Database::connect(opts).await?;
    migrate(&conn, MigrationCommand::Up).await?;
    info!(backend = ?conn.get_database_backend(), "database ready");
    Ok(conn)
}

fn is_sqlite_memory(url: &str) -> bool {
    url.starts_with("sqlite::memory:") || url.contains("mode=memory")
}
