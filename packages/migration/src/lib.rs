pub use sea_orm_migration::prelude::*;
pub use sea_orm_migration::sea_orm;
use sea_orm_migration::sea_orm::{DatabaseBackend, Statement};
pub use sea_orm_migration::sea_orm::{ConnectionTrait, DatabaseConnection};

mod m20261018_000001_rounds; // keep filename + module name in sync

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20261018_000001_rounds::Migration)]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationCommand {
    Up,
    Down,
    Fresh,
    Reset,
    Refresh,
    Status,
}

impl MigrationCommand {
    fn changes_schema(self) -> bool {
        !matches!(self, MigrationCommand::Status)
    }
}

/// Run `command` against an already-open connection.
/// Shared by the CLI, the backend's startup path, and tests.
pub async fn migrate(db: &DatabaseConnection, command: MigrationCommand) -> Result<(), DbErr> {
    let before = DbDiagnostics::collect(db).await?;
    tracing::info!(
        ?command,
        backend = %before.backend,
        database = %before.name,
        defined = before.defined,
        applied = before.applied,
        "running migration command"
    );

    let result = match command {
        MigrationCommand::Up => Migrator::up(db, None).await,
        MigrationCommand::Down => Migrator::down(db, None).await,
        MigrationCommand::Fresh => Migrator::fresh(db).await,
        MigrationCommand::Reset => Migrator::reset(db).await,
        MigrationCommand::Refresh => Migrator::refresh(db).await,
        MigrationCommand::Status => Migrator::status(db).await,
    };

    if let Err(e) = result {
        tracing::error!(?command, backend = %before.backend, error = %e, "migration command failed");
        return Err(e);
    }

    if command.changes_schema() {
        let after = DbDiagnostics::collect(db).await?;
        tracing::info!(
            ?command,
            defined = after.defined,
            applied = after.applied,
            "migration command finished"
        );
    }
    Ok(())
}

#[derive(Debug)]
struct DbDiagnostics {
    backend: String,
    name: String,
    applied: usize,
    defined: usize,
}

impl DbDiagnostics {
    async fn collect(db: &DatabaseConnection) -> Result<Self, DbErr> {
        let backend = db.get_database_backend();
        let name = match backend {
            DatabaseBackend::Postgres => query_name(db, "SELECT current_database() AS name")
                .await?
                .unwrap_or_else(|| "<unknown>".to_string()),
            DatabaseBackend::Sqlite => {
                match query_name(db, "SELECT file AS name FROM pragma_database_list WHERE name = 'main'")
                    .await?
                {
                    Some(file) if file.is_empty() => ":memory:".to_string(),
                    Some(file) => file,
                    None => "<unknown>".to_string(),
                }
            }
            _ => "<unsupported>".to_string(),
        };

        Ok(Self {
            backend: format!("{backend:?}"),
            name,
            applied: count_applied_migrations(db).await.unwrap_or(0),
            defined: Migrator::migrations().len(),
        })
    }
}

async fn query_name(db: &DatabaseConnection, sql: &str) -> Result<Option<String>, DbErr> {
    let stmt = Statement::from_string(db.get_database_backend(), sql.to_string());
    match db.query_one(stmt).await? {
        Some(row) => Ok(row.try_get::<String>("", "name").ok()),
        None => Ok(None),
    }
}

/// Number of applied migrations; 0 when the bookkeeping table does not exist yet.
pub async fn count_applied_migrations(db: &DatabaseConnection) -> Result<usize, DbErr> {
    match Migrator::get_applied_migrations(db).await {
        Ok(migrations) => Ok(migrations.len()),
        Err(DbErr::Exec(_)) => Ok(0),
        Err(e) => Err(e),
    }
}

/// Name of the latest applied migration, if any.
pub async fn get_latest_migration_version(
    db: &DatabaseConnection,
) -> Result<Option<String>, DbErr> {
    match Migrator::get_applied_migrations(db).await {
        Ok(migrations) => Ok(migrations.last().map(|m| m.name().to_string())),
        Err(DbErr::Exec(_)) => Ok(None),
        Err(e) => Err(e),
    }
}
