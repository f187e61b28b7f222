use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::Statement;
use sea_orm_migration::sea_query::extension::postgres::Type as PgType;
use sea_orm_migration::sea_query::{ColumnDef, ForeignKeyAction, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum Rounds {
    Table,
    Id,
    State,
    Secret,
    DailyDate,
    CreatedAt,
    FinishedAt,
}

#[derive(Iden)]
enum RoundStateEnum {
    #[iden = "round_state"]
    Type,
}

#[derive(Iden)]
enum Attempts {
    Table,
    Id,
    RoundId,
    AttemptNo,
    GuessText,
    ExactCount,
    PartialCount,
    IsNoMatch,
    IsRepeated,
    CreatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create Postgres enums (PostgreSQL only)
        match manager.get_database_backend() {
            sea_orm::DatabaseBackend::Postgres => {
                let exists = manager
                    .get_connection()
                    .query_one(Statement::from_string(
                        sea_orm::DatabaseBackend::Postgres,
                        "SELECT 1 FROM pg_type WHERE typname = 'round_state'".to_string(),
                    ))
                    .await?
                    .is_some();

                if !exists {
                    manager
                        .create_type(
                            PgType::create()
                                .as_enum(RoundStateEnum::Type)
                                .values(["IN_PROGRESS", "WON", "ABANDONED"])
                                .to_owned(),
                        )
                        .await?;
                }
            }
            sea_orm::DatabaseBackend::Sqlite => {
                // SQLite doesn't need enum types - they're stored as TEXT
            }
            _ => {
                return Err(DbErr::Custom("Unsupported database backend".into()));
            }
        }

        // rounds
        manager
            .create_table(
                Table::create()
                    .table(Rounds::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Rounds::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(
                        ColumnDef::new(Rounds::State)
                            .custom(RoundStateEnum::Type)
                            .not_null()
                            .default("IN_PROGRESS"),
                    )
                    .col(ColumnDef::new(Rounds::Secret).string().not_null())
                    .col(ColumnDef::new(Rounds::DailyDate).date().null())
                    .col(
                        ColumnDef::new(Rounds::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Rounds::FinishedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Active-round lookup filters on state within a mode
        manager
            .create_index(
                Index::create()
                    .name("ix_rounds_state")
                    .table(Rounds::Table)
                    .col(Rounds::State)
                    .col(Rounds::DailyDate)
                    .to_owned(),
            )
            .await?;

        // attempts
        manager
            .create_table(
                Table::create()
                    .table(Attempts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Attempts::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Attempts::RoundId).big_integer().not_null())
                    .col(ColumnDef::new(Attempts::AttemptNo).integer().not_null())
                    .col(ColumnDef::new(Attempts::GuessText).string().not_null())
                    .col(ColumnDef::new(Attempts::ExactCount).small_integer().not_null())
                    .col(
                        ColumnDef::new(Attempts::PartialCount)
                            .small_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Attempts::IsNoMatch)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Attempts::IsRepeated)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Attempts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_attempts_round_id")
                            .from(Attempts::Table, Attempts::RoundId)
                            .to(Rounds::Table, Rounds::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_attempts_round_attempt_no")
                    .table(Attempts::Table)
                    .col(Attempts::RoundId)
                    .col(Attempts::AttemptNo)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // drop in reverse order + drop index before table
        manager
            .drop_index(
                Index::drop()
                    .name("ux_attempts_round_attempt_no")
                    .table(Attempts::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Attempts::Table).to_owned())
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("ix_rounds_state")
                    .table(Rounds::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Rounds::Table).to_owned())
            .await?;

        // Drop enum types (PostgreSQL only)
        match manager.get_database_backend() {
            sea_orm::DatabaseBackend::Postgres => {
                manager
                    .drop_type(
                        PgType::drop()
                            .name(RoundStateEnum::Type)
                            .if_exists()
                            .to_owned(),
                    )
                    .await?;
            }
            sea_orm::DatabaseBackend::Sqlite => {
                // SQLite doesn't have enum types to drop
            }
            _ => {
                return Err(DbErr::Custom("Unsupported database backend".into()));
            }
        }

        Ok(())
    }
}
