pub use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::Statement;
pub use sea_orm::{ConnectionTrait, DatabaseConnection};

mod m20261016_000001_init; // keep filename + module name in sync

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20261016_000001_init::Migration)]
    }
}

#[derive(Debug, Clone, Copy)]
pub enum MigrationCommand {
    Up,
    Down,
    Fresh,
    Reset,
    Status,
}

/// Run a migration command against an already-open connection.
///
/// The engine calls this with `Up` during state bootstrap; tests use `Fresh`
/// and `Down` to exercise the schema in both directions.
pub async fn migrate(db: &DatabaseConnection, command: MigrationCommand) -> Result<(), DbErr> {
    let backend = format!("{:?}", db.get_database_backend());
    let before = count_applied_migrations(db).await?;
    let defined = Migrator::migrations().len();

    tracing::info!(
        cmd = ?command,
        backend = %backend,
        database = %database_name(db).await?,
        defined,
        applied = before,
        "running migrations"
    );

    let result = match command {
        MigrationCommand::Up => Migrator::up(db, None).await,
        MigrationCommand::Down => Migrator::down(db, None).await,
        MigrationCommand::Fresh => Migrator::fresh(db).await,
        MigrationCommand::Reset => Migrator::reset(db).await,
        MigrationCommand::Status => Migrator::status(db).await,
    };

    match result {
        Ok(()) => {
            let after = count_applied_migrations(db).await?;
            tracing::info!(cmd = ?command, applied = after, "migrations finished");
            Ok(())
        }
        Err(e) => {
            tracing::error!(cmd = ?command, error = %e, "migrations failed");
            Err(e)
        }
    }
}

async fn database_name(db: &DatabaseConnection) -> Result<String, DbErr> {
    let backend = db.get_database_backend();
    let name = match backend {
        sea_orm::DatabaseBackend::Postgres => {
            let stmt = Statement::from_string(
                backend,
                String::from("select current_database() as name"),
            );
            match db.query_one(stmt).await? {
                Some(row) => row.try_get("", "name")?,
                None => "<unknown>".to_string(),
            }
        }
        sea_orm::DatabaseBackend::Sqlite => {
            let stmt = Statement::from_string(
                backend,
                String::from("SELECT file FROM pragma_database_list WHERE name = 'main'"),
            );
            match db.query_one(stmt).await? {
                Some(row) => match row.try_get::<String>("", "file") {
                    Ok(file) if file.is_empty() => ":memory:".to_string(),
                    Ok(file) => file,
                    Err(_) => "<unknown>".to_string(),
                },
                None => "<unknown>".to_string(),
            }
        }
        _ => "<unsupported>".to_string(),
    };
    Ok(name)
}

/// Count the migrations applied to the database.
/// Returns 0 if the migration table doesn't exist yet.
pub async fn count_applied_migrations(db: &DatabaseConnection) -> Result<usize, DbErr> {
    match Migrator::get_applied_migrations(db).await {
        Ok(migrations) => Ok(migrations.len()),
        Err(DbErr::Exec(_)) | Err(DbErr::Query(_)) => Ok(0),
        Err(e) => Err(e),
    }
}
