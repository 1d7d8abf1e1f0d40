use migration::{migrate, MigrationCommand};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use tracing::info;

use crate::config::db::{db_url, pool_size, DbProfile};
use crate::error::AppError;

/// Open a pooled connection for the given profile.
/// This function does NOT run any migrations.
pub async fn connect_db(profile: DbProfile) -> Result<DatabaseConnection, AppError> {
    let url = db_url(profile.clone())?;
    let size = pool_size(&profile)?;

    let mut options = ConnectOptions::new(url);
    options
        .max_connections(size)
        .min_connections(size.min(1))
        .sqlx_logging(false);

    let conn = Database::connect(options).await?;
    Ok(conn)
}

/// Single entrypoint used by `StateBuilder`: connect, then migrate to latest.
pub async fn bootstrap_db(profile: DbProfile) -> Result<DatabaseConnection, AppError> {
    let conn = connect_db(profile.clone()).await?;
    migrate(&conn, MigrationCommand::Up).await?;
    info!(profile = ?profile, backend = ?conn.get_database_backend(), "database ready");
    Ok(conn)
}
