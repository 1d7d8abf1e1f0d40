use std::env;

use crate::error::AppError;

/// Database profile enum for different environments
#[derive(Debug, Clone, PartialEq)]
pub enum DbProfile {
    /// Postgres database described by environment variables
    Prod,
    /// Private in-memory SQLite database, fresh per state
    Test,
}

/// Builds a database URL from environment variables based on profile
pub fn db_url(profile: DbProfile) -> Result<String, AppError> {
    match profile {
        DbProfile::Prod => {
            let host = host();
            let port = port();
            let db_name = must_var("MATCHDAY_DB")?;
            let username = must_var("MATCHDAY_DB_USER")?;
            let password = must_var("MATCHDAY_DB_PASSWORD")?;
            Ok(format!(
                "postgresql://{username}:{password}@{host}:{port}/{db_name}"
            ))
        }
        DbProfile::Test => Ok("sqlite::memory:".to_string()),
    }
}

/// Pool size for a profile. An in-memory SQLite database lives and dies with
/// its connection, so the test profile pins the pool to exactly one.
pub fn pool_size(profile: &DbProfile) -> Result<u32, AppError> {
    match profile {
        DbProfile::Prod => match env::var("MATCHDAY_DB_POOL_SIZE") {
            Ok(raw) => raw.parse::<u32>().map_err(|_| {
                AppError::config(format!(
                    "MATCHDAY_DB_POOL_SIZE must be a positive integer, got '{raw}'"
                ))
            }),
            Err(_) => Ok(10),
        },
        DbProfile::Test => Ok(1),
    }
}

/// Get database host from environment (defaults to localhost)
fn host() -> String {
    env::var("POSTGRES_HOST").unwrap_or_else(|_| "localhost".to_string())
}

/// Get database port from environment (defaults to 5432)
fn port() -> String {
    env::var("POSTGRES_PORT").unwrap_or_else(|_| "5432".to_string())
}

/// Get required environment variable or return error
pub(crate) fn must_var(name: &str) -> Result<String, AppError> {
    env::var(name)
        .map_err(|_| AppError::config(format!("Required environment variable '{name}' is not set")))
}
