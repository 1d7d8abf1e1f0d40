//! SeaORM -> DomainError translation helpers.
//!
//! Adapters return `sea_orm::DbErr`; repos convert it into
//! `crate::errors::domain::DomainError` here, and services map that to
//! `AppError` via `From`.

use tracing::{error, warn};

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};

fn mentions_sqlstate(msg: &str, code: &str) -> bool {
    msg.contains(code) || msg.contains(&format!("SQLSTATE({code})"))
}

/// Extract `table.column` from SQLite "UNIQUE constraint failed: table.column" messages.
fn extract_sqlite_table_column(error_msg: &str) -> Option<&str> {
    let marker = "UNIQUE constraint failed: ";
    let start = error_msg.find(marker)? + marker.len();
    error_msg[start..].split_whitespace().next()
}

fn unique_conflict_detail(error_msg: &str) -> &'static str {
    let sqlite_target = extract_sqlite_table_column(error_msg);
    if matches!(sqlite_target, Some(t) if t.starts_with("standings."))
        || error_msg.contains("ux_standings_season_club")
    {
        return "Standings row already exists for club in season";
    }
    if matches!(sqlite_target, Some(t) if t.starts_with("season_rounds."))
        || error_msg.contains("ux_season_rounds_season_round")
    {
        return "Round number already exists in season";
    }
    if matches!(sqlite_target, Some(t) if t.starts_with("match_events."))
        || error_msg.contains("ux_match_events_match_seq")
    {
        return "Match event sequence already recorded";
    }
    "Unique constraint violation"
}

/// Translate a `DbErr` into a `DomainError`.
pub fn map_db_err(e: sea_orm::DbErr) -> DomainError {
    let error_msg = e.to_string();

    match &e {
        sea_orm::DbErr::RecordNotFound(what) => {
            return DomainError::not_found(NotFoundKind::Other(what.clone()), "Record not found");
        }
        sea_orm::DbErr::ConnectionAcquire(_) | sea_orm::DbErr::Conn(_) => {
            warn!(raw_error = %error_msg, "Database unavailable");
            return DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable");
        }
        _ => {}
    }

    if mentions_sqlstate(&error_msg, "23505")
        || error_msg.contains("duplicate key value violates unique constraint")
        || error_msg.contains("UNIQUE constraint failed")
    {
        warn!(raw_error = %error_msg, "Unique constraint violation");
        return DomainError::conflict(ConflictKind::Unique, unique_conflict_detail(&error_msg));
    }

    if mentions_sqlstate(&error_msg, "23503") || error_msg.contains("FOREIGN KEY constraint failed")
    {
        warn!(raw_error = %error_msg, "Foreign key constraint violation");
        return DomainError::validation_other("Foreign key constraint violation");
    }

    if error_msg.contains("timeout") || error_msg.contains("pool timed out") {
        warn!(raw_error = %error_msg, "Database timeout");
        return DomainError::infra(InfraErrorKind::Timeout, "Database timeout");
    }

    error!(raw_error = %error_msg, "Unhandled database error");
    DomainError::infra(
        InfraErrorKind::Other("DbErr".into()),
        "Database operation failed",
    )
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        map_db_err(e)
    }
}
