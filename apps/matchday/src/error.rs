use thiserror::Error;

use crate::errors::domain::{
    ConflictKind, DomainError, InfraErrorKind, NotFoundKind, ValidationKind,
};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {detail}")]
    Validation { code: &'static str, detail: String },
    #[error("Database error: {detail}")]
    Db { detail: String },
    #[error("Not found: {detail}")]
    NotFound { code: &'static str, detail: String },
    #[error("Internal error: {detail}")]
    Internal { detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
    #[error("Conflict: {detail}")]
    Conflict { code: &'static str, detail: String },
    #[error("Database unavailable: {detail}")]
    DbUnavailable { detail: String },
}

impl AppError {
    /// Stable machine-readable code for logs and callers.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation { code, .. } => *code,
            AppError::Db { .. } => "DB_ERROR",
            AppError::NotFound { code, .. } => *code,
            AppError::Internal { .. } => "INTERNAL",
            AppError::Config { .. } => "CONFIG_ERROR",
            AppError::Conflict { code, .. } => *code,
            AppError::DbUnavailable { .. } => "DB_UNAVAILABLE",
        }
    }

    pub fn invalid(code: &'static str, detail: impl Into<String>) -> Self {
        Self::Validation {
            code,
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
        }
    }

    pub fn not_found(code: &'static str, detail: impl Into<String>) -> Self {
        Self::NotFound {
            code,
            detail: detail.into(),
        }
    }

    pub fn db(detail: impl Into<String>) -> Self {
        Self::Db {
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    pub fn conflict(code: &'static str, detail: impl Into<String>) -> Self {
        Self::Conflict {
            code,
            detail: detail.into(),
        }
    }

    pub fn db_unavailable(detail: impl Into<String>) -> Self {
        Self::DbUnavailable {
            detail: detail.into(),
        }
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(kind, detail) => {
                let code = match kind {
                    ValidationKind::OddClubCount => "ODD_CLUB_COUNT",
                    ValidationKind::TooFewClubs => "TOO_FEW_CLUBS",
                    ValidationKind::EmptySquad => "EMPTY_SQUAD",
                    ValidationKind::InvalidMatchStatus => "INVALID_MATCH_STATUS",
                    ValidationKind::InconsistentFixture => "INCONSISTENT_FIXTURE",
                    _ => "VALIDATION_ERROR",
                };
                AppError::invalid(code, detail)
            }
            DomainError::Conflict(kind, detail) => {
                let code = match kind {
                    ConflictKind::SessionActive => "SESSION_ACTIVE",
                    ConflictKind::SessionCapacity => "SESSION_CAPACITY",
                    ConflictKind::StaleStatus => "STALE_STATUS",
                    ConflictKind::Unique => "UNIQUE_VIOLATION",
                    _ => "CONFLICT",
                };
                AppError::conflict(code, detail)
            }
            DomainError::NotFound(kind, detail) => {
                let code = match kind {
                    NotFoundKind::League => "LEAGUE_NOT_FOUND",
                    NotFoundKind::Club => "CLUB_NOT_FOUND",
                    NotFoundKind::Season => "SEASON_NOT_FOUND",
                    NotFoundKind::Round => "ROUND_NOT_FOUND",
                    NotFoundKind::Match => "MATCH_NOT_FOUND",
                    NotFoundKind::Standing => "STANDING_NOT_FOUND",
                    _ => "NOT_FOUND",
                };
                AppError::not_found(code, detail)
            }
            DomainError::Infra(InfraErrorKind::DbUnavailable, detail) => {
                AppError::db_unavailable(detail)
            }
            DomainError::Infra(InfraErrorKind::Timeout, detail) => AppError::db(detail),
            DomainError::Infra(_, detail) => AppError::internal(detail),
        }
    }
}

impl From<std::env::VarError> for AppError {
    fn from(e: std::env::VarError) -> Self {
        AppError::config(format!("env var error: {e}"))
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(e: sea_orm::DbErr) -> Self {
        AppError::from(crate::infra::db_errors::map_db_err(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_map_to_stable_codes() {
        let err: AppError =
            DomainError::validation(ValidationKind::OddClubCount, "odd league").into();
        assert_eq!(err.code(), "ODD_CLUB_COUNT");

        let err: AppError = DomainError::not_found(NotFoundKind::Season, "gone").into();
        assert_eq!(err.code(), "SEASON_NOT_FOUND");

        let err: AppError =
            DomainError::infra(InfraErrorKind::DbUnavailable, "pool closed").into();
        assert!(matches!(err, AppError::DbUnavailable { .. }));
    }

    #[test]
    fn record_not_found_becomes_not_found() {
        let err: AppError = sea_orm::DbErr::RecordNotFound("match".into()).into();
        assert_eq!(err.code(), "NOT_FOUND");
    }
}
