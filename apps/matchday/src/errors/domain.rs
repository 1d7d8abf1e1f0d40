//! Domain-level error type used across services and adapters.
//!
//! This error type is DB-agnostic. Services return
//! `Result<T, crate::error::AppError>` and convert from `DomainError`
//! using the provided `From<DomainError> for AppError` implementation.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Infra error kinds to distinguish operational failures
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InfraErrorKind {
    Timeout,
    DbUnavailable,
    DataCorruption,
    Other(String),
}

/// Business rule violations
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    /// League cannot be scheduled without a bye
    OddClubCount,
    /// Fewer than two clubs
    TooFewClubs,
    /// A club has no players to field
    EmptySquad,
    /// Operation requires a different match status
    InvalidMatchStatus,
    /// Row references something outside its own season/league
    InconsistentFixture,
    Other(String),
}

/// Domain-level not found entities
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    League,
    Club,
    Season,
    Round,
    Match,
    Standing,
    Other(String),
}

/// Domain-level conflict kinds
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConflictKind {
    /// A live session already exists for the match
    SessionActive,
    /// Live-session capacity exhausted
    SessionCapacity,
    /// Conditional update matched no row (status moved on underneath us)
    StaleStatus,
    Unique,
    Other(String),
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Input validation or business rule violation
    Validation(ValidationKind, String),
    /// Semantic conflict
    Conflict(ConflictKind, String),
    /// Missing resource in domain terms
    NotFound(NotFoundKind, String),
    /// Infrastructure/operational failures
    Infra(InfraErrorKind, String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(kind, d) => write!(f, "validation error {kind:?}: {d}"),
            DomainError::Conflict(kind, d) => write!(f, "conflict {kind:?}: {d}"),
            DomainError::NotFound(kind, d) => write!(f, "not found {kind:?}: {d}"),
            DomainError::Infra(kind, d) => write!(f, "infra {kind:?}: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }
    pub fn validation_other(detail: impl Into<String>) -> Self {
        let detail = detail.into();
        Self::Validation(ValidationKind::Other(detail.clone()), detail)
    }
    pub fn conflict(kind: ConflictKind, detail: impl Into<String>) -> Self {
        Self::Conflict(kind, detail.into())
    }
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }
    pub fn infra(kind: InfraErrorKind, detail: impl Into<String>) -> Self {
        Self::Infra(kind, detail.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_kind_and_detail() {
        let err = DomainError::validation(ValidationKind::OddClubCount, "5 clubs");
        assert_eq!(err.to_string(), "validation error OddClubCount: 5 clubs");

        let err = DomainError::not_found(NotFoundKind::Match, "Match 7 not found");
        assert_eq!(err.to_string(), "not found Match: Match 7 not found");
    }

    #[test]
    fn validation_other_keeps_detail_in_kind() {
        let err = DomainError::validation_other("bad input");
        assert_eq!(
            err,
            DomainError::Validation(ValidationKind::Other("bad input".into()), "bad input".into())
        );
    }
}
