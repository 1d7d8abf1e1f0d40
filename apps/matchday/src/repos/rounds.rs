//! Round repository functions.

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;

use crate::adapters::rounds_sea as rounds_adapter;
use crate::entities::season_rounds;
use crate::errors::domain::{DomainError, NotFoundKind};

#[derive(Debug, Clone, PartialEq)]
pub struct Round {
    pub id: i64,
    pub season_id: i64,
    pub round_no: i16,
    pub is_last: bool,
    pub scheduled_at: OffsetDateTime,
    pub completed_at: Option<OffsetDateTime>,
}

pub async fn require_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<Round, DomainError> {
    rounds_adapter::find_by_id(conn, round_id)
        .await?
        .map(Round::from)
        .ok_or_else(|| DomainError::not_found(NotFoundKind::Round, format!("Round {round_id} not found")))
}

pub async fn find_by_season_and_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    season_id: i64,
    round_no: i16,
) -> Result<Option<Round>, DomainError> {
    let round = rounds_adapter::find_by_season_and_round(conn, season_id, round_no).await?;
    Ok(round.map(Round::from))
}

pub async fn find_all_by_season<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    season_id: i64,
) -> Result<Vec<Round>, DomainError> {
    let rounds = rounds_adapter::find_all_by_season(conn, season_id).await?;
    Ok(rounds.into_iter().map(Round::from).collect())
}

pub async fn create_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    season_id: i64,
    round_no: i16,
    is_last: bool,
    scheduled_at: OffsetDateTime,
) -> Result<Round, DomainError> {
    let dto = rounds_adapter::RoundCreate {
        season_id,
        round_no,
        is_last,
        scheduled_at,
    };
    let round = rounds_adapter::create_round(conn, dto).await?;
    Ok(Round::from(round))
}

/// `true` if this call stamped the completion time.
pub async fn mark_completed<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
    at: OffsetDateTime,
) -> Result<bool, DomainError> {
    Ok(rounds_adapter::mark_completed(conn, round_id, at).await? == 1)
}

impl From<season_rounds::Model> for Round {
    fn from(model: season_rounds::Model) -> Self {
        Self {
            id: model.id,
            season_id: model.season_id,
            round_no: model.round_no,
            is_last: model.is_last,
            scheduled_at: model.scheduled_at,
            completed_at: model.completed_at,
        }
    }
}
