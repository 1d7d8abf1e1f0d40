//! Match repository functions.

use sea_orm::ConnectionTrait;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::adapters::matches_sea as matches_adapter;
use crate::domain::outcome::Score;
use crate::domain::stats::MatchStats;
use crate::entities::matches::{self, MatchStatus as DbMatchStatus};
use crate::errors::domain::{DomainError, InfraErrorKind, NotFoundKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchStatus {
    Scheduled,
    Live,
    Completed,
}

/// Match domain model
#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    pub id: i64,
    pub season_id: i64,
    pub round_id: i64,
    pub home_club_id: i64,
    pub away_club_id: i64,
    pub scheduled_at: OffsetDateTime,
    pub status: MatchStatus,
    /// Visible score: `None` before kick-off, running 0-0 while live
    pub score: Option<Score>,
    /// Authoritative score, set when the match goes live
    pub sim_score: Option<Score>,
    pub finished: bool,
    pub last_in_round: bool,
    pub started_at: Option<OffsetDateTime>,
    pub completed_at: Option<OffsetDateTime>,
    /// Tallied from the narrative; `None` when the match finished without one
    pub stats: Option<MatchStats>,
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<Option<Match>, DomainError> {
    let fixture = matches_adapter::find_by_id(conn, match_id).await?;
    Ok(fixture.map(Match::from))
}

pub async fn require_match<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<Match, DomainError> {
    find_by_id(conn, match_id)
        .await?
        .ok_or_else(|| DomainError::not_found(NotFoundKind::Match, format!("Match {match_id} not found")))
}

pub async fn find_due<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    now: OffsetDateTime,
    limit: u64,
) -> Result<Vec<Match>, DomainError> {
    let rows = matches_adapter::find_due(conn, now, limit).await?;
    Ok(rows.into_iter().map(Match::from).collect())
}

pub async fn find_live<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<Match>, DomainError> {
    let rows = matches_adapter::find_by_status(conn, DbMatchStatus::Live).await?;
    Ok(rows.into_iter().map(Match::from).collect())
}

pub async fn find_by_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<Vec<Match>, DomainError> {
    let rows = matches_adapter::find_by_round(conn, round_id).await?;
    Ok(rows.into_iter().map(Match::from).collect())
}

pub async fn find_by_season<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    season_id: i64,
) -> Result<Vec<Match>, DomainError> {
    let rows = matches_adapter::find_by_season(conn, season_id).await?;
    Ok(rows.into_iter().map(Match::from).collect())
}

pub async fn count_unfinished_in_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<u64, DomainError> {
    Ok(matches_adapter::count_unfinished_in_round(conn, round_id).await?)
}

pub async fn find_round_sentinel<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<Option<Match>, DomainError> {
    let row = matches_adapter::find_round_sentinel(conn, round_id).await?;
    Ok(row.map(Match::from))
}

pub async fn create_match<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: matches_adapter::MatchCreate,
) -> Result<Match, DomainError> {
    let fixture = matches_adapter::create_match(conn, dto).await?;
    Ok(Match::from(fixture))
}

/// SCHEDULED -> LIVE. `false` means another caller got there first.
pub async fn go_live<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
    sim: Score,
    at: OffsetDateTime,
) -> Result<bool, DomainError> {
    let dto = matches_adapter::MatchGoLive {
        id: match_id,
        sim_home_score: sim.home as i16,
        sim_away_score: sim.away as i16,
        started_at: at,
    };
    Ok(matches_adapter::go_live(conn, dto).await? == 1)
}

/// LIVE -> COMPLETED. `false` means the match was not live any more.
pub async fn complete<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
    score: Score,
    stats: Option<&MatchStats>,
    at: OffsetDateTime,
) -> Result<bool, DomainError> {
    let stats = stats
        .map(serde_json::to_value)
        .transpose()
        .map_err(|e| {
            DomainError::infra(
                InfraErrorKind::DataCorruption,
                format!("Failed to encode stats for match {match_id}: {e}"),
            )
        })?;
    let dto = matches_adapter::MatchComplete {
        id: match_id,
        home_score: score.home as i16,
        away_score: score.away as i16,
        completed_at: at,
        stats,
    };
    Ok(matches_adapter::complete(conn, dto).await? == 1)
}

fn goals(value: i16) -> u8 {
    value.clamp(0, u8::MAX as i16) as u8
}

fn score_of(home: Option<i16>, away: Option<i16>) -> Option<Score> {
    match (home, away) {
        (Some(h), Some(a)) => Some(Score::new(goals(h), goals(a))),
        _ => None,
    }
}

impl From<matches::Model> for Match {
    fn from(model: matches::Model) -> Self {
        Self {
            id: model.id,
            season_id: model.season_id,
            round_id: model.round_id,
            home_club_id: model.home_club_id,
            away_club_id: model.away_club_id,
            scheduled_at: model.scheduled_at,
            status: model.status.into(),
            score: score_of(model.home_score, model.away_score),
            sim_score: score_of(model.sim_home_score, model.sim_away_score),
            finished: model.finished,
            last_in_round: model.last_in_round,
            started_at: model.started_at,
            completed_at: model.completed_at,
            stats: model
                .stats
                .and_then(|value| serde_json::from_value(value).ok()),
        }
    }
}

impl From<DbMatchStatus> for MatchStatus {
    fn from(status: DbMatchStatus) -> Self {
        match status {
            DbMatchStatus::Scheduled => MatchStatus::Scheduled,
            DbMatchStatus::Live => MatchStatus::Live,
            DbMatchStatus::Completed => MatchStatus::Completed,
        }
    }
}

impl From<MatchStatus> for DbMatchStatus {
    fn from(status: MatchStatus) -> Self {
        match status {
            MatchStatus::Scheduled => DbMatchStatus::Scheduled,
            MatchStatus::Live => DbMatchStatus::Live,
            MatchStatus::Completed => DbMatchStatus::Completed,
        }
    }
}
