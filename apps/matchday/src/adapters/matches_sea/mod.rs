//! SeaORM adapter for matches.
//!
//! Status changes are conditional updates filtered on the expected current
//! status; callers read `rows_affected` to learn whether they won the
//! transition.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use time::OffsetDateTime;

use crate::entities::matches::{self, MatchStatus};

pub mod dto;

pub use dto::{MatchComplete, MatchCreate, MatchGoLive};

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<Option<matches::Model>, sea_orm::DbErr> {
    matches::Entity::find_by_id(match_id).one(conn).await
}

pub async fn find_by_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<Vec<matches::Model>, sea_orm::DbErr> {
    matches::Entity::find()
        .filter(matches::Column::RoundId.eq(round_id))
        .order_by_asc(matches::Column::Id)
        .all(conn)
        .await
}

pub async fn find_by_season<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    season_id: i64,
) -> Result<Vec<matches::Model>, sea_orm::DbErr> {
    matches::Entity::find()
        .filter(matches::Column::SeasonId.eq(season_id))
        .order_by_asc(matches::Column::ScheduledAt)
        .order_by_asc(matches::Column::Id)
        .all(conn)
        .await
}

/// Scheduled matches whose kick-off time has passed, oldest first.
pub async fn find_due<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    now: OffsetDateTime,
    limit: u64,
) -> Result<Vec<matches::Model>, sea_orm::DbErr> {
    matches::Entity::find()
        .filter(matches::Column::Status.eq(MatchStatus::Scheduled))
        .filter(matches::Column::ScheduledAt.lte(now))
        .order_by_asc(matches::Column::ScheduledAt)
        .order_by_asc(matches::Column::Id)
        .limit(limit)
        .all(conn)
        .await
}

pub async fn find_by_status<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    status: MatchStatus,
) -> Result<Vec<matches::Model>, sea_orm::DbErr> {
    matches::Entity::find()
        .filter(matches::Column::Status.eq(status))
        .order_by_asc(matches::Column::Id)
        .all(conn)
        .await
}

pub async fn count_unfinished_in_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    matches::Entity::find()
        .filter(matches::Column::RoundId.eq(round_id))
        .filter(matches::Column::Finished.eq(false))
        .count(conn)
        .await
}

/// The pairing flagged as the round's last-match marker.
pub async fn find_round_sentinel<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<Option<matches::Model>, sea_orm::DbErr> {
    matches::Entity::find()
        .filter(matches::Column::RoundId.eq(round_id))
        .filter(matches::Column::LastInRound.eq(true))
        .one(conn)
        .await
}

pub async fn create_match<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: MatchCreate,
) -> Result<matches::Model, sea_orm::DbErr> {
    let fixture = matches::ActiveModel {
        id: NotSet,
        season_id: Set(dto.season_id),
        round_id: Set(dto.round_id),
        home_club_id: Set(dto.home_club_id),
        away_club_id: Set(dto.away_club_id),
        scheduled_at: Set(dto.scheduled_at),
        status: Set(MatchStatus::Scheduled),
        home_score: Set(None),
        away_score: Set(None),
        sim_home_score: Set(None),
        sim_away_score: Set(None),
        finished: Set(false),
        last_in_round: Set(dto.last_in_round),
        started_at: Set(None),
        completed_at: Set(None),
        stats: Set(None),
    };
    fixture.insert(conn).await
}

/// Returns 1 if this call moved the match from SCHEDULED to LIVE, else 0.
pub async fn go_live<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: MatchGoLive,
) -> Result<u64, sea_orm::DbErr> {
    let patch = matches::ActiveModel {
        status: Set(MatchStatus::Live),
        home_score: Set(Some(0)),
        away_score: Set(Some(0)),
        sim_home_score: Set(Some(dto.sim_home_score)),
        sim_away_score: Set(Some(dto.sim_away_score)),
        started_at: Set(Some(dto.started_at)),
        ..Default::default()
    };
    let result = matches::Entity::update_many()
        .set(patch)
        .filter(matches::Column::Id.eq(dto.id))
        .filter(matches::Column::Status.eq(MatchStatus::Scheduled))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

/// Returns 1 if this call moved the match from LIVE to COMPLETED, else 0.
pub async fn complete<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: MatchComplete,
) -> Result<u64, sea_orm::DbErr> {
    let patch = matches::ActiveModel {
        status: Set(MatchStatus::Completed),
        home_score: Set(Some(dto.home_score)),
        away_score: Set(Some(dto.away_score)),
        finished: Set(true),
        completed_at: Set(Some(dto.completed_at)),
        stats: Set(dto.stats),
        ..Default::default()
    };
    let result = matches::Entity::update_many()
        .set(patch)
        .filter(matches::Column::Id.eq(dto.id))
        .filter(matches::Column::Status.eq(MatchStatus::Live))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}
