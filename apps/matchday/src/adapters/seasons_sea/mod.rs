//! SeaORM adapter for seasons and the round cursor.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use time::OffsetDateTime;

use crate::entities::seasons;
use crate::utils::clock;

pub mod dto;

pub use dto::SeasonCreate;

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    season_id: i64,
) -> Result<Option<seasons::Model>, sea_orm::DbErr> {
    seasons::Entity::find_by_id(season_id).one(conn).await
}

/// Fetch the season row with an exclusive row lock held until the
/// surrounding transaction ends. Backends without row locks (SQLite)
/// serialize writers at the database level instead.
pub async fn lock_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    season_id: i64,
) -> Result<Option<seasons::Model>, sea_orm::DbErr> {
    seasons::Entity::find_by_id(season_id)
        .lock_exclusive()
        .one(conn)
        .await
}

pub async fn find_current<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    league_id: i64,
) -> Result<Option<seasons::Model>, sea_orm::DbErr> {
    seasons::Entity::find()
        .filter(seasons::Column::LeagueId.eq(league_id))
        .filter(seasons::Column::IsCurrent.eq(true))
        .order_by_desc(seasons::Column::Id)
        .one(conn)
        .await
}

pub async fn find_all_by_league<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    league_id: i64,
) -> Result<Vec<seasons::Model>, sea_orm::DbErr> {
    seasons::Entity::find()
        .filter(seasons::Column::LeagueId.eq(league_id))
        .order_by_asc(seasons::Column::StartYear)
        .order_by_asc(seasons::Column::Id)
        .all(conn)
        .await
}

pub async fn create_season<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: SeasonCreate,
) -> Result<seasons::Model, sea_orm::DbErr> {
    let season = seasons::ActiveModel {
        id: NotSet,
        league_id: Set(dto.league_id),
        name: Set(dto.name),
        start_year: Set(dto.start_year),
        is_current: Set(dto.is_current),
        next_round_no: Set(1),
        rng_seed: Set(dto.rng_seed),
        created_at: Set(clock::now()),
        archived_at: Set(None),
    };
    season.insert(conn).await
}

/// Move the round cursor past `round_no`, but only if it has not moved past
/// it already. Returns the number of rows changed (0 or 1).
pub async fn advance_cursor<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    season_id: i64,
    round_no: i16,
) -> Result<u64, sea_orm::DbErr> {
    let result = seasons::Entity::update_many()
        .col_expr(seasons::Column::NextRoundNo, Expr::value(round_no + 1))
        .filter(seasons::Column::Id.eq(season_id))
        .filter(seasons::Column::NextRoundNo.lte(round_no))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

/// Mark a season as its league's current one.
pub async fn install_current<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    season_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let result = seasons::Entity::update_many()
        .col_expr(seasons::Column::IsCurrent, Expr::value(true))
        .filter(seasons::Column::Id.eq(season_id))
        .filter(seasons::Column::ArchivedAt.is_null())
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

/// Clear the current flag and stamp the archive time. No-op on a season
/// that is already archived.
pub async fn archive<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    season_id: i64,
    at: OffsetDateTime,
) -> Result<u64, sea_orm::DbErr> {
    let result = seasons::Entity::update_many()
        .col_expr(seasons::Column::IsCurrent, Expr::value(false))
        .col_expr(seasons::Column::ArchivedAt, Expr::value(Some(at)))
        .filter(seasons::Column::Id.eq(season_id))
        .filter(seasons::Column::ArchivedAt.is_null())
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}
