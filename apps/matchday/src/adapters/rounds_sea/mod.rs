//! SeaORM adapter for season rounds.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};
use time::OffsetDateTime;

use crate::entities::season_rounds;

pub mod dto;

pub use dto::RoundCreate;

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<Option<season_rounds::Model>, sea_orm::DbErr> {
    season_rounds::Entity::find_by_id(round_id).one(conn).await
}

pub async fn find_by_season_and_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    season_id: i64,
    round_no: i16,
) -> Result<Option<season_rounds::Model>, sea_orm::DbErr> {
    season_rounds::Entity::find()
        .filter(season_rounds::Column::SeasonId.eq(season_id))
        .filter(season_rounds::Column::RoundNo.eq(round_no))
        .one(conn)
        .await
}

/// All rounds of a season ordered by round_no
pub async fn find_all_by_season<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    season_id: i64,
) -> Result<Vec<season_rounds::Model>, sea_orm::DbErr> {
    season_rounds::Entity::find()
        .filter(season_rounds::Column::SeasonId.eq(season_id))
        .order_by_asc(season_rounds::Column::RoundNo)
        .all(conn)
        .await
}

pub async fn create_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: RoundCreate,
) -> Result<season_rounds::Model, sea_orm::DbErr> {
    let round = season_rounds::ActiveModel {
        id: NotSet,
        season_id: Set(dto.season_id),
        round_no: Set(dto.round_no),
        is_last: Set(dto.is_last),
        scheduled_at: Set(dto.scheduled_at),
        completed_at: Set(None),
    };
    round.insert(conn).await
}

/// Stamp `completed_at` once; later calls leave the first stamp in place.
pub async fn mark_completed<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
    at: OffsetDateTime,
) -> Result<u64, sea_orm::DbErr> {
    let result = season_rounds::Entity::update_many()
        .col_expr(season_rounds::Column::CompletedAt, Expr::value(Some(at)))
        .filter(season_rounds::Column::Id.eq(round_id))
        .filter(season_rounds::Column::CompletedAt.is_null())
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}
