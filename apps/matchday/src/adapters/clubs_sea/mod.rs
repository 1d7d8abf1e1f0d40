//! SeaORM adapter for clubs.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};

use crate::entities::clubs;
use crate::utils::clock;

pub mod dto;

pub use dto::ClubCreate;

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    club_id: i64,
) -> Result<Option<clubs::Model>, sea_orm::DbErr> {
    clubs::Entity::find_by_id(club_id).one(conn).await
}

/// Clubs of a league in registration order.
pub async fn find_by_league<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    league_id: i64,
) -> Result<Vec<clubs::Model>, sea_orm::DbErr> {
    clubs::Entity::find()
        .filter(clubs::Column::LeagueId.eq(league_id))
        .order_by_asc(clubs::Column::Id)
        .all(conn)
        .await
}

pub async fn find_by_ids<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    club_ids: Vec<i64>,
) -> Result<Vec<clubs::Model>, sea_orm::DbErr> {
    clubs::Entity::find()
        .filter(clubs::Column::Id.is_in(club_ids))
        .order_by_asc(clubs::Column::Id)
        .all(conn)
        .await
}

pub async fn create_club<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: ClubCreate,
) -> Result<clubs::Model, sea_orm::DbErr> {
    let club = clubs::ActiveModel {
        id: NotSet,
        league_id: Set(dto.league_id),
        name: Set(dto.name),
        created_at: Set(clock::now()),
    };
    club.insert(conn).await
}
