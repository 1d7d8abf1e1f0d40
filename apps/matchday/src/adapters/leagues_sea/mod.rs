//! SeaORM adapter for leagues.

use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, NotSet, QueryOrder, Set};

use crate::entities::leagues;
use crate::utils::clock;

pub mod dto;

pub use dto::LeagueCreate;

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    league_id: i64,
) -> Result<Option<leagues::Model>, sea_orm::DbErr> {
    leagues::Entity::find_by_id(league_id).one(conn).await
}

pub async fn find_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<leagues::Model>, sea_orm::DbErr> {
    leagues::Entity::find()
        .order_by_asc(leagues::Column::Id)
        .all(conn)
        .await
}

pub async fn create_league<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: LeagueCreate,
) -> Result<leagues::Model, sea_orm::DbErr> {
    let league = leagues::ActiveModel {
        id: NotSet,
        name: Set(dto.name),
        country: Set(dto.country),
        created_at: Set(clock::now()),
    };
    league.insert(conn).await
}
