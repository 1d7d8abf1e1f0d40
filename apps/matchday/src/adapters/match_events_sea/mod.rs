//! SeaORM adapter for the persisted match narrative.

use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder, Set};

use crate::entities::match_events;

pub mod dto;

pub use dto::MatchEventCreate;

/// Rows are inserted in chunks to stay under bind-parameter limits.
const INSERT_CHUNK: usize = 64;

pub async fn find_by_match<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<Vec<match_events::Model>, sea_orm::DbErr> {
    match_events::Entity::find()
        .filter(match_events::Column::MatchId.eq(match_id))
        .order_by_asc(match_events::Column::Seq)
        .all(conn)
        .await
}

pub async fn insert_many<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    rows: Vec<MatchEventCreate>,
) -> Result<(), sea_orm::DbErr> {
    for chunk in rows.chunks(INSERT_CHUNK) {
        let models = chunk.iter().cloned().map(|dto| match_events::ActiveModel {
            id: NotSet,
            match_id: Set(dto.match_id),
            seq: Set(dto.seq),
            minute: Set(dto.minute),
            stoppage: Set(dto.stoppage),
            kind: Set(dto.kind),
            club_id: Set(dto.club_id),
            player_id: Set(dto.player_id),
            description: Set(dto.description),
            home_score: Set(dto.home_score),
            away_score: Set(dto.away_score),
            key_event: Set(dto.key_event),
        });
        match_events::Entity::insert_many(models).exec(conn).await?;
    }
    Ok(())
}
