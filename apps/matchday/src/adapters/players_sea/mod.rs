//! SeaORM adapter for club rosters.

use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder, Set};

use crate::entities::players;

pub mod dto;

pub use dto::PlayerCreate;

/// Roster of a club ordered by squad number.
pub async fn find_by_club<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    club_id: i64,
) -> Result<Vec<players::Model>, sea_orm::DbErr> {
    players::Entity::find()
        .filter(players::Column::ClubId.eq(club_id))
        .order_by_asc(players::Column::SquadNo)
        .order_by_asc(players::Column::Id)
        .all(conn)
        .await
}

pub async fn insert_many<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    rows: Vec<PlayerCreate>,
) -> Result<(), sea_orm::DbErr> {
    if rows.is_empty() {
        return Ok(());
    }
    let models = rows.into_iter().map(|dto| players::ActiveModel {
        id: NotSet,
        club_id: Set(dto.club_id),
        name: Set(dto.name),
        role: Set(dto.role),
        squad_no: Set(dto.squad_no),
        stamina: Set(dto.stamina),
        playmaking: Set(dto.playmaking),
        scoring: Set(dto.scoring),
        winger: Set(dto.winger),
        goalkeeping: Set(dto.goalkeeping),
        passing: Set(dto.passing),
        defending: Set(dto.defending),
        set_pieces: Set(dto.set_pieces),
        condition: Set(dto.condition),
    });
    players::Entity::insert_many(models).exec(conn).await?;
    Ok(())
}
