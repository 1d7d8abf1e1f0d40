//! SeaORM adapter for league tables.

use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder, Set};

use crate::entities::standings;

pub mod dto;

pub use dto::StandingIncrement;

pub async fn find_by_season<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    season_id: i64,
) -> Result<Vec<standings::Model>, sea_orm::DbErr> {
    standings::Entity::find()
        .filter(standings::Column::SeasonId.eq(season_id))
        .order_by_asc(standings::Column::ClubId)
        .all(conn)
        .await
}

/// Zeroed rows for every club of a new season.
pub async fn create_rows<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    season_id: i64,
    club_ids: &[i64],
) -> Result<(), sea_orm::DbErr> {
    if club_ids.is_empty() {
        return Ok(());
    }
    let models = club_ids.iter().map(|club_id| standings::ActiveModel {
        id: NotSet,
        season_id: Set(season_id),
        club_id: Set(*club_id),
        played: Set(0),
        won: Set(0),
        drawn: Set(0),
        lost: Set(0),
        goals_for: Set(0),
        goals_against: Set(0),
        points: Set(0),
    });
    standings::Entity::insert_many(models).exec(conn).await?;
    Ok(())
}

/// Add `inc` to the row in place (`col = col + n`), so concurrent writers
/// never overwrite each other. Returns rows changed.
pub async fn increment<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    inc: StandingIncrement,
) -> Result<u64, sea_orm::DbErr> {
    use standings::Column;

    let result = standings::Entity::update_many()
        .col_expr(Column::Played, Expr::col(Column::Played).add(inc.played))
        .col_expr(Column::Won, Expr::col(Column::Won).add(inc.won))
        .col_expr(Column::Drawn, Expr::col(Column::Drawn).add(inc.drawn))
        .col_expr(Column::Lost, Expr::col(Column::Lost).add(inc.lost))
        .col_expr(Column::GoalsFor, Expr::col(Column::GoalsFor).add(inc.goals_for))
        .col_expr(
            Column::GoalsAgainst,
            Expr::col(Column::GoalsAgainst).add(inc.goals_against),
        )
        .col_expr(Column::Points, Expr::col(Column::Points).add(inc.points))
        .filter(Column::SeasonId.eq(inc.season_id))
        .filter(Column::ClubId.eq(inc.club_id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}
