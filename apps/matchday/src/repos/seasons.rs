//! Season repository functions, including the round cursor.

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;

use crate::adapters::seasons_sea as seasons_adapter;
use crate::entities::seasons;
use crate::errors::domain::{DomainError, NotFoundKind};

/// Season domain model
#[derive(Debug, Clone, PartialEq)]
pub struct Season {
    pub id: i64,
    pub league_id: i64,
    pub name: String,
    pub start_year: i32,
    pub is_current: bool,
    /// Next round expected to complete
    pub next_round_no: i16,
    pub rng_seed: i64,
    pub created_at: OffsetDateTime,
    pub archived_at: Option<OffsetDateTime>,
}

/// Display name for a season starting in `start_year`, e.g. `2026/27`.
pub fn season_name(start_year: i32) -> String {
    format!("{}/{:02}", start_year, (start_year + 1).rem_euclid(100))
}

fn not_found(season_id: i64) -> DomainError {
    DomainError::not_found(NotFoundKind::Season, format!("Season {season_id} not found"))
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    season_id: i64,
) -> Result<Option<Season>, DomainError> {
    let season = seasons_adapter::find_by_id(conn, season_id).await?;
    Ok(season.map(Season::from))
}

pub async fn require_season<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    season_id: i64,
) -> Result<Season, DomainError> {
    find_by_id(conn, season_id)
        .await?
        .ok_or_else(|| not_found(season_id))
}

/// Load the season holding its row lock for the rest of the transaction.
pub async fn lock_season<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    season_id: i64,
) -> Result<Season, DomainError> {
    seasons_adapter::lock_by_id(conn, season_id)
        .await?
        .map(Season::from)
        .ok_or_else(|| not_found(season_id))
}

pub async fn find_current<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    league_id: i64,
) -> Result<Option<Season>, DomainError> {
    let season = seasons_adapter::find_current(conn, league_id).await?;
    Ok(season.map(Season::from))
}

pub async fn find_all_by_league<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    league_id: i64,
) -> Result<Vec<Season>, DomainError> {
    let seasons = seasons_adapter::find_all_by_league(conn, league_id).await?;
    Ok(seasons.into_iter().map(Season::from).collect())
}

/// Insert a season row. It is not current until [`install_current`].
pub async fn create_season<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    league_id: i64,
    start_year: i32,
    rng_seed: i64,
) -> Result<Season, DomainError> {
    let dto = seasons_adapter::SeasonCreate {
        league_id,
        name: season_name(start_year),
        start_year,
        rng_seed,
        is_current: false,
    };
    let season = seasons_adapter::create_season(conn, dto).await?;
    Ok(Season::from(season))
}

/// `true` if this call moved the cursor from `round_no` to `round_no + 1`.
pub async fn advance_cursor<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    season_id: i64,
    round_no: i16,
) -> Result<bool, DomainError> {
    Ok(seasons_adapter::advance_cursor(conn, season_id, round_no).await? == 1)
}

/// Install a season as current for its league.
pub async fn install_current<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    season_id: i64,
) -> Result<(), DomainError> {
    if seasons_adapter::install_current(conn, season_id).await? == 0 {
        return Err(not_found(season_id));
    }
    Ok(())
}

/// `true` if this call archived the season.
pub async fn archive<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    season_id: i64,
    at: OffsetDateTime,
) -> Result<bool, DomainError> {
    Ok(seasons_adapter::archive(conn, season_id, at).await? == 1)
}

impl From<seasons::Model> for Season {
    fn from(model: seasons::Model) -> Self {
        Self {
            id: model.id,
            league_id: model.league_id,
            name: model.name,
            start_year: model.start_year,
            is_current: model.is_current,
            next_round_no: model.next_round_no,
            rng_seed: model.rng_seed,
            created_at: model.created_at,
            archived_at: model.archived_at,
        }
    }
}
