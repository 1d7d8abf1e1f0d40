//! Club repository functions.

use sea_orm::ConnectionTrait;

use crate::adapters::clubs_sea as clubs_adapter;
use crate::entities::clubs;
use crate::errors::domain::{DomainError, NotFoundKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Club {
    pub id: i64,
    pub league_id: i64,
    pub name: String,
}

pub async fn require_club<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    club_id: i64,
) -> Result<Club, DomainError> {
    clubs_adapter::find_by_id(conn, club_id)
        .await?
        .map(Club::from)
        .ok_or_else(|| DomainError::not_found(NotFoundKind::Club, format!("Club {club_id} not found")))
}

pub async fn find_by_league<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    league_id: i64,
) -> Result<Vec<Club>, DomainError> {
    let clubs = clubs_adapter::find_by_league(conn, league_id).await?;
    Ok(clubs.into_iter().map(Club::from).collect())
}

pub async fn find_by_ids<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    club_ids: Vec<i64>,
) -> Result<Vec<Club>, DomainError> {
    let clubs = clubs_adapter::find_by_ids(conn, club_ids).await?;
    Ok(clubs.into_iter().map(Club::from).collect())
}

pub async fn create_club<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    league_id: i64,
    name: &str,
) -> Result<Club, DomainError> {
    let dto = clubs_adapter::ClubCreate {
        league_id,
        name: name.to_string(),
    };
    let club = clubs_adapter::create_club(conn, dto).await?;
    Ok(Club::from(club))
}

impl From<clubs::Model> for Club {
    fn from(model: clubs::Model) -> Self {
        Self {
            id: model.id,
            league_id: model.league_id,
            name: model.name,
        }
    }
}
