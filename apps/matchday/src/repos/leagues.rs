//! League repository functions.

use sea_orm::ConnectionTrait;

use crate::adapters::leagues_sea as leagues_adapter;
use crate::entities::leagues;
use crate::errors::domain::{DomainError, NotFoundKind};

#[derive(Debug, Clone, PartialEq)]
pub struct League {
    pub id: i64,
    pub name: String,
    pub country: String,
    pub created_at: time::OffsetDateTime,
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    league_id: i64,
) -> Result<Option<League>, DomainError> {
    let league = leagues_adapter::find_by_id(conn, league_id).await?;
    Ok(league.map(League::from))
}

pub async fn require_league<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    league_id: i64,
) -> Result<League, DomainError> {
    find_by_id(conn, league_id).await?.ok_or_else(|| {
        DomainError::not_found(NotFoundKind::League, format!("League {league_id} not found"))
    })
}

pub async fn find_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<League>, DomainError> {
    let leagues = leagues_adapter::find_all(conn).await?;
    Ok(leagues.into_iter().map(League::from).collect())
}

pub async fn create_league<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
    country: &str,
) -> Result<League, DomainError> {
    let dto = leagues_adapter::LeagueCreate::new(name, country);
    let league = leagues_adapter::create_league(conn, dto).await?;
    Ok(League::from(league))
}

impl From<leagues::Model> for League {
    fn from(model: leagues::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            country: model.country,
            created_at: model.created_at,
        }
    }
}
