//! League table repository functions.

use std::collections::HashMap;

use sea_orm::ConnectionTrait;

use crate::adapters::standings_sea as standings_adapter;
use crate::domain::standings::{table_order, StandingsDelta, TableRow};
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::repos::clubs;

pub async fn create_rows<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    season_id: i64,
    club_ids: &[i64],
) -> Result<(), DomainError> {
    standings_adapter::create_rows(conn, season_id, club_ids).await?;
    Ok(())
}

/// Apply one match's delta to a club's row with an in-place increment.
pub async fn apply_delta<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    season_id: i64,
    club_id: i64,
    delta: StandingsDelta,
) -> Result<(), DomainError> {
    let inc = standings_adapter::StandingIncrement {
        season_id,
        club_id,
        played: delta.played,
        won: delta.won,
        drawn: delta.drawn,
        lost: delta.lost,
        goals_for: delta.goals_for,
        goals_against: delta.goals_against,
        points: delta.points,
    };
    if standings_adapter::increment(conn, inc).await? == 0 {
        return Err(DomainError::not_found(
            NotFoundKind::Standing,
            format!("No standings row for club {club_id} in season {season_id}"),
        ));
    }
    Ok(())
}

/// Table for a season in ranking order.
pub async fn table<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    season_id: i64,
) -> Result<Vec<TableRow>, DomainError> {
    let rows = standings_adapter::find_by_season(conn, season_id).await?;
    let names: HashMap<i64, String> = clubs::find_by_ids(conn, rows.iter().map(|r| r.club_id).collect())
        .await?
        .into_iter()
        .map(|c| (c.id, c.name))
        .collect();

    let mut table: Vec<TableRow> = rows
        .into_iter()
        .map(|r| TableRow {
            club_name: names.get(&r.club_id).cloned().unwrap_or_default(),
            club_id: r.club_id,
            played: r.played,
            won: r.won,
            drawn: r.drawn,
            lost: r.lost,
            goals_for: r.goals_for,
            goals_against: r.goals_against,
            points: r.points,
        })
        .collect();
    table.sort_by(table_order);
    Ok(table)
}
