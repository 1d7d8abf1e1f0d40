//! Persisted narrative of finished matches.

use sea_orm::ConnectionTrait;

use crate::adapters::match_events_sea as events_adapter;
use crate::domain::events::MatchEventKind;
use crate::domain::replay::MatchEvent;
use crate::entities::match_events;
use crate::errors::domain::{DomainError, InfraErrorKind};

pub async fn append_events<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
    events: &[MatchEvent],
) -> Result<(), DomainError> {
    let rows = events
        .iter()
        .map(|e| events_adapter::MatchEventCreate {
            match_id,
            seq: e.seq,
            minute: e.minute as i16,
            stoppage: e.stoppage as i16,
            kind: e.kind.as_str().to_string(),
            club_id: e.club_id,
            player_id: e.player_id,
            description: e.description.clone(),
            home_score: e.home_score as i16,
            away_score: e.away_score as i16,
            key_event: e.is_key(),
        })
        .collect();
    events_adapter::insert_many(conn, rows).await?;
    Ok(())
}

pub async fn find_by_match<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<Vec<MatchEvent>, DomainError> {
    events_adapter::find_by_match(conn, match_id)
        .await?
        .into_iter()
        .map(MatchEvent::try_from)
        .collect()
}

fn small(value: i16) -> u8 {
    value.clamp(0, u8::MAX as i16) as u8
}

impl TryFrom<match_events::Model> for MatchEvent {
    type Error = DomainError;

    fn try_from(model: match_events::Model) -> Result<Self, Self::Error> {
        let kind: MatchEventKind = model.kind.parse().map_err(|_| {
            DomainError::infra(
                InfraErrorKind::DataCorruption,
                format!("match_events.{} has unknown kind {}", model.id, model.kind),
            )
        })?;
        Ok(Self {
            seq: model.seq,
            minute: small(model.minute),
            stoppage: small(model.stoppage),
            kind,
            club_id: model.club_id,
            player_id: model.player_id,
            description: model.description,
            home_score: small(model.home_score),
            away_score: small(model.away_score),
        })
    }
}
