//! League table updates for finished matches.

use sea_orm::DatabaseTransaction;
use tracing::debug;

use crate::domain::outcome::Score;
use crate::domain::standings::StandingsDelta;
use crate::error::AppError;
use crate::repos::matches::Match;
use crate::repos::standings;

/// Applies a finished match to both clubs' rows.
///
/// Not idempotent: callers invoke it once per match, inside the transaction
/// that moved the match to COMPLETED.
#[derive(Default)]
pub struct StandingsService;

impl StandingsService {
    pub fn new() -> Self {
        Self
    }

    pub async fn update(
        &self,
        txn: &DatabaseTransaction,
        fixture: &Match,
        score: Score,
    ) -> Result<(), AppError> {
        let (home, away) = StandingsDelta::for_match(score);
        standings::apply_delta(txn, fixture.season_id, fixture.home_club_id, home).await?;
        standings::apply_delta(txn, fixture.season_id, fixture.away_club_id, away).await?;
        debug!(
            match_id = fixture.id,
            season_id = fixture.season_id,
            home = score.home,
            away = score.away,
            "standings updated"
        );
        Ok(())
    }
}
