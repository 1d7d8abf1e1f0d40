//! Season creation: fixture generation plus persistence of the plan.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use sea_orm::DatabaseTransaction;
use time::{Duration, OffsetDateTime};
use tracing::info;

use crate::adapters::matches_sea::MatchCreate;
use crate::domain::fixtures;
use crate::domain::seed_derivation::derive_fixture_seed;
use crate::error::AppError;
use crate::repos::seasons::Season;
use crate::repos::{clubs, matches, rounds, seasons, standings};

#[derive(Default)]
pub struct SeasonService;

impl SeasonService {
    pub fn new() -> Self {
        Self
    }

    /// Schedule a double round-robin for every club of the league and
    /// persist it: season, rounds, matches and zeroed standings.
    ///
    /// The season is not installed as current; callers do that once any
    /// season it replaces has been archived.
    pub async fn create_season(
        &self,
        txn: &DatabaseTransaction,
        league_id: i64,
        start_year: i32,
        rng_seed: i64,
        first_kickoff: OffsetDateTime,
        round_spacing: Duration,
    ) -> Result<Season, AppError> {
        let club_ids: Vec<i64> = clubs::find_by_league(txn, league_id)
            .await?
            .into_iter()
            .map(|c| c.id)
            .collect();

        let mut rng = ChaCha8Rng::seed_from_u64(derive_fixture_seed(rng_seed, start_year));
        let plan = fixtures::generate(&club_ids, first_kickoff, round_spacing, &mut rng)?;

        let season = seasons::create_season(txn, league_id, start_year, rng_seed).await?;
        for planned in &plan.rounds {
            let round = rounds::create_round(
                txn,
                season.id,
                planned.round_no,
                planned.is_last,
                planned.scheduled_at,
            )
            .await?;
            for pairing in &planned.matches {
                matches::create_match(
                    txn,
                    MatchCreate {
                        season_id: season.id,
                        round_id: round.id,
                        home_club_id: pairing.home_club_id,
                        away_club_id: pairing.away_club_id,
                        scheduled_at: planned.scheduled_at,
                        last_in_round: pairing.last_in_round,
                    },
                )
                .await?;
            }
        }
        standings::create_rows(txn, season.id, &plan.club_ids).await?;

        info!(
            league_id,
            season_id = season.id,
            season = %season.name,
            clubs = plan.club_ids.len(),
            rounds = plan.rounds.len(),
            matches = plan.match_count(),
            "season scheduled"
        );
        Ok(season)
    }
}
