use matchday::repos::matches::Match;
use matchday::repos::{matches, rounds};
use matchday::services::{
    FinalizeOutcome, LeagueService, LeagueSetup, MatchFlowService, NewClub, NewLeague,
    ResolveOutcome,
};
use matchday::state::app_state::AppState;
use matchday::utils::clock;
use matchday::AppError;
use matchday_test_support::unique_helpers::{unique_club_names, unique_str};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub const TEST_START_YEAR: i32 = 2026;
pub const TEST_SEASON_SEED: i64 = 4_242;

pub struct TestLeague {
    pub setup: LeagueSetup,
}

impl TestLeague {
    pub fn league_id(&self) -> i64 {
        self.setup.league.id
    }

    pub fn season_id(&self) -> i64 {
        self.setup.season.id
    }
}

/// League of `clubs` generated clubs whose first round kicks off a minute ago.
pub async fn create_test_league(state: &AppState, clubs: usize) -> Result<TestLeague, AppError> {
    let mut rng = ChaCha8Rng::seed_from_u64(clubs as u64);
    let clubs = unique_club_names("FC", clubs)
        .into_iter()
        .map(|name| NewClub::generated(name, &mut rng))
        .collect();

    let setup = LeagueService::new(state.clone())
        .create_league(NewLeague {
            name: unique_str("league"),
            country: "Testland".to_string(),
            start_year: TEST_START_YEAR,
            clubs,
            first_kickoff: clock::now() - time::Duration::minutes(1),
            rng_seed: Some(TEST_SEASON_SEED),
        })
        .await?;
    Ok(TestLeague { setup })
}

pub async fn round_matches(
    state: &AppState,
    season_id: i64,
    round_no: i16,
) -> Result<Vec<Match>, AppError> {
    let round = rounds::find_by_season_and_round(&state.db, season_id, round_no)
        .await?
        .ok_or_else(|| AppError::not_found("ROUND_NOT_FOUND", format!("round {round_no}")))?;
    Ok(matches::find_by_round(&state.db, round.id).await?)
}

/// Resolve every match of a round and wait for all of them to finalize.
pub async fn play_round(
    flow: &MatchFlowService,
    season_id: i64,
    round_no: i16,
) -> Result<Vec<FinalizeOutcome>, AppError> {
    let fixtures = round_matches(flow.state(), season_id, round_no).await?;
    let mut handles = Vec::new();
    let mut outcomes = Vec::new();
    for fixture in fixtures {
        match flow.resolve(fixture.id).await? {
            ResolveOutcome::Live { handle, .. } => handles.push(handle),
            ResolveOutcome::Completed { outcome, .. } => outcomes.push(outcome),
            ResolveOutcome::Skipped { .. } => {}
        }
    }
    for handle in handles {
        let outcome = handle
            .wait()
            .await
            .ok_or_else(|| AppError::internal("live phase did not finalize"))?;
        outcomes.push(outcome);
    }
    Ok(outcomes)
}
