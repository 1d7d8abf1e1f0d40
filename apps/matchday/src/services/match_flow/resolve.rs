use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use sea_orm::DatabaseTransaction;
use tracing::{debug, info, warn};

use super::{MatchFlowService, ResolveOutcome};
use crate::db::txn::with_txn;
use crate::domain::outcome::{self, Outcome};
use crate::domain::replay::ReplayTeam;
use crate::domain::squad::SquadPlayer;
use crate::domain::seed_derivation::{derive_outcome_seed, derive_replay_seed};
use crate::error::AppError;
use crate::live::runner::ReplayJob;
use crate::repos::matches::{Match, MatchStatus};
use crate::repos::{clubs, matches, players, seasons};
use crate::utils::clock;

/// A match that has just gone LIVE, with everything its replay needs.
pub(super) struct PreparedMatch {
    pub fixture: Match,
    pub job: ReplayJob,
}

enum Prepared {
    Live(Box<PreparedMatch>),
    Skipped(MatchStatus),
}

/// Run the authoritative simulation for a fixture.
///
/// Deterministic per (season seed, match id), so a recomputation after a
/// crash reproduces the score that was persisted when the match went live.
fn simulate_fixture(
    season_seed: i64,
    match_id: i64,
    home: &[SquadPlayer],
    away: &[SquadPlayer],
) -> Result<Outcome, AppError> {
    let mut rng = ChaCha8Rng::seed_from_u64(derive_outcome_seed(season_seed, match_id));
    Ok(outcome::simulate(home, away, &mut rng)?)
}

pub(super) async fn authoritative_outcome(
    txn: &DatabaseTransaction,
    fixture: &Match,
) -> Result<Outcome, AppError> {
    let season = seasons::require_season(txn, fixture.season_id).await?;
    let home = players::load_squad(txn, fixture.home_club_id).await?;
    let away = players::load_squad(txn, fixture.away_club_id).await?;
    simulate_fixture(season.rng_seed, fixture.id, &home, &away)
}

async fn prepare(txn: &DatabaseTransaction, match_id: i64) -> Result<Prepared, AppError> {
    let fixture = matches::require_match(txn, match_id).await?;
    if fixture.status != MatchStatus::Scheduled {
        return Ok(Prepared::Skipped(fixture.status));
    }

    let season = seasons::require_season(txn, fixture.season_id).await?;
    let home_club = clubs::require_club(txn, fixture.home_club_id).await?;
    let away_club = clubs::require_club(txn, fixture.away_club_id).await?;
    let home_squad = players::load_squad(txn, home_club.id).await?;
    let away_squad = players::load_squad(txn, away_club.id).await?;

    let outcome = simulate_fixture(season.rng_seed, match_id, &home_squad, &away_squad)?;
    let score = outcome.score;
    let home = ReplayTeam::from_squad(home_club.id, home_club.name, &home_squad, outcome.home_module)?;
    let away = ReplayTeam::from_squad(away_club.id, away_club.name, &away_squad, outcome.away_module)?;

    if !matches::go_live(txn, match_id, score, clock::now()).await? {
        let current = matches::require_match(txn, match_id).await?;
        return Ok(Prepared::Skipped(current.status));
    }
    let fixture = matches::require_match(txn, match_id).await?;

    debug!(
        match_id,
        home = score.home,
        away = score.away,
        actions = outcome.actions,
        "authoritative score computed"
    );
    Ok(Prepared::Live(Box::new(PreparedMatch {
        job: ReplayJob {
            match_id,
            home,
            away,
            target: score,
            seed: derive_replay_seed(season.rng_seed, match_id),
        },
        fixture,
    })))
}

impl MatchFlowService {
    /// Resolve a SCHEDULED match.
    ///
    /// Returns once the match is LIVE and its replay is running in the
    /// background. If no live session can be started the match is finalized
    /// straight from its authoritative score. Any other status is a no-op.
    pub async fn resolve(&self, match_id: i64) -> Result<ResolveOutcome, AppError> {
        let prepared = match self.go_live(match_id).await? {
            Prepared::Live(prepared) => *prepared,
            Prepared::Skipped(status) => {
                debug!(match_id, ?status, "resolve skipped, match not scheduled");
                return Ok(ResolveOutcome::Skipped { match_id, status });
            }
        };
        let score = prepared.job.target;

        match self.state.sessions.try_register(match_id) {
            Ok(cancel) => {
                info!(
                    match_id,
                    round_id = prepared.fixture.round_id,
                    "match live"
                );
                let handle = self.spawn_live_phase(prepared, cancel);
                Ok(ResolveOutcome::Live {
                    match_id,
                    score,
                    handle,
                })
            }
            Err(err) => {
                warn!(match_id, error = %err, "live phase unavailable, finalizing directly");
                let outcome = self.finalize_from_authoritative(match_id).await?;
                self.state.sink.close(match_id).await;
                Ok(ResolveOutcome::Completed { match_id, outcome })
            }
        }
    }

    async fn go_live(&self, match_id: i64) -> Result<Prepared, AppError> {
        with_txn(&self.state, move |txn| Box::pin(async move { prepare(txn, match_id).await })).await
    }

    /// Take a SCHEDULED match straight to COMPLETED without a replay.
    pub(super) async fn resolve_without_replay(
        &self,
        match_id: i64,
    ) -> Result<ResolveOutcome, AppError> {
        match self.go_live(match_id).await? {
            Prepared::Live(_) => {
                let outcome = self.finalize_from_authoritative(match_id).await?;
                Ok(ResolveOutcome::Completed { match_id, outcome })
            }
            Prepared::Skipped(status) => Ok(ResolveOutcome::Skipped { match_id, status }),
        }
    }
}
