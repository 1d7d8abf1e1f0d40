use sea_orm::DatabaseTransaction;
use time::Duration;
use tracing::{debug, info, warn};

use super::resolve::authoritative_outcome;
use super::{FinalizeOutcome, MatchFlowService};
use crate::db::txn::with_txn;
use crate::domain::outcome::Score;
use crate::domain::replay::{MatchEvent, ReplayOutcome};
use crate::domain::stats::MatchStats;
use crate::error::AppError;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::repos::matches::MatchStatus;
use crate::repos::{match_events, matches};
use crate::services::season_progression::SeasonProgressionService;
use crate::services::standings::StandingsService;
use crate::utils::clock;

async fn finalize(
    txn: &DatabaseTransaction,
    match_id: i64,
    events: Vec<MatchEvent>,
    round_spacing: Duration,
) -> Result<FinalizeOutcome, AppError> {
    let fixture = matches::require_match(txn, match_id).await?;
    match fixture.status {
        MatchStatus::Completed => return Ok(FinalizeOutcome::AlreadyFinal { match_id }),
        MatchStatus::Scheduled => {
            return Err(DomainError::validation(
                ValidationKind::InvalidMatchStatus,
                format!("Match {match_id} has not kicked off"),
            )
            .into())
        }
        MatchStatus::Live => {}
    }

    let score = match fixture.sim_score {
        Some(score) => score,
        None => {
            warn!(match_id, "live match without a stored score, recomputing");
            authoritative_outcome(txn, &fixture).await?.score
        }
    };

    let stats = (!events.is_empty())
        .then(|| MatchStats::from_events(fixture.home_club_id, fixture.away_club_id, &events));
    if !matches::complete(txn, match_id, score, stats.as_ref(), clock::now()).await? {
        return Ok(FinalizeOutcome::AlreadyFinal { match_id });
    }
    match_events::append_events(txn, match_id, &events).await?;

    StandingsService::new().update(txn, &fixture, score).await?;
    let progression = SeasonProgressionService::new()
        .on_match_finished(txn, &fixture, round_spacing)
        .await?;

    Ok(FinalizeOutcome::Finalized {
        match_id,
        score,
        events: events.len(),
        progression,
    })
}

impl MatchFlowService {
    /// Finalize a match whose replay ran to the final whistle.
    ///
    /// The replay's narrative is kept only if its tally agrees with the
    /// authoritative score; the score written is the authoritative one either way.
    pub async fn finalize_from_replay(
        &self,
        match_id: i64,
        authoritative: Score,
        replay: ReplayOutcome,
    ) -> Result<FinalizeOutcome, AppError> {
        let events = if replay.score == authoritative {
            replay.events
        } else {
            warn!(
                match_id,
                replay_home = replay.score.home,
                replay_away = replay.score.away,
                home = authoritative.home,
                away = authoritative.away,
                "replay disagreed with authoritative score, dropping narrative"
            );
            Vec::new()
        };
        self.finalize(match_id, events).await
    }

    /// Finalize a LIVE match from its persisted authoritative score.
    pub async fn finalize_from_authoritative(
        &self,
        match_id: i64,
    ) -> Result<FinalizeOutcome, AppError> {
        self.finalize(match_id, Vec::new()).await
    }

    async fn finalize(
        &self,
        match_id: i64,
        events: Vec<MatchEvent>,
    ) -> Result<FinalizeOutcome, AppError> {
        let round_spacing = self.state.engine.round_spacing;
        let outcome = with_txn(&self.state, move |txn| {
            Box::pin(async move { finalize(txn, match_id, events, round_spacing).await })
        })
        .await?;

        match &outcome {
            FinalizeOutcome::Finalized {
                score,
                events,
                progression,
                ..
            } => info!(
                match_id,
                home = score.home,
                away = score.away,
                events,
                ?progression,
                "match completed"
            ),
            FinalizeOutcome::AlreadyFinal { .. } => {
                debug!(match_id, "match already completed")
            }
        }
        Ok(outcome)
    }
}
