//! Round cursor and season rollover, driven by match completions.

use sea_orm::DatabaseTransaction;
use time::Duration;
use tracing::{debug, info};

use super::seasons::SeasonService;
use crate::error::AppError;
use crate::errors::domain::{DomainError, InfraErrorKind};
use crate::repos::matches::Match;
use crate::repos::{matches, rounds, seasons};
use crate::utils::clock;

/// What a completion did to its round and season.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progression {
    /// Other matches of the round are still open
    RoundInProgress { round_no: i16, remaining: u64 },
    /// The round was already closed by another completion
    AlreadyAdvanced { round_no: i16 },
    RoundAdvanced { round_no: i16, next_round_no: i16 },
    /// The final round closed; the season was archived and replaced
    SeasonRolledOver {
        archived_season_id: i64,
        next_season_id: i64,
    },
}

#[derive(Default)]
pub struct SeasonProgressionService;

impl SeasonProgressionService {
    pub fn new() -> Self {
        Self
    }

    /// Called once per finished match, inside the transaction that completed
    /// it.
    ///
    /// The season row is locked before the round is inspected, so concurrent
    /// completions in the same round take turns: only the one that sees zero
    /// open matches moves the cursor, and the conditional cursor update keeps
    /// that to a single step even if two of them do.
    pub async fn on_match_finished(
        &self,
        txn: &DatabaseTransaction,
        fixture: &Match,
        round_spacing: Duration,
    ) -> Result<Progression, AppError> {
        let season = seasons::lock_season(txn, fixture.season_id).await?;
        let round = rounds::require_round(txn, fixture.round_id).await?;

        let remaining = matches::count_unfinished_in_round(txn, round.id).await?;
        if remaining > 0 {
            debug!(
                match_id = fixture.id,
                round_no = round.round_no,
                remaining,
                "round still in progress"
            );
            return Ok(Progression::RoundInProgress {
                round_no: round.round_no,
                remaining,
            });
        }

        // Whichever match finished last, the round's marked pairing must be
        // among the finished ones.
        match matches::find_round_sentinel(txn, round.id).await? {
            Some(sentinel) if sentinel.finished => {}
            _ => {
                return Err(DomainError::infra(
                    InfraErrorKind::DataCorruption,
                    format!(
                        "Round {} of season {} has no finished last-match marker",
                        round.round_no, season.id
                    ),
                )
                .into())
            }
        }

        let now = clock::now();
        rounds::mark_completed(txn, round.id, now).await?;
        if !seasons::advance_cursor(txn, season.id, round.round_no).await? {
            debug!(season_id = season.id, round_no = round.round_no, "cursor already past round");
            return Ok(Progression::AlreadyAdvanced {
                round_no: round.round_no,
            });
        }
        info!(
            season_id = season.id,
            round_no = round.round_no,
            next_round_no = round.round_no + 1,
            "round completed"
        );

        if !round.is_last {
            return Ok(Progression::RoundAdvanced {
                round_no: round.round_no,
                next_round_no: round.round_no + 1,
            });
        }

        seasons::archive(txn, season.id, now).await?;
        let next = SeasonService::new()
            .create_season(
                txn,
                season.league_id,
                season.start_year + 1,
                rand::random::<i64>(),
                now + round_spacing,
                round_spacing,
            )
            .await?;
        seasons::install_current(txn, next.id).await?;
        info!(
            league_id = season.league_id,
            archived_season_id = season.id,
            next_season_id = next.id,
            season = %next.name,
            "season rolled over"
        );

        Ok(Progression::SeasonRolledOver {
            archived_season_id: season.id,
            next_season_id: next.id,
        })
    }
}
