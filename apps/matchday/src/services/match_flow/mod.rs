//! Match lifecycle: SCHEDULED -> LIVE -> COMPLETED.
//!
//! Resolution computes the authoritative score first and persists it with the
//! LIVE transition. The live replay then runs as a supervised background task
//! and every path out of it (finished, cancelled, failed, panicked) ends in the
//! same finalization, which writes the authoritative score, updates standings
//! and drives round/season progression inside one transaction.

mod finalize;
mod live_phase;
mod recovery;
mod resolve;

use tokio::task::JoinHandle;
use tracing::error;

use super::season_progression::Progression;
use crate::domain::outcome::Score;
use crate::live::sessions::{LiveMatchState, LiveMatchSummary};
use crate::repos::matches::MatchStatus;
use crate::state::app_state::AppState;

pub use recovery::RecoveryReport;

/// Entry point for resolving and finishing matches.
#[derive(Clone)]
pub struct MatchFlowService {
    state: AppState,
}

impl MatchFlowService {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Replays running in this process.
    pub fn live_matches(&self) -> Vec<LiveMatchSummary> {
        self.state.sessions.summaries()
    }

    /// Catch-up state for a late subscriber: the latest snapshot and the
    /// events so far. `None` if the match is not replaying here.
    pub fn live_state(&self, match_id: i64) -> Option<LiveMatchState> {
        self.state.sessions.live_state(match_id)
    }
}

#[derive(Debug)]
pub enum ResolveOutcome {
    /// The match is live; its replay finalizes it in the background
    Live {
        match_id: i64,
        score: Score,
        handle: LiveHandle,
    },
    /// The live phase could not start and the match was finalized directly
    Completed {
        match_id: i64,
        outcome: FinalizeOutcome,
    },
    /// The match was not SCHEDULED; nothing was done
    Skipped { match_id: i64, status: MatchStatus },
}

impl ResolveOutcome {
    pub fn match_id(&self) -> i64 {
        match self {
            ResolveOutcome::Live { match_id, .. }
            | ResolveOutcome::Completed { match_id, .. }
            | ResolveOutcome::Skipped { match_id, .. } => *match_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FinalizeOutcome {
    Finalized {
        match_id: i64,
        score: Score,
        events: usize,
        progression: Progression,
    },
    /// Another path completed the match first
    AlreadyFinal { match_id: i64 },
}

impl FinalizeOutcome {
    pub fn progression(&self) -> Option<&Progression> {
        match self {
            FinalizeOutcome::Finalized { progression, .. } => Some(progression),
            FinalizeOutcome::AlreadyFinal { .. } => None,
        }
    }
}

/// Handle to a match's supervised live phase.
#[derive(Debug)]
pub struct LiveHandle {
    match_id: i64,
    task: JoinHandle<Option<FinalizeOutcome>>,
}

impl LiveHandle {
    pub fn match_id(&self) -> i64 {
        self.match_id
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the match to be finalized. `None` if finalization failed;
    /// the failure has already been logged and the match stays LIVE for
    /// the recovery sweep.
    pub async fn wait(self) -> Option<FinalizeOutcome> {
        match self.task.await {
            Ok(outcome) => outcome,
            Err(err) => {
                error!(match_id = self.match_id, error = %err, "live phase supervisor died");
                None
            }
        }
    }
}
