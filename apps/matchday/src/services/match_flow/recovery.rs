use tracing::{info, warn};

use super::{FinalizeOutcome, MatchFlowService, ResolveOutcome};
use crate::error::AppError;
use crate::repos::matches::{self, MatchStatus};

/// Result of a sweep over LIVE matches.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RecoveryReport {
    pub finalized: Vec<i64>,
    /// Matches with a running replay of their own
    pub still_running: Vec<i64>,
}

impl MatchFlowService {
    /// Stop a match now and finalize it from its authoritative score.
    ///
    /// A running replay is cancelled; whichever of its supervisor and this
    /// call completes the match first wins and the other sees it final.
    /// A SCHEDULED match is resolved without a live phase.
    pub async fn force_finish(&self, match_id: i64) -> Result<FinalizeOutcome, AppError> {
        let fixture = matches::require_match(&self.state.db, match_id).await?;
        match fixture.status {
            MatchStatus::Completed => Ok(FinalizeOutcome::AlreadyFinal { match_id }),
            MatchStatus::Scheduled => match self.resolve_without_replay(match_id).await? {
                ResolveOutcome::Completed { outcome, .. } => Ok(outcome),
                _ => Ok(FinalizeOutcome::AlreadyFinal { match_id }),
            },
            MatchStatus::Live => {
                if self.state.sessions.cancel(match_id) {
                    info!(match_id, "live replay cancelled by force finish");
                }
                self.finalize_from_authoritative(match_id).await
            }
        }
    }

    /// Finalize LIVE matches that no replay in this process will finalize:
    /// those left behind by a previous process and those whose supervisor
    /// failed to finalize them. Runs at startup and on every scheduler tick.
    ///
    /// Only matches without a replay registered in this process are touched.
    /// A resolve racing this sweep between going LIVE and registering its
    /// session is settled by the LIVE -> COMPLETED transition; the loser sees
    /// the match already final.
    pub async fn recover_interrupted(&self) -> Result<RecoveryReport, AppError> {
        let live = matches::find_live(&self.state.db).await?;
        let mut report = RecoveryReport::default();

        for fixture in live {
            if self.state.sessions.is_active(fixture.id) {
                report.still_running.push(fixture.id);
                continue;
            }
            match self.finalize_from_authoritative(fixture.id).await {
                Ok(_) => report.finalized.push(fixture.id),
                Err(err) => warn!(match_id = fixture.id, error = %err, "recovery failed for match"),
            }
        }

        if !report.finalized.is_empty() {
            info!(
                finalized = report.finalized.len(),
                still_running = report.still_running.len(),
                "interrupted matches recovered"
            );
        }
        Ok(report)
    }
}
