//! Periodic trigger that hands due fixtures to the match flow.

use std::time::Duration;

use futures::stream::{self, StreamExt};
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use super::match_flow::{FinalizeOutcome, LiveHandle, MatchFlowService, ResolveOutcome};
use crate::error::AppError;
use crate::repos::matches;
use crate::state::app_state::AppState;
use crate::utils::clock;

/// Fixtures picked up per tick
const DEFAULT_BATCH: u64 = 256;
/// Resolutions in flight at once within a tick
const RESOLVE_CONCURRENCY: usize = 16;

#[derive(Debug, Default)]
pub struct TickReport {
    /// LIVE matches left without a replay, finalized before resolving
    pub recovered: Vec<i64>,
    pub due: usize,
    pub live: Vec<LiveHandle>,
    pub completed: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl TickReport {
    /// Wait for every replay started by this tick to be finalized.
    pub async fn drain(self) -> Vec<FinalizeOutcome> {
        let mut out = Vec::with_capacity(self.live.len());
        for handle in self.live {
            if let Some(outcome) = handle.wait().await {
                out.push(outcome);
            }
        }
        out
    }
}

pub struct RoundScheduler {
    flow: MatchFlowService,
    batch: u64,
}

impl RoundScheduler {
    pub fn new(flow: MatchFlowService) -> Self {
        Self {
            flow,
            batch: DEFAULT_BATCH,
        }
    }

    pub fn with_batch(mut self, batch: u64) -> Self {
        self.batch = batch.max(1);
        self
    }

    /// Finalize orphaned LIVE matches, then resolve every SCHEDULED match
    /// whose kick-off time has passed.
    ///
    /// Safe to run repeatedly: a match another tick already took is skipped.
    pub async fn tick(&self) -> Result<TickReport, AppError> {
        // A match whose finalization failed stays LIVE with no session;
        // its round cannot close until something finalizes it.
        let recovered = match self.flow.recover_interrupted().await {
            Ok(sweep) => sweep.finalized,
            Err(err) => {
                warn!(error = %err, "orphaned match sweep failed");
                Vec::new()
            }
        };

        let due = matches::find_due(&self.flow.state().db, clock::now(), self.batch).await?;
        let mut report = TickReport {
            recovered,
            due: due.len(),
            ..TickReport::default()
        };
        if due.is_empty() {
            return Ok(report);
        }

        let results: Vec<(i64, Result<ResolveOutcome, AppError>)> = stream::iter(due)
            .map(|fixture| {
                let flow = self.flow.clone();
                async move { (fixture.id, flow.resolve(fixture.id).await) }
            })
            .buffer_unordered(RESOLVE_CONCURRENCY)
            .collect()
            .await;

        for (match_id, result) in results {
            match result {
                Ok(ResolveOutcome::Live { handle, .. }) => report.live.push(handle),
                Ok(ResolveOutcome::Completed { .. }) => report.completed += 1,
                Ok(ResolveOutcome::Skipped { .. }) => report.skipped += 1,
                Err(err) => {
                    report.failed += 1;
                    error!(match_id, error = %err, "failed to resolve due match");
                }
            }
        }

        info!(
            recovered = report.recovered.len(),
            due = report.due,
            live = report.live.len(),
            completed = report.completed,
            skipped = report.skipped,
            failed = report.failed,
            "scheduler tick"
        );
        Ok(report)
    }

    /// Tick on the configured interval until `cancel` fires.
    pub async fn run(self, cancel: CancellationToken) {
        let mut ticker = interval(self.flow.state().engine.scheduler_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!(
            every_ms = self.flow.state().engine.scheduler_interval.as_millis() as u64,
            "round scheduler started"
        );

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {
                    match self.tick().await {
                        Ok(report) if report.due == 0 && report.recovered.is_empty() => {
                            debug!("no matches due")
                        }
                        Ok(_) => {}
                        Err(err) => warn!(error = %err, "scheduler tick failed"),
                    }
                }
            }
        }
        info!("round scheduler stopped");
    }

    pub fn spawn(self, cancel: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(self.run(cancel))
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ShutdownReport {
    pub cancelled: usize,
    /// Sessions still open when the drain gave up
    pub remaining: usize,
}

/// Stop the scheduler, then cancel every replay and wait up to `drain` for
/// their supervisors to finalize them.
///
/// Replays are cancelled only after the scheduler task has ended, so a tick
/// that was in flight cannot start a replay the sweep misses.
pub async fn shutdown(
    state: &AppState,
    scheduler: JoinHandle<()>,
    drain: Duration,
) -> ShutdownReport {
    state.shutdown.cancel();
    if let Err(err) = scheduler.await {
        warn!(error = %err, "scheduler task ended abnormally");
    }

    let cancelled = state.sessions.cancel_all();
    let deadline = tokio::time::Instant::now() + drain;
    while !state.sessions.is_empty() && tokio::time::Instant::now() < deadline {
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    let report = ShutdownReport {
        cancelled,
        remaining: state.sessions.len(),
    };
    if report.remaining > 0 {
        warn!(remaining = report.remaining, "replays still running after drain");
    }
    report
}
