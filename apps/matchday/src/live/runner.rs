//! The replay task: steps the engine, paces it against the wall clock and
//! streams its output to a [`FeedSink`].

use std::sync::Arc;
use std::time::Duration;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use super::feed::FeedSink;
use crate::config::engine::EngineConfig;
use crate::domain::outcome::Score;
use crate::domain::replay::{ReplayEngine, ReplayOutcome, ReplayTeam, Tick};
use crate::errors::domain::DomainError;

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("replay cancelled")]
    Cancelled,
    #[error("feed sink failed: {0}")]
    Sink(#[from] DomainError),
}

/// Everything a replay needs, owned so it can move into a task.
#[derive(Debug, Clone)]
pub struct ReplayJob {
    pub match_id: i64,
    pub home: ReplayTeam,
    pub away: ReplayTeam,
    pub target: Score,
    pub seed: u64,
}

#[derive(Debug, Clone, Copy)]
pub struct Pacing {
    pub minute_tick: Duration,
    pub half_time_pause: Duration,
    pub snapshot_every: u8,
}

impl From<&EngineConfig> for Pacing {
    fn from(cfg: &EngineConfig) -> Self {
        Self {
            minute_tick: cfg.minute_tick(),
            half_time_pause: cfg.half_time_pause,
            snapshot_every: cfg.snapshot_every,
        }
    }
}

/// Run one replay to the final whistle.
///
/// Returns the engine's final score and narrative. Cancellation is observed
/// between steps; a sink error ends the replay at once.
pub async fn run_replay(
    job: ReplayJob,
    sink: Arc<dyn FeedSink>,
    pacing: Pacing,
    cancel: CancellationToken,
) -> Result<ReplayOutcome, ReplayError> {
    let match_id = job.match_id;
    let mut engine = ReplayEngine::new(
        match_id,
        job.home,
        job.away,
        job.target,
        ChaCha8Rng::seed_from_u64(job.seed),
    );
    debug!(match_id, added_time = ?engine.added_time(), "replay started");
    sink.snapshot(&engine.snapshot()).await?;

    while let Some(step) = engine.step() {
        for event in &step.events {
            trace!(match_id, seq = event.seq, kind = %event.kind, "replay event");
            sink.event(match_id, event).await?;
        }
        if step.snapshot_due(pacing.snapshot_every) {
            sink.snapshot(&engine.snapshot()).await?;
        }

        let pause = match step.tick {
            Tick::Minute => pacing.minute_tick,
            Tick::HalfTime => pacing.half_time_pause,
            Tick::KickOff | Tick::FullTime => Duration::ZERO,
        };
        if pause.is_zero() {
            if cancel.is_cancelled() {
                return Err(ReplayError::Cancelled);
            }
            tokio::task::yield_now().await;
            continue;
        }
        tokio::select! {
            _ = cancel.cancelled() => return Err(ReplayError::Cancelled),
            _ = tokio::time::sleep(pause) => {}
        }
    }

    let outcome = engine.into_outcome();
    debug!(
        match_id,
        home = outcome.score.home,
        away = outcome.score.away,
        events = outcome.events.len(),
        "replay finished"
    );
    Ok(outcome)
}
