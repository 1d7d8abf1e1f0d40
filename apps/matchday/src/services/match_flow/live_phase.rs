use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use super::resolve::PreparedMatch;
use super::{LiveHandle, MatchFlowService};
use crate::live::feed::FeedSink;
use crate::live::runner::{run_replay, Pacing, ReplayError};
use crate::live::sessions::RecordingSink;

impl MatchFlowService {
    /// Spawn the replay plus a supervisor that always finalizes the match.
    ///
    /// The replay runs in its own task so a panic surfaces as a `JoinError`
    /// here instead of taking the supervisor down with it.
    pub(super) fn spawn_live_phase(
        &self,
        prepared: PreparedMatch,
        cancel: CancellationToken,
    ) -> LiveHandle {
        let match_id = prepared.fixture.id;
        let authoritative = prepared.job.target;
        let sink: Arc<dyn FeedSink> = Arc::new(RecordingSink::new(
            self.state.sink.clone(),
            self.state.sessions.clone(),
        ));
        let pacing = Pacing::from(&self.state.engine);
        // Open before spawning so a caller subscribing right after resolve
        // sees the whole replay.
        sink.open(match_id);
        let worker = tokio::spawn(run_replay(prepared.job, sink.clone(), pacing, cancel));

        let flow = self.clone();
        let task = tokio::spawn(async move {
            let result = match worker.await {
                Ok(Ok(replay)) => flow.finalize_from_replay(match_id, authoritative, replay).await,
                Ok(Err(ReplayError::Cancelled)) => {
                    info!(match_id, "replay cancelled, finalizing from authoritative score");
                    flow.finalize_from_authoritative(match_id).await
                }
                Ok(Err(ReplayError::Sink(err))) => {
                    warn!(match_id, error = %err, "replay aborted, finalizing from authoritative score");
                    flow.finalize_from_authoritative(match_id).await
                }
                Err(join_err) => {
                    error!(match_id, error = %join_err, "replay task failed, finalizing from authoritative score");
                    flow.finalize_from_authoritative(match_id).await
                }
            };

            flow.state.sessions.release(match_id);
            sink.close(match_id).await;

            match result {
                Ok(outcome) => Some(outcome),
                Err(err) => {
                    error!(match_id, error = %err, "match finalization failed");
                    None
                }
            }
        });

        LiveHandle { match_id, task }
    }
}
