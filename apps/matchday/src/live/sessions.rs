//! Registry of replays currently running, one per match.
//!
//! Each session also keeps what its replay has published so far, so a
//! subscriber joining mid-match can catch up before following the feed.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::feed::FeedSink;
use crate::domain::replay::{LiveSnapshot, MatchEvent};
use crate::errors::domain::{ConflictKind, DomainError};

struct SessionHandle {
    cancel: CancellationToken,
    started_at: Instant,
    latest: Option<LiveSnapshot>,
    events: Vec<MatchEvent>,
}

/// One running replay, for listings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LiveMatchSummary {
    pub match_id: i64,
    pub elapsed_ms: u64,
    /// `None` until the replay publishes its first snapshot
    pub snapshot: Option<LiveSnapshot>,
}

/// Catch-up view of a running replay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LiveMatchState {
    pub match_id: i64,
    pub snapshot: Option<LiveSnapshot>,
    pub events: Vec<MatchEvent>,
}

pub struct LiveSessionRegistry {
    sessions: DashMap<i64, SessionHandle>,
    active: AtomicUsize,
    max_sessions: usize,
}

impl LiveSessionRegistry {
    pub fn new(max_sessions: usize) -> Self {
        Self {
            sessions: DashMap::new(),
            active: AtomicUsize::new(0),
            max_sessions,
        }
    }

    /// Claim the live slot for `match_id`. The returned token is cancelled by
    /// [`cancel`](Self::cancel) or [`cancel_all`](Self::cancel_all).
    pub fn try_register(&self, match_id: i64) -> Result<CancellationToken, DomainError> {
        let previous = self.active.fetch_add(1, Ordering::AcqRel);
        if previous >= self.max_sessions {
            self.active.fetch_sub(1, Ordering::AcqRel);
            return Err(DomainError::conflict(
                ConflictKind::SessionCapacity,
                format!("Live session limit of {} reached", self.max_sessions),
            ));
        }

        match self.sessions.entry(match_id) {
            Entry::Occupied(_) => {
                self.active.fetch_sub(1, Ordering::AcqRel);
                Err(DomainError::conflict(
                    ConflictKind::SessionActive,
                    format!("Match {match_id} already has a live session"),
                ))
            }
            Entry::Vacant(slot) => {
                let cancel = CancellationToken::new();
                slot.insert(SessionHandle {
                    cancel: cancel.clone(),
                    started_at: Instant::now(),
                    latest: None,
                    events: Vec::new(),
                });
                debug!(match_id, "live session registered");
                Ok(cancel)
            }
        }
    }

    pub fn release(&self, match_id: i64) {
        if let Some((_, handle)) = self.sessions.remove(&match_id) {
            self.active.fetch_sub(1, Ordering::AcqRel);
            debug!(
                match_id,
                elapsed_ms = handle.started_at.elapsed().as_millis() as u64,
                "live session released"
            );
        }
    }

    /// Ask a running replay to stop. Returns `false` if none was running.
    pub fn cancel(&self, match_id: i64) -> bool {
        match self.sessions.get(&match_id) {
            Some(handle) => {
                handle.cancel.cancel();
                true
            }
            None => false,
        }
    }

    pub fn cancel_all(&self) -> usize {
        let mut cancelled = 0;
        for handle in self.sessions.iter() {
            handle.cancel.cancel();
            cancelled += 1;
        }
        cancelled
    }

    pub fn record_snapshot(&self, snapshot: &LiveSnapshot) {
        if let Some(mut handle) = self.sessions.get_mut(&snapshot.match_id) {
            handle.latest = Some(snapshot.clone());
        }
    }

    pub fn record_event(&self, match_id: i64, event: &MatchEvent) {
        if let Some(mut handle) = self.sessions.get_mut(&match_id) {
            handle.events.push(event.clone());
        }
    }

    /// Latest snapshot and every event so far; `None` once the session ends.
    pub fn live_state(&self, match_id: i64) -> Option<LiveMatchState> {
        self.sessions.get(&match_id).map(|handle| LiveMatchState {
            match_id,
            snapshot: handle.latest.clone(),
            events: handle.events.clone(),
        })
    }

    /// Every running replay, ordered by match id.
    pub fn summaries(&self) -> Vec<LiveMatchSummary> {
        let mut out: Vec<LiveMatchSummary> = self
            .sessions
            .iter()
            .map(|entry| LiveMatchSummary {
                match_id: *entry.key(),
                elapsed_ms: entry.started_at.elapsed().as_millis() as u64,
                snapshot: entry.latest.clone(),
            })
            .collect();
        out.sort_by_key(|summary| summary.match_id);
        out
    }

    pub fn is_active(&self, match_id: i64) -> bool {
        self.sessions.contains_key(&match_id)
    }

    pub fn len(&self) -> usize {
        self.active.load(Ordering::Acquire)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Forwards replay output to another sink and keeps the session's catch-up
/// state current on the way through.
pub struct RecordingSink {
    inner: Arc<dyn FeedSink>,
    sessions: Arc<LiveSessionRegistry>,
}

impl RecordingSink {
    pub fn new(inner: Arc<dyn FeedSink>, sessions: Arc<LiveSessionRegistry>) -> Self {
        Self { inner, sessions }
    }
}

#[async_trait]
impl FeedSink for RecordingSink {
    fn open(&self, match_id: i64) {
        self.inner.open(match_id);
    }

    async fn snapshot(&self, snapshot: &LiveSnapshot) -> Result<(), DomainError> {
        self.sessions.record_snapshot(snapshot);
        self.inner.snapshot(snapshot).await
    }

    async fn event(&self, match_id: i64, event: &MatchEvent) -> Result<(), DomainError> {
        self.sessions.record_event(match_id, event);
        self.inner.event(match_id, event).await
    }

    async fn close(&self, match_id: i64) {
        self.inner.close(match_id).await;
    }
}
