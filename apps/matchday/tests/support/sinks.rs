//! Feed sinks that misbehave on purpose.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use matchday::domain::replay::{LiveSnapshot, MatchEvent};
use matchday::errors::domain::{DomainError, InfraErrorKind};
use matchday::live::FeedSink;

/// Fails every call after the first `ok_calls`.
pub struct FailingSink {
    calls: AtomicUsize,
    ok_calls: usize,
}

impl FailingSink {
    pub fn after(ok_calls: usize) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            ok_calls,
        }
    }

    fn check(&self) -> Result<(), DomainError> {
        if self.calls.fetch_add(1, Ordering::SeqCst) >= self.ok_calls {
            return Err(DomainError::infra(
                InfraErrorKind::Other("FEED_DOWN".into()),
                "feed unavailable",
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl FeedSink for FailingSink {
    async fn snapshot(&self, _snapshot: &LiveSnapshot) -> Result<(), DomainError> {
        self.check()
    }

    async fn event(&self, _match_id: i64, _event: &MatchEvent) -> Result<(), DomainError> {
        self.check()
    }
}

/// Panics on the first event.
pub struct PanickingSink;

#[async_trait]
impl FeedSink for PanickingSink {
    async fn snapshot(&self, _snapshot: &LiveSnapshot) -> Result<(), DomainError> {
        Ok(())
    }

    async fn event(&self, match_id: i64, _event: &MatchEvent) -> Result<(), DomainError> {
        panic!("sink exploded on match {match_id}");
    }
}

/// Counts closes so tests can check every path releases the feed.
#[derive(Default)]
pub struct CountingSink {
    pub closed: AtomicUsize,
    pub events: AtomicUsize,
}

#[async_trait]
impl FeedSink for CountingSink {
    async fn snapshot(&self, _snapshot: &LiveSnapshot) -> Result<(), DomainError> {
        Ok(())
    }

    async fn event(&self, _match_id: i64, _event: &MatchEvent) -> Result<(), DomainError> {
        self.events.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn close(&self, _match_id: i64) {
        self.closed.fetch_add(1, Ordering::SeqCst);
    }
}
