//! Per-match publish/subscribe topics.
//!
//! Each match gets two bounded broadcast channels: periodic snapshots and
//! discrete events. Publishing never waits on subscribers; a slow receiver
//! lags and skips ahead instead of holding the replay back.
//!
//! Topics exist only between a replay's `open` and `close`. Subscribing to
//! any other match yields a subscription that ends immediately.

use async_trait::async_trait;
use dashmap::DashMap;
use futures::Stream;
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;
use tracing::{debug, warn};

use super::protocol::FeedMessage;
use crate::domain::replay::{LiveSnapshot, MatchEvent};
use crate::errors::domain::DomainError;

/// Destination for a running replay's output.
///
/// [`MatchFeedHub`] is the production sink. An error returned here aborts the
/// replay and the match is finalized from its authoritative score instead.
#[async_trait]
pub trait FeedSink: Send + Sync {
    /// Called before the replay publishes anything.
    fn open(&self, _match_id: i64) {}

    async fn snapshot(&self, snapshot: &LiveSnapshot) -> Result<(), DomainError>;

    async fn event(&self, match_id: i64, event: &MatchEvent) -> Result<(), DomainError>;

    /// Called once the match is finalized, whichever path finalized it.
    async fn close(&self, _match_id: i64) {}
}

struct MatchChannels {
    snapshots: broadcast::Sender<LiveSnapshot>,
    events: broadcast::Sender<MatchEvent>,
}

pub struct MatchFeedHub {
    channels: DashMap<i64, MatchChannels>,
    capacity: usize,
}

/// Receivers for one match. Both end once the feed is closed.
pub struct MatchSubscription {
    pub match_id: i64,
    pub snapshots: broadcast::Receiver<LiveSnapshot>,
    pub events: broadcast::Receiver<MatchEvent>,
}

impl MatchSubscription {
    /// Merge both receivers into one stream of [`FeedMessage`]s. Lagged
    /// receivers drop the overwritten messages and carry on.
    pub fn into_stream(self) -> impl Stream<Item = FeedMessage> + Send + 'static {
        let match_id = self.match_id;
        let snapshots = BroadcastStream::new(self.snapshots).filter_map(move |item| match item {
            Ok(snapshot) => Some(FeedMessage::Snapshot(snapshot)),
            Err(err) => {
                warn!(match_id, error = %err, "snapshot subscriber lagged");
                None
            }
        });
        let events = BroadcastStream::new(self.events).filter_map(move |item| match item {
            Ok(event) => Some(FeedMessage::Event { match_id, event }),
            Err(err) => {
                warn!(match_id, error = %err, "event subscriber lagged");
                None
            }
        });
        snapshots.merge(events)
    }
}

impl MatchFeedHub {
    pub fn new(capacity: usize) -> Self {
        Self {
            channels: DashMap::new(),
            capacity: capacity.max(1),
        }
    }

    /// Create the topic for a match about to replay. Reopening keeps the
    /// existing channels and their subscribers.
    pub fn open(&self, match_id: i64) {
        self.channels.entry(match_id).or_insert_with(|| {
            let (snapshots, _) = broadcast::channel(self.capacity);
            let (events, _) = broadcast::channel(self.capacity);
            MatchChannels { snapshots, events }
        });
        debug!(match_id, "match feed opened");
    }

    pub fn is_open(&self, match_id: i64) -> bool {
        self.channels.contains_key(&match_id)
    }

    /// Subscribe to a match's feed. Without an open topic (the match is not
    /// replaying, has finished, or does not exist) the subscription is
    /// already closed and never creates one.
    pub fn subscribe(&self, match_id: i64) -> MatchSubscription {
        if let Some(ch) = self.channels.get(&match_id) {
            return MatchSubscription {
                match_id,
                snapshots: ch.snapshots.subscribe(),
                events: ch.events.subscribe(),
            };
        }
        let (snapshots, snapshots_rx) = broadcast::channel(1);
        let (events, events_rx) = broadcast::channel(1);
        drop((snapshots, events));
        MatchSubscription {
            match_id,
            snapshots: snapshots_rx,
            events: events_rx,
        }
    }

    /// Returns how many subscribers received the snapshot.
    pub fn publish_snapshot(&self, snapshot: LiveSnapshot) -> usize {
        match self.channels.get(&snapshot.match_id) {
            Some(ch) => ch.snapshots.send(snapshot).unwrap_or(0),
            None => 0,
        }
    }

    /// Returns how many subscribers received the event.
    pub fn publish_event(&self, match_id: i64, event: MatchEvent) -> usize {
        match self.channels.get(&match_id) {
            Some(ch) => ch.events.send(event).unwrap_or(0),
            None => 0,
        }
    }

    /// Drop the topic; subscribers drain what is buffered and then end.
    pub fn close(&self, match_id: i64) {
        if self.channels.remove(&match_id).is_some() {
            debug!(match_id, "match feed closed");
        }
    }

    pub fn subscriber_count(&self, match_id: i64) -> usize {
        self.channels
            .get(&match_id)
            .map(|ch| ch.snapshots.receiver_count().max(ch.events.receiver_count()))
            .unwrap_or(0)
    }

    pub fn open_feeds(&self) -> usize {
        self.channels.len()
    }
}

#[async_trait]
impl FeedSink for MatchFeedHub {
    fn open(&self, match_id: i64) {
        MatchFeedHub::open(self, match_id);
    }

    async fn snapshot(&self, snapshot: &LiveSnapshot) -> Result<(), DomainError> {
        self.publish_snapshot(snapshot.clone());
        Ok(())
    }

    async fn event(&self, match_id: i64, event: &MatchEvent) -> Result<(), DomainError> {
        self.publish_event(match_id, event.clone());
        Ok(())
    }

    async fn close(&self, match_id: i64) {
        MatchFeedHub::close(self, match_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::events::MatchEventKind;
    use crate::domain::replay::Phase;

    fn snapshot(match_id: i64, minute: u8) -> LiveSnapshot {
        LiveSnapshot {
            match_id,
            phase: Phase::FirstHalf,
            minute,
            stoppage: 0,
            home_score: 0,
            away_score: 0,
            intensity: 0.0,
            event_count: 0,
            added_time: 1,
        }
    }

    fn event(seq: i32) -> MatchEvent {
        MatchEvent {
            seq,
            minute: 1,
            stoppage: 0,
            kind: MatchEventKind::Foul,
            club_id: Some(1),
            player_id: None,
            description: "Foul".into(),
            home_score: 0,
            away_score: 0,
        }
    }

    #[test]
    fn publish_without_subscribers_is_a_no_op() {
        let hub = MatchFeedHub::new(8);
        assert_eq!(hub.publish_snapshot(snapshot(1, 5)), 0);
        assert_eq!(hub.publish_event(1, event(1)), 0);
        assert_eq!(hub.open_feeds(), 0);
    }

    #[tokio::test]
    async fn subscribers_receive_in_order_per_channel() {
        let hub = MatchFeedHub::new(8);
        hub.open(4);
        let mut sub = hub.subscribe(4);
        assert_eq!(hub.subscriber_count(4), 1);

        hub.publish_event(4, event(1));
        hub.publish_event(4, event(2));
        hub.publish_snapshot(snapshot(4, 5));

        assert_eq!(sub.events.recv().await.unwrap().seq, 1);
        assert_eq!(sub.events.recv().await.unwrap().seq, 2);
        assert_eq!(sub.snapshots.recv().await.unwrap().minute, 5);
    }

    #[tokio::test]
    async fn feeds_are_isolated_per_match() {
        let hub = MatchFeedHub::new(8);
        hub.open(1);
        hub.open(2);
        let mut a = hub.subscribe(1);
        let _b = hub.subscribe(2);
        hub.publish_event(2, event(1));
        assert!(a.events.try_recv().is_err());
    }

    #[tokio::test]
    async fn stream_ends_after_close() {
        let hub = MatchFeedHub::new(8);
        hub.open(5);
        let stream = hub.subscribe(5).into_stream();
        hub.publish_snapshot(snapshot(5, 0));
        hub.publish_event(5, event(1));
        hub.close(5);

        let messages: Vec<FeedMessage> = stream.collect().await;
        assert_eq!(messages.len(), 2);
        assert!(messages.iter().all(|m| m.match_id() == 5));
    }

    #[tokio::test]
    async fn subscribing_without_a_topic_ends_at_once() {
        let hub = MatchFeedHub::new(8);
        let messages: Vec<FeedMessage> = hub.subscribe(42).into_stream().collect().await;
        assert!(messages.is_empty());
        assert_eq!(hub.open_feeds(), 0);
        assert!(!hub.is_open(42));
    }

    #[tokio::test]
    async fn reopening_keeps_subscribers() {
        let hub = MatchFeedHub::new(8);
        hub.open(3);
        let mut sub = hub.subscribe(3);
        hub.open(3);
        hub.publish_event(3, event(1));
        assert_eq!(sub.events.recv().await.unwrap().seq, 1);
        assert_eq!(hub.open_feeds(), 1);
    }

    #[tokio::test]
    async fn lagging_subscriber_does_not_block_publisher() {
        let hub = MatchFeedHub::new(2);
        hub.open(6);
        let mut sub = hub.subscribe(6);
        for seq in 1..=10 {
            hub.publish_event(6, event(seq));
        }
        assert!(matches!(
            sub.events.recv().await,
            Err(broadcast::error::RecvError::Lagged(_))
        ));
        assert_eq!(sub.events.recv().await.unwrap().seq, 9);
    }
}
