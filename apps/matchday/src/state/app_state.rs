use std::sync::Arc;

use sea_orm::DatabaseConnection;
use tokio_util::sync::CancellationToken;

use crate::config::engine::EngineConfig;
use crate::live::feed::{FeedSink, MatchFeedHub};
use crate::live::sessions::LiveSessionRegistry;

/// Shared handles for services and background tasks. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub engine: EngineConfig,
    /// Subscription side of the live feeds
    pub feeds: Arc<MatchFeedHub>,
    /// Where running replays publish; the feed hub unless overridden
    pub sink: Arc<dyn FeedSink>,
    pub sessions: Arc<LiveSessionRegistry>,
    /// Cancelled on process shutdown
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(db: DatabaseConnection, engine: EngineConfig) -> Self {
        let feeds = Arc::new(MatchFeedHub::new(engine.feed_capacity));
        let sessions = Arc::new(LiveSessionRegistry::new(engine.max_live_sessions));
        Self {
            db,
            engine,
            sink: feeds.clone(),
            feeds,
            sessions,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_sink(mut self, sink: Arc<dyn FeedSink>) -> Self {
        self.sink = sink;
        self
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("engine", &self.engine)
            .field("open_feeds", &self.feeds.open_feeds())
            .field("live_sessions", &self.sessions.len())
            .finish_non_exhaustive()
    }
}
