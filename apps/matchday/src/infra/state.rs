use std::sync::Arc;

use crate::config::db::DbProfile;
use crate::config::engine::EngineConfig;
use crate::error::AppError;
use crate::infra::db::bootstrap_db;
use crate::live::feed::FeedSink;
use crate::state::app_state::AppState;

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    engine: EngineConfig,
    db_profile: DbProfile,
    sink: Option<Arc<dyn FeedSink>>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            engine: EngineConfig::default(),
            db_profile: DbProfile::Test,
            sink: None,
        }
    }

    pub fn with_db(mut self, profile: DbProfile) -> Self {
        self.db_profile = profile;
        self
    }

    pub fn with_engine(mut self, engine: EngineConfig) -> Self {
        self.engine = engine;
        self
    }

    /// Route replay output somewhere other than the feed hub.
    pub fn with_feed_sink(mut self, sink: Arc<dyn FeedSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        // single entrypoint: connect + migrate
        let conn = bootstrap_db(self.db_profile).await?;
        let state = AppState::new(conn, self.engine);
        Ok(match self.sink {
            Some(sink) => state.with_sink(sink),
            None => state,
        })
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
