#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod config;
pub mod db;
pub mod domain;
pub mod entities;
pub mod error;
pub mod errors;
pub mod infra;
pub mod live;
pub mod repos;
pub mod services;
pub mod state;
pub mod utils;

#[cfg(test)]
pub mod test_bootstrap;

// Re-exports for public API
pub use config::db::{db_url, DbProfile};
pub use config::engine::EngineConfig;
pub use db::txn::with_txn;
pub use error::AppError;
pub use errors::domain::DomainError;
pub use infra::db::connect_db;
pub use infra::state::build_state;
pub use live::{FeedMessage, FeedSink, MatchFeedHub, MatchSubscription};
pub use services::{LeagueService, MatchFlowService, RoundScheduler};
pub use state::app_state::AppState;

// Prelude for test convenience
pub mod prelude {
    pub use super::config::db::*;
    pub use super::config::engine::*;
    pub use super::error::*;
    pub use super::infra::state::*;
    pub use super::services::*;
    pub use super::state::app_state::*;
}

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
