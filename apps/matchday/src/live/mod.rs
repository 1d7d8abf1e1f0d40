//! Live layer: per-match feeds, the replay task, and the registry of
//! replays currently running.

pub mod feed;
pub mod protocol;
pub mod runner;
pub mod sessions;

pub use feed::{FeedSink, MatchFeedHub, MatchSubscription};
pub use protocol::FeedMessage;
pub use runner::{run_replay, Pacing, ReplayError, ReplayJob};
pub use sessions::{LiveMatchState, LiveMatchSummary, LiveSessionRegistry, RecordingSink};
