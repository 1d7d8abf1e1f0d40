//! Orchestration over transactions: match resolution, standings, round and
//! season progression, league setup and the periodic scheduler.

pub mod league;
pub mod match_flow;
pub mod scheduler;
pub mod season_progression;
pub mod seasons;
pub mod standings;

pub use league::{LeagueService, LeagueSetup, NewClub, NewLeague, RoundFixtures};
pub use match_flow::{
    FinalizeOutcome, LiveHandle, MatchFlowService, RecoveryReport, ResolveOutcome,
};
pub use scheduler::{shutdown, RoundScheduler, ShutdownReport, TickReport};
pub use season_progression::{Progression, SeasonProgressionService};
pub use seasons::SeasonService;
pub use standings::StandingsService;
