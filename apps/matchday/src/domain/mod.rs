//! Domain layer: pure competition logic, no I/O.

pub mod events;
pub mod fixtures;
pub mod formation;
pub mod outcome;
pub mod replay;
pub mod seed_derivation;
pub mod squad;
pub mod standings;
pub mod stats;

// Re-exports for ergonomics
pub use events::{MatchEventKind, Severity};
pub use fixtures::{generate as generate_fixtures, PlannedMatch, PlannedRound, SeasonPlan};
pub use formation::{Formation, Module, Zone};
pub use outcome::{simulate as simulate_outcome, Outcome, Score, Side};
pub use replay::{
    LiveSnapshot, MatchEvent, Phase, ReplayEngine, ReplayOutcome, ReplayPlayer, ReplayTeam, Step,
    Tick,
};
pub use seed_derivation::{derive_fixture_seed, derive_outcome_seed, derive_replay_seed};
pub use squad::{generate_squad, Attributes, NewPlayer, Role, SquadPlayer};
pub use standings::{table_order, StandingsDelta, TableRow};
pub use stats::{MatchStats, TeamStats};
