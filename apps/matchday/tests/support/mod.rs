#![allow(dead_code)]

pub mod league_factory;
pub mod sinks;
pub mod test_state;

pub use league_factory::{create_test_league, play_round, TestLeague};
pub use test_state::{build_test_state, build_test_state_with};
