//! Repository functions for the domain layer (generic over `ConnectionTrait`).

pub mod clubs;
pub mod leagues;
pub mod match_events;
pub mod matches;
pub mod players;
pub mod rounds;
pub mod seasons;
pub mod standings;
