//! SeaORM adapters: raw queries and DTOs, returning `DbErr`.
//!
//! The repos layer maps errors to `DomainError` and models to domain types.

pub mod clubs_sea;
pub mod leagues_sea;
pub mod match_events_sea;
pub mod matches_sea;
pub mod players_sea;
pub mod rounds_sea;
pub mod seasons_sea;
pub mod standings_sea;
