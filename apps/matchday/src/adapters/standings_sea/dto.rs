//! DTOs for standings_sea adapter.

/// Column increments for one club's row.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandingIncrement {
    pub season_id: i64,
    pub club_id: i64,
    pub played: i32,
    pub won: i32,
    pub drawn: i32,
    pub lost: i32,
    pub goals_for: i32,
    pub goals_against: i32,
    pub points: i32,
}
