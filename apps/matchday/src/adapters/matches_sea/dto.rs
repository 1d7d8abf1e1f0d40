//! DTOs for matches_sea adapter.

use time::OffsetDateTime;

#[derive(Debug, Clone)]
pub struct MatchCreate {
    pub season_id: i64,
    pub round_id: i64,
    pub home_club_id: i64,
    pub away_club_id: i64,
    pub scheduled_at: OffsetDateTime,
    pub last_in_round: bool,
}

/// SCHEDULED -> LIVE: visible score reset to 0-0, authoritative score stored.
#[derive(Debug, Clone)]
pub struct MatchGoLive {
    pub id: i64,
    pub sim_home_score: i16,
    pub sim_away_score: i16,
    pub started_at: OffsetDateTime,
}

/// LIVE -> COMPLETED with the final score.
#[derive(Debug, Clone)]
pub struct MatchComplete {
    pub id: i64,
    pub home_score: i16,
    pub away_score: i16,
    pub completed_at: OffsetDateTime,
    pub stats: Option<serde_json::Value>,
}
