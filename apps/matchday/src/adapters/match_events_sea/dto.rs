//! DTOs for match_events_sea adapter.

#[derive(Debug, Clone)]
pub struct MatchEventCreate {
    pub match_id: i64,
    pub seq: i32,
    pub minute: i16,
    pub stoppage: i16,
    pub kind: String,
    pub club_id: Option<i64>,
    pub player_id: Option<i64>,
    pub description: String,
    pub home_score: i16,
    pub away_score: i16,
    pub key_event: bool,
}
