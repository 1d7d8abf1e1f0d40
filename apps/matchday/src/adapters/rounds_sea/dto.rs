//! DTOs for rounds_sea adapter.

use time::OffsetDateTime;

#[derive(Debug, Clone)]
pub struct RoundCreate {
    pub season_id: i64,
    pub round_no: i16,
    pub is_last: bool,
    pub scheduled_at: OffsetDateTime,
}
