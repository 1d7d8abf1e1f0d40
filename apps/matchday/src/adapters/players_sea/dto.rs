//! DTOs for players_sea adapter.

use crate::entities::players::PlayerRole;

/// One roster entry; attributes are 0..=100.
#[derive(Debug, Clone)]
pub struct PlayerCreate {
    pub club_id: i64,
    pub name: String,
    pub role: PlayerRole,
    pub squad_no: i16,
    pub stamina: i16,
    pub playmaking: i16,
    pub scoring: i16,
    pub winger: i16,
    pub goalkeeping: i16,
    pub passing: i16,
    pub defending: i16,
    pub set_pieces: i16,
    pub condition: i16,
}
