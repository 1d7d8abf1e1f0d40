//! DTOs for clubs_sea adapter.

#[derive(Debug, Clone)]
pub struct ClubCreate {
    pub league_id: i64,
    pub name: String,
}
