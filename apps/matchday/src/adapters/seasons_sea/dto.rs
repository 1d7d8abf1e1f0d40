//! DTOs for seasons_sea adapter.

#[derive(Debug, Clone)]
pub struct SeasonCreate {
    pub league_id: i64,
    pub name: String,
    pub start_year: i32,
    pub rng_seed: i64,
    pub is_current: bool,
}
