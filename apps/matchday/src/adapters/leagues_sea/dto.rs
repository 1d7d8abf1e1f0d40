//! DTOs for leagues_sea adapter.

#[derive(Debug, Clone)]
pub struct LeagueCreate {
    pub name: String,
    pub country: String,
}

impl LeagueCreate {
    pub fn new(name: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            country: country.into(),
        }
    }
}
