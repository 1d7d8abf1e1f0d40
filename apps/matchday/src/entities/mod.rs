pub mod clubs;
pub mod leagues;
pub mod match_events;
pub mod matches;
pub mod players;
pub mod season_rounds;
pub mod seasons;
pub mod standings;

pub use clubs::Entity as Clubs;
pub use clubs::Model as Club;
pub use leagues::Entity as Leagues;
pub use leagues::Model as League;
pub use match_events::Entity as MatchEvents;
pub use matches::Entity as Matches;
pub use matches::Model as Match;
pub use players::Entity as Players;
pub use players::Model as Player;
pub use season_rounds::Entity as SeasonRounds;
pub use seasons::Entity as Seasons;
pub use seasons::Model as Season;
pub use standings::Entity as Standings;
