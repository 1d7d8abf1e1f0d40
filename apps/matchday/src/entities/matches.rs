use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "match_status")]
pub enum MatchStatus {
    #[sea_orm(string_value = "SCHEDULED")]
    Scheduled,
    #[sea_orm(string_value = "LIVE")]
    Live,
    #[sea_orm(string_value = "COMPLETED")]
    Completed,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "matches")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "season_id")]
    pub season_id: i64,
    #[sea_orm(column_name = "round_id")]
    pub round_id: i64,
    #[sea_orm(column_name = "home_club_id")]
    pub home_club_id: i64,
    #[sea_orm(column_name = "away_club_id")]
    pub away_club_id: i64,
    #[sea_orm(column_name = "scheduled_at")]
    pub scheduled_at: OffsetDateTime,
    pub status: MatchStatus,
    #[sea_orm(column_name = "home_score", column_type = "SmallInteger")]
    pub home_score: Option<i16>,
    #[sea_orm(column_name = "away_score", column_type = "SmallInteger")]
    pub away_score: Option<i16>,
    /// Authoritative simulated score, written when the match goes live
    #[sea_orm(column_name = "sim_home_score", column_type = "SmallInteger")]
    pub sim_home_score: Option<i16>,
    #[sea_orm(column_name = "sim_away_score", column_type = "SmallInteger")]
    pub sim_away_score: Option<i16>,
    pub finished: bool,
    #[sea_orm(column_name = "last_in_round")]
    pub last_in_round: bool,
    #[sea_orm(column_name = "started_at")]
    pub started_at: Option<OffsetDateTime>,
    #[sea_orm(column_name = "completed_at")]
    pub completed_at: Option<OffsetDateTime>,
    /// Team statistics tallied from the persisted narrative
    pub stats: Option<Json>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::seasons::Entity",
        from = "Column::SeasonId",
        to = "super::seasons::Column::Id"
    )]
    Season,
    #[sea_orm(
        belongs_to = "super::season_rounds::Entity",
        from = "Column::RoundId",
        to = "super::season_rounds::Column::Id"
    )]
    Round,
    #[sea_orm(has_many = "super::match_events::Entity")]
    Events,
}

impl Related<super::seasons::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Season.def()
    }
}

impl Related<super::season_rounds::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Round.def()
    }
}

impl Related<super::match_events::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Events.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
