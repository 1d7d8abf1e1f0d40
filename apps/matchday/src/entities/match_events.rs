use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "match_events")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "match_id")]
    pub match_id: i64,
    pub seq: i32,
    #[sea_orm(column_type = "SmallInteger")]
    pub minute: i16,
    #[sea_orm(column_type = "SmallInteger")]
    pub stoppage: i16,
    pub kind: String,
    #[sea_orm(column_name = "club_id")]
    pub club_id: Option<i64>,
    #[sea_orm(column_name = "player_id")]
    pub player_id: Option<i64>,
    pub description: String,
    #[sea_orm(column_name = "home_score", column_type = "SmallInteger")]
    pub home_score: i16,
    #[sea_orm(column_name = "away_score", column_type = "SmallInteger")]
    pub away_score: i16,
    #[sea_orm(column_name = "key_event")]
    pub key_event: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::matches::Entity",
        from = "Column::MatchId",
        to = "super::matches::Column::Id"
    )]
    Match,
}

impl Related<super::matches::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Match.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
