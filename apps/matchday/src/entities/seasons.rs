use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "seasons")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "league_id")]
    pub league_id: i64,
    pub name: String,
    #[sea_orm(column_name = "start_year")]
    pub start_year: i32,
    #[sea_orm(column_name = "is_current")]
    pub is_current: bool,
    /// Round cursor: the next round expected to complete
    #[sea_orm(column_name = "next_round_no", column_type = "SmallInteger")]
    pub next_round_no: i16,
    #[sea_orm(column_name = "rng_seed")]
    pub rng_seed: i64,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    #[sea_orm(column_name = "archived_at")]
    pub archived_at: Option<OffsetDateTime>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::leagues::Entity",
        from = "Column::LeagueId",
        to = "super::leagues::Column::Id"
    )]
    League,
    #[sea_orm(has_many = "super::season_rounds::Entity")]
    Rounds,
}

impl Related<super::leagues::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::League.def()
    }
}

impl Related<super::season_rounds::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Rounds.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
