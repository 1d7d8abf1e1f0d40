use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "season_rounds")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "season_id")]
    pub season_id: i64,
    #[sea_orm(column_name = "round_no", column_type = "SmallInteger")]
    pub round_no: i16,
    #[sea_orm(column_name = "is_last")]
    pub is_last: bool,
    #[sea_orm(column_name = "scheduled_at")]
    pub scheduled_at: OffsetDateTime,
    #[sea_orm(column_name = "completed_at")]
    pub completed_at: Option<OffsetDateTime>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::seasons::Entity",
        from = "Column::SeasonId",
        to = "super::seasons::Column::Id"
    )]
    Season,
    #[sea_orm(has_many = "super::matches::Entity")]
    Matches,
}

impl Related<super::seasons::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Season.def()
    }
}

impl Related<super::matches::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Matches.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
