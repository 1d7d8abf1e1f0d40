use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "player_role")]
pub enum PlayerRole {
    #[sea_orm(string_value = "GOALKEEPER")]
    Goalkeeper,
    #[sea_orm(string_value = "CENTRAL_DEFENDER")]
    CentralDefender,
    #[sea_orm(string_value = "WING_BACK")]
    WingBack,
    #[sea_orm(string_value = "MIDFIELDER")]
    Midfielder,
    #[sea_orm(string_value = "WINGER")]
    Winger,
    #[sea_orm(string_value = "FORWARD")]
    Forward,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "players")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "club_id")]
    pub club_id: i64,
    pub name: String,
    pub role: PlayerRole,
    #[sea_orm(column_name = "squad_no", column_type = "SmallInteger")]
    pub squad_no: i16,
    #[sea_orm(column_type = "SmallInteger")]
    pub stamina: i16,
    #[sea_orm(column_type = "SmallInteger")]
    pub playmaking: i16,
    #[sea_orm(column_type = "SmallInteger")]
    pub scoring: i16,
    #[sea_orm(column_type = "SmallInteger")]
    pub winger: i16,
    #[sea_orm(column_type = "SmallInteger")]
    pub goalkeeping: i16,
    #[sea_orm(column_type = "SmallInteger")]
    pub passing: i16,
    #[sea_orm(column_type = "SmallInteger")]
    pub defending: i16,
    #[sea_orm(column_name = "set_pieces", column_type = "SmallInteger")]
    pub set_pieces: i16,
    #[sea_orm(column_type = "SmallInteger")]
    pub condition: i16,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::clubs::Entity",
        from = "Column::ClubId",
        to = "super::clubs::Column::Id"
    )]
    Club,
}

impl Related<super::clubs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Club.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
