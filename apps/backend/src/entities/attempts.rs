use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "attempts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "round_id")]
    pub round_id: i64,
    #[sea_orm(column_name = "attempt_no")]
    pub attempt_no: i32,
    #[sea_orm(column_name = "guess_text")]
    pub guess_text: String,
    #[sea_orm(column_name = "exact_count", column_type = "SmallInteger")]
    pub exact_count: i16,
    #[sea_orm(column_name = "partial_count", column_type = "SmallInteger")]
    pub partial_count: i16,
    #[sea_orm(column_name = "is_no_match")]
    pub is_no_match: bool,
    #[sea_orm(column_name = "is_repeated")]
    pub is_repeated: bool,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::rounds::Entity",
        from = "Column::RoundId",
        to = "super::rounds::Column::Id",
        on_delete = "Cascade"
    )]
    Round,
}

impl Related<super::rounds::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Round.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
