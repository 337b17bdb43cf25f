use chrono::NaiveDateTime;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A line-item on a handover: a snapshot of the inventory asset at the time
/// the request was made, plus a back-reference (`asset_id`) used to flip the
/// inventory row when the handover is fully approved.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "handover_assets")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub handover_id: Uuid,
    pub asset_id: Uuid,
    pub asset_tag: String,
    pub asset_type: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    pub condition: Option<String>,
    pub accessories: Option<String>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::asset_handover::Entity",
        from = "Column::HandoverId",
        to = "super::asset_handover::Column::Id"
    )]
    Handover,
}

impl Related<super::asset_handover::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Handover.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
