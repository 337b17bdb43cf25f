use chrono::NaiveDateTime;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A physical room imported from the facilities spreadsheet. Campus,
/// building, and floor names are denormalized onto the row so listing does
/// not require a three-level join.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "rooms")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub floor_id: Uuid,
    #[sea_orm(unique)]
    pub room_number: String,
    pub campus_name: String,
    pub building_name: String,
    pub floor_name: String,
    pub ownership: Option<String>,
    pub owner: Option<String>,
    pub customer_note: Option<String>,
    pub other_remarks: Option<String>,
    pub room_size_sqm: Option<f64>,
    pub seating_capacity: Option<i32>,
    pub room_height: Option<String>,
    pub paint_color_code: Option<String>,
    pub room_category: Option<String>,
    pub room_type: Option<String>,
    pub elv_idf_bdf_room: Option<String>,
    pub distance_meters: Option<f64>,
    pub remarks: Option<String>,
    pub current_status: String,
    pub last_updated: NaiveDateTime,
    pub created_at: NaiveDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::floor::Entity",
        from = "Column::FloorId",
        to = "super::floor::Column::Id"
    )]
    Floor,
}

impl Related<super::floor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Floor.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
