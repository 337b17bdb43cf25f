use chrono::NaiveDateTime;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Directory of everyone the system knows about: employees, managers, and
/// the admins who maintain the inventory.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub role: String,
    pub department: String,
    pub active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::otp_code::Entity")]
    OtpCodes,
    #[sea_orm(has_many = "super::leave_application::Entity")]
    LeaveApplications,
    #[sea_orm(has_many = "super::team_attendance::Entity")]
    TeamAttendance,
}

impl Related<super::otp_code::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OtpCodes.def()
    }
}

impl Related<super::leave_application::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LeaveApplications.def()
    }
}

impl Related<super::team_attendance::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TeamAttendance.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
