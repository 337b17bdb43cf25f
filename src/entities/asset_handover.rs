use chrono::NaiveDateTime;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use uuid::Uuid;

/// An equipment handover request. Status walks a single linear path:
/// `Draft` -> `Pending Approval` -> `Approved` or `Rejected`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "asset_handovers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub handover_number: String,
    pub employee_name: String,
    pub employee_email: String,
    pub employee_id: Option<String>,
    pub department: String,
    pub position: Option<String>,
    pub manager: Option<String>,
    pub manager_email: Option<String>,
    pub handover_date: NaiveDateTime,
    pub handover_type: String,
    pub purpose: Option<String>,
    pub notes: Option<String>,
    pub status: String,
    pub submitted_by: String,
    pub submitted_at: Option<NaiveDateTime>,
    pub approved_by: Option<String>,
    pub approved_at: Option<NaiveDateTime>,
    pub rejection_reason: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::handover_asset::Entity")]
    Assets,
    #[sea_orm(has_many = "super::handover_approval::Entity")]
    Approvals,
}

impl Related<super::handover_asset::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assets.def()
    }
}

impl Related<super::handover_approval::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Approvals.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Overall handover status. A handover is `Approved` only when every
/// approval row is approved; one rejection rejects the whole handover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
pub enum HandoverStatus {
    Draft,
    #[strum(serialize = "Pending Approval")]
    #[serde(rename = "Pending Approval")]
    PendingApproval,
    Approved,
    Rejected,
}

impl HandoverStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            HandoverStatus::Draft => "Draft",
            HandoverStatus::PendingApproval => "Pending Approval",
            HandoverStatus::Approved => "Approved",
            HandoverStatus::Rejected => "Rejected",
        }
    }
}
