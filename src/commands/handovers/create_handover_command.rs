use crate::{
    commands::Command,
    db::DbPool,
    entities::{
        asset_handover::{self, HandoverStatus},
        handover_approval::{self, ApprovalStatus},
        handover_asset,
    },
    errors::ServiceError,
    events::{Event, EventSender},
    services::audit,
};
use chrono::{NaiveDateTime, Utc};
use rand::Rng;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, instrument};
use uuid::Uuid;

/// One asset line-item on an intake request. Descriptive fields are
/// snapshotted onto the handover; `asset_id` points back at the inventory
/// row that gets assigned on full approval.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandoverAssetInput {
    pub asset_id: Uuid,
    pub asset_tag: String,
    pub asset_type: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    pub condition: Option<String>,
    pub accessories: Option<String>,
    pub notes: Option<String>,
}

/// Intake for the handover workflow: persists the handover with its
/// line-items, builds the approval chain, and submits the request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateHandoverCommand {
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
    pub submitted_by: String,
    pub assets: Vec<HandoverAssetInput>,
    /// Address holding the fixed IT-admin seat in the chain; comes from
    /// configuration.
    pub it_admin_email: String,
}

/// An approver seat persisted for the new handover, echoed back so the
/// caller can dispatch approval-request notifications.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApproverSeat {
    pub email: String,
    pub name: String,
    pub role: String,
    pub level: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateHandoverResult {
    pub id: Uuid,
    pub handover_number: String,
    pub status: String,
    pub employee_name: String,
    pub employee_email: String,
    pub department: String,
    pub handover_type: String,
    pub asset_count: usize,
    pub approvers: Vec<ApproverSeat>,
}

#[async_trait::async_trait]
impl Command for CreateHandoverCommand {
    type Result = CreateHandoverResult;

    #[instrument(skip(self, db_pool, event_sender), fields(employee = %self.employee_email))]
    async fn execute(
        &self,
        db_pool: Arc<DbPool>,
        event_sender: Arc<EventSender>,
    ) -> Result<Self::Result, ServiceError> {
        self.validate()?;

        let db = db_pool.as_ref();
        let handover_number = self.unique_handover_number(db).await?;
        let handover = self.insert_handover(db, &handover_number).await?;
        self.insert_line_items(db, handover.id).await?;
        let approvers = self.build_approval_chain(db, handover.id).await?;
        let submitted = self.submit(db, handover).await?;

        audit::record_action(
            db,
            None,
            "HANDOVER_CREATED",
            "asset_handover",
            &submitted.id.to_string(),
            Some(format!(
                "Asset handover {} created for {} with {} assets",
                submitted.handover_number,
                self.employee_name,
                self.assets.len()
            )),
        )
        .await?;

        event_sender
            .send(Event::HandoverCreated {
                handover_id: submitted.id,
                handover_number: submitted.handover_number.clone(),
                asset_count: self.assets.len(),
            })
            .await
            .map_err(|e| {
                error!("Failed to send event for created handover: {}", e);
                ServiceError::EventError(e)
            })?;

        info!(
            handover_number = %submitted.handover_number,
            approvers = approvers.len(),
            "handover created and submitted for approval"
        );

        Ok(CreateHandoverResult {
            id: submitted.id,
            handover_number: submitted.handover_number,
            status: submitted.status,
            employee_name: submitted.employee_name,
            employee_email: submitted.employee_email,
            department: submitted.department,
            handover_type: submitted.handover_type,
            asset_count: self.assets.len(),
            approvers,
        })
    }
}

impl CreateHandoverCommand {
    /// Intake validation: employee identity, department, and at least one
    /// asset are required.
    pub fn validate(&self) -> Result<(), ServiceError> {
        if self.employee_name.trim().is_empty()
            || self.employee_email.trim().is_empty()
            || self.department.trim().is_empty()
        {
            return Err(ServiceError::ValidationError(
                "Missing required fields: employeeName, employeeEmail, and department".to_string(),
            ));
        }
        if self.assets.is_empty() {
            return Err(ServiceError::ValidationError(
                "At least one asset is required".to_string(),
            ));
        }
        Ok(())
    }

    /// Candidate numbers are drawn until one does not collide with an
    /// existing handover.
    async fn unique_handover_number(
        &self,
        db: &DatabaseConnection,
    ) -> Result<String, ServiceError> {
        loop {
            let candidate = generate_handover_number();
            let existing = asset_handover::Entity::find()
                .filter(asset_handover::Column::HandoverNumber.eq(candidate.clone()))
                .one(db)
                .await
                .map_err(ServiceError::db_error)?;
            if existing.is_none() {
                return Ok(candidate);
            }
        }
    }

    async fn insert_handover(
        &self,
        db: &DatabaseConnection,
        handover_number: &str,
    ) -> Result<asset_handover::Model, ServiceError> {
        let now = Utc::now().naive_utc();
        asset_handover::ActiveModel {
            id: Set(Uuid::new_v4()),
            handover_number: Set(handover_number.to_string()),
            employee_name: Set(self.employee_name.clone()),
            employee_email: Set(self.employee_email.clone()),
            employee_id: Set(self.employee_id.clone()),
            department: Set(self.department.clone()),
            position: Set(self.position.clone()),
            manager: Set(self.manager.clone()),
            manager_email: Set(self.manager_email.clone()),
            handover_date: Set(self.handover_date),
            handover_type: Set(self.handover_type.clone()),
            purpose: Set(self.purpose.clone()),
            notes: Set(self.notes.clone()),
            status: Set(HandoverStatus::Draft.as_str().to_string()),
            submitted_by: Set(self.submitted_by.clone()),
            submitted_at: Set(None),
            approved_by: Set(None),
            approved_at: Set(None),
            rejection_reason: Set(None),
            created_at: Set(now),
            updated_at: Set(None),
        }
        .insert(db)
        .await
        .map_err(ServiceError::db_error)
    }

    async fn insert_line_items(
        &self,
        db: &DatabaseConnection,
        handover_id: Uuid,
    ) -> Result<(), ServiceError> {
        let now = Utc::now().naive_utc();
        let rows: Vec<handover_asset::ActiveModel> = self
            .assets
            .iter()
            .map(|asset| handover_asset::ActiveModel {
                id: Set(Uuid::new_v4()),
                handover_id: Set(handover_id),
                asset_id: Set(asset.asset_id),
                asset_tag: Set(asset.asset_tag.clone()),
                asset_type: Set(asset.asset_type.clone()),
                brand: Set(asset.brand.clone()),
                model: Set(asset.model.clone()),
                serial_number: Set(asset.serial_number.clone()),
                condition: Set(asset.condition.clone()),
                accessories: Set(asset.accessories.clone()),
                notes: Set(asset.notes.clone()),
                created_at: Set(now),
            })
            .collect();

        handover_asset::Entity::insert_many(rows)
            .exec(db)
            .await
            .map_err(ServiceError::db_error)?;
        Ok(())
    }

    /// Ordered chain: the manager signs first when one was named, then the
    /// configured IT-admin seat. All seats start `Pending`.
    async fn build_approval_chain(
        &self,
        db: &DatabaseConnection,
        handover_id: Uuid,
    ) -> Result<Vec<ApproverSeat>, ServiceError> {
        let mut seats = Vec::new();

        if let Some(manager_email) = self
            .manager_email
            .as_deref()
            .filter(|email| !email.trim().is_empty())
        {
            seats.push(ApproverSeat {
                email: manager_email.to_string(),
                name: self
                    .manager
                    .clone()
                    .unwrap_or_else(|| "Manager".to_string()),
                role: "Manager".to_string(),
                level: 1,
            });
        }

        seats.push(ApproverSeat {
            email: self.it_admin_email.clone(),
            name: "IT Administrator".to_string(),
            role: "IT Admin".to_string(),
            level: 2,
        });

        let now = Utc::now().naive_utc();
        let rows: Vec<handover_approval::ActiveModel> = seats
            .iter()
            .map(|seat| handover_approval::ActiveModel {
                id: Set(Uuid::new_v4()),
                handover_id: Set(handover_id),
                approver_email: Set(seat.email.clone()),
                approver_name: Set(seat.name.clone()),
                approver_role: Set(seat.role.clone()),
                approval_level: Set(seat.level),
                status: Set(ApprovalStatus::Pending.as_str().to_string()),
                comments: Set(None),
                decided_at: Set(None),
                created_at: Set(now),
            })
            .collect();

        handover_approval::Entity::insert_many(rows)
            .exec(db)
            .await
            .map_err(ServiceError::db_error)?;

        Ok(seats)
    }

    async fn submit(
        &self,
        db: &DatabaseConnection,
        handover: asset_handover::Model,
    ) -> Result<asset_handover::Model, ServiceError> {
        let mut active: asset_handover::ActiveModel = handover.into();
        active.status = Set(HandoverStatus::PendingApproval.as_str().to_string());
        active.submitted_at = Set(Some(Utc::now().naive_utc()));
        active.updated_at = Set(Some(Utc::now().naive_utc()));
        active.update(db).await.map_err(ServiceError::db_error)
    }
}

/// Human-readable handover identifier: `HO` + two-digit year + two-digit
/// month + four random digits.
pub fn generate_handover_number() -> String {
    let now = Utc::now();
    let random: u32 = rand::thread_rng().gen_range(0..10_000);
    format!("HO{}{:04}", now.format("%y%m"), random)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(assets: Vec<HandoverAssetInput>) -> CreateHandoverCommand {
        CreateHandoverCommand {
            employee_name: "Sam Lee".to_string(),
            employee_email: "sam@example.com".to_string(),
            employee_id: Some("E-100".to_string()),
            department: "Finance".to_string(),
            position: None,
            manager: Some("Alex Kim".to_string()),
            manager_email: Some("alex@example.com".to_string()),
            handover_date: Utc::now().naive_utc(),
            handover_type: "New Equipment".to_string(),
            purpose: None,
            notes: None,
            submitted_by: "system".to_string(),
            assets,
            it_admin_email: "it-admin@company.com".to_string(),
        }
    }

    fn asset_input() -> HandoverAssetInput {
        HandoverAssetInput {
            asset_id: Uuid::new_v4(),
            asset_tag: "LT-0001".to_string(),
            asset_type: "Laptop".to_string(),
            brand: None,
            model: None,
            serial_number: None,
            condition: None,
            accessories: None,
            notes: None,
        }
    }

    #[test]
    fn handover_number_format() {
        for _ in 0..64 {
            let number = generate_handover_number();
            assert_eq!(number.len(), 10, "unexpected length: {}", number);
            assert!(number.starts_with("HO"));
            assert!(number[2..].chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn validation_requires_employee_fields() {
        let mut cmd = command(vec![asset_input()]);
        cmd.employee_email = "".to_string();
        assert!(matches!(
            cmd.validate(),
            Err(ServiceError::ValidationError(_))
        ));
    }

    #[test]
    fn validation_requires_at_least_one_asset() {
        let cmd = command(vec![]);
        assert!(matches!(
            cmd.validate(),
            Err(ServiceError::ValidationError(_))
        ));
    }

    #[test]
    fn valid_command_passes_validation() {
        assert!(command(vec![asset_input()]).validate().is_ok());
    }
}
