use crate::{
    commands::Command,
    db::DbPool,
    entities::{
        asset_handover::{self, HandoverStatus},
        handover_approval::{self, ApprovalStatus},
        handover_asset, it_asset,
    },
    errors::ServiceError,
    events::{Event, EventSender},
    services::audit,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

/// The two verbs an approver can use. Decisions are final; there is no
/// withdraw or escalate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandoverDecision {
    Approve,
    Reject,
}

impl FromStr for HandoverDecision {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approve" => Ok(HandoverDecision::Approve),
            "reject" => Ok(HandoverDecision::Reject),
            other => Err(ServiceError::ValidationError(format!(
                "Invalid action '{}'. Must be \"approve\" or \"reject\"",
                other
            ))),
        }
    }
}

/// Records one approver's decision and advances the handover.
///
/// Rejection is terminal: the handover flips to `Rejected` immediately and
/// no further approvals are evaluated. Approval marks the approver's seat
/// and, once every seat is approved, flips the handover to `Approved` and
/// assigns every referenced inventory asset to the employee.
///
/// The only idempotency guard is the `Pending` lookup: a seat that was
/// already decided resolves as not-found. The multi-step update is not
/// wrapped in a transaction, matching the single-request processing model
/// this service inherits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecideHandoverCommand {
    pub handover_id: Uuid,
    pub approver_email: String,
    pub decision: HandoverDecision,
    pub comments: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecideHandoverResult {
    pub handover_id: Uuid,
    pub handover_number: String,
    pub status: String,
    pub message: String,
    pub employee_name: String,
    pub employee_email: String,
    pub department: String,
    pub handover_type: String,
    pub asset_count: usize,
    pub rejection_reason: Option<String>,
}

#[async_trait::async_trait]
impl Command for DecideHandoverCommand {
    type Result = DecideHandoverResult;

    #[instrument(skip(self, db_pool, event_sender), fields(handover_id = %self.handover_id, approver = %self.approver_email))]
    async fn execute(
        &self,
        db_pool: Arc<DbPool>,
        event_sender: Arc<EventSender>,
    ) -> Result<Self::Result, ServiceError> {
        if self.approver_email.trim().is_empty() {
            return Err(ServiceError::ValidationError(
                "Missing required fields: action and approverEmail".to_string(),
            ));
        }

        let db = db_pool.as_ref();

        let handover = asset_handover::Entity::find_by_id(self.handover_id)
            .one(db)
            .await
            .map_err(ServiceError::db_error)?
            .ok_or_else(|| ServiceError::NotFound("Handover not found".to_string()))?;

        let line_items = handover_asset::Entity::find()
            .filter(handover_asset::Column::HandoverId.eq(self.handover_id))
            .all(db)
            .await
            .map_err(ServiceError::db_error)?;

        // The Pending filter doubles as the already-processed guard.
        let approval = handover_approval::Entity::find()
            .filter(handover_approval::Column::HandoverId.eq(self.handover_id))
            .filter(handover_approval::Column::ApproverEmail.eq(self.approver_email.clone()))
            .filter(handover_approval::Column::Status.eq(ApprovalStatus::Pending.as_str()))
            .one(db)
            .await
            .map_err(ServiceError::db_error)?
            .ok_or_else(|| {
                ServiceError::NotFound(
                    "Approval record not found or already processed".to_string(),
                )
            })?;

        let result = match self.decision {
            HandoverDecision::Reject => self.reject(db, handover, approval, &line_items).await?,
            HandoverDecision::Approve => self.approve(db, handover, approval, &line_items).await?,
        };

        event_sender
            .send(Event::HandoverApprovalRecorded {
                handover_id: self.handover_id,
                approver_email: self.approver_email.clone(),
                approved: self.decision == HandoverDecision::Approve,
            })
            .await
            .map_err(|e| {
                error!("Failed to send approval event: {}", e);
                ServiceError::EventError(e)
            })?;

        match result.status.as_str() {
            "Approved" => {
                event_sender
                    .send(Event::HandoverApproved(self.handover_id))
                    .await
                    .map_err(ServiceError::EventError)?;
            }
            "Rejected" => {
                event_sender
                    .send(Event::HandoverRejected(self.handover_id))
                    .await
                    .map_err(ServiceError::EventError)?;
            }
            _ => {}
        }

        Ok(result)
    }
}

impl DecideHandoverCommand {
    async fn mark_approval(
        &self,
        db: &DatabaseConnection,
        approval: handover_approval::Model,
        status: ApprovalStatus,
    ) -> Result<(), ServiceError> {
        let mut active: handover_approval::ActiveModel = approval.into();
        active.status = Set(status.as_str().to_string());
        active.comments = Set(self.comments.clone());
        active.decided_at = Set(Some(Utc::now().naive_utc()));
        active.update(db).await.map_err(ServiceError::db_error)?;
        Ok(())
    }

    /// Terminal path: one rejection rejects the whole handover.
    async fn reject(
        &self,
        db: &DatabaseConnection,
        handover: asset_handover::Model,
        approval: handover_approval::Model,
        line_items: &[handover_asset::Model],
    ) -> Result<DecideHandoverResult, ServiceError> {
        self.mark_approval(db, approval, ApprovalStatus::Rejected)
            .await?;

        let handover_id = handover.id;
        let mut active: asset_handover::ActiveModel = handover.clone().into();
        active.status = Set(HandoverStatus::Rejected.as_str().to_string());
        active.rejection_reason = Set(self.comments.clone());
        active.updated_at = Set(Some(Utc::now().naive_utc()));
        let updated = active.update(db).await.map_err(ServiceError::db_error)?;

        audit::record_action(
            db,
            None,
            "HANDOVER_REJECTED",
            "asset_handover",
            &handover_id.to_string(),
            Some(format!(
                "Asset handover {} rejected by {}. Reason: {}",
                updated.handover_number,
                self.approver_email,
                self.comments.as_deref().unwrap_or("No reason provided")
            )),
        )
        .await?;

        info!(handover_number = %updated.handover_number, "handover rejected");

        Ok(DecideHandoverResult {
            handover_id,
            handover_number: updated.handover_number,
            status: updated.status,
            message: "Handover rejected".to_string(),
            employee_name: updated.employee_name,
            employee_email: updated.employee_email,
            department: updated.department,
            handover_type: updated.handover_type,
            asset_count: line_items.len(),
            rejection_reason: self.comments.clone(),
        })
    }

    async fn approve(
        &self,
        db: &DatabaseConnection,
        handover: asset_handover::Model,
        approval: handover_approval::Model,
        line_items: &[handover_asset::Model],
    ) -> Result<DecideHandoverResult, ServiceError> {
        self.mark_approval(db, approval, ApprovalStatus::Approved)
            .await?;

        // Re-read the whole chain; the handover completes only when every
        // seat has approved.
        let all_approvals = handover_approval::Entity::find()
            .filter(handover_approval::Column::HandoverId.eq(self.handover_id))
            .all(db)
            .await
            .map_err(ServiceError::db_error)?;

        let all_approved = all_approvals
            .iter()
            .all(|a| a.status == ApprovalStatus::Approved.as_str());

        if !all_approved {
            audit::record_action(
                db,
                None,
                "HANDOVER_PARTIAL_APPROVAL",
                "asset_handover",
                &handover.id.to_string(),
                Some(format!(
                    "Asset handover {} partially approved by {}. Waiting for additional approvals.",
                    handover.handover_number, self.approver_email
                )),
            )
            .await?;

            info!(handover_number = %handover.handover_number, "partial approval recorded");

            return Ok(DecideHandoverResult {
                handover_id: handover.id,
                handover_number: handover.handover_number.clone(),
                status: handover.status.clone(),
                message: "Approval recorded. Waiting for additional approvals.".to_string(),
                employee_name: handover.employee_name.clone(),
                employee_email: handover.employee_email.clone(),
                department: handover.department.clone(),
                handover_type: handover.handover_type.clone(),
                asset_count: line_items.len(),
                rejection_reason: None,
            });
        }

        let handover_id = handover.id;
        let mut active: asset_handover::ActiveModel = handover.clone().into();
        active.status = Set(HandoverStatus::Approved.as_str().to_string());
        active.approved_by = Set(Some(self.approver_email.clone()));
        active.approved_at = Set(Some(Utc::now().naive_utc()));
        active.updated_at = Set(Some(Utc::now().naive_utc()));
        let updated = active.update(db).await.map_err(ServiceError::db_error)?;

        self.assign_assets(db, &updated, line_items).await?;

        audit::record_action(
            db,
            None,
            "HANDOVER_APPROVED",
            "asset_handover",
            &handover_id.to_string(),
            Some(format!(
                "Asset handover {} approved by {}. {} assets assigned to {}",
                updated.handover_number,
                self.approver_email,
                line_items.len(),
                updated.employee_name
            )),
        )
        .await?;

        info!(
            handover_number = %updated.handover_number,
            assets = line_items.len(),
            "handover fully approved, assets assigned"
        );

        Ok(DecideHandoverResult {
            handover_id,
            handover_number: updated.handover_number,
            status: updated.status,
            message: "Handover approved successfully".to_string(),
            employee_name: updated.employee_name,
            employee_email: updated.employee_email,
            department: updated.department,
            handover_type: updated.handover_type,
            asset_count: line_items.len(),
            rejection_reason: None,
        })
    }

    /// Flip every referenced inventory asset to `Assigned` with the
    /// employee as assignee. Line-items whose inventory row has vanished
    /// are skipped with a warning rather than failing the approval.
    async fn assign_assets(
        &self,
        db: &DatabaseConnection,
        handover: &asset_handover::Model,
        line_items: &[handover_asset::Model],
    ) -> Result<(), ServiceError> {
        let now = Utc::now().naive_utc();
        for item in line_items {
            let Some(asset) = it_asset::Entity::find_by_id(item.asset_id)
                .one(db)
                .await
                .map_err(ServiceError::db_error)?
            else {
                warn!(asset_id = %item.asset_id, "line-item references missing inventory asset");
                continue;
            };

            let mut active: it_asset::ActiveModel = asset.into();
            active.status = Set(crate::entities::it_asset::AssetStatus::Assigned
                .as_str()
                .to_string());
            active.assigned_to = Set(Some(handover.employee_name.clone()));
            active.assigned_date = Set(Some(now));
            active.updated_at = Set(Some(now));
            active.update(db).await.map_err(ServiceError::db_error)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decision_parses_the_two_verbs() {
        assert_eq!(
            "approve".parse::<HandoverDecision>().unwrap(),
            HandoverDecision::Approve
        );
        assert_eq!(
            "reject".parse::<HandoverDecision>().unwrap(),
            HandoverDecision::Reject
        );
    }

    #[test]
    fn unknown_action_is_a_validation_error() {
        let err = "escalate".parse::<HandoverDecision>().unwrap_err();
        assert!(matches!(err, ServiceError::ValidationError(_)));
    }

    #[test]
    fn uppercase_action_is_rejected() {
        assert!("Approve".parse::<HandoverDecision>().is_err());
    }
}
