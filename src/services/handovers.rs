//! The handover workflow service: intake, approval processing, and reads.
//!
//! Persistence and status transitions live in the commands; this service
//! wires them to the event channel and fans out notifications. Notification
//! failures are swallowed so they never fail the primary transition.

use std::sync::Arc;

use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use serde::Serialize;
use slog::Logger;
use tracing::instrument;
use uuid::Uuid;

use crate::commands::handovers::{
    CreateHandoverCommand, CreateHandoverResult, DecideHandoverCommand, DecideHandoverResult,
};
use crate::commands::Command;
use crate::db::DbPool;
use crate::entities::{asset_handover, handover_approval, handover_asset};
use crate::errors::ServiceError;
use crate::events::EventSender;
use crate::services::notifications::{
    HandoverEmailContext, HandoverEmailKind, NotificationService,
};

/// A handover with its line-items and approval chain embedded, the shape
/// every read endpoint returns.
#[derive(Debug, Clone, Serialize)]
pub struct HandoverDetails {
    #[serde(flatten)]
    pub handover: asset_handover::Model,
    pub assets: Vec<handover_asset::Model>,
    pub approvals: Vec<handover_approval::Model>,
}

#[derive(Clone)]
pub struct HandoverService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
    notifications: Arc<NotificationService>,
    logger: Logger,
}

impl HandoverService {
    pub fn new(
        db_pool: Arc<DbPool>,
        event_sender: Arc<EventSender>,
        notifications: Arc<NotificationService>,
        logger: Logger,
    ) -> Self {
        Self {
            db_pool,
            event_sender,
            notifications,
            logger,
        }
    }

    /// Intake: persist the handover, build its approval chain, then notify
    /// every approver and confirm to the employee.
    #[instrument(skip(self, command))]
    pub async fn create_handover(
        &self,
        command: CreateHandoverCommand,
    ) -> Result<CreateHandoverResult, ServiceError> {
        let result = command
            .execute(self.db_pool.clone(), self.event_sender.clone())
            .await?;

        slog::info!(self.logger, "handover created";
            "handover_number" => &result.handover_number,
            "assets" => result.asset_count,
            "approvers" => result.approvers.len(),
        );

        let context = HandoverEmailContext {
            handover_number: result.handover_number.clone(),
            employee_name: result.employee_name.clone(),
            employee_email: result.employee_email.clone(),
            department: result.department.clone(),
            handover_type: result.handover_type.clone(),
            asset_count: result.asset_count,
        };

        for approver in &result.approvers {
            self.dispatch(
                HandoverEmailKind::ApprovalRequest,
                &context,
                &approver.email,
                &approver.name,
                None,
            )
            .await;
        }
        self.dispatch(
            HandoverEmailKind::HandoverCreated,
            &context,
            &result.employee_email,
            &result.employee_name,
            None,
        )
        .await;

        Ok(result)
    }

    /// Approval processing: record the decision and notify the employee on
    /// the two terminal transitions. A partial approval stays quiet.
    #[instrument(skip(self, command))]
    pub async fn decide_handover(
        &self,
        command: DecideHandoverCommand,
    ) -> Result<DecideHandoverResult, ServiceError> {
        let result = command
            .execute(self.db_pool.clone(), self.event_sender.clone())
            .await?;

        slog::info!(self.logger, "handover decision recorded";
            "handover_number" => &result.handover_number,
            "status" => &result.status,
        );

        let context = HandoverEmailContext {
            handover_number: result.handover_number.clone(),
            employee_name: result.employee_name.clone(),
            employee_email: result.employee_email.clone(),
            department: result.department.clone(),
            handover_type: result.handover_type.clone(),
            asset_count: result.asset_count,
        };

        match result.status.as_str() {
            "Approved" => {
                self.dispatch(
                    HandoverEmailKind::HandoverApproved,
                    &context,
                    &result.employee_email,
                    &result.employee_name,
                    None,
                )
                .await;
            }
            "Rejected" => {
                self.dispatch(
                    HandoverEmailKind::HandoverRejected,
                    &context,
                    &result.employee_email,
                    &result.employee_name,
                    result.rejection_reason.as_deref(),
                )
                .await;
            }
            _ => {}
        }

        Ok(result)
    }

    /// All handovers, newest first, with line-items and approvals embedded.
    pub async fn list_handovers(&self) -> Result<Vec<HandoverDetails>, ServiceError> {
        let db = self.db_pool.as_ref();
        let handovers = asset_handover::Entity::find()
            .order_by_desc(asset_handover::Column::CreatedAt)
            .all(db)
            .await
            .map_err(ServiceError::db_error)?;

        let mut details = Vec::with_capacity(handovers.len());
        for handover in handovers {
            details.push(self.load_details(handover).await?);
        }
        Ok(details)
    }

    pub async fn get_handover(
        &self,
        id: Uuid,
    ) -> Result<Option<HandoverDetails>, ServiceError> {
        let handover = asset_handover::Entity::find_by_id(id)
            .one(self.db_pool.as_ref())
            .await
            .map_err(ServiceError::db_error)?;

        match handover {
            Some(handover) => Ok(Some(self.load_details(handover).await?)),
            None => Ok(None),
        }
    }

    async fn load_details(
        &self,
        handover: asset_handover::Model,
    ) -> Result<HandoverDetails, ServiceError> {
        let db = self.db_pool.as_ref();
        let assets = handover_asset::Entity::find()
            .filter(handover_asset::Column::HandoverId.eq(handover.id))
            .all(db)
            .await
            .map_err(ServiceError::db_error)?;
        let approvals = handover_approval::Entity::find()
            .filter(handover_approval::Column::HandoverId.eq(handover.id))
            .order_by_asc(handover_approval::Column::ApprovalLevel)
            .all(db)
            .await
            .map_err(ServiceError::db_error)?;

        Ok(HandoverDetails {
            handover,
            assets,
            approvals,
        })
    }

    /// Best-effort dispatch; a failure is logged and ignored.
    async fn dispatch(
        &self,
        kind: HandoverEmailKind,
        context: &HandoverEmailContext,
        recipient_email: &str,
        recipient_name: &str,
        rejection_reason: Option<&str>,
    ) {
        if let Err(err) = self
            .notifications
            .send_handover_email(kind, context, recipient_email, recipient_name, rejection_reason)
            .await
        {
            slog::warn!(self.logger, "notification dispatch failed";
                "kind" => kind.as_str(),
                "recipient" => recipient_email,
                "error" => %err,
            );
        }
    }
}
