//! Notification rendering and dispatch for the handover workflow.
//!
//! Dispatch is deliberately a stub: the rendered email is written to the
//! log and a `notifications` row is persisted as the delivery trace. There
//! is no SMTP integration, and callers treat dispatch as best-effort.

use std::sync::Arc;

use chrono::Utc;
use sea_orm::{ActiveModelTrait, Set};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::db::DbPool;
use crate::entities::notification;
use crate::errors::ServiceError;

/// The handover facts every email template renders.
#[derive(Debug, Clone)]
pub struct HandoverEmailContext {
    pub handover_number: String,
    pub employee_name: String,
    pub employee_email: String,
    pub department: String,
    pub handover_type: String,
    pub asset_count: usize,
}

/// The four transition emails the workflow produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandoverEmailKind {
    ApprovalRequest,
    HandoverCreated,
    HandoverApproved,
    HandoverRejected,
}

impl HandoverEmailKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            HandoverEmailKind::ApprovalRequest => "approval_request",
            HandoverEmailKind::HandoverCreated => "handover_created",
            HandoverEmailKind::HandoverApproved => "handover_approved",
            HandoverEmailKind::HandoverRejected => "handover_rejected",
        }
    }

    fn subject(&self, handover_number: &str) -> String {
        match self {
            HandoverEmailKind::ApprovalRequest => format!(
                "[Action Required] Asset Handover Approval - {}",
                handover_number
            ),
            HandoverEmailKind::HandoverCreated => {
                format!("Asset Handover Created - {}", handover_number)
            }
            HandoverEmailKind::HandoverApproved => {
                format!("Asset Handover Approved - {}", handover_number)
            }
            HandoverEmailKind::HandoverRejected => {
                format!("Asset Handover Rejected - {}", handover_number)
            }
        }
    }
}

#[derive(Clone)]
pub struct NotificationService {
    db_pool: Arc<DbPool>,
    base_url: String,
}

impl NotificationService {
    pub fn new(db_pool: Arc<DbPool>, base_url: String) -> Self {
        Self { db_pool, base_url }
    }

    /// Render and "send" one handover email: log the dispatch and persist
    /// the delivery trace row.
    #[instrument(skip(self, context), fields(kind = kind.as_str(), recipient = %recipient_email))]
    pub async fn send_handover_email(
        &self,
        kind: HandoverEmailKind,
        context: &HandoverEmailContext,
        recipient_email: &str,
        recipient_name: &str,
        rejection_reason: Option<&str>,
    ) -> Result<(), ServiceError> {
        let subject = kind.subject(&context.handover_number);
        let handover_url = format!("{}/operations/handovers", self.base_url);
        let body = render_handover_email(kind, context, recipient_name, &handover_url, rejection_reason);

        // Stub dispatch: SMTP would go here.
        info!(
            to = %recipient_email,
            subject = %subject,
            body_bytes = body.len(),
            "email notification dispatched (logged, not sent)"
        );

        notification::ActiveModel {
            id: Set(Uuid::new_v4()),
            recipient_email: Set(recipient_email.to_string()),
            recipient_name: Set(recipient_name.to_string()),
            title: Set(subject),
            message: Set(body),
            kind: Set(kind.as_str().to_string()),
            related_entity_type: Set(Some("asset_handover".to_string())),
            related_entity_id: Set(Some(context.handover_number.clone())),
            sent_via_email: Set(true),
            created_at: Set(Utc::now().naive_utc()),
        }
        .insert(self.db_pool.as_ref())
        .await
        .map_err(ServiceError::db_error)?;

        Ok(())
    }
}

/// Build the HTML body for a handover email from template strings.
pub fn render_handover_email(
    kind: HandoverEmailKind,
    context: &HandoverEmailContext,
    recipient_name: &str,
    handover_url: &str,
    rejection_reason: Option<&str>,
) -> String {
    let (heading, lede, closing) = match kind {
        HandoverEmailKind::ApprovalRequest => (
            "Asset Handover Approval Required",
            "A new asset handover request requires your approval:",
            "This handover is pending your approval. Please review the details and approve or reject the request.",
        ),
        HandoverEmailKind::HandoverCreated => (
            "Asset Handover Created",
            "Your asset handover request has been successfully created and submitted for approval:",
            "Your request has been sent to the appropriate approvers. You will receive an email once it has been reviewed.",
        ),
        HandoverEmailKind::HandoverApproved => (
            "Asset Handover Approved",
            "Good news! Your asset handover request has been approved:",
            "The IT team will prepare your assets and contact you to schedule the handover.",
        ),
        HandoverEmailKind::HandoverRejected => (
            "Asset Handover Rejected",
            "Unfortunately, your asset handover request has been rejected:",
            "If you have questions about this rejection, please contact the IT department or your manager.",
        ),
    };

    let reason_block = match (kind, rejection_reason) {
        (HandoverEmailKind::HandoverRejected, Some(reason)) if !reason.is_empty() => format!(
            r#"<div class="rejection"><strong>Rejection Reason:</strong><br>{}</div>"#,
            reason
        ),
        _ => String::new(),
    };

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <style>
    body {{ font-family: Arial, sans-serif; line-height: 1.6; color: #333; }}
    .container {{ max-width: 600px; margin: 0 auto; padding: 20px; }}
    .content {{ background: #f8f9fa; padding: 20px; }}
    .asset-info {{ background: white; padding: 15px; margin: 10px 0; border-radius: 6px; }}
    .rejection {{ background: #f8d7da; color: #721c24; padding: 10px; border-radius: 6px; margin: 10px 0; }}
    .button {{ background: #007bff; color: white; padding: 12px 24px; text-decoration: none; border-radius: 6px; display: inline-block; margin: 10px 0; }}
  </style>
</head>
<body>
  <div class="container">
    <h1>{heading}</h1>
    <div class="content">
      <p>Dear {recipient},</p>
      <p>{lede}</p>
      <div class="asset-info">
        <strong>Handover Number:</strong> {number}<br>
        <strong>Employee:</strong> {employee}<br>
        <strong>Email:</strong> {email}<br>
        <strong>Department:</strong> {department}<br>
        <strong>Type:</strong> {handover_type}<br>
        <strong>Number of Assets:</strong> {asset_count}
      </div>
      {reason_block}
      <a href="{url}" class="button">Review Handover</a>
      <p>{closing}</p>
    </div>
    <p><small>This is an automated notification from the IT Operations System. Please do not reply to this email.</small></p>
  </div>
</body>
</html>"#,
        heading = heading,
        recipient = recipient_name,
        lede = lede,
        number = context.handover_number,
        employee = context.employee_name,
        email = context.employee_email,
        department = context.department,
        handover_type = context.handover_type,
        asset_count = context.asset_count,
        reason_block = reason_block,
        url = handover_url,
        closing = closing,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> HandoverEmailContext {
        HandoverEmailContext {
            handover_number: "HO26080042".to_string(),
            employee_name: "Sam Lee".to_string(),
            employee_email: "sam@example.com".to_string(),
            department: "Finance".to_string(),
            handover_type: "New Equipment".to_string(),
            asset_count: 2,
        }
    }

    #[test]
    fn subjects_carry_the_handover_number() {
        assert_eq!(
            HandoverEmailKind::ApprovalRequest.subject("HO26080042"),
            "[Action Required] Asset Handover Approval - HO26080042"
        );
        assert_eq!(
            HandoverEmailKind::HandoverApproved.subject("HO26080042"),
            "Asset Handover Approved - HO26080042"
        );
    }

    #[test]
    fn rejected_body_embeds_the_reason() {
        let body = render_handover_email(
            HandoverEmailKind::HandoverRejected,
            &context(),
            "Sam Lee",
            "http://localhost:8080/operations/handovers",
            Some("budget"),
        );
        assert!(body.contains("Rejection Reason:"));
        assert!(body.contains("budget"));
    }

    #[test]
    fn non_rejection_body_has_no_reason_block() {
        let body = render_handover_email(
            HandoverEmailKind::ApprovalRequest,
            &context(),
            "Alex Kim",
            "http://localhost:8080/operations/handovers",
            None,
        );
        assert!(!body.contains("Rejection Reason:"));
        assert!(body.contains("HO26080042"));
        assert!(body.contains("Dear Alex Kim"));
    }
}
