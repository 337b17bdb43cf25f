//! Append-only system log writes shared by the other services.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use uuid::Uuid;

use crate::entities::system_log;
use crate::errors::ServiceError;

/// Persist one audit trail row. Callers pass the acting user when one is
/// known; workflow transitions triggered over plain HTTP record `None`.
pub async fn record_action(
    db: &DatabaseConnection,
    user_id: Option<Uuid>,
    action: &str,
    entity_type: &str,
    entity_id: &str,
    details: Option<String>,
) -> Result<system_log::Model, ServiceError> {
    system_log::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        action: Set(action.to_string()),
        entity_type: Set(entity_type.to_string()),
        entity_id: Set(entity_id.to_string()),
        details: Set(details),
        created_at: Set(Utc::now().naive_utc()),
    }
    .insert(db)
    .await
    .map_err(ServiceError::db_error)
}
