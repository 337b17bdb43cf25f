//! Leave applications: request intake and status changes.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::instrument;
use uuid::Uuid;

use crate::db::DbPool;
use crate::entities::{leave_application, user};
use crate::errors::ServiceError;
use crate::events::{Event, EventSender};

#[derive(Clone)]
pub struct LeaveService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
}

impl LeaveService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    pub async fn list(&self) -> Result<Vec<leave_application::Model>, ServiceError> {
        leave_application::Entity::find()
            .order_by_desc(leave_application::Column::CreatedAt)
            .all(self.db_pool.as_ref())
            .await
            .map_err(ServiceError::db_error)
    }

    /// File a request. The requesting employee falls back to the first user
    /// on record when no session identity is supplied.
    #[instrument(skip(self))]
    pub async fn create(
        &self,
        leave_type: String,
        start_date: NaiveDate,
        end_date: NaiveDate,
        reason: Option<String>,
        employee_id: Option<Uuid>,
    ) -> Result<leave_application::Model, ServiceError> {
        let days_count = inclusive_day_count(start_date, end_date)?;
        let db = self.db_pool.as_ref();

        let employee_id = match employee_id {
            Some(id) => id,
            None => {
                user::Entity::find()
                    .order_by_asc(user::Column::CreatedAt)
                    .one(db)
                    .await
                    .map_err(ServiceError::db_error)?
                    .ok_or_else(|| {
                        ServiceError::ValidationError("No users found".to_string())
                    })?
                    .id
            }
        };

        let created = leave_application::ActiveModel {
            id: Set(Uuid::new_v4()),
            employee_id: Set(employee_id),
            leave_type: Set(leave_type),
            start_date: Set(start_date),
            end_date: Set(end_date),
            days_count: Set(days_count),
            reason: Set(reason),
            status: Set("Pending".to_string()),
            approved_by: Set(None),
            approval_date: Set(None),
            created_at: Set(Utc::now().naive_utc()),
            updated_at: Set(None),
        }
        .insert(db)
        .await
        .map_err(ServiceError::db_error)?;

        self.event_sender
            .send(Event::LeaveRequested(created.id))
            .await
            .map_err(ServiceError::EventError)?;

        Ok(created)
    }

    /// Flip a request's status, stamping the first manager on record as the
    /// approver.
    #[instrument(skip(self))]
    pub async fn set_status(
        &self,
        id: Uuid,
        status: String,
    ) -> Result<leave_application::Model, ServiceError> {
        let db = self.db_pool.as_ref();

        let leave = leave_application::Entity::find_by_id(id)
            .one(db)
            .await
            .map_err(ServiceError::db_error)?
            .ok_or_else(|| ServiceError::NotFound("Leave application not found".to_string()))?;

        let manager = user::Entity::find()
            .filter(user::Column::Role.eq("Manager"))
            .order_by_asc(user::Column::CreatedAt)
            .one(db)
            .await
            .map_err(ServiceError::db_error)?;

        let mut active: leave_application::ActiveModel = leave.into();
        active.status = Set(status.clone());
        active.approved_by = Set(manager.map(|m| m.id));
        active.approval_date = Set(Some(Utc::now().naive_utc()));
        active.updated_at = Set(Some(Utc::now().naive_utc()));
        let updated = active.update(db).await.map_err(ServiceError::db_error)?;

        self.event_sender
            .send(Event::LeaveStatusChanged {
                leave_id: updated.id,
                new_status: status,
            })
            .await
            .map_err(ServiceError::EventError)?;

        Ok(updated)
    }
}

/// Whole days between two dates, inclusive of both endpoints.
pub fn inclusive_day_count(start: NaiveDate, end: NaiveDate) -> Result<i32, ServiceError> {
    let days = (end - start).num_days();
    if days < 0 {
        return Err(ServiceError::ValidationError(
            "endDate must not be before startDate".to_string(),
        ));
    }
    Ok(days as i32 + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn day_count_is_inclusive() {
        assert_eq!(
            inclusive_day_count(date(2026, 3, 2), date(2026, 3, 2)).unwrap(),
            1
        );
        assert_eq!(
            inclusive_day_count(date(2026, 3, 2), date(2026, 3, 6)).unwrap(),
            5
        );
        // Across a month boundary
        assert_eq!(
            inclusive_day_count(date(2026, 1, 30), date(2026, 2, 2)).unwrap(),
            4
        );
    }

    #[test]
    fn reversed_range_is_rejected() {
        assert!(inclusive_day_count(date(2026, 3, 6), date(2026, 3, 2)).is_err());
    }
}
