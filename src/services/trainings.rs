//! Training plan CRUD.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};
use tracing::instrument;
use uuid::Uuid;

use crate::db::DbPool;
use crate::entities::training_plan;
use crate::errors::ServiceError;
use crate::events::{Event, EventSender};

/// Partial update for a training plan; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct TrainingPlanPatch {
    pub training_name: Option<String>,
    pub training_type: Option<String>,
    pub schedule_date: Option<NaiveDate>,
    pub cost: Option<Decimal>,
    pub max_attendees: Option<i32>,
    pub remarks: Option<String>,
    pub status: Option<String>,
}

#[derive(Clone)]
pub struct TrainingService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
}

impl TrainingService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    pub async fn list(&self) -> Result<Vec<training_plan::Model>, ServiceError> {
        training_plan::Entity::find()
            .order_by_desc(training_plan::Column::CreatedAt)
            .all(self.db_pool.as_ref())
            .await
            .map_err(ServiceError::db_error)
    }

    #[instrument(skip(self))]
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        training_name: String,
        training_type: String,
        schedule_date: Option<NaiveDate>,
        cost: Option<Decimal>,
        max_attendees: Option<i32>,
        remarks: Option<String>,
        status: Option<String>,
        created_by: String,
    ) -> Result<training_plan::Model, ServiceError> {
        if training_name.trim().is_empty() || training_type.trim().is_empty() {
            return Err(ServiceError::ValidationError(
                "trainingName and trainingType are required".to_string(),
            ));
        }

        let created = training_plan::ActiveModel {
            id: Set(Uuid::new_v4()),
            training_name: Set(training_name),
            training_type: Set(training_type),
            schedule_date: Set(schedule_date),
            cost: Set(cost),
            max_attendees: Set(max_attendees),
            remarks: Set(remarks),
            status: Set(status.unwrap_or_else(|| "Planned".to_string())),
            created_by: Set(created_by),
            created_at: Set(Utc::now().naive_utc()),
            updated_at: Set(None),
        }
        .insert(self.db_pool.as_ref())
        .await
        .map_err(ServiceError::db_error)?;

        self.event_sender
            .send(Event::TrainingPlanCreated(created.id))
            .await
            .map_err(ServiceError::EventError)?;

        Ok(created)
    }

    pub async fn get(&self, id: Uuid) -> Result<training_plan::Model, ServiceError> {
        training_plan::Entity::find_by_id(id)
            .one(self.db_pool.as_ref())
            .await
            .map_err(ServiceError::db_error)?
            .ok_or_else(|| ServiceError::NotFound("Training plan not found".to_string()))
    }

    #[instrument(skip(self, patch))]
    pub async fn update(
        &self,
        id: Uuid,
        patch: TrainingPlanPatch,
    ) -> Result<training_plan::Model, ServiceError> {
        let existing = self.get(id).await?;
        let mut active: training_plan::ActiveModel = existing.into();

        if let Some(name) = patch.training_name {
            active.training_name = Set(name);
        }
        if let Some(kind) = patch.training_type {
            active.training_type = Set(kind);
        }
        if let Some(date) = patch.schedule_date {
            active.schedule_date = Set(Some(date));
        }
        if let Some(cost) = patch.cost {
            active.cost = Set(Some(cost));
        }
        if let Some(max) = patch.max_attendees {
            active.max_attendees = Set(Some(max));
        }
        if let Some(remarks) = patch.remarks {
            active.remarks = Set(Some(remarks));
        }
        if let Some(status) = patch.status {
            active.status = Set(status);
        }
        active.updated_at = Set(Some(Utc::now().naive_utc()));

        active
            .update(self.db_pool.as_ref())
            .await
            .map_err(ServiceError::db_error)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        let existing = self.get(id).await?;
        training_plan::Entity::delete_by_id(existing.id)
            .exec(self.db_pool.as_ref())
            .await
            .map_err(ServiceError::db_error)?;

        self.event_sender
            .send(Event::TrainingPlanDeleted(id))
            .await
            .map_err(ServiceError::EventError)?;

        Ok(())
    }
}
