//! Meetings with embedded attendees and action items.

use std::sync::Arc;

use chrono::{NaiveDateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::Serialize;
use tracing::instrument;
use uuid::Uuid;

use crate::db::DbPool;
use crate::entities::{meeting, meeting_action_item, meeting_attendee, user};
use crate::errors::ServiceError;
use crate::events::{Event, EventSender};

#[derive(Debug, Clone, Serialize)]
pub struct MeetingDetails {
    #[serde(flatten)]
    pub meeting: meeting::Model,
    pub attendees: Vec<meeting_attendee::Model>,
    pub action_items: Vec<meeting_action_item::Model>,
}

#[derive(Clone)]
pub struct MeetingService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
}

impl MeetingService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    /// Meetings newest first with attendees and action items embedded.
    pub async fn list(&self) -> Result<Vec<MeetingDetails>, ServiceError> {
        let db = self.db_pool.as_ref();
        let meetings = meeting::Entity::find()
            .order_by_desc(meeting::Column::MeetingDate)
            .all(db)
            .await
            .map_err(ServiceError::db_error)?;

        let mut details = Vec::with_capacity(meetings.len());
        for m in meetings {
            let attendees = meeting_attendee::Entity::find()
                .filter(meeting_attendee::Column::MeetingId.eq(m.id))
                .all(db)
                .await
                .map_err(ServiceError::db_error)?;
            let action_items = meeting_action_item::Entity::find()
                .filter(meeting_action_item::Column::MeetingId.eq(m.id))
                .all(db)
                .await
                .map_err(ServiceError::db_error)?;
            details.push(MeetingDetails {
                meeting: m,
                attendees,
                action_items,
            });
        }
        Ok(details)
    }

    /// Schedule a meeting as `Draft`. The organizer falls back to the first
    /// user on record when no session identity is supplied.
    #[instrument(skip(self))]
    pub async fn create(
        &self,
        title: String,
        meeting_date: NaiveDateTime,
        location: Option<String>,
        minutes_content: Option<String>,
        organizer_id: Option<Uuid>,
    ) -> Result<MeetingDetails, ServiceError> {
        let db = self.db_pool.as_ref();

        let organizer_id = match organizer_id {
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

        let created = meeting::ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(title),
            meeting_date: Set(meeting_date),
            location: Set(location),
            organizer_id: Set(organizer_id),
            minutes_content: Set(minutes_content),
            status: Set("Draft".to_string()),
            created_at: Set(Utc::now().naive_utc()),
            updated_at: Set(None),
        }
        .insert(db)
        .await
        .map_err(ServiceError::db_error)?;

        self.event_sender
            .send(Event::MeetingScheduled(created.id))
            .await
            .map_err(ServiceError::EventError)?;

        Ok(MeetingDetails {
            meeting: created,
            attendees: Vec::new(),
            action_items: Vec::new(),
        })
    }
}
