//! Joiner/leaver onboarding processes and their checklists.
//!
//! Progress counters on the process row are denormalized; every checklist
//! mutation recomputes them over the surviving (non-deleted) items and
//! re-derives the process status from the percentage.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::Serialize;
use tracing::instrument;
use uuid::Uuid;

use crate::db::DbPool;
use crate::entities::{joiner_leaver_checklist_item as checklist_item, joiner_leaver_process as process};
use crate::errors::ServiceError;
use crate::events::{Event, EventSender};

#[derive(Debug, Clone, Serialize)]
pub struct ProcessDetails {
    #[serde(flatten)]
    pub process: process::Model,
    pub checklist: Vec<checklist_item::Model>,
}

/// Input for one checklist item on process creation or append.
#[derive(Debug, Clone, Default)]
pub struct ChecklistItemInput {
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub is_required: bool,
    pub document_url: Option<String>,
}

/// Fields accepted by the full-update endpoint.
#[derive(Debug, Clone, Default)]
pub struct ProcessUpdate {
    pub employee_name: Option<String>,
    pub employee_id: Option<String>,
    pub department: Option<String>,
    pub position: Option<String>,
    pub manager: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<String>,
    pub notes: Option<String>,
}

#[derive(Clone)]
pub struct JoinerLeaverService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
}

impl JoinerLeaverService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    pub async fn list(&self) -> Result<Vec<ProcessDetails>, ServiceError> {
        let db = self.db_pool.as_ref();
        let processes = process::Entity::find()
            .filter(process::Column::IsDeleted.eq(false))
            .order_by_desc(process::Column::CreatedAt)
            .all(db)
            .await
            .map_err(ServiceError::db_error)?;

        let mut details = Vec::with_capacity(processes.len());
        for p in processes {
            let checklist = self.load_checklist(db, p.id).await?;
            details.push(ProcessDetails {
                process: p,
                checklist,
            });
        }
        Ok(details)
    }

    /// Create a process with its checklist in one shot. New processes start
    /// `In Progress` with zero completion.
    #[instrument(skip(self, checklist))]
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        process_type: String,
        employee_name: String,
        employee_id: Option<String>,
        department: Option<String>,
        position: Option<String>,
        manager: Option<String>,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        checklist: Vec<ChecklistItemInput>,
    ) -> Result<ProcessDetails, ServiceError> {
        if process_type.trim().is_empty() || employee_name.trim().is_empty() {
            return Err(ServiceError::ValidationError(
                "type and employeeName are required".to_string(),
            ));
        }

        let db = self.db_pool.as_ref();
        let now = Utc::now().naive_utc();

        let created = process::ActiveModel {
            id: Set(Uuid::new_v4()),
            process_type: Set(process_type),
            employee_name: Set(employee_name),
            employee_id: Set(employee_id),
            department: Set(department),
            position: Set(position),
            manager: Set(manager),
            start_date: Set(start_date),
            end_date: Set(end_date),
            status: Set("In Progress".to_string()),
            total_items: Set(checklist.len() as i32),
            completed_items: Set(0),
            progress_percentage: Set(0),
            notes: Set(None),
            is_deleted: Set(false),
            created_at: Set(now),
            updated_at: Set(None),
        }
        .insert(db)
        .await
        .map_err(ServiceError::db_error)?;

        if !checklist.is_empty() {
            let rows: Vec<checklist_item::ActiveModel> = checklist
                .into_iter()
                .enumerate()
                .map(|(index, item)| checklist_item::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    process_id: Set(created.id),
                    title: Set(item.title),
                    description: Set(item.description),
                    category: Set(item.category),
                    is_required: Set(item.is_required),
                    document_url: Set(item.document_url),
                    sort_order: Set(index as i32),
                    completed: Set(false),
                    completed_at: Set(None),
                    completed_by: Set(None),
                    completed_by_name: Set(None),
                    notes: Set(None),
                    is_deleted: Set(false),
                    created_at: Set(now),
                    updated_at: Set(None),
                })
                .collect();
            checklist_item::Entity::insert_many(rows)
                .exec(db)
                .await
                .map_err(ServiceError::db_error)?;
        }

        self.event_sender
            .send(Event::ProcessStarted(created.id))
            .await
            .map_err(ServiceError::EventError)?;

        let checklist = self.load_checklist(db, created.id).await?;
        Ok(ProcessDetails {
            process: created,
            checklist,
        })
    }

    pub async fn get(&self, id: Uuid) -> Result<ProcessDetails, ServiceError> {
        let db = self.db_pool.as_ref();
        let found = self.find_live_process(db, id).await?;
        let checklist = self.load_checklist(db, found.id).await?;
        Ok(ProcessDetails {
            process: found,
            checklist,
        })
    }

    #[instrument(skip(self, update))]
    pub async fn update(
        &self,
        id: Uuid,
        update: ProcessUpdate,
    ) -> Result<ProcessDetails, ServiceError> {
        let db = self.db_pool.as_ref();
        let found = self.find_live_process(db, id).await?;
        let mut active: process::ActiveModel = found.into();

        if let Some(name) = update.employee_name {
            active.employee_name = Set(name);
        }
        if let Some(employee_id) = update.employee_id {
            active.employee_id = Set(Some(employee_id));
        }
        if let Some(department) = update.department {
            active.department = Set(Some(department));
        }
        if let Some(position) = update.position {
            active.position = Set(Some(position));
        }
        if let Some(manager) = update.manager {
            active.manager = Set(Some(manager));
        }
        if let Some(start_date) = update.start_date {
            active.start_date = Set(Some(start_date));
        }
        if let Some(end_date) = update.end_date {
            active.end_date = Set(Some(end_date));
        }
        if let Some(status) = update.status {
            active.status = Set(status);
        }
        if let Some(notes) = update.notes {
            active.notes = Set(Some(notes));
        }
        active.updated_at = Set(Some(Utc::now().naive_utc()));

        let updated = active.update(db).await.map_err(ServiceError::db_error)?;
        let checklist = self.load_checklist(db, updated.id).await?;
        Ok(ProcessDetails {
            process: updated,
            checklist,
        })
    }

    /// Soft delete: the row stays for the audit trail but vanishes from
    /// every read.
    #[instrument(skip(self))]
    pub async fn soft_delete(&self, id: Uuid) -> Result<process::Model, ServiceError> {
        let db = self.db_pool.as_ref();
        let found = self.find_live_process(db, id).await?;
        let mut active: process::ActiveModel = found.into();
        active.is_deleted = Set(true);
        active.updated_at = Set(Some(Utc::now().naive_utc()));
        active.update(db).await.map_err(ServiceError::db_error)
    }

    /// Toggle one checklist item's completion and recompute the process
    /// counters. The item must belong to the given process.
    #[instrument(skip(self))]
    pub async fn toggle_checklist_item(
        &self,
        process_id: Uuid,
        item_id: Uuid,
        notes: Option<String>,
        actor: Option<(Uuid, String)>,
    ) -> Result<ProcessDetails, ServiceError> {
        let db = self.db_pool.as_ref();
        self.find_live_process(db, process_id).await?;

        let item = checklist_item::Entity::find_by_id(item_id)
            .one(db)
            .await
            .map_err(ServiceError::db_error)?
            .ok_or_else(|| ServiceError::NotFound("Checklist item not found".to_string()))?;

        if item.process_id != process_id {
            return Err(ServiceError::ValidationError(
                "Checklist item does not belong to this process".to_string(),
            ));
        }

        let completing = !item.completed;
        let existing_notes = item.notes.clone();
        let (completed_by, completed_by_name) = match (completing, actor) {
            (true, Some((actor_id, actor_name))) => (Some(actor_id), Some(actor_name)),
            _ => (None, None),
        };
        let mut active: checklist_item::ActiveModel = item.into();
        active.completed = Set(completing);
        active.completed_at = Set(completing.then(|| Utc::now().naive_utc()));
        active.completed_by = Set(completed_by);
        active.completed_by_name = Set(completed_by_name);
        active.notes = Set(notes.or(existing_notes));
        active.updated_at = Set(Some(Utc::now().naive_utc()));
        active.update(db).await.map_err(ServiceError::db_error)?;

        self.recompute_progress(db, process_id).await
    }

    /// Append a checklist item after the current tail and bump the totals.
    #[instrument(skip(self, input))]
    pub async fn add_checklist_item(
        &self,
        process_id: Uuid,
        input: ChecklistItemInput,
    ) -> Result<checklist_item::Model, ServiceError> {
        let db = self.db_pool.as_ref();
        self.find_live_process(db, process_id).await?;

        if input.title.trim().is_empty() {
            return Err(ServiceError::ValidationError(
                "title is required".to_string(),
            ));
        }

        let tail = checklist_item::Entity::find()
            .filter(checklist_item::Column::ProcessId.eq(process_id))
            .filter(checklist_item::Column::IsDeleted.eq(false))
            .order_by_desc(checklist_item::Column::SortOrder)
            .one(db)
            .await
            .map_err(ServiceError::db_error)?;
        let next_sort_order = tail.map(|t| t.sort_order + 1).unwrap_or(1);

        let created = checklist_item::ActiveModel {
            id: Set(Uuid::new_v4()),
            process_id: Set(process_id),
            title: Set(input.title),
            description: Set(input.description),
            category: Set(input.category),
            is_required: Set(input.is_required),
            document_url: Set(input.document_url),
            sort_order: Set(next_sort_order),
            completed: Set(false),
            completed_at: Set(None),
            completed_by: Set(None),
            completed_by_name: Set(None),
            notes: Set(None),
            is_deleted: Set(false),
            created_at: Set(Utc::now().naive_utc()),
            updated_at: Set(None),
        }
        .insert(db)
        .await
        .map_err(ServiceError::db_error)?;

        self.recompute_progress(db, process_id).await?;
        Ok(created)
    }

    /// Soft-delete a checklist item and recompute the counters.
    #[instrument(skip(self))]
    pub async fn remove_checklist_item(
        &self,
        process_id: Uuid,
        item_id: Uuid,
    ) -> Result<ProcessDetails, ServiceError> {
        let db = self.db_pool.as_ref();
        self.find_live_process(db, process_id).await?;

        let item = checklist_item::Entity::find_by_id(item_id)
            .one(db)
            .await
            .map_err(ServiceError::db_error)?
            .ok_or_else(|| ServiceError::NotFound("Checklist item not found".to_string()))?;

        if item.process_id != process_id {
            return Err(ServiceError::ValidationError(
                "Checklist item does not belong to this process".to_string(),
            ));
        }

        let mut active: checklist_item::ActiveModel = item.into();
        active.is_deleted = Set(true);
        active.updated_at = Set(Some(Utc::now().naive_utc()));
        active.update(db).await.map_err(ServiceError::db_error)?;

        self.recompute_progress(db, process_id).await
    }

    async fn find_live_process(
        &self,
        db: &DatabaseConnection,
        id: Uuid,
    ) -> Result<process::Model, ServiceError> {
        process::Entity::find_by_id(id)
            .filter(process::Column::IsDeleted.eq(false))
            .one(db)
            .await
            .map_err(ServiceError::db_error)?
            .ok_or_else(|| ServiceError::NotFound("Process not found".to_string()))
    }

    async fn load_checklist(
        &self,
        db: &DatabaseConnection,
        process_id: Uuid,
    ) -> Result<Vec<checklist_item::Model>, ServiceError> {
        checklist_item::Entity::find()
            .filter(checklist_item::Column::ProcessId.eq(process_id))
            .filter(checklist_item::Column::IsDeleted.eq(false))
            .order_by_asc(checklist_item::Column::SortOrder)
            .all(db)
            .await
            .map_err(ServiceError::db_error)
    }

    async fn recompute_progress(
        &self,
        db: &DatabaseConnection,
        process_id: Uuid,
    ) -> Result<ProcessDetails, ServiceError> {
        let checklist = self.load_checklist(db, process_id).await?;
        let completed = checklist.iter().filter(|item| item.completed).count();
        let (percentage, status) = progress(completed, checklist.len());

        let found = self.find_live_process(db, process_id).await?;
        let mut active: process::ActiveModel = found.into();
        active.completed_items = Set(completed as i32);
        active.total_items = Set(checklist.len() as i32);
        active.progress_percentage = Set(percentage);
        active.status = Set(status.to_string());
        active.updated_at = Set(Some(Utc::now().naive_utc()));
        let updated = active.update(db).await.map_err(ServiceError::db_error)?;

        self.event_sender
            .send(Event::ProcessChecklistUpdated {
                process_id,
                progress_percentage: percentage,
            })
            .await
            .map_err(ServiceError::EventError)?;

        Ok(ProcessDetails {
            process: updated,
            checklist,
        })
    }
}

/// Percentage (rounded) and derived status for a checklist state.
pub fn progress(completed: usize, total: usize) -> (i32, &'static str) {
    let percentage = if total > 0 {
        ((completed as f64 / total as f64) * 100.0).round() as i32
    } else {
        0
    };
    let status = match percentage {
        100 => "Completed",
        0 => "Draft",
        _ => "In Progress",
    };
    (percentage, status)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_rounds_and_derives_status() {
        assert_eq!(progress(0, 4), (0, "Draft"));
        assert_eq!(progress(1, 3), (33, "In Progress"));
        assert_eq!(progress(2, 3), (67, "In Progress"));
        assert_eq!(progress(4, 4), (100, "Completed"));
        assert_eq!(progress(0, 0), (0, "Draft"));
    }
}
