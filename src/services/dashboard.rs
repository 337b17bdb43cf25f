//! Dashboard aggregation: headline counters plus a unified recent-activity
//! feed. A query failure degrades to zeroed stats so the dashboard never
//! breaks the page.

use std::sync::Arc;

use chrono::{Duration, NaiveDateTime, Utc};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect};
use serde::Serialize;
use tracing::warn;
use utoipa::ToSchema;

use crate::db::DbPool;
use crate::entities::{
    asset_handover, joiner_leaver_process, leave_application, meeting, room, team_attendance,
    training_plan,
};
use crate::errors::ServiceError;

const RECENT_WINDOW_HOURS: i64 = 24;
const RECENT_PER_SOURCE: u64 = 3;
const RECENT_FEED_CAP: usize = 10;

#[derive(Debug, Clone, Default, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub pending_leaves: u64,
    pub upcoming_meetings: u64,
    pub active_trainings: u64,
    pub team_present: u64,
    pub total_rooms: u64,
    pub pending_handovers: u64,
    pub joiner_leaver_processes: u64,
    pub recent_activity: Vec<ActivityItem>,
}

/// Compact four-counter summary for the operations landing page.
#[derive(Debug, Clone, Default, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OperationsStats {
    pub pending_leaves: u64,
    pub upcoming_meetings: u64,
    pub active_trainings: u64,
    pub team_present: u64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActivityItem {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub user: String,
    pub timestamp: NaiveDateTime,
    pub status: String,
}

#[derive(Clone)]
pub struct DashboardService {
    db_pool: Arc<DbPool>,
}

impl DashboardService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    /// Headline stats. Failures degrade to all-zero rather than erroring.
    pub async fn stats(&self) -> DashboardStats {
        match self.collect_stats().await {
            Ok(stats) => stats,
            Err(err) => {
                warn!(error = %err, "dashboard stats query failed; serving zeroed stats");
                DashboardStats::default()
            }
        }
    }

    pub async fn operations_stats(&self) -> OperationsStats {
        match self.collect_operations_stats().await {
            Ok(stats) => stats,
            Err(err) => {
                warn!(error = %err, "operations stats query failed; serving zeroed stats");
                OperationsStats::default()
            }
        }
    }

    async fn collect_operations_stats(&self) -> Result<OperationsStats, ServiceError> {
        let db = self.db_pool.as_ref();
        let now = Utc::now().naive_utc();
        let next_week = now + Duration::days(7);
        let today = now.date();

        let pending_leaves = leave_application::Entity::find()
            .filter(leave_application::Column::Status.eq("Pending"))
            .count(db)
            .await
            .map_err(ServiceError::db_error)?;

        let upcoming_meetings = meeting::Entity::find()
            .filter(meeting::Column::MeetingDate.gte(now))
            .filter(meeting::Column::MeetingDate.lte(next_week))
            .filter(meeting::Column::Status.ne("Cancelled"))
            .count(db)
            .await
            .map_err(ServiceError::db_error)?;

        let active_trainings = training_plan::Entity::find()
            .filter(training_plan::Column::Status.eq("Planned"))
            .count(db)
            .await
            .map_err(ServiceError::db_error)?;

        let team_present = team_attendance::Entity::find()
            .filter(team_attendance::Column::AttendanceDate.eq(today))
            .filter(team_attendance::Column::Status.eq("Present"))
            .count(db)
            .await
            .map_err(ServiceError::db_error)?;

        Ok(OperationsStats {
            pending_leaves,
            upcoming_meetings,
            active_trainings,
            team_present,
        })
    }

    async fn collect_stats(&self) -> Result<DashboardStats, ServiceError> {
        let db = self.db_pool.as_ref();
        let ops = self.collect_operations_stats().await?;

        let total_rooms = room::Entity::find()
            .filter(room::Column::CurrentStatus.eq("Active"))
            .count(db)
            .await
            .map_err(ServiceError::db_error)?;

        let pending_handovers = asset_handover::Entity::find()
            .filter(
                asset_handover::Column::Status
                    .is_in(["Draft".to_string(), "Pending Approval".to_string()]),
            )
            .count(db)
            .await
            .map_err(ServiceError::db_error)?;

        let joiner_leaver_processes = joiner_leaver_process::Entity::find()
            .filter(joiner_leaver_process::Column::IsDeleted.eq(false))
            .filter(
                joiner_leaver_process::Column::Status
                    .is_in(["Draft".to_string(), "In Progress".to_string()]),
            )
            .count(db)
            .await
            .map_err(ServiceError::db_error)?;

        let recent_activity = self.recent_activity().await?;

        Ok(DashboardStats {
            pending_leaves: ops.pending_leaves,
            upcoming_meetings: ops.upcoming_meetings,
            active_trainings: ops.active_trainings,
            team_present: ops.team_present,
            total_rooms,
            pending_handovers,
            joiner_leaver_processes,
            recent_activity,
        })
    }

    /// Unified feed over the last 24 hours, newest first, capped.
    async fn recent_activity(&self) -> Result<Vec<ActivityItem>, ServiceError> {
        let db = self.db_pool.as_ref();
        let cutoff = Utc::now().naive_utc() - Duration::hours(RECENT_WINDOW_HOURS);
        let mut feed = Vec::new();

        let leaves = leave_application::Entity::find()
            .filter(leave_application::Column::CreatedAt.gte(cutoff))
            .order_by_desc(leave_application::Column::CreatedAt)
            .limit(RECENT_PER_SOURCE)
            .all(db)
            .await
            .map_err(ServiceError::db_error)?;
        for leave in leaves {
            feed.push(ActivityItem {
                id: format!("leave-{}", leave.id),
                kind: "leave".to_string(),
                description: format!(
                    "New {} leave request submitted",
                    leave.leave_type.to_lowercase()
                ),
                user: leave.employee_id.to_string(),
                timestamp: leave.created_at,
                status: leave.status,
            });
        }

        let trainings = training_plan::Entity::find()
            .filter(training_plan::Column::CreatedAt.gte(cutoff))
            .order_by_desc(training_plan::Column::CreatedAt)
            .limit(RECENT_PER_SOURCE)
            .all(db)
            .await
            .map_err(ServiceError::db_error)?;
        for training in trainings {
            feed.push(ActivityItem {
                id: format!("training-{}", training.id),
                kind: "training".to_string(),
                description: format!("Training plan created: {}", training.training_name),
                user: training.created_by,
                timestamp: training.created_at,
                status: training.status,
            });
        }

        let handovers = asset_handover::Entity::find()
            .filter(asset_handover::Column::CreatedAt.gte(cutoff))
            .order_by_desc(asset_handover::Column::CreatedAt)
            .limit(RECENT_PER_SOURCE)
            .all(db)
            .await
            .map_err(ServiceError::db_error)?;
        for handover in handovers {
            feed.push(ActivityItem {
                id: format!("handover-{}", handover.id),
                kind: "handover".to_string(),
                description: format!(
                    "Equipment handover created for {}",
                    handover.employee_name
                ),
                user: handover.submitted_by,
                timestamp: handover.created_at,
                status: handover.status,
            });
        }

        let processes = joiner_leaver_process::Entity::find()
            .filter(joiner_leaver_process::Column::IsDeleted.eq(false))
            .filter(joiner_leaver_process::Column::CreatedAt.gte(cutoff))
            .order_by_desc(joiner_leaver_process::Column::CreatedAt)
            .limit(RECENT_PER_SOURCE)
            .all(db)
            .await
            .map_err(ServiceError::db_error)?;
        for process in processes {
            feed.push(ActivityItem {
                id: format!("joiner-leaver-{}", process.id),
                kind: "joiner-leaver".to_string(),
                description: format!(
                    "{} process started for {}",
                    process.process_type.to_lowercase(),
                    process.employee_name
                ),
                user: process.employee_name,
                timestamp: process.created_at,
                status: process.status,
            });
        }

        feed.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        feed.truncate(RECENT_FEED_CAP);
        Ok(feed)
    }
}
