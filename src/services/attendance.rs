//! Daily team attendance. Check-in/out arrive as `HH:MM` wall-clock strings
//! and are stored combined with the attendance date.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::Serialize;
use tracing::instrument;
use uuid::Uuid;

use crate::db::DbPool;
use crate::entities::{team_attendance, user};
use crate::errors::ServiceError;
use crate::events::{Event, EventSender};

/// An attendance row joined with the user's name and department, times
/// rendered back to `HH:MM`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub user_name: String,
    pub user_department: String,
    pub attendance_date: NaiveDate,
    pub status: String,
    pub check_in_time: Option<String>,
    pub check_out_time: Option<String>,
    pub remarks: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Partial update; `None` leaves the field untouched, `Some(None)` clears a
/// time.
#[derive(Debug, Clone, Default)]
pub struct AttendancePatch {
    pub status: Option<String>,
    pub check_in_time: Option<Option<String>>,
    pub check_out_time: Option<Option<String>>,
    pub remarks: Option<String>,
}

#[derive(Clone)]
pub struct AttendanceService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
}

impl AttendanceService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    /// Records, optionally restricted to a single date, newest first.
    pub async fn list(
        &self,
        date: Option<NaiveDate>,
    ) -> Result<Vec<AttendanceRecord>, ServiceError> {
        let mut query = team_attendance::Entity::find()
            .order_by_desc(team_attendance::Column::CreatedAt);
        if let Some(date) = date {
            query = query.filter(team_attendance::Column::AttendanceDate.eq(date));
        }

        let rows = query
            .all(self.db_pool.as_ref())
            .await
            .map_err(ServiceError::db_error)?;

        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            records.push(self.enrich(row).await?);
        }
        Ok(records)
    }

    /// Mark attendance; at most one row per user and date.
    #[instrument(skip(self))]
    pub async fn mark(
        &self,
        user_id: Uuid,
        attendance_date: NaiveDate,
        status: Option<String>,
        check_in_time: Option<String>,
        check_out_time: Option<String>,
        remarks: Option<String>,
    ) -> Result<AttendanceRecord, ServiceError> {
        let db = self.db_pool.as_ref();

        let existing = team_attendance::Entity::find()
            .filter(team_attendance::Column::UserId.eq(user_id))
            .filter(team_attendance::Column::AttendanceDate.eq(attendance_date))
            .one(db)
            .await
            .map_err(ServiceError::db_error)?;
        if existing.is_some() {
            return Err(ServiceError::ValidationError(
                "Attendance already marked for this user on this date".to_string(),
            ));
        }

        let check_in = check_in_time
            .as_deref()
            .filter(|v| !v.is_empty())
            .map(|v| combine_date_and_time(attendance_date, v))
            .transpose()?;
        let check_out = check_out_time
            .as_deref()
            .filter(|v| !v.is_empty())
            .map(|v| combine_date_and_time(attendance_date, v))
            .transpose()?;

        let created = team_attendance::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            attendance_date: Set(attendance_date),
            status: Set(status.unwrap_or_else(|| "Present".to_string())),
            check_in_time: Set(check_in),
            check_out_time: Set(check_out),
            remarks: Set(remarks),
            created_at: Set(Utc::now().naive_utc()),
        }
        .insert(db)
        .await
        .map_err(ServiceError::db_error)?;

        self.event_sender
            .send(Event::AttendanceMarked {
                user_id,
                attendance_date,
            })
            .await
            .map_err(ServiceError::EventError)?;

        self.enrich(created).await
    }

    pub async fn get(&self, id: Uuid) -> Result<AttendanceRecord, ServiceError> {
        let row = team_attendance::Entity::find_by_id(id)
            .one(self.db_pool.as_ref())
            .await
            .map_err(ServiceError::db_error)?
            .ok_or_else(|| ServiceError::NotFound("Attendance record not found".to_string()))?;
        self.enrich(row).await
    }

    #[instrument(skip(self, patch))]
    pub async fn update(
        &self,
        id: Uuid,
        patch: AttendancePatch,
    ) -> Result<AttendanceRecord, ServiceError> {
        let db = self.db_pool.as_ref();
        let row = team_attendance::Entity::find_by_id(id)
            .one(db)
            .await
            .map_err(ServiceError::db_error)?
            .ok_or_else(|| ServiceError::NotFound("Attendance record not found".to_string()))?;

        let attendance_date = row.attendance_date;
        let mut active: team_attendance::ActiveModel = row.into();

        if let Some(status) = patch.status {
            active.status = Set(status);
        }
        if let Some(remarks) = patch.remarks {
            active.remarks = Set(Some(remarks));
        }
        if let Some(check_in) = patch.check_in_time {
            active.check_in_time = Set(check_in
                .filter(|v| !v.is_empty())
                .map(|v| combine_date_and_time(attendance_date, &v))
                .transpose()?);
        }
        if let Some(check_out) = patch.check_out_time {
            active.check_out_time = Set(check_out
                .filter(|v| !v.is_empty())
                .map(|v| combine_date_and_time(attendance_date, &v))
                .transpose()?);
        }

        let updated = active.update(db).await.map_err(ServiceError::db_error)?;
        self.enrich(updated).await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        let row = team_attendance::Entity::find_by_id(id)
            .one(self.db_pool.as_ref())
            .await
            .map_err(ServiceError::db_error)?
            .ok_or_else(|| ServiceError::NotFound("Attendance record not found".to_string()))?;

        team_attendance::Entity::delete_by_id(row.id)
            .exec(self.db_pool.as_ref())
            .await
            .map_err(ServiceError::db_error)?;
        Ok(())
    }

    async fn enrich(
        &self,
        row: team_attendance::Model,
    ) -> Result<AttendanceRecord, ServiceError> {
        let owner = user::Entity::find_by_id(row.user_id)
            .one(self.db_pool.as_ref())
            .await
            .map_err(ServiceError::db_error)?;

        let (user_name, user_department) = match owner {
            Some(u) => (u.name, u.department),
            None => ("Unknown User".to_string(), "IT".to_string()),
        };

        Ok(AttendanceRecord {
            id: row.id,
            user_id: row.user_id,
            user_name,
            user_department,
            attendance_date: row.attendance_date,
            status: row.status,
            check_in_time: row.check_in_time.map(format_wall_clock),
            check_out_time: row.check_out_time.map(format_wall_clock),
            remarks: row.remarks,
            created_at: row.created_at,
        })
    }
}

/// Combine a date with an `HH:MM` string into a full timestamp.
pub fn combine_date_and_time(
    date: NaiveDate,
    wall_clock: &str,
) -> Result<NaiveDateTime, ServiceError> {
    let time = NaiveTime::parse_from_str(wall_clock, "%H:%M").map_err(|_| {
        ServiceError::ValidationError(format!(
            "Invalid time '{}': expected HH:MM",
            wall_clock
        ))
    })?;
    Ok(date.and_time(time))
}

/// Render a stored timestamp back to `HH:MM`.
pub fn format_wall_clock(ts: NaiveDateTime) -> String {
    ts.format("%H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combine_and_format_round_trip() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 5).unwrap();
        let ts = combine_date_and_time(date, "09:15").unwrap();
        assert_eq!(ts.date(), date);
        assert_eq!(format_wall_clock(ts), "09:15");
    }

    #[test]
    fn bad_wall_clock_is_rejected() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 5).unwrap();
        assert!(combine_date_and_time(date, "9am").is_err());
        assert!(combine_date_and_time(date, "25:00").is_err());
    }
}
