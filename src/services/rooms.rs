//! Room inventory: listing plus the CSV bulk import with per-row error
//! collection and find-or-create of the campus/building/floor hierarchy.

use std::sync::Arc;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::Serialize;
use tracing::{info, instrument};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::db::DbPool;
use crate::entities::{building, campus, floor, room};
use crate::errors::ServiceError;
use crate::events::{Event, EventSender};

const REQUIRED_COLUMNS: [&str; 4] = ["Room Number", "Campus Name", "Building Name", "Floor Name"];

/// One data row addressed by header name.
struct RowCells<'a> {
    headers: &'a csv::StringRecord,
    record: &'a csv::StringRecord,
}

impl RowCells<'_> {
    fn get(&self, name: &str) -> Option<String> {
        self.headers
            .iter()
            .position(|h| h == name)
            .and_then(|i| self.record.get(i))
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }
}

/// Outcome of one import run. The import never aborts on a bad row; every
/// failure lands in `errors` with its 1-based spreadsheet row number.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RoomImportReport {
    pub success: usize,
    pub errors: Vec<String>,
    pub created: Vec<String>,
    pub summary: RoomImportSummary,
}

#[derive(Debug, Clone, Default, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoomImportSummary {
    pub total_rows: usize,
    pub campuses: Vec<String>,
    pub buildings: Vec<String>,
    pub room_types: Vec<String>,
}

#[derive(Clone)]
pub struct RoomService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
}

impl RoomService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    /// Full projection of every room, sorted by room number.
    pub async fn list_rooms(&self) -> Result<Vec<room::Model>, ServiceError> {
        room::Entity::find()
            .order_by_asc(room::Column::RoomNumber)
            .all(self.db_pool.as_ref())
            .await
            .map_err(ServiceError::db_error)
    }

    /// Import rooms from CSV text using the facilities spreadsheet headers.
    #[instrument(skip(self, csv_text))]
    pub async fn import_csv(&self, csv_text: &str) -> Result<RoomImportReport, ServiceError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(csv_text.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| ServiceError::ValidationError(format!("Unreadable CSV header: {}", e)))?
            .clone();

        if headers.is_empty() {
            return Err(ServiceError::ValidationError("CSV file is empty".to_string()));
        }

        let mut report = RoomImportReport {
            success: 0,
            errors: Vec::new(),
            created: Vec::new(),
            summary: RoomImportSummary::default(),
        };

        let db = self.db_pool.as_ref();

        // Spreadsheet row numbering: header is row 1, first data row is 2.
        for (index, record) in reader.records().enumerate() {
            let row_number = index + 2;
            report.summary.total_rows += 1;

            let record = match record {
                Ok(record) => record,
                Err(e) => {
                    report
                        .errors
                        .push(format!("Row {}: unreadable ({})", row_number, e));
                    continue;
                }
            };

            let cells = RowCells {
                headers: &headers,
                record: &record,
            };

            if REQUIRED_COLUMNS.iter().any(|col| cells.get(col).is_none()) {
                report.errors.push(format!(
                    "Row {}: Missing required fields (Room Number, Campus, Building, or Floor)",
                    row_number
                ));
                continue;
            }

            let room_number = cells.get("Room Number").unwrap();
            let campus_name = cells.get("Campus Name").unwrap();
            let building_name = cells.get("Building Name").unwrap();
            let floor_name = cells.get("Floor Name").unwrap();

            match self
                .import_row(
                    db,
                    &room_number,
                    &campus_name,
                    &building_name,
                    &floor_name,
                    &cells,
                )
                .await
            {
                Ok(true) => {
                    report.success += 1;
                    report.created.push(room_number.clone());
                    push_unique(&mut report.summary.campuses, &campus_name);
                    push_unique(&mut report.summary.buildings, &building_name);
                    if let Some(room_type) = cells.get("Room Type") {
                        push_unique(&mut report.summary.room_types, &room_type);
                    }
                }
                Ok(false) => {
                    report.errors.push(format!(
                        "Row {}: Room {} already exists",
                        row_number, room_number
                    ));
                }
                Err(e) => {
                    report
                        .errors
                        .push(format!("Row {}: {}", row_number, e));
                }
            }
        }

        info!(
            created = report.success,
            failed = report.errors.len(),
            "room import completed"
        );

        self.event_sender
            .send(Event::RoomsImported {
                created: report.success,
                failed: report.errors.len(),
                timestamp: Utc::now(),
            })
            .await
            .map_err(ServiceError::EventError)?;

        Ok(report)
    }

    /// Returns Ok(false) when the room number is already taken.
    async fn import_row(
        &self,
        db: &DatabaseConnection,
        room_number: &str,
        campus_name: &str,
        building_name: &str,
        floor_name: &str,
        cells: &RowCells<'_>,
    ) -> Result<bool, ServiceError> {
        let existing = room::Entity::find()
            .filter(room::Column::RoomNumber.eq(room_number))
            .one(db)
            .await
            .map_err(ServiceError::db_error)?;
        if existing.is_some() {
            return Ok(false);
        }

        let campus = self.find_or_create_campus(db, campus_name).await?;
        let building = self
            .find_or_create_building(db, campus.id, building_name)
            .await?;
        let floor = self
            .find_or_create_floor(db, building.id, floor_name)
            .await?;

        let now = Utc::now().naive_utc();
        room::ActiveModel {
            id: Set(Uuid::new_v4()),
            floor_id: Set(floor.id),
            room_number: Set(room_number.to_string()),
            campus_name: Set(campus_name.to_string()),
            building_name: Set(building_name.to_string()),
            floor_name: Set(floor_name.to_string()),
            ownership: Set(cells.get("Ownership")),
            owner: Set(cells.get("Owner")),
            customer_note: Set(cells.get("Customer Note")),
            other_remarks: Set(cells.get("Other Remarks")),
            room_size_sqm: Set(cells.get("Room Size (Sqm)").and_then(|v| v.parse().ok())),
            seating_capacity: Set(cells.get("Seating Capacity").and_then(|v| v.parse().ok())),
            room_height: Set(cells.get("Room Height")),
            paint_color_code: Set(cells.get("Paint Color Code")),
            room_category: Set(cells.get("Room Category")),
            room_type: Set(cells.get("Room Type")),
            elv_idf_bdf_room: Set(cells.get("ELV/IDF/BDF Room")),
            distance_meters: Set(cells.get("Distance (Meters)").and_then(|v| v.parse().ok())),
            remarks: Set(cells.get("Remarks")),
            current_status: Set("Active".to_string()),
            last_updated: Set(now),
            created_at: Set(now),
        }
        .insert(db)
        .await
        .map_err(ServiceError::db_error)?;

        Ok(true)
    }

    async fn find_or_create_campus(
        &self,
        db: &DatabaseConnection,
        name: &str,
    ) -> Result<campus::Model, ServiceError> {
        if let Some(found) = campus::Entity::find()
            .filter(campus::Column::CampusName.eq(name))
            .one(db)
            .await
            .map_err(ServiceError::db_error)?
        {
            return Ok(found);
        }

        campus::ActiveModel {
            id: Set(Uuid::new_v4()),
            campus_name: Set(name.to_string()),
            campus_code: Set(name.to_string()),
            created_at: Set(Utc::now().naive_utc()),
        }
        .insert(db)
        .await
        .map_err(ServiceError::db_error)
    }

    async fn find_or_create_building(
        &self,
        db: &DatabaseConnection,
        campus_id: Uuid,
        name: &str,
    ) -> Result<building::Model, ServiceError> {
        if let Some(found) = building::Entity::find()
            .filter(building::Column::CampusId.eq(campus_id))
            .filter(building::Column::BuildingName.eq(name))
            .one(db)
            .await
            .map_err(ServiceError::db_error)?
        {
            return Ok(found);
        }

        building::ActiveModel {
            id: Set(Uuid::new_v4()),
            campus_id: Set(campus_id),
            building_name: Set(name.to_string()),
            building_code: Set(name.to_string()),
            created_at: Set(Utc::now().naive_utc()),
        }
        .insert(db)
        .await
        .map_err(ServiceError::db_error)
    }

    async fn find_or_create_floor(
        &self,
        db: &DatabaseConnection,
        building_id: Uuid,
        name: &str,
    ) -> Result<floor::Model, ServiceError> {
        if let Some(found) = floor::Entity::find()
            .filter(floor::Column::BuildingId.eq(building_id))
            .filter(floor::Column::FloorName.eq(name))
            .one(db)
            .await
            .map_err(ServiceError::db_error)?
        {
            return Ok(found);
        }

        floor::ActiveModel {
            id: Set(Uuid::new_v4()),
            building_id: Set(building_id),
            floor_name: Set(name.to_string()),
            floor_code: Set(name.to_string()),
            created_at: Set(Utc::now().naive_utc()),
        }
        .insert(db)
        .await
        .map_err(ServiceError::db_error)
    }
}

fn push_unique(values: &mut Vec<String>, value: &str) {
    if !values.iter().any(|v| v == value) {
        values.push(value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_unique_deduplicates() {
        let mut values = Vec::new();
        push_unique(&mut values, "Main");
        push_unique(&mut values, "North");
        push_unique(&mut values, "Main");
        assert_eq!(values, vec!["Main".to_string(), "North".to_string()]);
    }
}
