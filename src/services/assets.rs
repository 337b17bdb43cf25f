//! IT asset inventory: registration and the available-for-handover view.

use std::sync::Arc;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::instrument;
use uuid::Uuid;

use crate::db::DbPool;
use crate::entities::it_asset::{self, AssetStatus};
use crate::errors::ServiceError;
use crate::events::{Event, EventSender};

#[derive(Clone)]
pub struct AssetService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
}

impl AssetService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    /// Assets that can be put on a handover, sorted by type then tag.
    pub async fn list_available(&self) -> Result<Vec<it_asset::Model>, ServiceError> {
        it_asset::Entity::find()
            .filter(it_asset::Column::Status.eq(AssetStatus::Available.as_str()))
            .order_by_asc(it_asset::Column::AssetType)
            .order_by_asc(it_asset::Column::AssetTag)
            .all(self.db_pool.as_ref())
            .await
            .map_err(ServiceError::db_error)
    }

    #[instrument(skip(self))]
    pub async fn register_asset(
        &self,
        asset_tag: String,
        asset_type: String,
        brand: Option<String>,
        model: Option<String>,
        serial_number: Option<String>,
        condition: Option<String>,
    ) -> Result<it_asset::Model, ServiceError> {
        let db = self.db_pool.as_ref();

        let existing = it_asset::Entity::find()
            .filter(it_asset::Column::AssetTag.eq(asset_tag.clone()))
            .one(db)
            .await
            .map_err(ServiceError::db_error)?;
        if existing.is_some() {
            return Err(ServiceError::ValidationError(
                "Asset with this tag already exists".to_string(),
            ));
        }

        let created = it_asset::ActiveModel {
            id: Set(Uuid::new_v4()),
            asset_tag: Set(asset_tag),
            asset_type: Set(asset_type),
            brand: Set(brand),
            model: Set(model),
            serial_number: Set(serial_number),
            condition: Set(condition),
            status: Set(AssetStatus::Available.as_str().to_string()),
            assigned_to: Set(None),
            assigned_date: Set(None),
            created_at: Set(Utc::now().naive_utc()),
            updated_at: Set(None),
        }
        .insert(db)
        .await
        .map_err(ServiceError::db_error)?;

        self.event_sender
            .send(Event::AssetRegistered(created.id))
            .await
            .map_err(ServiceError::EventError)?;

        Ok(created)
    }
}
