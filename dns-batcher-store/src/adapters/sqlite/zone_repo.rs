//! `ZoneRepository` implementation for `SqliteStore`.

use std::collections::HashSet;

use async_trait::async_trait;
use sea_orm::ActiveValue::Set;
use sea_orm::{ColumnTrait, Condition, EntityTrait, QueryFilter};

use dns_batcher_core::error::{CoreError, CoreResult};
use dns_batcher_core::traits::ZoneRepository;
use dns_batcher_core::types::{Zone, ZoneAccessControl};

use super::entity::zone;
use super::SqliteStore;

impl zone::Model {
    /// Convert a `SeaORM` row model into a domain `Zone`.
    fn into_zone(self) -> CoreResult<Zone> {
        let allowed_group_ids: Vec<String> =
            serde_json::from_str(&self.allowed_group_ids).map_err(|e| {
                CoreError::SerializationError(format!("Invalid allowed_group_ids: {e}"))
            })?;

        Ok(Zone {
            id: self.id,
            name: self.name,
            access_control: ZoneAccessControl {
                admin_group_id: self.admin_group_id,
                allowed_group_ids,
            },
        })
    }
}

/// Convert a domain `Zone` into a `SeaORM` active model for upsert.
///
/// Zone names are stored lowercased so lookups can match case-insensitively.
pub(crate) fn zone_to_active_model(zone: &Zone) -> CoreResult<zone::ActiveModel> {
    let allowed_group_ids = serde_json::to_string(&zone.access_control.allowed_group_ids)
        .map_err(|e| CoreError::SerializationError(format!("Invalid allowed_group_ids: {e}")))?;

    Ok(zone::ActiveModel {
        id: Set(zone.id.clone()),
        name: Set(zone.name.to_ascii_lowercase()),
        admin_group_id: Set(zone.access_control.admin_group_id.clone()),
        allowed_group_ids: Set(allowed_group_ids),
    })
}

#[async_trait]
impl ZoneRepository for SqliteStore {
    async fn get_zones_by_names(&self, names: &HashSet<String>) -> CoreResult<Vec<Zone>> {
        if names.is_empty() {
            return Ok(Vec::new());
        }

        let wanted: Vec<String> = names.iter().map(|n| n.to_ascii_lowercase()).collect();
        let rows = zone::Entity::find()
            .filter(zone::Column::Name.is_in(wanted))
            .all(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to query zones: {e}")))?;

        rows.into_iter().map(zone::Model::into_zone).collect()
    }

    async fn get_zones_by_filters(&self, filters: &HashSet<String>) -> CoreResult<Vec<Zone>> {
        if filters.is_empty() {
            return Ok(Vec::new());
        }

        let mut condition = Condition::any();
        for filter in filters {
            condition = condition.add(zone::Column::Name.contains(filter.to_ascii_lowercase()));
        }

        let rows = zone::Entity::find()
            .filter(condition)
            .all(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to query zones: {e}")))?;

        rows.into_iter().map(zone::Model::into_zone).collect()
    }
}
