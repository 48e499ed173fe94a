//! `RecordSetRepository` implementation for `SqliteStore`.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

use dns_batcher_core::error::{CoreError, CoreResult};
use dns_batcher_core::traits::RecordSetRepository;
use dns_batcher_core::types::{RecordData, RecordSet, RecordType};

use super::entity::record_set;
use super::SqliteStore;

/// String form of a record type, matching its wire serialization.
pub(crate) fn record_type_to_string(record_type: RecordType) -> CoreResult<String> {
    serde_json::to_value(record_type)
        .ok()
        .and_then(|v| v.as_str().map(String::from))
        .ok_or_else(|| CoreError::SerializationError("Invalid record type".to_string()))
}

/// Parse a stored record-type string back into the domain enum.
pub(crate) fn record_type_from_string(raw: &str) -> CoreResult<RecordType> {
    serde_json::from_value(serde_json::Value::String(raw.to_string()))
        .map_err(|e| CoreError::SerializationError(format!("Invalid record type '{raw}': {e}")))
}

impl record_set::Model {
    /// Convert a `SeaORM` row model into a domain `RecordSet`.
    fn into_record_set(self) -> CoreResult<RecordSet> {
        let record_type = record_type_from_string(&self.record_type)?;
        let records: Vec<RecordData> = serde_json::from_str(&self.records)
            .map_err(|e| CoreError::SerializationError(format!("Invalid records: {e}")))?;
        let ttl = u32::try_from(self.ttl)
            .map_err(|e| CoreError::SerializationError(format!("Invalid ttl: {e}")))?;

        Ok(RecordSet {
            id: self.id,
            zone_id: self.zone_id,
            name: self.name,
            record_type,
            ttl,
            records,
        })
    }
}

#[async_trait]
impl RecordSetRepository for SqliteStore {
    async fn get_record_sets_by_name(
        &self,
        zone_id: &str,
        record_name: &str,
    ) -> CoreResult<Vec<RecordSet>> {
        let rows = record_set::Entity::find()
            .filter(record_set::Column::ZoneId.eq(zone_id))
            .filter(record_set::Column::Name.eq(record_name.to_ascii_lowercase()))
            .all(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to query record sets: {e}")))?;

        rows.into_iter()
            .map(record_set::Model::into_record_set)
            .collect()
    }
}
