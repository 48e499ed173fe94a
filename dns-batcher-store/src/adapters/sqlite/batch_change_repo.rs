//! `BatchChangeRepository` implementation for `SqliteStore`.

use async_trait::async_trait;
use sea_orm::ActiveValue::Set;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect};

use dns_batcher_core::error::{CoreError, CoreResult};
use dns_batcher_core::traits::BatchChangeRepository;
use dns_batcher_core::types::{
    BatchChange, BatchChangeStatus, BatchChangeSummary, BatchChangeSummaryList, ChangeKind,
    RecordData, SingleChange, SingleChangeStatus,
};

use super::entity::{batch_change, single_change};
use super::record_set_repo::{record_type_from_string, record_type_to_string};
use super::SqliteStore;

/// Serialize a unit enum to its wire string (`"Pending"`, `"Add"`, ...).
fn enum_to_string<T: serde::Serialize>(value: &T, what: &str) -> CoreResult<String> {
    serde_json::to_value(value)
        .ok()
        .and_then(|v| v.as_str().map(String::from))
        .ok_or_else(|| CoreError::SerializationError(format!("Invalid {what}")))
}

/// Parse a stored enum string back to its domain form.
fn enum_from_string<T: serde::de::DeserializeOwned>(raw: &str, what: &str) -> CoreResult<T> {
    serde_json::from_value(serde_json::Value::String(raw.to_string()))
        .map_err(|e| CoreError::SerializationError(format!("Invalid {what} '{raw}': {e}")))
}

fn parse_created_at(raw: &str) -> CoreResult<chrono::DateTime<chrono::Utc>> {
    chrono::DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&chrono::Utc))
        .map_err(|e| CoreError::SerializationError(format!("Invalid created_at: {e}")))
}

impl batch_change::Model {
    fn into_summary(self) -> CoreResult<BatchChangeSummary> {
        let status: BatchChangeStatus = enum_from_string(&self.status, "status")?;
        let created_timestamp = parse_created_at(&self.created_at)?;
        let total_changes = usize::try_from(self.change_count)
            .map_err(|e| CoreError::SerializationError(format!("Invalid change_count: {e}")))?;

        Ok(BatchChangeSummary {
            id: self.id,
            user_id: self.user_id,
            user_name: self.user_name,
            comments: self.comments,
            created_timestamp,
            total_changes,
            status,
        })
    }
}

impl single_change::Model {
    fn into_single_change(self) -> CoreResult<SingleChange> {
        let change_type: ChangeKind = enum_from_string(&self.change_type, "change_type")?;
        let record_type = record_type_from_string(&self.record_type)?;
        let status: SingleChangeStatus = enum_from_string(&self.status, "status")?;
        let ttl = self
            .ttl
            .map(|t| {
                u32::try_from(t)
                    .map_err(|e| CoreError::SerializationError(format!("Invalid ttl: {e}")))
            })
            .transpose()?;
        let record: Option<RecordData> = self
            .record_data
            .as_deref()
            .map(serde_json::from_str)
            .transpose()
            .map_err(|e| CoreError::SerializationError(format!("Invalid record_data: {e}")))?;

        Ok(SingleChange {
            id: self.id,
            change_type,
            input_name: self.input_name,
            record_type,
            ttl,
            record,
            zone_id: self.zone_id,
            zone_name: self.zone_name,
            record_name: self.record_name,
            status,
            system_message: self.system_message,
        })
    }
}

fn batch_to_active_model(batch: &BatchChange) -> CoreResult<batch_change::ActiveModel> {
    let change_count = i32::try_from(batch.changes.len())
        .map_err(|e| CoreError::SerializationError(format!("Invalid change count: {e}")))?;

    Ok(batch_change::ActiveModel {
        id: Set(batch.id.clone()),
        user_id: Set(batch.user_id.clone()),
        user_name: Set(batch.user_name.clone()),
        comments: Set(batch.comments.clone()),
        created_at: Set(batch.created_timestamp.to_rfc3339()),
        status: Set(enum_to_string(&batch.status, "status")?),
        change_count: Set(change_count),
    })
}

fn single_to_active_model(
    batch_id: &str,
    position: usize,
    change: &SingleChange,
) -> CoreResult<single_change::ActiveModel> {
    let record_data = change
        .record
        .as_ref()
        .map(serde_json::to_string)
        .transpose()
        .map_err(|e| CoreError::SerializationError(format!("Invalid record_data: {e}")))?;
    let position = i32::try_from(position)
        .map_err(|e| CoreError::SerializationError(format!("Invalid position: {e}")))?;

    Ok(single_change::ActiveModel {
        id: Set(change.id.clone()),
        batch_change_id: Set(batch_id.to_string()),
        position: Set(position),
        change_type: Set(enum_to_string(&change.change_type, "change_type")?),
        input_name: Set(change.input_name.clone()),
        record_type: Set(record_type_to_string(change.record_type)?),
        ttl: Set(change.ttl.map(i64::from)),
        record_data: Set(record_data),
        zone_id: Set(change.zone_id.clone()),
        zone_name: Set(change.zone_name.clone()),
        record_name: Set(change.record_name.clone()),
        status: Set(enum_to_string(&change.status, "status")?),
        system_message: Set(change.system_message.clone()),
    })
}

#[async_trait]
impl BatchChangeRepository for SqliteStore {
    async fn save(&self, batch: &BatchChange) -> CoreResult<BatchChange> {
        let active_model = batch_to_active_model(batch)?;

        batch_change::Entity::insert(active_model)
            .on_conflict(
                sea_orm::sea_query::OnConflict::column(batch_change::Column::Id)
                    .update_columns([
                        batch_change::Column::Comments,
                        batch_change::Column::Status,
                        batch_change::Column::ChangeCount,
                    ])
                    .to_owned(),
            )
            .exec(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to save batch change: {e}")))?;

        // Replace the single-change rows wholesale; positions are rewritten
        // from the in-memory order.
        single_change::Entity::delete_many()
            .filter(single_change::Column::BatchChangeId.eq(batch.id.clone()))
            .exec(&self.db)
            .await
            .map_err(|e| {
                CoreError::StorageError(format!("Failed to clear single changes: {e}"))
            })?;

        let rows = batch
            .changes
            .iter()
            .enumerate()
            .map(|(position, change)| single_to_active_model(&batch.id, position, change))
            .collect::<CoreResult<Vec<_>>>()?;

        if !rows.is_empty() {
            single_change::Entity::insert_many(rows)
                .exec(&self.db)
                .await
                .map_err(|e| {
                    CoreError::StorageError(format!("Failed to save single changes: {e}"))
                })?;
        }

        Ok(batch.clone())
    }

    async fn get_batch_change(&self, id: &str) -> CoreResult<Option<BatchChange>> {
        let Some(row) = batch_change::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to query batch change: {e}")))?
        else {
            return Ok(None);
        };

        let change_rows = single_change::Entity::find()
            .filter(single_change::Column::BatchChangeId.eq(id))
            .order_by_asc(single_change::Column::Position)
            .all(&self.db)
            .await
            .map_err(|e| {
                CoreError::StorageError(format!("Failed to query single changes: {e}"))
            })?;

        let changes = change_rows
            .into_iter()
            .map(single_change::Model::into_single_change)
            .collect::<CoreResult<Vec<_>>>()?;

        let status: BatchChangeStatus = enum_from_string(&row.status, "status")?;
        let created_timestamp = parse_created_at(&row.created_at)?;

        Ok(Some(BatchChange {
            id: row.id,
            user_id: row.user_id,
            user_name: row.user_name,
            comments: row.comments,
            created_timestamp,
            changes,
            status,
        }))
    }

    async fn get_batch_change_summaries_by_user_id(
        &self,
        user_id: &str,
        start_from: Option<u64>,
        max_items: usize,
    ) -> CoreResult<BatchChangeSummaryList> {
        let offset = start_from.unwrap_or(0);

        // Fetch one extra row to learn whether another page exists.
        let rows = batch_change::Entity::find()
            .filter(batch_change::Column::UserId.eq(user_id))
            .order_by_desc(batch_change::Column::CreatedAt)
            .order_by_asc(batch_change::Column::Id)
            .offset(offset)
            .limit(max_items as u64 + 1)
            .all(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to query batch changes: {e}")))?;

        let has_more = rows.len() > max_items;
        let batch_changes = rows
            .into_iter()
            .take(max_items)
            .map(batch_change::Model::into_summary)
            .collect::<CoreResult<Vec<_>>>()?;

        let next_id = has_more.then(|| offset + batch_changes.len() as u64);

        Ok(BatchChangeSummaryList {
            batch_changes,
            start_from,
            next_id,
            max_items,
        })
    }
}
