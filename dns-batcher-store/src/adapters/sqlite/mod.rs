//! SQLite-based unified store using `SeaORM`.
//!
//! A single `SqliteStore` implements `ZoneRepository`,
//! `RecordSetRepository`, and `BatchChangeRepository`, backed by a local
//! `SQLite` database.

mod batch_change_repo;
pub(crate) mod entity;
mod migration;
mod record_set_repo;
mod zone_repo;

use std::path::Path;

use dns_batcher_core::error::{CoreError, CoreResult};
use sea_orm::ActiveValue::Set;
use sea_orm::{Database, DatabaseConnection, EntityTrait};
use sea_orm_migration::MigratorTrait;

use dns_batcher_core::types::{RecordSet, Zone};

use migration::Migrator;

/// SQLite-based unified store.
///
/// Implements all three storage traits against a single `SQLite` database
/// file. Zone and record-set rows are written by zone sync; the intake
/// pipeline only reads them. The seed methods exist for sync tooling and
/// integration tests.
pub struct SqliteStore {
    /// Shared `SeaORM` database connection.
    pub(crate) db: DatabaseConnection,
}

impl SqliteStore {
    /// Create a new `SQLite` store.
    ///
    /// `db_path` is the path to the database file (created if not exists).
    ///
    /// # Errors
    /// Returns `CoreError::StorageError` if directory creation, database
    /// connection, or schema migration fails.
    pub async fn new(db_path: &Path) -> CoreResult<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| CoreError::StorageError(format!("Failed to create directory: {e}")))?;
        }

        let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
        let db = Database::connect(&db_url)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to connect to SQLite: {e}")))?;

        let store = Self { db };

        // Ensure schema is up to date before the store is used.
        Migrator::up(&store.db, None)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to run migrations: {e}")))?;

        Ok(store)
    }

    /// Insert or replace a zone row. Names are stored lowercased.
    ///
    /// # Errors
    /// Returns `CoreError::StorageError` on database failure.
    pub async fn insert_zone(&self, zone: &Zone) -> CoreResult<()> {
        let active_model = zone_repo::zone_to_active_model(zone)?;

        entity::zone::Entity::insert(active_model)
            .on_conflict(
                sea_orm::sea_query::OnConflict::column(entity::zone::Column::Id)
                    .update_columns([
                        entity::zone::Column::Name,
                        entity::zone::Column::AdminGroupId,
                        entity::zone::Column::AllowedGroupIds,
                    ])
                    .to_owned(),
            )
            .exec(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to save zone: {e}")))?;

        Ok(())
    }

    /// Insert or replace a record-set row. Names are stored lowercased.
    ///
    /// # Errors
    /// Returns `CoreError::StorageError` on database failure.
    pub async fn insert_record_set(&self, record_set: &RecordSet) -> CoreResult<()> {
        let records = serde_json::to_string(&record_set.records)
            .map_err(|e| CoreError::SerializationError(format!("Invalid records: {e}")))?;
        let record_type = record_set_repo::record_type_to_string(record_set.record_type)?;

        let active_model = entity::record_set::ActiveModel {
            id: Set(record_set.id.clone()),
            zone_id: Set(record_set.zone_id.clone()),
            name: Set(record_set.name.to_ascii_lowercase()),
            record_type: Set(record_type),
            ttl: Set(i64::from(record_set.ttl)),
            records: Set(records),
        };

        entity::record_set::Entity::insert(active_model)
            .on_conflict(
                sea_orm::sea_query::OnConflict::column(entity::record_set::Column::Id)
                    .update_columns([
                        entity::record_set::Column::ZoneId,
                        entity::record_set::Column::Name,
                        entity::record_set::Column::RecordType,
                        entity::record_set::Column::Ttl,
                        entity::record_set::Column::Records,
                    ])
                    .to_owned(),
            )
            .exec(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to save record set: {e}")))?;

        Ok(())
    }
}
