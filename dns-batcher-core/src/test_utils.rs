//! Test helpers: mock adapters and factory methods.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use dns_batcher_record::name;

use crate::error::{CoreError, CoreResult};
use crate::services::{BatchChangeService, ServiceContext};
use crate::traits::{
    BatchChangeConverter, BatchChangeRepository, RecordSetRepository, ZoneRepository,
};
use crate::types::{
    AuthPrincipal, BatchChange, BatchChangeSummaryList, BatchConfig, ExistingRecordSets,
    ExistingZones, RecordSet, Zone, ZoneAccessControl,
};

// ===== MockZoneRepository =====

pub(crate) struct MockZoneRepository {
    zones: RwLock<Vec<Zone>>,
}

impl MockZoneRepository {
    pub(crate) fn new() -> Self {
        Self {
            zones: RwLock::new(Vec::new()),
        }
    }

    pub(crate) fn with_zones(zones: Vec<Zone>) -> Self {
        Self {
            zones: RwLock::new(zones),
        }
    }

    pub(crate) async fn add_zone(&self, zone: Zone) {
        self.zones.write().await.push(zone);
    }
}

#[async_trait]
impl ZoneRepository for MockZoneRepository {
    async fn get_zones_by_names(
        &self,
        names: &std::collections::HashSet<String>,
    ) -> CoreResult<Vec<Zone>> {
        let wanted: std::collections::HashSet<String> = names
            .iter()
            .map(|n| name::ensure_trailing_dot(n).to_ascii_lowercase())
            .collect();
        Ok(self
            .zones
            .read()
            .await
            .iter()
            .filter(|zone| {
                wanted.contains(&name::ensure_trailing_dot(&zone.name).to_ascii_lowercase())
            })
            .cloned()
            .collect())
    }

    async fn get_zones_by_filters(
        &self,
        filters: &std::collections::HashSet<String>,
    ) -> CoreResult<Vec<Zone>> {
        Ok(self
            .zones
            .read()
            .await
            .iter()
            .filter(|zone| {
                let zone_name = zone.name.to_ascii_lowercase();
                filters
                    .iter()
                    .any(|filter| zone_name.contains(&filter.to_ascii_lowercase()))
            })
            .cloned()
            .collect())
    }
}

// ===== MockRecordSetRepository =====

pub(crate) struct MockRecordSetRepository {
    record_sets: RwLock<Vec<RecordSet>>,
    lookup_count: RwLock<usize>,
}

impl MockRecordSetRepository {
    pub(crate) fn new() -> Self {
        Self {
            record_sets: RwLock::new(Vec::new()),
            lookup_count: RwLock::new(0),
        }
    }

    pub(crate) fn with_record_sets(record_sets: Vec<RecordSet>) -> Self {
        Self {
            record_sets: RwLock::new(record_sets),
            lookup_count: RwLock::new(0),
        }
    }

    pub(crate) async fn add_record_set(&self, record_set: RecordSet) {
        self.record_sets.write().await.push(record_set);
    }

    /// Number of `get_record_sets_by_name` calls observed.
    pub(crate) async fn lookup_count(&self) -> usize {
        *self.lookup_count.read().await
    }
}

#[async_trait]
impl RecordSetRepository for MockRecordSetRepository {
    async fn get_record_sets_by_name(
        &self,
        zone_id: &str,
        record_name: &str,
    ) -> CoreResult<Vec<RecordSet>> {
        *self.lookup_count.write().await += 1;
        Ok(self
            .record_sets
            .read()
            .await
            .iter()
            .filter(|rs| {
                rs.zone_id == zone_id && rs.name.eq_ignore_ascii_case(record_name)
            })
            .cloned()
            .collect())
    }
}

// ===== MockBatchChangeRepository =====

pub(crate) struct MockBatchChangeRepository {
    batches: RwLock<HashMap<String, BatchChange>>,
    insertion_order: RwLock<Vec<String>>,
    save_error: RwLock<Option<String>>,
}

impl MockBatchChangeRepository {
    pub(crate) fn new() -> Self {
        Self {
            batches: RwLock::new(HashMap::new()),
            insertion_order: RwLock::new(Vec::new()),
            save_error: RwLock::new(None),
        }
    }

    /// If `Some`, every save fails with this message (for converter-failure
    /// and cleanup-path tests).
    pub(crate) async fn set_save_error(&self, error: Option<String>) {
        *self.save_error.write().await = error;
    }

    pub(crate) async fn stored_count(&self) -> usize {
        self.batches.read().await.len()
    }
}

#[async_trait]
impl BatchChangeRepository for MockBatchChangeRepository {
    async fn save(&self, batch: &BatchChange) -> CoreResult<BatchChange> {
        if let Some(ref msg) = *self.save_error.read().await {
            return Err(CoreError::StorageError(msg.clone()));
        }
        let mut batches = self.batches.write().await;
        if !batches.contains_key(&batch.id) {
            self.insertion_order.write().await.push(batch.id.clone());
        }
        batches.insert(batch.id.clone(), batch.clone());
        Ok(batch.clone())
    }

    async fn get_batch_change(&self, id: &str) -> CoreResult<Option<BatchChange>> {
        Ok(self.batches.read().await.get(id).cloned())
    }

    async fn get_batch_change_summaries_by_user_id(
        &self,
        user_id: &str,
        start_from: Option<u64>,
        max_items: usize,
    ) -> CoreResult<BatchChangeSummaryList> {
        let batches = self.batches.read().await;
        let order = self.insertion_order.read().await;

        // Most recent first.
        let user_batches: Vec<&BatchChange> = order
            .iter()
            .rev()
            .filter_map(|id| batches.get(id))
            .filter(|batch| batch.user_id == user_id)
            .collect();

        let offset = start_from.unwrap_or(0) as usize;
        let page: Vec<_> = user_batches
            .iter()
            .skip(offset)
            .take(max_items)
            .map(|batch| batch.summary())
            .collect();

        let next_id = if offset + page.len() < user_batches.len() {
            Some((offset + page.len()) as u64)
        } else {
            None
        };

        Ok(BatchChangeSummaryList {
            batch_changes: page,
            start_from,
            next_id,
            max_items,
        })
    }
}

// ===== MockBatchChangeConverter =====

/// Persists through the mock repository, mimicking the real converter's
/// ownership of the persistence boundary.
pub(crate) struct MockBatchChangeConverter {
    repository: Arc<MockBatchChangeRepository>,
    fail: RwLock<bool>,
}

impl MockBatchChangeConverter {
    pub(crate) fn new(repository: Arc<MockBatchChangeRepository>) -> Self {
        Self {
            repository,
            fail: RwLock::new(false),
        }
    }

    pub(crate) async fn set_fail(&self, fail: bool) {
        *self.fail.write().await = fail;
    }
}

#[async_trait]
impl BatchChangeConverter for MockBatchChangeConverter {
    async fn send_batch_for_processing(
        &self,
        batch: &BatchChange,
        _zones: &ExistingZones,
        _record_sets: &ExistingRecordSets,
    ) -> CoreResult<BatchChange> {
        if *self.fail.read().await {
            return Err(CoreError::ConversionError(
                "change processor unavailable".to_string(),
            ));
        }
        self.repository.save(batch).await
    }
}

// ===== Factory methods =====

/// Mocks behind a test service, for assertions after the call.
pub(crate) struct TestMocks {
    pub(crate) zone_repository: Arc<MockZoneRepository>,
    pub(crate) record_set_repository: Arc<MockRecordSetRepository>,
    pub(crate) batch_change_repository: Arc<MockBatchChangeRepository>,
    pub(crate) batch_converter: Arc<MockBatchChangeConverter>,
}

/// A `ServiceContext` with fresh, empty mocks.
pub(crate) fn test_context(config: BatchConfig) -> ServiceContext {
    let batch_change_repository = Arc::new(MockBatchChangeRepository::new());
    ServiceContext::new(
        Arc::new(MockZoneRepository::new()),
        Arc::new(MockRecordSetRepository::new()),
        batch_change_repository.clone(),
        Arc::new(MockBatchChangeConverter::new(batch_change_repository)),
        config,
    )
    .unwrap()
}

/// A `BatchChangeService` over fresh mocks.
pub(crate) fn create_test_service(config: BatchConfig) -> (BatchChangeService, TestMocks) {
    let zone_repository = Arc::new(MockZoneRepository::new());
    let record_set_repository = Arc::new(MockRecordSetRepository::new());
    let batch_change_repository = Arc::new(MockBatchChangeRepository::new());
    let batch_converter = Arc::new(MockBatchChangeConverter::new(
        batch_change_repository.clone(),
    ));

    let ctx = Arc::new(
        ServiceContext::new(
            zone_repository.clone(),
            record_set_repository.clone(),
            batch_change_repository.clone(),
            batch_converter.clone(),
            config,
        )
        .unwrap(),
    );

    (
        BatchChangeService::new(ctx),
        TestMocks {
            zone_repository,
            record_set_repository,
            batch_change_repository,
            batch_converter,
        },
    )
}

/// A zone administered by `grp-a`.
pub(crate) fn test_zone(id: &str, zone_name: &str) -> Zone {
    Zone::new(id, zone_name, ZoneAccessControl::new("grp-a"))
}

/// A principal belonging to `grp-a`.
pub(crate) fn test_auth() -> AuthPrincipal {
    AuthPrincipal::new("user-1", "jdoe", vec!["grp-a".to_string()])
}
