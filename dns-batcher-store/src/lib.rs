//! Platform-agnostic application bootstrap for dns-batcher.
//!
//! Provides `AppState` (service container), `AppStateBuilder` (adapter
//! injection), and the SQLite-backed storage adapters. Frontends construct
//! an `AppState` once at startup: inject the repositories (usually a single
//! [`adapters::SqliteStore`]) and the queue converter, and the builder
//! wires the core services.

pub mod adapters;

use std::sync::Arc;

use dns_batcher_core::error::{CoreError, CoreResult};
use dns_batcher_core::services::{BatchChangeService, ServiceContext};
use dns_batcher_core::traits::{
    BatchChangeConverter, BatchChangeRepository, RecordSetRepository, ZoneRepository,
};
use dns_batcher_core::types::BatchConfig;

use adapters::SqliteStore;

/// Platform-agnostic application state.
///
/// Holds the `ServiceContext` and the services built over it. Every
/// frontend constructs this once at startup via [`AppStateBuilder`].
pub struct AppState {
    /// Shared service context containing all repository/queue adapters.
    pub ctx: Arc<ServiceContext>,
    /// The batch-change intake service.
    pub batch_change_service: Arc<BatchChangeService>,
}

/// Builder for constructing `AppState` with platform-specific adapters.
///
/// # Required adapters
/// - zone repository, record-set repository, batch-change repository —
///   usually a single [`SqliteStore`] via [`Self::sqlite_store`]
/// - `batch_converter` — the queue handoff
///
/// # Optional
/// - `config` — defaults to [`BatchConfig::default`]
pub struct AppStateBuilder {
    zone_repository: Option<Arc<dyn ZoneRepository>>,
    record_set_repository: Option<Arc<dyn RecordSetRepository>>,
    batch_change_repository: Option<Arc<dyn BatchChangeRepository>>,
    batch_converter: Option<Arc<dyn BatchChangeConverter>>,
    config: BatchConfig,
}

impl AppStateBuilder {
    /// Create an empty builder.
    ///
    /// Required adapters must be injected before calling [`Self::build`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            zone_repository: None,
            record_set_repository: None,
            batch_change_repository: None,
            batch_converter: None,
            config: BatchConfig::default(),
        }
    }

    /// Use one `SqliteStore` for all three repositories.
    #[must_use]
    pub fn sqlite_store(mut self, store: Arc<SqliteStore>) -> Self {
        self.zone_repository = Some(store.clone() as Arc<dyn ZoneRepository>);
        self.record_set_repository = Some(store.clone() as Arc<dyn RecordSetRepository>);
        self.batch_change_repository = Some(store as Arc<dyn BatchChangeRepository>);
        self
    }

    /// Override the zone repository adapter.
    #[must_use]
    pub fn zone_repository(mut self, repo: Arc<dyn ZoneRepository>) -> Self {
        self.zone_repository = Some(repo);
        self
    }

    /// Override the record-set repository adapter.
    #[must_use]
    pub fn record_set_repository(mut self, repo: Arc<dyn RecordSetRepository>) -> Self {
        self.record_set_repository = Some(repo);
        self
    }

    /// Override the batch-change repository adapter.
    #[must_use]
    pub fn batch_change_repository(mut self, repo: Arc<dyn BatchChangeRepository>) -> Self {
        self.batch_change_repository = Some(repo);
        self
    }

    /// Set the queue converter adapter.
    #[must_use]
    pub fn batch_converter(mut self, converter: Arc<dyn BatchChangeConverter>) -> Self {
        self.batch_converter = Some(converter);
        self
    }

    /// Set the pipeline configuration.
    #[must_use]
    pub fn config(mut self, config: BatchConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the `AppState`.
    ///
    /// # Errors
    /// Returns `CoreError::ValidationError` if required adapters are
    /// missing, or if the configuration is unusable.
    pub fn build(self) -> CoreResult<AppState> {
        let zone_repository = self
            .zone_repository
            .ok_or_else(|| CoreError::ValidationError("zone_repository is required".to_string()))?;
        let record_set_repository = self.record_set_repository.ok_or_else(|| {
            CoreError::ValidationError("record_set_repository is required".to_string())
        })?;
        let batch_change_repository = self.batch_change_repository.ok_or_else(|| {
            CoreError::ValidationError("batch_change_repository is required".to_string())
        })?;
        let batch_converter = self
            .batch_converter
            .ok_or_else(|| CoreError::ValidationError("batch_converter is required".to_string()))?;

        let ctx = Arc::new(ServiceContext::new(
            zone_repository,
            record_set_repository,
            batch_change_repository,
            batch_converter,
            self.config,
        )?);

        let batch_change_service = Arc::new(BatchChangeService::new(Arc::clone(&ctx)));

        Ok(AppState {
            ctx,
            batch_change_service,
        })
    }
}

impl Default for AppStateBuilder {
    /// Equivalent to [`AppStateBuilder::new`].
    fn default() -> Self {
        Self::new()
    }
}
