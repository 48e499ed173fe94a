//! Business logic service layer.

mod batch_service;
pub(crate) mod context_validation;
pub(crate) mod input_validation;
pub(crate) mod zone_discovery;

pub use batch_service::BatchChangeService;

use std::sync::Arc;

use regex::Regex;

use crate::error::{CoreError, CoreResult};
use crate::traits::{
    BatchChangeConverter, BatchChangeRepository, RecordSetRepository, ZoneRepository,
};
use crate::types::BatchConfig;

/// Service context - holds all dependencies.
///
/// The platform layer creates this context and injects its storage and
/// queue adapters. Fields are accessed through getter methods, ensuring
/// that external crates cannot bypass the service layer and reach the
/// adapters directly.
pub struct ServiceContext {
    pub(crate) zone_repository: Arc<dyn ZoneRepository>,
    pub(crate) record_set_repository: Arc<dyn RecordSetRepository>,
    pub(crate) batch_change_repository: Arc<dyn BatchChangeRepository>,
    pub(crate) batch_converter: Arc<dyn BatchChangeConverter>,
    pub(crate) config: BatchConfig,
    high_value_matchers: Vec<Regex>,
}

impl ServiceContext {
    /// Create a service context.
    ///
    /// # Errors
    /// Returns `CoreError::ValidationError` if a configured
    /// high-value-domain pattern is not a valid regex.
    pub fn new(
        zone_repository: Arc<dyn ZoneRepository>,
        record_set_repository: Arc<dyn RecordSetRepository>,
        batch_change_repository: Arc<dyn BatchChangeRepository>,
        batch_converter: Arc<dyn BatchChangeConverter>,
        config: BatchConfig,
    ) -> CoreResult<Self> {
        let high_value_matchers = config
            .high_value_domains
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|e| {
                    CoreError::ValidationError(format!(
                        "Invalid high-value-domain pattern '{pattern}': {e}"
                    ))
                })
            })
            .collect::<CoreResult<Vec<_>>>()?;

        Ok(Self {
            zone_repository,
            record_set_repository,
            batch_change_repository,
            batch_converter,
            config,
            high_value_matchers,
        })
    }

    /// Get a reference to the zone repository.
    pub fn zone_repository(&self) -> &Arc<dyn ZoneRepository> {
        &self.zone_repository
    }

    /// Get a reference to the record-set repository.
    pub fn record_set_repository(&self) -> &Arc<dyn RecordSetRepository> {
        &self.record_set_repository
    }

    /// Get a reference to the batch-change repository.
    pub fn batch_change_repository(&self) -> &Arc<dyn BatchChangeRepository> {
        &self.batch_change_repository
    }

    /// Get a reference to the batch converter.
    pub fn batch_converter(&self) -> &Arc<dyn BatchChangeConverter> {
        &self.batch_converter
    }

    /// Get the injected pipeline configuration.
    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Whether `fqdn` matches a configured high-value-domain pattern.
    #[must_use]
    pub fn is_high_value_domain(&self, fqdn: &str) -> bool {
        self.high_value_matchers.iter().any(|re| re.is_match(fqdn))
    }
}
