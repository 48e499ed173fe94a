//! Record-set persistence abstract trait.

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::RecordSet;

/// Read access to record-set storage.
#[async_trait]
pub trait RecordSetRepository: Send + Sync {
    /// All record sets at `record_name` within a zone, across every type.
    ///
    /// `record_name` is relative to the zone apex (`@` for apex records).
    async fn get_record_sets_by_name(
        &self,
        zone_id: &str,
        record_name: &str,
    ) -> CoreResult<Vec<RecordSet>>;
}
