//! Handoff to the asynchronous change processor.

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::{BatchChange, ExistingRecordSets, ExistingZones};

/// Accepts a validated batch for downstream processing.
///
/// The converter owns the persistence boundary: it stores the batch and
/// enqueues per-change work against the DNS backends. The intake pipeline
/// awaits this call and treats any failure as terminal for the request;
/// partial persistence on failure is the converter's responsibility.
#[async_trait]
pub trait BatchChangeConverter: Send + Sync {
    /// Persists and enqueues `batch`, returning the stored form.
    ///
    /// The zone and record-set snapshots are the ones the batch was
    /// validated against, passed along so the processor can seed its own
    /// conflict re-checks without refetching.
    async fn send_batch_for_processing(
        &self,
        batch: &BatchChange,
        zones: &ExistingZones,
        record_sets: &ExistingRecordSets,
    ) -> CoreResult<BatchChange>;
}
