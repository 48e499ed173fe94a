//! Batch-change persistence abstract trait.

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::{BatchChange, BatchChangeSummaryList};

/// Storage for accepted batch changes.
#[async_trait]
pub trait BatchChangeRepository: Send + Sync {
    /// Persists a batch (insert or update) and returns the stored form.
    async fn save(&self, batch: &BatchChange) -> CoreResult<BatchChange>;

    /// Loads a batch by id, with its single changes in submission order.
    async fn get_batch_change(&self, id: &str) -> CoreResult<Option<BatchChange>>;

    /// A page of the user's batch summaries, most recent first.
    ///
    /// `start_from` is the offset of the first row; `max_items` the page
    /// size (already clamped by the caller).
    async fn get_batch_change_summaries_by_user_id(
        &self,
        user_id: &str,
        start_from: Option<u64>,
        max_items: usize,
    ) -> CoreResult<BatchChangeSummaryList>;
}
