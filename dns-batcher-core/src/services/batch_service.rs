//! Batch-change intake orchestration.
//!
//! Sequences the pipeline: size gate, per-change input validation, zone
//! discovery, record-set fetch, contextual validation, assembly, and the
//! converter handoff. The whole batch commits or none of it does; a
//! rejection echoes every input with its accumulated errors.

use std::sync::Arc;

use chrono::Utc;

use crate::error::{CoreError, CoreResult};
use crate::services::{context_validation, input_validation, zone_discovery, ServiceContext};
use crate::types::{
    AuthPrincipal, BatchChange, BatchChangeErrorResponse, BatchChangeInput, BatchChangeStatus,
    BatchChangeSummaryList, ChangeForValidation, ChangeInputWithErrors, SingleChange, Validated,
};

/// Public operations of the batch-change facility.
pub struct BatchChangeService {
    ctx: Arc<ServiceContext>,
}

impl BatchChangeService {
    /// Create a batch-change service instance.
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// Validates and submits a batch of record changes.
    ///
    /// On success the batch has been persisted and enqueued by the
    /// converter and the stored form is returned. On a validation failure
    /// the error carries the full submission annotated per position, and
    /// nothing has been persisted.
    pub async fn apply_batch_change(
        &self,
        input: BatchChangeInput,
        auth: &AuthPrincipal,
    ) -> CoreResult<BatchChange> {
        let limit = self.ctx.config().batch_change_limit;
        if input.changes.is_empty() {
            return Err(CoreError::BatchChangeIsEmpty);
        }
        if input.changes.len() > limit {
            return Err(CoreError::BatchChangeIsTooLarge { limit });
        }

        let validated = input_validation::validate_batch_inputs(&input.changes, self.ctx.config());

        let (discovered, zones) =
            zone_discovery::discover_zones(self.ctx.zone_repository(), validated).await?;

        let record_sets =
            context_validation::fetch_record_sets(self.ctx.record_set_repository(), &discovered)
                .await?;

        let results =
            context_validation::validate_changes_with_context(discovered, &record_sets, auth, &self.ctx);

        if results.iter().all(Validated::is_valid) {
            let changes: Vec<ChangeForValidation> = results
                .into_iter()
                .filter_map(Validated::into_valid)
                .collect();
            let batch = assemble_batch(input.comments, auth, &changes);
            log::info!(
                "Accepted batch change {} with {} change(s) for user {}",
                batch.id,
                batch.changes.len(),
                auth.user_name
            );
            self.ctx
                .batch_converter()
                .send_batch_for_processing(&batch, &zones, &record_sets)
                .await
        } else {
            let invalid_positions = results.iter().filter(|r| !r.is_valid()).count();
            log::warn!(
                "Rejected batch change for user {}: {invalid_positions} invalid position(s)",
                auth.user_name
            );
            Err(CoreError::InvalidBatch(annotate_rejection(input, &results)))
        }
    }

    /// Loads a batch change by id.
    ///
    /// Only the creator (or a super-user) may view it.
    pub async fn get_batch_change(
        &self,
        id: &str,
        auth: &AuthPrincipal,
    ) -> CoreResult<BatchChange> {
        match self
            .ctx
            .batch_change_repository()
            .get_batch_change(id)
            .await?
        {
            None => Err(CoreError::BatchChangeNotFound(id.to_string())),
            Some(batch) if auth.can_view_batch(&batch) => Ok(batch),
            Some(_) => Err(CoreError::UserNotAuthorizedToView),
        }
    }

    /// A page of the caller's batch summaries, most recent first.
    ///
    /// `max_items` defaults to 100 and is clamped to the configured ceiling.
    pub async fn list_batch_change_summaries(
        &self,
        auth: &AuthPrincipal,
        start_from: Option<u64>,
        max_items: Option<usize>,
    ) -> CoreResult<BatchChangeSummaryList> {
        let ceiling = self.ctx.config().max_list_items.max(1);
        let max_items = max_items.unwrap_or(100).clamp(1, ceiling);
        self.ctx
            .batch_change_repository()
            .get_batch_change_summaries_by_user_id(&auth.user_id, start_from, max_items)
            .await
    }
}

/// Builds the persistent entity from a fully valid submission.
fn assemble_batch(
    comments: Option<String>,
    auth: &AuthPrincipal,
    changes: &[ChangeForValidation],
) -> BatchChange {
    BatchChange {
        id: uuid::Uuid::new_v4().to_string(),
        user_id: auth.user_id.clone(),
        user_name: auth.user_name.clone(),
        comments,
        created_timestamp: Utc::now(),
        changes: changes.iter().map(SingleChange::from_validated).collect(),
        status: BatchChangeStatus::Pending,
    }
}

/// Echoes the submission in position order, with each position's errors.
fn annotate_rejection(
    input: BatchChangeInput,
    results: &[Validated<ChangeForValidation>],
) -> BatchChangeErrorResponse {
    let changes = input
        .changes
        .into_iter()
        .zip(results)
        .map(|(change, result)| ChangeInputWithErrors {
            input: change,
            errors: result.errors().iter().map(ToString::to_string).collect(),
        })
        .collect();

    BatchChangeErrorResponse {
        comments: input.comments,
        changes,
    }
}
