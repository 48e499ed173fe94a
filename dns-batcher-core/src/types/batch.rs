//! Persistent batch-change entities and list/response shapes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use dns_batcher_record::{ChangeKind, RecordData, RecordType};

use crate::types::{ChangeForValidation, ChangeInput};

/// Outcome of one stored change, owned by the downstream converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SingleChangeStatus {
    Pending,
    Complete,
    Failed,
}

/// Overall outcome of a stored batch, derived from its single changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BatchChangeStatus {
    Pending,
    Complete,
    Failed,
    PartialFailure,
}

impl BatchChangeStatus {
    /// Derives the batch status from per-change outcomes.
    #[must_use]
    pub fn from_single_statuses<'a>(
        statuses: impl IntoIterator<Item = &'a SingleChangeStatus>,
    ) -> Self {
        let mut complete = 0usize;
        let mut failed = 0usize;
        let mut pending = 0usize;
        for status in statuses {
            match status {
                SingleChangeStatus::Pending => pending += 1,
                SingleChangeStatus::Complete => complete += 1,
                SingleChangeStatus::Failed => failed += 1,
            }
        }
        if pending > 0 {
            Self::Pending
        } else if failed == 0 {
            Self::Complete
        } else if complete == 0 {
            Self::Failed
        } else {
            Self::PartialFailure
        }
    }
}

/// One stored change: the original input plus its resolved zone and record
/// identity at the moment of acceptance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SingleChange {
    pub id: String,
    pub change_type: ChangeKind,
    pub input_name: String,
    #[serde(rename = "type")]
    pub record_type: RecordType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<RecordData>,
    pub zone_id: String,
    pub zone_name: String,
    pub record_name: String,
    pub status: SingleChangeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_message: Option<String>,
}

impl SingleChange {
    /// Builds the pending stored form of a fully validated change.
    #[must_use]
    pub fn from_validated(change: &ChangeForValidation) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            change_type: change.input.change_type,
            input_name: change.input.input_name.clone(),
            record_type: change.input.record_type,
            ttl: change.input.ttl,
            record: change.input.record.clone(),
            zone_id: change.zone.id.clone(),
            zone_name: change.zone.name.clone(),
            record_name: change.record_name.clone(),
            status: SingleChangeStatus::Pending,
            system_message: None,
        }
    }
}

/// An accepted batch: immutable once created except for the status and
/// outcome fields the converter updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchChange {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    pub created_timestamp: DateTime<Utc>,
    pub changes: Vec<SingleChange>,
    pub status: BatchChangeStatus,
}

impl BatchChange {
    /// The summary row shown in paginated listings.
    #[must_use]
    pub fn summary(&self) -> BatchChangeSummary {
        BatchChangeSummary {
            id: self.id.clone(),
            user_id: self.user_id.clone(),
            user_name: self.user_name.clone(),
            comments: self.comments.clone(),
            created_timestamp: self.created_timestamp,
            total_changes: self.changes.len(),
            status: self.status,
        }
    }
}

/// Listing row for a batch change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchChangeSummary {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    pub created_timestamp: DateTime<Utc>,
    pub total_changes: usize,
    pub status: BatchChangeStatus,
}

/// A page of batch-change summaries.
///
/// `start_from` echoes the requested offset; `next_id` is present when more
/// rows remain and is the offset of the next page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchChangeSummaryList {
    pub batch_changes: Vec<BatchChangeSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_from: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_id: Option<u64>,
    pub max_items: usize,
}

/// One input position echoed back with its accumulated errors.
///
/// Positions that passed validation carry an empty error list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeInputWithErrors {
    #[serde(flatten)]
    pub input: ChangeInput,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

/// The rejection payload: every input in submission order, annotated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchChangeErrorResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    pub changes: Vec<ChangeInputWithErrors>,
}
