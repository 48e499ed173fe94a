//! Submitted change inputs and their zone-resolved form.

use serde::{Deserialize, Serialize};

use dns_batcher_record::name;
use dns_batcher_record::{ChangeKind, RecordData, RecordType};

use crate::types::Zone;

/// A single user-supplied record mutation.
///
/// `input_name` is an FQDN for forward records, or an IP literal for PTR
/// changes. Adds carry a TTL and a payload; deletes identify the record set
/// by name and type alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeInput {
    pub change_type: ChangeKind,
    pub input_name: String,
    #[serde(rename = "type")]
    pub record_type: RecordType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<RecordData>,
}

impl ChangeInput {
    /// Convenience constructor for an `Add` change.
    #[must_use]
    pub fn add(input_name: impl Into<String>, ttl: u32, record: RecordData) -> Self {
        Self {
            change_type: ChangeKind::Add,
            input_name: input_name.into(),
            record_type: record.record_type(),
            ttl: Some(ttl),
            record: Some(record),
        }
    }

    /// Convenience constructor for a `DeleteRecordSet` change.
    #[must_use]
    pub fn delete(input_name: impl Into<String>, record_type: RecordType) -> Self {
        Self {
            change_type: ChangeKind::DeleteRecordSet,
            input_name: input_name.into(),
            record_type,
            ttl: None,
            record: None,
        }
    }

    /// The input name in canonical dot-terminated form.
    ///
    /// PTR inputs are IP literals and are returned unchanged.
    #[must_use]
    pub fn normalized_name(&self) -> String {
        if self.record_type == RecordType::Ptr {
            self.input_name.clone()
        } else {
            name::ensure_trailing_dot(&self.input_name)
        }
    }
}

/// The full batch submission: ordered changes plus optional comments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchChangeInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    pub changes: Vec<ChangeInput>,
}

/// A change enriched with its discovered zone and relative record name.
///
/// Produced only by successful zone discovery; contextual validation and
/// batch assembly operate on this form.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeForValidation {
    pub zone: Zone,
    pub record_name: String,
    pub input: ChangeInput,
}

impl ChangeForValidation {
    #[must_use]
    pub fn new(zone: Zone, record_name: impl Into<String>, input: ChangeInput) -> Self {
        Self {
            zone,
            record_name: record_name.into(),
            input,
        }
    }
}
