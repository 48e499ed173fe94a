//! Type definitions for the batch-change pipeline.

mod auth;
mod batch;
mod change;
mod config;
mod snapshot;
mod validated;
mod zone;

pub use auth::AuthPrincipal;
pub use batch::{
    BatchChange, BatchChangeErrorResponse, BatchChangeStatus, BatchChangeSummary,
    BatchChangeSummaryList, ChangeInputWithErrors, SingleChange, SingleChangeStatus,
};
pub use change::{BatchChangeInput, ChangeForValidation, ChangeInput};
pub use config::BatchConfig;
pub use snapshot::{ExistingRecordSets, ExistingZones};
pub use validated::Validated;
pub use zone::{RecordSet, Zone, ZoneAccessControl};

// Re-export the record library's public types.
pub use dns_batcher_record::{ChangeError, ChangeKind, RecordData, RecordType};
