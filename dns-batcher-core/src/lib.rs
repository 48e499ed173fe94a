//! # dns-batcher-core
//!
//! The batch-change intake pipeline for a multi-tenant DNS management
//! service. A caller submits a bundle of record mutations spanning many
//! zones; this crate validates the bundle as a whole, discovers the
//! authoritative zone for every change (including IPv4 classless and IPv6
//! reverse-zone resolution), checks each change against the current record
//! inventory, and — only if every position is acceptable — assembles a
//! durable batch and hands it to the downstream converter.
//!
//! The crate is storage-agnostic: zone, record-set, and batch persistence
//! are injected through the traits in [`traits`], and the queue handoff
//! through [`traits::BatchChangeConverter`]. Platform crates provide the
//! adapters.

pub mod error;
pub mod services;
pub mod traits;
pub mod types;

#[cfg(test)]
pub(crate) mod test_utils;

pub use error::{CoreError, CoreResult};
pub use services::{BatchChangeService, ServiceContext};
pub use traits::{
    BatchChangeConverter, BatchChangeRepository, RecordSetRepository, ZoneRepository,
};
