//! # dns-batcher-record
//!
//! The DNS record domain library underneath the batch-change service.
//!
//! This crate is platform- and storage-agnostic. It provides:
//!
//! - The record model: [`RecordType`], the type-safe [`RecordData`] payload
//!   enum, and [`ChangeKind`] (add vs. delete-record-set).
//! - [`ChangeError`], the structured per-change error taxonomy surfaced to
//!   batch submitters.
//! - The [`name`] module: pure FQDN manipulation and the IPv4/IPv6
//!   reverse-zone name math used by zone discovery, including RFC 2317
//!   classless `in-addr.arpa.` delegations.
//!
//! ## Usage
//!
//! ```rust
//! use dns_batcher_record::{name, RecordData, RecordType};
//!
//! let data = RecordData::A { address: "10.0.0.1".to_string() };
//! assert_eq!(data.record_type(), RecordType::A);
//!
//! assert_eq!(name::relativize("web.example.com.", "example.com."), "web");
//! assert_eq!(
//!     name::zone_from_non_apex_fqdn("web.example.com."),
//!     Some("example.com.".to_string())
//! );
//! ```

mod error;
pub mod name;
mod types;

pub use error::ChangeError;
pub use types::{ChangeKind, RecordData, RecordType};
