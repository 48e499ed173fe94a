//! Zone persistence abstract trait.

use std::collections::HashSet;

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::Zone;

/// Read access to zone storage.
///
/// Both lookups are batched: discovery computes every candidate name for a
/// whole submission and issues one call per lookup style.
#[async_trait]
pub trait ZoneRepository: Send + Sync {
    /// Exact-name lookup. Missing names are simply omitted from the result.
    async fn get_zones_by_names(&self, names: &HashSet<String>) -> CoreResult<Vec<Zone>>;

    /// Substring lookup: every zone whose name contains one of the filter
    /// strings. Required for IPv4 PTR discovery, where RFC 2317 classless
    /// delegation names embed a `/` and cannot be found by exact name.
    async fn get_zones_by_filters(&self, filters: &HashSet<String>) -> CoreResult<Vec<Zone>>;
}
