//! Zone and record-set types consumed from the repositories.

use serde::{Deserialize, Serialize};

use dns_batcher_record::{RecordData, RecordType};

/// Who may modify records in a zone.
///
/// A principal qualifies when it belongs to the admin group or to any of
/// the additionally allowed groups; super-users bypass the check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneAccessControl {
    pub admin_group_id: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_group_ids: Vec<String>,
}

impl ZoneAccessControl {
    #[must_use]
    pub fn new(admin_group_id: impl Into<String>) -> Self {
        Self {
            admin_group_id: admin_group_id.into(),
            allowed_group_ids: Vec::new(),
        }
    }
}

/// A DNS zone as stored. `name` is canonical and dot-terminated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    pub id: String,
    pub name: String,
    pub access_control: ZoneAccessControl,
}

impl Zone {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        access_control: ZoneAccessControl,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            access_control,
        }
    }

    /// Whether this zone is an RFC 2317 classless reverse delegation.
    #[must_use]
    pub fn is_classless_reverse(&self) -> bool {
        self.name.contains('/')
    }
}

/// A record set within a zone, unique by `(zone_id, name, record_type)`.
///
/// `name` is relative to the zone apex (`@` for apex records).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordSet {
    pub id: String,
    pub zone_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: RecordType,
    pub ttl: u32,
    pub records: Vec<RecordData>,
}
