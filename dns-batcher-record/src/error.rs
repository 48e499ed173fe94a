use serde::{Deserialize, Serialize};

use crate::types::RecordType;

/// Structured error attached to a single change within a batch.
///
/// Every variant describes a user-correctable problem with one input
/// position. Errors of this type accumulate across a batch: validation
/// stages never stop at the first failure, so a rejected batch reports
/// every problem at every position at once.
///
/// All variants serialize with a `code` tag for structured error reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ChangeError {
    /// A field on the change input is malformed or missing.
    InvalidInputField {
        /// Name of the offending field.
        field: String,
        /// Description of what's wrong.
        reason: String,
    },

    /// The TTL is outside the configured bounds.
    InvalidTTL { ttl: u32, min: u32, max: u32 },

    /// The input name (or a target name in the payload) is not a valid
    /// domain name.
    InvalidDomainName { name: String },

    /// The input is not a valid IPv4 or IPv6 literal.
    InvalidIPAddress { address: String },

    /// No authoritative zone could be found for the input name.
    ZoneDiscoveryError { name: String },

    /// A record set of the same type already exists at the name, or the
    /// change collides with zone-apex records.
    RecordAlreadyExists { name: String },

    /// A delete was requested for a record set that does not exist.
    RecordDoesNotExist { name: String },

    /// CNAME uniqueness would be violated: a CNAME must be the only record
    /// set at its name.
    CnameIsNotUniqueError { name: String },

    /// The requesting user may not modify the target zone.
    UserIsNotAuthorized { user_name: String },

    /// An NS change targets a name server outside the approved list.
    NotApprovedNameServer { name_server: String },

    /// The name matches a configured high-value domain and cannot be
    /// changed through a batch.
    HighValueDomainError { name: String },

    /// Two adds in the same batch target the same name and record type.
    RecordNameNotUniqueInBatch {
        name: String,
        record_type: RecordType,
    },
}

impl std::fmt::Display for ChangeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInputField { field, reason } => {
                write!(f, "Invalid {field}: {reason}")
            }
            Self::InvalidTTL { ttl, min, max } => {
                write!(f, "Invalid TTL: {ttl} is out of the range [{min}, {max}]")
            }
            Self::InvalidDomainName { name } => {
                write!(f, "Invalid domain name: \"{name}\"")
            }
            Self::InvalidIPAddress { address } => {
                write!(f, "Invalid IP address: \"{address}\"")
            }
            Self::ZoneDiscoveryError { name } => {
                write!(f, "Zone discovery failed: no authoritative zone found for \"{name}\"")
            }
            Self::RecordAlreadyExists { name } => {
                write!(f, "Record \"{name}\" already exists")
            }
            Self::RecordDoesNotExist { name } => {
                write!(f, "Record \"{name}\" does not exist")
            }
            Self::CnameIsNotUniqueError { name } => {
                write!(f, "CNAME conflict: \"{name}\" already has records")
            }
            Self::UserIsNotAuthorized { user_name } => {
                write!(f, "User \"{user_name}\" is not authorized to make this change")
            }
            Self::NotApprovedNameServer { name_server } => {
                write!(f, "Name server \"{name_server}\" is not an approved name server")
            }
            Self::HighValueDomainError { name } => {
                write!(f, "\"{name}\" is a high-value domain and cannot be changed in a batch")
            }
            Self::RecordNameNotUniqueInBatch { name, record_type } => {
                write!(f, "Record name \"{name}\" ({record_type}) appears more than once in the batch")
            }
        }
    }
}

impl std::error::Error for ChangeError {}
