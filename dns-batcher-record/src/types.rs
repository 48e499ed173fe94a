use serde::{Deserialize, Serialize};

/// Whether a single change creates a record or removes an existing record set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeKind {
    Add,
    DeleteRecordSet,
}

impl std::fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Add => write!(f, "Add"),
            Self::DeleteRecordSet => write!(f, "DeleteRecordSet"),
        }
    }
}

/// DNS record types accepted through the batch-change pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    A,
    Aaaa,
    Cname,
    Txt,
    Mx,
    Ptr,
    Ns,
}

impl std::fmt::Display for RecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::Aaaa => write!(f, "AAAA"),
            Self::Cname => write!(f, "CNAME"),
            Self::Txt => write!(f, "TXT"),
            Self::Mx => write!(f, "MX"),
            Self::Ptr => write!(f, "PTR"),
            Self::Ns => write!(f, "NS"),
        }
    }
}

/// Type-safe record payload.
///
/// The wire form is tagged so a payload always carries its own record type;
/// input validation cross-checks it against the declared type of the change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content")]
pub enum RecordData {
    /// A record: IPv4 address.
    A { address: String },

    /// AAAA record: IPv6 address.
    AAAA { address: String },

    /// CNAME record: alias target.
    CNAME { target: String },

    /// TXT record: free-form text.
    TXT { text: String },

    /// MX record: mail exchange.
    MX { preference: u16, exchange: String },

    /// PTR record: reverse-lookup target name.
    PTR { target: String },

    /// NS record: delegated name server.
    NS { nameserver: String },
}

impl RecordData {
    /// The record type this payload belongs to.
    #[must_use]
    pub fn record_type(&self) -> RecordType {
        match self {
            Self::A { .. } => RecordType::A,
            Self::AAAA { .. } => RecordType::Aaaa,
            Self::CNAME { .. } => RecordType::Cname,
            Self::TXT { .. } => RecordType::Txt,
            Self::MX { .. } => RecordType::Mx,
            Self::PTR { .. } => RecordType::Ptr,
            Self::NS { .. } => RecordType::Ns,
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn change_kind_serde_uses_variant_names() {
        assert_eq!(serde_json::to_string(&ChangeKind::Add).unwrap(), "\"Add\"");
        assert_eq!(
            serde_json::to_string(&ChangeKind::DeleteRecordSet).unwrap(),
            "\"DeleteRecordSet\""
        );
        let kind: ChangeKind = serde_json::from_str("\"DeleteRecordSet\"").unwrap();
        assert_eq!(kind, ChangeKind::DeleteRecordSet);
    }

    #[test]
    fn record_type_serialize() {
        assert_eq!(serde_json::to_string(&RecordType::Aaaa).unwrap(), "\"AAAA\"");
        assert_eq!(serde_json::to_string(&RecordType::Ptr).unwrap(), "\"PTR\"");
    }

    #[test]
    fn record_type_deserialize() {
        let t: RecordType = serde_json::from_str("\"CNAME\"").unwrap();
        assert_eq!(t, RecordType::Cname);
    }

    #[test]
    fn record_type_roundtrip_all() {
        let types = vec![
            RecordType::A,
            RecordType::Aaaa,
            RecordType::Cname,
            RecordType::Txt,
            RecordType::Mx,
            RecordType::Ptr,
            RecordType::Ns,
        ];
        for t in types {
            let json = serde_json::to_string(&t).unwrap();
            let back: RecordType = serde_json::from_str(&json).unwrap();
            assert_eq!(back, t);
        }
    }

    #[test]
    fn record_data_record_type() {
        assert_eq!(
            RecordData::PTR {
                target: "host.example.com.".into()
            }
            .record_type(),
            RecordType::Ptr
        );
        assert_eq!(
            RecordData::MX {
                preference: 10,
                exchange: "mail.example.com.".into()
            }
            .record_type(),
            RecordType::Mx
        );
    }

    #[test]
    fn record_data_mx_serde_roundtrip() {
        let data = RecordData::MX {
            preference: 5,
            exchange: "mx.example.com.".to_string(),
        };
        let json = serde_json::to_string(&data).unwrap();
        assert!(json.contains("\"type\":\"MX\""));
        let back: RecordData = serde_json::from_str(&json).unwrap();
        assert_eq!(back, data);
    }

    #[test]
    fn record_data_ptr_serde_roundtrip() {
        let data = RecordData::PTR {
            target: "host.example.com.".to_string(),
        };
        let json = serde_json::to_string(&data).unwrap();
        let back: RecordData = serde_json::from_str(&json).unwrap();
        assert_eq!(back, data);
    }
}
