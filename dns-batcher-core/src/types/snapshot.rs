//! Per-request read-through snapshots of zones and record sets.
//!
//! Both snapshots are assembled once during intake and live only for the
//! duration of the call; they are never shared across requests. The
//! downstream converter re-checks at apply time, so a record set changing
//! between validation and conversion is an accepted race.

use std::collections::HashMap;
use std::net::{Ipv4Addr, Ipv6Addr};

use dns_batcher_record::name;
use dns_batcher_record::RecordType;

use crate::types::{RecordSet, Zone};

/// The zones fetched for one batch, indexed for discovery.
#[derive(Debug, Clone, Default)]
pub struct ExistingZones {
    by_name: HashMap<String, Zone>,
}

impl ExistingZones {
    /// Indexes zones by lowercased canonical name. Later duplicates of the
    /// same name are ignored.
    #[must_use]
    pub fn new(zones: Vec<Zone>) -> Self {
        let mut by_name = HashMap::with_capacity(zones.len());
        for zone in zones {
            let key = name::ensure_trailing_dot(&zone.name).to_ascii_lowercase();
            by_name.entry(key).or_insert(zone);
        }
        Self { by_name }
    }

    #[must_use]
    pub fn get_by_name(&self, zone_name: &str) -> Option<&Zone> {
        let key = name::ensure_trailing_dot(zone_name).to_ascii_lowercase();
        self.by_name.get(&key)
    }

    /// All zones that are authoritative for an IPv4 PTR record, honoring
    /// RFC 2317 classless delegations.
    #[must_use]
    pub fn ipv4_ptr_matches(&self, ip: Ipv4Addr) -> Vec<&Zone> {
        self.by_name
            .values()
            .filter(|zone| name::ptr_is_in_zone(ip, &zone.name))
            .collect()
    }

    /// All zones whose name is a label-aligned suffix of the full IPv6
    /// reverse name.
    #[must_use]
    pub fn ipv6_ptr_matches(&self, ip: Ipv6Addr) -> Vec<&Zone> {
        let full = name::ipv6_full_reverse_name(ip);
        self.by_name
            .values()
            .filter(|zone| {
                let zone_name = name::ensure_trailing_dot(&zone.name).to_ascii_lowercase();
                full.strip_suffix(&zone_name)
                    .is_some_and(|prefix| prefix.ends_with('.'))
            })
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

/// The record sets fetched for one batch, keyed for contextual validation.
#[derive(Debug, Clone, Default)]
pub struct ExistingRecordSets {
    by_key: HashMap<(String, String), Vec<RecordSet>>,
}

impl ExistingRecordSets {
    /// Groups record sets by `(zone_id, lowercased record name)`.
    #[must_use]
    pub fn new(record_sets: Vec<RecordSet>) -> Self {
        let mut by_key: HashMap<(String, String), Vec<RecordSet>> = HashMap::new();
        for record_set in record_sets {
            let key = (
                record_set.zone_id.clone(),
                record_set.name.to_ascii_lowercase(),
            );
            by_key.entry(key).or_default().push(record_set);
        }
        Self { by_key }
    }

    /// All record sets at a name, regardless of type.
    #[must_use]
    pub fn get_by_name(&self, zone_id: &str, record_name: &str) -> &[RecordSet] {
        self.by_key
            .get(&(zone_id.to_string(), record_name.to_ascii_lowercase()))
            .map_or(&[], Vec::as_slice)
    }

    /// The record set of a specific type at a name, if present.
    #[must_use]
    pub fn get(
        &self,
        zone_id: &str,
        record_name: &str,
        record_type: RecordType,
    ) -> Option<&RecordSet> {
        self.get_by_name(zone_id, record_name)
            .iter()
            .find(|rs| rs.record_type == record_type)
    }

    /// Whether any record set exists at a name.
    #[must_use]
    pub fn contains_any(&self, zone_id: &str, record_name: &str) -> bool {
        !self.get_by_name(zone_id, record_name).is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{RecordData, ZoneAccessControl};

    fn zone(id: &str, zone_name: &str) -> Zone {
        Zone::new(id, zone_name, ZoneAccessControl::new("grp"))
    }

    fn a_record_set(zone_id: &str, rs_name: &str) -> RecordSet {
        RecordSet {
            id: format!("rs-{zone_id}-{rs_name}"),
            zone_id: zone_id.to_string(),
            name: rs_name.to_string(),
            record_type: RecordType::A,
            ttl: 300,
            records: vec![RecordData::A {
                address: "10.0.0.1".to_string(),
            }],
        }
    }

    #[test]
    fn get_by_name_normalizes_case_and_dot() {
        let zones = ExistingZones::new(vec![zone("z1", "example.com.")]);
        assert!(zones.get_by_name("Example.COM").is_some());
        assert!(zones.get_by_name("example.com.").is_some());
        assert!(zones.get_by_name("other.com.").is_none());
    }

    #[test]
    fn ipv4_matches_classful_and_classless() {
        let zones = ExistingZones::new(vec![
            zone("z1", "2.0.192.in-addr.arpa."),
            zone("z2", "0/25.2.0.192.in-addr.arpa."),
            zone("z3", "example.com."),
        ]);
        let matches = zones.ipv4_ptr_matches(Ipv4Addr::new(192, 0, 2, 5));
        let mut ids: Vec<&str> = matches.iter().map(|z| z.id.as_str()).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec!["z1", "z2"]);
    }

    #[test]
    fn ipv6_matches_are_label_aligned_suffixes() {
        let zones = ExistingZones::new(vec![
            zone("z32", "8.b.d.0.1.0.0.2.ip6.arpa."),
            zone("z80", "0.0.0.0.0.0.0.0.0.0.0.0.8.b.d.0.1.0.0.2.ip6.arpa."),
            zone("zx", "f.f.f.f.ip6.arpa."),
        ]);
        let ip: Ipv6Addr = "2001:db8::1".parse().unwrap();
        let matches = zones.ipv6_ptr_matches(ip);
        let mut ids: Vec<&str> = matches.iter().map(|z| z.id.as_str()).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec!["z32", "z80"]);
    }

    #[test]
    fn record_sets_lookup_by_type() {
        let sets = ExistingRecordSets::new(vec![a_record_set("z1", "web")]);
        assert!(sets.get("z1", "web", RecordType::A).is_some());
        assert!(sets.get("z1", "WEB", RecordType::A).is_some());
        assert!(sets.get("z1", "web", RecordType::Cname).is_none());
        assert!(sets.contains_any("z1", "web"));
        assert!(!sets.contains_any("z1", "mail"));
    }
}
