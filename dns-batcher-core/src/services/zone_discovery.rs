//! Authoritative-zone discovery.
//!
//! The second pipeline stage. One batched, two-pronged fetch builds the
//! per-request [`ExistingZones`] snapshot: exact-name candidates for
//! forward records and IPv6 reverse names, and substring filters for IPv4
//! reverse zones (RFC 2317 delegation names embed a `/` and cannot be
//! found by exact name). Resolution itself is a pure function of the
//! change and the snapshot; a failed discovery marks its own position
//! invalid and never aborts the batch.

use std::collections::HashSet;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::Arc;

use dns_batcher_record::name;
use dns_batcher_record::{ChangeError, RecordType};

use crate::error::CoreResult;
use crate::traits::ZoneRepository;
use crate::types::{ChangeForValidation, ChangeInput, ExistingZones, Validated, Zone};

/// Fetches every candidate zone for the batch and resolves each change.
///
/// The exact-name and filter queries run concurrently. Position order is
/// preserved; already-invalid positions pass through untouched.
pub(crate) async fn discover_zones(
    zone_repository: &Arc<dyn ZoneRepository>,
    changes: Vec<Validated<ChangeInput>>,
) -> CoreResult<(Vec<Validated<ChangeForValidation>>, ExistingZones)> {
    let (exact_names, filters) = candidate_names(&changes);

    let (by_name, by_filter) = futures::try_join!(
        zone_repository.get_zones_by_names(&exact_names),
        zone_repository.get_zones_by_filters(&filters),
    )?;

    let zones = ExistingZones::new(by_name.into_iter().chain(by_filter).collect());

    let resolved = changes
        .into_iter()
        .map(|validated| validated.and_then(|change| resolve_change(&change, &zones)))
        .collect();

    Ok((resolved, zones))
}

/// Candidate zone names for the whole batch: exact lookups and IPv4
/// classful filter strings, deduplicated across changes.
fn candidate_names(changes: &[Validated<ChangeInput>]) -> (HashSet<String>, HashSet<String>) {
    let mut exact_names = HashSet::new();
    let mut filters = HashSet::new();

    for change in changes.iter().filter_map(Validated::as_valid) {
        if change.record_type == RecordType::Ptr {
            if let Ok(ip) = change.input_name.parse::<Ipv4Addr>() {
                filters.insert(name::ipv4_ptr_zone_filter(ip));
            } else if let Ok(ip) = change.input_name.parse::<Ipv6Addr>() {
                exact_names.extend(name::ipv6_reverse_zone_candidates(ip));
            }
        } else {
            let fqdn = change.normalized_name();
            if let Some(parent) = name::zone_from_non_apex_fqdn(&fqdn) {
                exact_names.insert(parent);
            }
            exact_names.insert(fqdn);
        }
    }

    (exact_names, filters)
}

/// Resolves one change against the zone snapshot.
///
/// Pure: the outcome depends only on the change and the snapshot.
pub(crate) fn resolve_change(
    change: &ChangeInput,
    zones: &ExistingZones,
) -> Validated<ChangeForValidation> {
    match change.record_type {
        RecordType::Ptr => resolve_ptr(change, zones),
        RecordType::Cname => resolve_cname(change, zones),
        _ => resolve_standard(change, zones),
    }
}

/// A/AAAA/TXT/MX/NS: prefer the apex match, fall back to the parent zone.
fn resolve_standard(change: &ChangeInput, zones: &ExistingZones) -> Validated<ChangeForValidation> {
    let fqdn = change.normalized_name();

    if let Some(zone) = zones.get_by_name(&fqdn) {
        let record_name = name::relativize(&fqdn, &zone.name);
        return Validated::Valid(ChangeForValidation::new(
            zone.clone(),
            record_name,
            change.clone(),
        ));
    }

    match parent_zone(&fqdn, zones) {
        Some(zone) => {
            let record_name = name::relativize(&fqdn, &zone.name);
            Validated::Valid(ChangeForValidation::new(
                zone.clone(),
                record_name,
                change.clone(),
            ))
        }
        None => Validated::Invalid(vec![ChangeError::ZoneDiscoveryError { name: fqdn }]),
    }
}

/// CNAME: an apex match is a conflict (the apex already holds SOA/NS), so
/// only the parent zone is acceptable.
fn resolve_cname(change: &ChangeInput, zones: &ExistingZones) -> Validated<ChangeForValidation> {
    let fqdn = change.normalized_name();

    if zones.get_by_name(&fqdn).is_some() {
        return Validated::Invalid(vec![ChangeError::RecordAlreadyExists { name: fqdn }]);
    }

    match parent_zone(&fqdn, zones) {
        Some(zone) => {
            let record_name = name::relativize(&fqdn, &zone.name);
            Validated::Valid(ChangeForValidation::new(
                zone.clone(),
                record_name,
                change.clone(),
            ))
        }
        None => Validated::Invalid(vec![ChangeError::ZoneDiscoveryError { name: fqdn }]),
    }
}

fn parent_zone<'a>(fqdn: &str, zones: &'a ExistingZones) -> Option<&'a Zone> {
    name::zone_from_non_apex_fqdn(fqdn).and_then(|parent| zones.get_by_name(&parent))
}

fn resolve_ptr(change: &ChangeInput, zones: &ExistingZones) -> Validated<ChangeForValidation> {
    if let Ok(ip) = change.input_name.parse::<Ipv4Addr>() {
        resolve_ipv4_ptr(change, ip, zones)
    } else if let Ok(ip) = change.input_name.parse::<Ipv6Addr>() {
        resolve_ipv6_ptr(change, ip, zones)
    } else {
        Validated::Invalid(vec![ChangeError::InvalidIPAddress {
            address: change.input_name.clone(),
        }])
    }
}

/// IPv4 PTR: among zones covering the address, a classless delegation wins
/// over the classful `/24`; overlapping delegations resolve to the longest
/// prefix (most specific), with the zone name as the tie-break.
fn resolve_ipv4_ptr(
    change: &ChangeInput,
    ip: Ipv4Addr,
    zones: &ExistingZones,
) -> Validated<ChangeForValidation> {
    let matches = zones.ipv4_ptr_matches(ip);

    let mut classless: Vec<(&Zone, u32)> = matches
        .iter()
        .filter_map(|zone| classless_prefix(&zone.name).map(|prefix| (*zone, prefix)))
        .collect();
    classless.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.name.cmp(&b.0.name)));

    let chosen = classless
        .first()
        .map(|(zone, _)| *zone)
        .or_else(|| matches.first().copied());

    match chosen {
        Some(zone) => Validated::Valid(ChangeForValidation::new(
            zone.clone(),
            name::ipv4_ptr_record_name(ip),
            change.clone(),
        )),
        None => Validated::Invalid(vec![ChangeError::ZoneDiscoveryError {
            name: change.input_name.clone(),
        }]),
    }
}

/// The `<prefix>` of an RFC 2317 zone name, if the name is classless.
fn classless_prefix(zone_name: &str) -> Option<u32> {
    let first_label = zone_name.split('.').next()?;
    first_label.split_once('/')?.1.parse().ok()
}

/// IPv6 PTR: the longest candidate zone name is the most specific
/// delegation; the record name is the reverse name minus the zone suffix.
fn resolve_ipv6_ptr(
    change: &ChangeInput,
    ip: Ipv6Addr,
    zones: &ExistingZones,
) -> Validated<ChangeForValidation> {
    let matches = zones.ipv6_ptr_matches(ip);
    let chosen = matches.iter().max_by_key(|zone| zone.name.len());

    match chosen {
        Some(zone) => match name::ipv6_ptr_record_name(ip, &zone.name) {
            Some(record_name) => Validated::Valid(ChangeForValidation::new(
                (*zone).clone(),
                record_name,
                change.clone(),
            )),
            None => Validated::Invalid(vec![ChangeError::ZoneDiscoveryError {
                name: change.input_name.clone(),
            }]),
        },
        None => Validated::Invalid(vec![ChangeError::ZoneDiscoveryError {
            name: change.input_name.clone(),
        }]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{RecordData, ZoneAccessControl};

    fn zone(id: &str, zone_name: &str) -> Zone {
        Zone::new(id, zone_name, ZoneAccessControl::new("grp"))
    }

    fn snapshot(zone_list: Vec<Zone>) -> ExistingZones {
        ExistingZones::new(zone_list)
    }

    fn a_change(input_name: &str) -> ChangeInput {
        ChangeInput::add(
            input_name,
            300,
            RecordData::A {
                address: "10.0.0.1".to_string(),
            },
        )
    }

    fn ptr_change(ip: &str) -> ChangeInput {
        ChangeInput::add(
            ip,
            300,
            RecordData::PTR {
                target: "host.example.com.".to_string(),
            },
        )
    }

    #[test]
    fn standard_resolves_to_parent_zone() {
        let zones = snapshot(vec![zone("z1", "example.com.")]);
        let result = resolve_change(&a_change("web.example.com."), &zones);
        let change = result.into_valid().unwrap();
        assert_eq!(change.zone.id, "z1");
        assert_eq!(change.record_name, "web");
    }

    #[test]
    fn standard_prefers_apex_zone() {
        let zones = snapshot(vec![zone("parent", "com."), zone("apex", "example.com.")]);
        let result = resolve_change(&a_change("example.com."), &zones);
        let change = result.into_valid().unwrap();
        assert_eq!(change.zone.id, "apex");
        assert_eq!(change.record_name, "@");
    }

    #[test]
    fn standard_fails_without_zone() {
        let zones = snapshot(vec![zone("z1", "example.com.")]);
        let result = resolve_change(&a_change("web.other.com."), &zones);
        assert_eq!(
            result.errors(),
            &[ChangeError::ZoneDiscoveryError {
                name: "web.other.com.".to_string()
            }]
        );
    }

    #[test]
    fn cname_at_apex_is_a_conflict() {
        let zones = snapshot(vec![zone("z1", "example.com.")]);
        let change = ChangeInput::add(
            "example.com.",
            300,
            RecordData::CNAME {
                target: "foo.example.com.".to_string(),
            },
        );
        let result = resolve_change(&change, &zones);
        assert_eq!(
            result.errors(),
            &[ChangeError::RecordAlreadyExists {
                name: "example.com.".to_string()
            }]
        );
    }

    #[test]
    fn cname_resolves_below_apex() {
        let zones = snapshot(vec![zone("z1", "example.com.")]);
        let change = ChangeInput::add(
            "alias.example.com.",
            300,
            RecordData::CNAME {
                target: "web.example.com.".to_string(),
            },
        );
        let result = resolve_change(&change, &zones);
        let change = result.into_valid().unwrap();
        assert_eq!(change.record_name, "alias");
    }

    #[test]
    fn ipv4_ptr_prefers_classless_delegation() {
        let zones = snapshot(vec![
            zone("classful", "2.0.192.in-addr.arpa."),
            zone("classless", "0/25.2.0.192.in-addr.arpa."),
        ]);
        let result = resolve_change(&ptr_change("192.0.2.5"), &zones);
        let change = result.into_valid().unwrap();
        assert_eq!(change.zone.id, "classless");
        assert_eq!(change.record_name, "5");
    }

    #[test]
    fn ipv4_ptr_overlapping_delegations_pick_longest_prefix() {
        let zones = snapshot(vec![
            zone("wide", "0/25.2.0.192.in-addr.arpa."),
            zone("narrow", "0/26.2.0.192.in-addr.arpa."),
        ]);
        let result = resolve_change(&ptr_change("192.0.2.5"), &zones);
        assert_eq!(result.into_valid().unwrap().zone.id, "narrow");
    }

    #[test]
    fn ipv4_ptr_falls_back_to_classful() {
        let zones = snapshot(vec![zone("classful", "2.0.192.in-addr.arpa.")]);
        let result = resolve_change(&ptr_change("192.0.2.200"), &zones);
        let change = result.into_valid().unwrap();
        assert_eq!(change.zone.id, "classful");
        assert_eq!(change.record_name, "200");
    }

    #[test]
    fn ipv4_ptr_outside_delegation_range_ignores_that_zone() {
        let zones = snapshot(vec![zone("classless", "0/25.2.0.192.in-addr.arpa.")]);
        // .200 lies outside 0/25, so discovery fails.
        let result = resolve_change(&ptr_change("192.0.2.200"), &zones);
        assert_eq!(
            result.errors(),
            &[ChangeError::ZoneDiscoveryError {
                name: "192.0.2.200".to_string()
            }]
        );
    }

    #[test]
    fn ipv6_ptr_picks_longest_zone() {
        let zones = snapshot(vec![
            zone("z32", "8.b.d.0.1.0.0.2.ip6.arpa."),
            zone(
                "z80",
                "0.0.0.0.0.0.0.0.0.0.0.0.8.b.d.0.1.0.0.2.ip6.arpa.",
            ),
        ]);
        let result = resolve_change(&ptr_change("2001:db8::1"), &zones);
        let change = result.into_valid().unwrap();
        assert_eq!(change.zone.id, "z80");
        // 32 nibbles minus the 20 covered by the /80 zone.
        assert_eq!(change.record_name, "1.0.0.0.0.0.0.0.0.0.0.0");
    }

    #[test]
    fn ipv6_ptr_without_matching_zone_fails() {
        let zones = snapshot(vec![zone("zx", "f.f.f.f.ip6.arpa.")]);
        let result = resolve_change(&ptr_change("2001:db8::1"), &zones);
        assert!(matches!(
            result.errors(),
            [ChangeError::ZoneDiscoveryError { .. }]
        ));
    }

    #[test]
    fn invalid_positions_pass_through_discovery() {
        let zones = snapshot(vec![zone("z1", "example.com.")]);
        let invalid: Validated<ChangeInput> = Validated::Invalid(vec![
            ChangeError::InvalidDomainName {
                name: "bad..".to_string(),
            },
        ]);
        let out = invalid.and_then(|change| resolve_change(&change, &zones));
        assert_eq!(out.errors().len(), 1);
    }

    #[test]
    fn candidate_names_cover_all_lookup_styles() {
        let changes = vec![
            Validated::Valid(a_change("web.example.com.")),
            Validated::Valid(ptr_change("192.0.2.5")),
            Validated::Valid(ptr_change("2001:db8::1")),
        ];
        let (exact, filters) = candidate_names(&changes);
        assert!(exact.contains("web.example.com."));
        assert!(exact.contains("example.com."));
        assert!(exact.contains("8.b.d.0.1.0.0.2.ip6.arpa."));
        assert!(filters.contains("2.0.192.in-addr.arpa."));
        // Invalid positions contribute nothing.
        let (exact_none, filter_none) = candidate_names(&[Validated::Invalid(vec![])]);
        assert!(exact_none.is_empty() && filter_none.is_empty());
    }

    #[tokio::test]
    async fn discover_zones_runs_both_queries_and_preserves_positions() {
        use crate::test_utils::MockZoneRepository;

        let repo: Arc<dyn ZoneRepository> = Arc::new(MockZoneRepository::with_zones(vec![
            zone("z1", "example.com."),
            zone("z2", "0/25.2.0.192.in-addr.arpa."),
        ]));

        let changes = vec![
            Validated::Valid(a_change("web.example.com.")),
            Validated::Valid(ptr_change("192.0.2.5")),
            Validated::Valid(a_change("web.unknown.com.")),
        ];

        let (resolved, zones) = discover_zones(&repo, changes).await.unwrap();
        assert_eq!(resolved.len(), 3);
        assert_eq!(resolved[0].as_valid().unwrap().zone.id, "z1");
        assert_eq!(resolved[1].as_valid().unwrap().zone.id, "z2");
        assert!(!resolved[2].is_valid());
        assert_eq!(zones.len(), 2);
    }
}
