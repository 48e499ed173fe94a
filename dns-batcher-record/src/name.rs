//! Pure DNS name manipulation.
//!
//! Everything zone discovery needs to reason about names without touching
//! storage: FQDN normalization and relativization, literal IP checks, and
//! the reverse-zone name math for IPv4 (classful `/24` plus RFC 2317
//! classless delegations) and IPv6 (nibble-format `ip6.arpa.` names).

use std::collections::BTreeSet;
use std::net::{Ipv4Addr, Ipv6Addr};

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// A single hostname label. Leading/trailing hyphens are rejected;
    /// underscores are allowed for service labels such as `_dmarc`.
    static ref LABEL_RE: Regex =
        Regex::new(r"^[a-zA-Z0-9_](?:[a-zA-Z0-9_-]*[a-zA-Z0-9_])?$").unwrap();
}

/// Marker used as the relative name of a record sitting at the zone apex.
pub const APEX: &str = "@";

/// Appends the trailing dot if `name` is not already dot-terminated.
#[must_use]
pub fn ensure_trailing_dot(name: &str) -> String {
    if name.ends_with('.') {
        name.to_string()
    } else {
        format!("{name}.")
    }
}

/// Drops the leftmost label and returns the parent zone candidate.
///
/// Returns `None` when the name has no parent (a single label, or the root).
#[must_use]
pub fn zone_from_non_apex_fqdn(fqdn: &str) -> Option<String> {
    let dotted = ensure_trailing_dot(fqdn);
    let (_, parent) = dotted.split_once('.')?;
    if parent.is_empty() {
        None
    } else {
        Some(parent.to_string())
    }
}

/// Expresses `fqdn` relative to `zone_name`.
///
/// Returns [`APEX`] when the two names are equal (modulo trailing dot and
/// case), the bare relative portion when `fqdn` sits inside the zone, and
/// the normalized `fqdn` unchanged when it does not.
#[must_use]
pub fn relativize(fqdn: &str, zone_name: &str) -> String {
    let fqdn = ensure_trailing_dot(fqdn);
    let zone = ensure_trailing_dot(zone_name);

    if fqdn.eq_ignore_ascii_case(&zone) {
        return APEX.to_string();
    }

    let fqdn_lower = fqdn.to_ascii_lowercase();
    let zone_lower = zone.to_ascii_lowercase();
    if fqdn_lower.ends_with(&zone_lower) {
        let prefix_len = fqdn.len() - zone.len();
        // The character before the zone suffix must be a label separator.
        if prefix_len > 0 && fqdn.as_bytes()[prefix_len - 1] == b'.' {
            return fqdn[..prefix_len - 1].to_string();
        }
    }

    fqdn
}

/// Checks that `name` is a well-formed (possibly dot-terminated) domain name.
#[must_use]
pub fn is_valid_fqdn(name: &str) -> bool {
    if name.len() > 255 {
        return false;
    }
    let trimmed = name.strip_suffix('.').unwrap_or(name);
    if trimmed.is_empty() {
        return false;
    }
    trimmed
        .split('.')
        .all(|label| !label.is_empty() && label.len() <= 63 && LABEL_RE.is_match(label))
}

/// Checks that `address` is an IPv4 literal.
#[must_use]
pub fn is_valid_ipv4_address(address: &str) -> bool {
    address.parse::<Ipv4Addr>().is_ok()
}

/// Checks that `address` is an IPv6 literal.
#[must_use]
pub fn is_valid_ipv6_address(address: &str) -> bool {
    address.parse::<Ipv6Addr>().is_ok()
}

/// The classful (non-delegated) `/24` reverse zone name for an IPv4 address.
///
/// `1.2.3.4` maps to `3.2.1.in-addr.arpa.`. The result is used as a
/// substring *filter* against zone storage so that classless delegations
/// such as `0/25.3.2.1.in-addr.arpa.` are discovered as well.
#[must_use]
pub fn ipv4_ptr_zone_filter(ip: Ipv4Addr) -> String {
    let o = ip.octets();
    format!("{}.{}.{}.in-addr.arpa.", o[2], o[1], o[0])
}

/// The relative record name of an IPv4 PTR record: the last octet.
#[must_use]
pub fn ipv4_ptr_record_name(ip: Ipv4Addr) -> String {
    ip.octets()[3].to_string()
}

/// The canonical nibble-reversed `ip6.arpa.` name of an IPv6 address.
#[must_use]
pub fn ipv6_full_reverse_name(ip: Ipv6Addr) -> String {
    let mut nibbles = Vec::with_capacity(32);
    for byte in ip.octets() {
        nibbles.push(format!("{:x}", byte >> 4));
        nibbles.push(format!("{:x}", byte & 0xf));
    }
    nibbles.reverse();
    format!("{}.ip6.arpa.", nibbles.join("."))
}

/// Candidate reverse-zone names for an IPv6 PTR record.
///
/// Emits, for every CIDR length from /20 to /64 inclusive, the suffix of the
/// full reverse name left after dropping `(128 - cidr) / 4` nibbles. Each
/// nibble occupies two characters (the digit and its separating dot), so the
/// dropped character count is doubled. Duplicate suffixes collapse, leaving
/// at most 45 candidates.
#[must_use]
pub fn ipv6_reverse_zone_candidates(ip: Ipv6Addr) -> BTreeSet<String> {
    let full = ipv6_full_reverse_name(ip);
    let mut candidates = BTreeSet::new();
    for cidr in 20..=64u32 {
        let dropped_nibbles = ((128 - cidr) / 4) as usize;
        candidates.insert(full[2 * dropped_nibbles..].to_string());
    }
    candidates
}

/// The relative record name of an IPv6 PTR record within `zone_name`:
/// the full reverse name minus the zone suffix and its separating dot.
///
/// Returns `None` if the zone is not actually a suffix of the reverse name.
#[must_use]
pub fn ipv6_ptr_record_name(ip: Ipv6Addr, zone_name: &str) -> Option<String> {
    let full = ipv6_full_reverse_name(ip);
    let zone = ensure_trailing_dot(zone_name).to_ascii_lowercase();
    full.strip_suffix(&zone)
        .and_then(|prefix| prefix.strip_suffix('.'))
        .map(str::to_string)
}

/// Whether an `in-addr.arpa.` zone is authoritative for `ip`.
///
/// Handles the classful `/24` form (`3.2.1.in-addr.arpa.`) and RFC 2317
/// classless delegations whose first label embeds `<low>/<prefix>`
/// (`0/25.3.2.1.in-addr.arpa.` covers last octets 0..=127).
#[must_use]
pub fn ptr_is_in_zone(ip: Ipv4Addr, zone_name: &str) -> bool {
    let lower = ensure_trailing_dot(zone_name).to_ascii_lowercase();
    let Some(prefix_part) = lower.strip_suffix(".in-addr.arpa.") else {
        return false;
    };

    let octets = ip.octets();
    let matches_slash24 = |labels: &[&str]| -> bool {
        labels.len() == 3
            && labels[0] == octets[2].to_string()
            && labels[1] == octets[1].to_string()
            && labels[2] == octets[0].to_string()
    };

    let labels: Vec<&str> = prefix_part.split('.').collect();
    match labels.as_slice() {
        [_, _, _] => matches_slash24(&labels),
        [range, rest @ ..] if range.contains('/') => {
            if !matches_slash24(rest) {
                return false;
            }
            let Some((low, prefix)) = range.split_once('/') else {
                return false;
            };
            let (Ok(low), Ok(prefix)) = (low.parse::<u32>(), prefix.parse::<u32>()) else {
                return false;
            };
            if !(25..=32).contains(&prefix) {
                return false;
            }
            let size = 1u32 << (32 - prefix);
            let last = u32::from(octets[3]);
            last >= low && last < low + size
        }
        _ => false,
    }
}
