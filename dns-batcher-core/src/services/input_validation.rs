//! Stateless per-change validation.
//!
//! The first pipeline stage: everything here is checkable from the input
//! alone, with no repository access. Errors accumulate per position and
//! across the batch; nothing short-circuits.

use std::collections::HashMap;

use dns_batcher_record::name;
use dns_batcher_record::{ChangeError, ChangeKind, RecordData, RecordType};

use crate::types::{BatchConfig, ChangeInput, Validated};

/// Longest text payload accepted for a TXT record.
const MAX_TXT_LENGTH: usize = 64_767;

/// Validates every change in the batch, preserving positions.
///
/// Runs the per-change checks, then a whole-batch pass that flags adds
/// sharing the same `(name, type)` pair on every offending position.
pub(crate) fn validate_batch_inputs(
    changes: &[ChangeInput],
    config: &BatchConfig,
) -> Vec<Validated<ChangeInput>> {
    let mut results: Vec<Vec<ChangeError>> = changes
        .iter()
        .map(|change| validate_change_input(change, config))
        .collect();

    // Whole-batch pass: duplicate (name, type) adds.
    let mut add_positions: HashMap<(String, RecordType), Vec<usize>> = HashMap::new();
    for (position, change) in changes.iter().enumerate() {
        if change.change_type == ChangeKind::Add {
            let key = (
                change.normalized_name().to_ascii_lowercase(),
                change.record_type,
            );
            add_positions.entry(key).or_default().push(position);
        }
    }
    for positions in add_positions.values().filter(|p| p.len() > 1) {
        for &position in positions {
            let change = &changes[position];
            results[position].push(ChangeError::RecordNameNotUniqueInBatch {
                name: change.normalized_name(),
                record_type: change.record_type,
            });
        }
    }

    changes
        .iter()
        .zip(results)
        .map(|(change, errors)| Validated::from_errors(change.clone(), errors))
        .collect()
}

/// All input-level errors for one change.
fn validate_change_input(change: &ChangeInput, config: &BatchConfig) -> Vec<ChangeError> {
    let mut errors = Vec::new();

    validate_input_name(change, &mut errors);
    validate_ttl(change, config, &mut errors);
    validate_record_data(change, &mut errors);

    errors
}

fn validate_input_name(change: &ChangeInput, errors: &mut Vec<ChangeError>) {
    if change.record_type == RecordType::Ptr {
        let ip = &change.input_name;
        if !name::is_valid_ipv4_address(ip) && !name::is_valid_ipv6_address(ip) {
            errors.push(ChangeError::InvalidIPAddress {
                address: ip.clone(),
            });
        }
    } else if !name::is_valid_fqdn(&change.input_name) {
        errors.push(ChangeError::InvalidDomainName {
            name: change.input_name.clone(),
        });
    }
}

fn validate_ttl(change: &ChangeInput, config: &BatchConfig, errors: &mut Vec<ChangeError>) {
    match change.ttl {
        Some(ttl) => {
            if ttl < config.min_ttl || ttl > config.max_ttl {
                errors.push(ChangeError::InvalidTTL {
                    ttl,
                    min: config.min_ttl,
                    max: config.max_ttl,
                });
            }
        }
        None => {
            if change.change_type == ChangeKind::Add {
                errors.push(ChangeError::InvalidInputField {
                    field: "ttl".to_string(),
                    reason: "ttl is required for Add changes".to_string(),
                });
            }
        }
    }
}

fn validate_record_data(change: &ChangeInput, errors: &mut Vec<ChangeError>) {
    let Some(record) = &change.record else {
        if change.change_type == ChangeKind::Add {
            errors.push(ChangeError::InvalidInputField {
                field: "record".to_string(),
                reason: "record data is required for Add changes".to_string(),
            });
        }
        return;
    };

    if record.record_type() != change.record_type {
        errors.push(ChangeError::InvalidInputField {
            field: "record".to_string(),
            reason: format!(
                "record data is {} but the change declares type {}",
                record.record_type(),
                change.record_type
            ),
        });
        return;
    }

    match record {
        RecordData::A { address } => {
            if !name::is_valid_ipv4_address(address) {
                errors.push(ChangeError::InvalidIPAddress {
                    address: address.clone(),
                });
            }
        }
        RecordData::AAAA { address } => {
            if !name::is_valid_ipv6_address(address) {
                errors.push(ChangeError::InvalidIPAddress {
                    address: address.clone(),
                });
            }
        }
        RecordData::CNAME { target } | RecordData::PTR { target } => {
            if !name::is_valid_fqdn(target) {
                errors.push(ChangeError::InvalidDomainName {
                    name: target.clone(),
                });
            }
        }
        RecordData::NS { nameserver } => {
            if !name::is_valid_fqdn(nameserver) {
                errors.push(ChangeError::InvalidDomainName {
                    name: nameserver.clone(),
                });
            }
        }
        RecordData::MX { exchange, .. } => {
            if !name::is_valid_fqdn(exchange) {
                errors.push(ChangeError::InvalidDomainName {
                    name: exchange.clone(),
                });
            }
        }
        RecordData::TXT { text } => {
            if text.is_empty() || text.len() > MAX_TXT_LENGTH {
                errors.push(ChangeError::InvalidInputField {
                    field: "record".to_string(),
                    reason: format!("text must be 1 to {MAX_TXT_LENGTH} characters"),
                });
            }
        }
    }
}
