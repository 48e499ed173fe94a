//! Validation against the current record inventory.
//!
//! The third pipeline stage. The record sets behind every successfully
//! discovered change are fetched concurrently across the deduplicated
//! `(zone_id, record_name)` set, then each position is checked against the
//! snapshot, the requesting principal, and the configured DNS rules.
//! Errors accumulate per position; other positions continue.

use std::collections::BTreeSet;
use std::sync::Arc;

use dns_batcher_record::name;
use dns_batcher_record::{ChangeError, ChangeKind, RecordData, RecordType};

use crate::error::CoreResult;
use crate::services::ServiceContext;
use crate::traits::RecordSetRepository;
use crate::types::{
    AuthPrincipal, ChangeForValidation, ExistingRecordSets, Validated,
};

/// Builds the record-set snapshot for the batch.
///
/// Keys are deduplicated across changes; the per-key lookups run
/// concurrently and their results join commutatively. Any transport error
/// aborts the pipeline.
pub(crate) async fn fetch_record_sets(
    record_set_repository: &Arc<dyn RecordSetRepository>,
    changes: &[Validated<ChangeForValidation>],
) -> CoreResult<ExistingRecordSets> {
    let keys: BTreeSet<(String, String)> = changes
        .iter()
        .filter_map(Validated::as_valid)
        .map(|change| {
            (
                change.zone.id.clone(),
                change.record_name.to_ascii_lowercase(),
            )
        })
        .collect();

    let lookups: Vec<_> = keys
        .iter()
        .map(|(zone_id, record_name)| {
            record_set_repository.get_record_sets_by_name(zone_id, record_name)
        })
        .collect();
    let results = futures::future::join_all(lookups).await;

    let mut record_sets = Vec::new();
    for result in results {
        record_sets.extend(result?);
    }
    Ok(ExistingRecordSets::new(record_sets))
}

/// Applies the contextual rules to every position.
pub(crate) fn validate_changes_with_context(
    changes: Vec<Validated<ChangeForValidation>>,
    record_sets: &ExistingRecordSets,
    auth: &AuthPrincipal,
    ctx: &ServiceContext,
) -> Vec<Validated<ChangeForValidation>> {
    changes
        .into_iter()
        .map(|validated| {
            validated.and_then(|change| {
                let errors = validate_change(&change, record_sets, auth, ctx);
                Validated::from_errors(change, errors)
            })
        })
        .collect()
}

fn validate_change(
    change: &ChangeForValidation,
    record_sets: &ExistingRecordSets,
    auth: &AuthPrincipal,
    ctx: &ServiceContext,
) -> Vec<ChangeError> {
    let mut errors = Vec::new();

    if !auth.can_modify_zone(&change.zone) {
        errors.push(ChangeError::UserIsNotAuthorized {
            user_name: auth.user_name.clone(),
        });
    }

    let display_name = change.input.normalized_name();
    if ctx.is_high_value_domain(&display_name) {
        errors.push(ChangeError::HighValueDomainError {
            name: display_name.clone(),
        });
    }

    match change.input.change_type {
        ChangeKind::Add => validate_add(change, record_sets, ctx, &display_name, &mut errors),
        ChangeKind::DeleteRecordSet => {
            validate_delete(change, record_sets, &display_name, &mut errors);
        }
    }

    errors
}

fn validate_add(
    change: &ChangeForValidation,
    record_sets: &ExistingRecordSets,
    ctx: &ServiceContext,
    display_name: &str,
    errors: &mut Vec<ChangeError>,
) {
    let zone_id = &change.zone.id;
    let record_name = &change.record_name;
    let record_type = change.input.record_type;

    let same_type_exists = record_sets.get(zone_id, record_name, record_type).is_some();
    if same_type_exists {
        errors.push(ChangeError::RecordAlreadyExists {
            name: display_name.to_string(),
        });
    }

    // CNAME must be alone at its name, in both directions.
    if record_type == RecordType::Cname {
        if !same_type_exists && record_sets.contains_any(zone_id, record_name) {
            errors.push(ChangeError::CnameIsNotUniqueError {
                name: display_name.to_string(),
            });
        }
    } else if record_sets.get(zone_id, record_name, RecordType::Cname).is_some() {
        errors.push(ChangeError::CnameIsNotUniqueError {
            name: display_name.to_string(),
        });
    }

    if record_type == RecordType::Ns {
        // The apex NS set stays under zone management.
        if record_name == name::APEX {
            errors.push(ChangeError::RecordAlreadyExists {
                name: display_name.to_string(),
            });
        }
        if let Some(RecordData::NS { nameserver }) = &change.input.record {
            if !is_approved_name_server(nameserver, &ctx.config().approved_name_servers) {
                errors.push(ChangeError::NotApprovedNameServer {
                    name_server: nameserver.clone(),
                });
            }
        }
    }
}

fn validate_delete(
    change: &ChangeForValidation,
    record_sets: &ExistingRecordSets,
    display_name: &str,
    errors: &mut Vec<ChangeError>,
) {
    let exists = record_sets
        .get(&change.zone.id, &change.record_name, change.input.record_type)
        .is_some();
    if !exists {
        errors.push(ChangeError::RecordDoesNotExist {
            name: display_name.to_string(),
        });
    }
}

fn is_approved_name_server(nameserver: &str, approved: &[String]) -> bool {
    let candidate = name::ensure_trailing_dot(nameserver).to_ascii_lowercase();
    approved
        .iter()
        .any(|entry| name::ensure_trailing_dot(entry).to_ascii_lowercase() == candidate)
}
