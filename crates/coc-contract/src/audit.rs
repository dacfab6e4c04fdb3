//! # Audit Trail
//!
//! Appends one immutable [`AuditLogEntry`] per mutating evidence action and
//! reads the log back in key order.
//!
//! ## Security Invariant
//!
//! An evidence mutation without its audit entry must never commit. Both
//! writes are buffered in the same invocation; any failure to build, encode,
//! or buffer the entry is returned to the caller, which aborts the whole
//! invocation and the host discards the mutation with it.
//!
//! ## Retrieval
//!
//! Log keys are `LOG-<tx_id>`. Listing scans the half-open range
//! `["LOG-", "LOG.")`, which holds exactly the keys carrying the prefix, so
//! the scan never touches evidence, participant, or case records. Entries
//! that fail to decode are logged and skipped.

use coc_core::{EvidenceId, ParticipantId, LOG_KEY_PREFIX};
use coc_ledger::{Ledger, LedgerError};
use coc_state::{decode, ActionType, AuditLogEntry};

use crate::error::ContractError;
use crate::store;

/// Exclusive upper bound of the log key range: the prefix with its last
/// byte incremented (`'-'` + 1 = `'.'`).
pub const LOG_RANGE_END: &str = "LOG.";

/// Buffer the audit entry for the current transaction.
pub fn append(
    ledger: &mut dyn Ledger,
    evidence_id: &EvidenceId,
    action_type: ActionType,
    performed_by: &str,
    owner: &ParticipantId,
) -> Result<AuditLogEntry, ContractError> {
    let tx_id = ledger.tx_id().to_string();
    if tx_id.is_empty() {
        return Err(LedgerError::Storage {
            key: LOG_KEY_PREFIX.to_string(),
            reason: "host supplied an empty transaction identifier".to_string(),
        }
        .into());
    }
    let entry = AuditLogEntry::new(
        &tx_id,
        evidence_id.clone(),
        action_type,
        performed_by,
        ledger.tx_timestamp(),
        owner.clone(),
    );
    store::write(ledger, &entry)?;
    tracing::info!(
        log_id = %entry.log_id,
        evidence_id = %entry.evidence_id,
        action = %entry.action_type,
        performed_by = %entry.performed_by,
        "audit entry appended"
    );
    Ok(entry)
}

/// Every decodable audit entry, in log key order.
pub fn list_all(ledger: &dyn Ledger) -> Result<Vec<AuditLogEntry>, ContractError> {
    let mut entries = Vec::new();
    for item in ledger.range_scan(LOG_KEY_PREFIX, LOG_RANGE_END)? {
        let (key, value) = item?;
        if !key.starts_with(LOG_KEY_PREFIX) {
            continue;
        }
        match decode::<AuditLogEntry>(&key, &value) {
            Ok(entry) => entries.push(entry),
            Err(err) => {
                tracing::warn!(key = %key, error = %err, "skipping undecodable audit entry");
            }
        }
    }
    Ok(entries)
}

/// The audit entries for one evidence record, in log key order.
pub fn list_for_evidence(
    ledger: &dyn Ledger,
    evidence_id: &EvidenceId,
) -> Result<Vec<AuditLogEntry>, ContractError> {
    Ok(list_all(ledger)?
        .into_iter()
        .filter(|entry| &entry.evidence_id == evidence_id)
        .collect())
}
