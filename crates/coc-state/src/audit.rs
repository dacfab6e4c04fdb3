//! # Audit Log Entries
//!
//! One [`AuditLogEntry`] per mutating evidence action. Entries are keyed by
//! the reserved log prefix plus the host transaction identifier, so key
//! order is transaction order and an entry can never collide with a record.
//! Entries are written once and never updated.
//!
//! [`AuditLogEntry::digest`] fingerprints an entry over its canonical bytes,
//! letting an auditor holding an exported log detect later alteration.

use std::fmt;

use coc_core::{
    sha256_digest, CanonicalBytes, CanonicalizationError, ContentDigest, EvidenceId,
    ParticipantId, Timestamp, LOG_KEY_PREFIX,
};
use serde::{Deserialize, Serialize};

use crate::codec::Record;

/// The kind of mutating action an entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionType {
    /// Evidence registered.
    Created,
    /// Custody handed on.
    Transferred,
    /// Evidence soft-deleted.
    Deleted,
}

impl ActionType {
    /// Action name as stored.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "Created",
            Self::Transferred => "Transferred",
            Self::Deleted => "Deleted",
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Log key for a transaction: `LOG-<tx_id>`.
pub fn log_key(tx_id: &str) -> String {
    format!("{LOG_KEY_PREFIX}{tx_id}")
}

/// An immutable record of one mutating evidence action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditLogEntry {
    /// Ledger key of this entry (`LOG-<tx_id>`).
    #[serde(rename = "logID")]
    pub log_id: String,
    /// The evidence acted on.
    #[serde(rename = "evidenceID")]
    pub evidence_id: EvidenceId,
    /// What happened.
    #[serde(rename = "actionType")]
    pub action_type: ActionType,
    /// Who did it: the creator for creations, the caller's raw identity
    /// otherwise.
    #[serde(rename = "performedBy")]
    pub performed_by: String,
    /// Host-agreed transaction time.
    pub timestamp: Timestamp,
    /// Custodian after the action.
    pub owner: ParticipantId,
}

impl AuditLogEntry {
    /// Build the entry for transaction `tx_id`.
    pub fn new(
        tx_id: &str,
        evidence_id: EvidenceId,
        action_type: ActionType,
        performed_by: impl Into<String>,
        timestamp: Timestamp,
        owner: ParticipantId,
    ) -> Self {
        Self {
            log_id: log_key(tx_id),
            evidence_id,
            action_type,
            performed_by: performed_by.into(),
            timestamp,
            owner,
        }
    }

    /// SHA-256 over the canonical JSON form of the entry.
    pub fn digest(&self) -> Result<ContentDigest, CanonicalizationError> {
        Ok(sha256_digest(&CanonicalBytes::new(self)?))
    }
}

impl Record for AuditLogEntry {
    const KIND: &'static str = "audit log";

    fn key(&self) -> String {
        self.log_id.clone()
    }
}
