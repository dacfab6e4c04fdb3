//! # Evidence Custody State Machine
//!
//! One [`Evidence`] record per item under custody.
//!
//! ## States
//!
//! ```text
//! create ──▶ Active ──transfer──▶ Active
//!              │
//!            delete
//!              ▼
//!           Deleted ──delete──▶ Deleted   (idempotent)
//!              │
//!           transfer ──▶ InvalidState
//! ```
//!
//! ## Invariants
//!
//! - `owner == transferChain[last]` at all times. Deletion is a status
//!   change, so `owner` stays the last legitimate custodian.
//! - `len(transferChain) == len(transferTime)`: every chain entry, including
//!   the first, carries the timestamp at which custody began.
//! - `transferChain` and `transferTime` are append-only and are never
//!   cleared, including on deletion.
//! - `evidenceID` and the content descriptors are fixed at creation.
//!
//! Fields are private so the invariants can only be changed through
//! [`Evidence::transfer`] and [`Evidence::mark_deleted`]. Decoding a stored
//! record re-checks them.

use std::fmt;

use coc_core::{CaseId, EvidenceId, ParticipantId, Timestamp};
use serde::{Deserialize, Serialize};

use crate::codec::Record;
use crate::error::StateError;

// ── Status ──────────────────────────────────────────────────────────────────

/// Lifecycle status of an evidence record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EvidenceStatus {
    /// Under custody; may be transferred.
    #[default]
    Active,
    /// Soft-deleted; history retained, no further transfers.
    Deleted,
}

impl EvidenceStatus {
    /// Status name as stored.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Deleted => "Deleted",
        }
    }
}

impl fmt::Display for EvidenceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Creation input ──────────────────────────────────────────────────────────

/// Input to [`Evidence::create`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvidence {
    evidence_id: EvidenceId,
    description: String,
    owner: ParticipantId,
    creator: Option<ParticipantId>,
    case_id: Option<CaseId>,
    file_hash: Option<String>,
    file_size: Option<u64>,
    file_type: Option<String>,
}

impl NewEvidence {
    /// Evidence owned, and created, by `owner`.
    pub fn new(
        evidence_id: EvidenceId,
        description: impl Into<String>,
        owner: ParticipantId,
    ) -> Self {
        Self {
            evidence_id,
            description: description.into(),
            owner,
            creator: None,
            case_id: None,
            file_hash: None,
            file_size: None,
            file_type: None,
        }
    }

    /// Record a creator distinct from the first owner.
    pub fn with_creator(mut self, creator: ParticipantId) -> Self {
        self.creator = Some(creator);
        self
    }

    /// Link the evidence to a case.
    pub fn in_case(mut self, case_id: CaseId) -> Self {
        self.case_id = Some(case_id);
        self
    }

    /// Attach content descriptors. Empty strings are treated as absent.
    pub fn with_content(
        mut self,
        file_hash: impl Into<String>,
        file_size: Option<u64>,
        file_type: impl Into<String>,
    ) -> Self {
        self.file_hash = non_empty(file_hash.into());
        self.file_size = file_size;
        self.file_type = non_empty(file_type.into());
        self
    }

    /// The identifier of the evidence to be created.
    pub fn evidence_id(&self) -> &EvidenceId {
        &self.evidence_id
    }

    /// The participant credited with creation.
    pub fn creator(&self) -> &ParticipantId {
        self.creator.as_ref().unwrap_or(&self.owner)
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

// ── Evidence ────────────────────────────────────────────────────────────────

/// An item under custody.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "EvidenceWire")]
pub struct Evidence {
    #[serde(rename = "evidenceID")]
    evidence_id: EvidenceId,
    creator: ParticipantId,
    owner: ParticipantId,
    description: String,
    #[serde(rename = "caseID", skip_serializing_if = "Option::is_none")]
    case_id: Option<CaseId>,
    #[serde(rename = "transferChain")]
    transfer_chain: Vec<ParticipantId>,
    #[serde(rename = "transferTime")]
    transfer_time: Vec<Timestamp>,
    #[serde(rename = "fileHash", skip_serializing_if = "Option::is_none")]
    file_hash: Option<String>,
    #[serde(rename = "fileSize", skip_serializing_if = "Option::is_none")]
    file_size: Option<u64>,
    #[serde(rename = "fileType", skip_serializing_if = "Option::is_none")]
    file_type: Option<String>,
    status: EvidenceStatus,
}

impl Evidence {
    /// Create an active record. The first owner opens the custody chain at
    /// `created_at`.
    pub fn create(new: NewEvidence, created_at: Timestamp) -> Self {
        let creator = new.creator().clone();
        Self {
            evidence_id: new.evidence_id,
            creator,
            transfer_chain: vec![new.owner.clone()],
            transfer_time: vec![created_at],
            owner: new.owner,
            description: new.description,
            case_id: new.case_id,
            file_hash: new.file_hash,
            file_size: new.file_size,
            file_type: new.file_type,
            status: EvidenceStatus::Active,
        }
    }

    /// Hand custody to `new_owner` at `at`.
    ///
    /// Rejected once the record is deleted.
    pub fn transfer(&mut self, new_owner: ParticipantId, at: Timestamp) -> Result<(), StateError> {
        self.require_active("transfer")?;
        self.transfer_chain.push(new_owner.clone());
        self.transfer_time.push(at);
        self.owner = new_owner;
        Ok(())
    }

    /// Soft-delete. Returns `true` if the status changed; deleting a deleted
    /// record leaves it unchanged.
    pub fn mark_deleted(&mut self) -> bool {
        let changed = self.status == EvidenceStatus::Active;
        self.status = EvidenceStatus::Deleted;
        changed
    }

    fn require_active(&self, operation: &'static str) -> Result<(), StateError> {
        if self.status != EvidenceStatus::Active {
            return Err(StateError::InvalidState {
                kind: "evidence",
                id: self.evidence_id.to_string(),
                state: self.status.to_string(),
                operation,
            });
        }
        Ok(())
    }

    /// Primary key.
    pub fn evidence_id(&self) -> &EvidenceId {
        &self.evidence_id
    }

    /// The participant credited with creation.
    pub fn creator(&self) -> &ParticipantId {
        &self.creator
    }

    /// Current (or, once deleted, last) custodian.
    pub fn owner(&self) -> &ParticipantId {
        &self.owner
    }

    /// Free-text description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Linked case, if any.
    pub fn case_id(&self) -> Option<&CaseId> {
        self.case_id.as_ref()
    }

    /// Every custodian in order; index 0 is the first owner.
    pub fn transfer_chain(&self) -> &[ParticipantId] {
        &self.transfer_chain
    }

    /// When each custodian in [`transfer_chain`](Self::transfer_chain) took custody.
    pub fn transfer_time(&self) -> &[Timestamp] {
        &self.transfer_time
    }

    /// `(custodian, since)` pairs in chain order.
    pub fn custody(&self) -> impl Iterator<Item = (&ParticipantId, Timestamp)> + '_ {
        self.transfer_chain
            .iter()
            .zip(self.transfer_time.iter().copied())
    }

    /// Number of transfers since creation.
    pub fn transfer_count(&self) -> usize {
        self.transfer_chain.len() - 1
    }

    /// Content hash recorded at creation.
    pub fn file_hash(&self) -> Option<&str> {
        self.file_hash.as_deref()
    }

    /// Content size in bytes recorded at creation.
    pub fn file_size(&self) -> Option<u64> {
        self.file_size
    }

    /// Content type recorded at creation.
    pub fn file_type(&self) -> Option<&str> {
        self.file_type.as_deref()
    }

    /// Lifecycle status.
    pub fn status(&self) -> EvidenceStatus {
        self.status
    }

    /// Whether the record has been soft-deleted.
    pub fn is_deleted(&self) -> bool {
        self.status == EvidenceStatus::Deleted
    }
}

impl Record for Evidence {
    const KIND: &'static str = "evidence";

    fn key(&self) -> String {
        self.evidence_id.as_str().to_string()
    }
}

// ── Wire form ───────────────────────────────────────────────────────────────

/// Unchecked stored shape. Records written without `status` or with empty
/// descriptor strings are accepted.
#[derive(Deserialize)]
struct EvidenceWire {
    #[serde(rename = "evidenceID")]
    evidence_id: EvidenceId,
    creator: ParticipantId,
    owner: ParticipantId,
    #[serde(default)]
    description: String,
    #[serde(rename = "caseID", default)]
    case_id: Option<String>,
    #[serde(rename = "transferChain")]
    transfer_chain: Vec<ParticipantId>,
    #[serde(rename = "transferTime")]
    transfer_time: Vec<Timestamp>,
    #[serde(rename = "fileHash", default)]
    file_hash: Option<String>,
    #[serde(rename = "fileSize", default)]
    file_size: Option<u64>,
    #[serde(rename = "fileType", default)]
    file_type: Option<String>,
    #[serde(default)]
    status: EvidenceStatus,
}

impl TryFrom<EvidenceWire> for Evidence {
    type Error = String;

    fn try_from(wire: EvidenceWire) -> Result<Self, Self::Error> {
        let Some(last) = wire.transfer_chain.last() else {
            return Err("transferChain is empty".to_string());
        };
        if *last != wire.owner {
            return Err(format!(
                "owner \"{}\" is not the last custodian \"{}\"",
                wire.owner, last
            ));
        }
        if wire.transfer_chain.len() != wire.transfer_time.len() {
            return Err(format!(
                "transferChain has {} entries but transferTime has {}",
                wire.transfer_chain.len(),
                wire.transfer_time.len()
            ));
        }
        let case_id = match wire.case_id.and_then(non_empty) {
            Some(raw) => Some(CaseId::new(raw).map_err(|e| e.to_string())?),
            None => None,
        };
        Ok(Self {
            evidence_id: wire.evidence_id,
            creator: wire.creator,
            owner: wire.owner,
            description: wire.description,
            case_id,
            transfer_chain: wire.transfer_chain,
            transfer_time: wire.transfer_time,
            file_hash: wire.file_hash.and_then(non_empty),
            file_size: wire.file_size,
            file_type: wire.file_type.and_then(non_empty),
            status: wire.status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{decode, encode};

    fn pid(s: &str) -> ParticipantId {
        ParticipantId::new(s).unwrap()
    }

    fn ts(secs: i64) -> Timestamp {
        Timestamp::from_epoch_secs(1_767_225_600 + secs).unwrap()
    }

    fn e1() -> Evidence {
        Evidence::create(
            NewEvidence::new(EvidenceId::new("E1").unwrap(), "hard drive", pid("P1")),
            ts(0),
        )
    }

    #[test]
    fn create_opens_chain_with_owner() {
        let e = e1();
        assert_eq!(e.owner(), &pid("P1"));
        assert_eq!(e.creator(), &pid("P1"));
        assert_eq!(e.transfer_chain(), &[pid("P1")]);
        assert_eq!(e.transfer_time(), &[ts(0)]);
        assert_eq!(e.status(), EvidenceStatus::Active);
        assert_eq!(e.transfer_count(), 0);
    }

    #[test]
    fn distinct_creator_is_recorded() {
        let e = Evidence::create(
            NewEvidence::new(EvidenceId::new("E2").unwrap(), "phone", pid("P2"))
                .with_creator(pid("P1")),
            ts(0),
        );
        assert_eq!(e.creator(), &pid("P1"));
        assert_eq!(e.owner(), &pid("P2"));
        assert_eq!(e.transfer_chain(), &[pid("P2")]);
    }

    #[test]
    fn transfer_appends_aligned_history() {
        let mut e = e1();
        e.transfer(pid("P2"), ts(60)).unwrap();
        e.transfer(pid("P3"), ts(120)).unwrap();
        assert_eq!(e.owner(), &pid("P3"));
        assert_eq!(e.transfer_chain(), &[pid("P1"), pid("P2"), pid("P3")]);
        assert_eq!(e.transfer_time(), &[ts(0), ts(60), ts(120)]);
        let custody: Vec<_> = e.custody().map(|(p, t)| (p.as_str(), t)).collect();
        assert_eq!(custody[1], ("P2", ts(60)));
    }

    #[test]
    fn delete_is_idempotent_and_keeps_history() {
        let mut e = e1();
        e.transfer(pid("P2"), ts(60)).unwrap();
        assert!(e.mark_deleted());
        let snapshot = e.clone();
        assert!(!e.mark_deleted());
        assert_eq!(e, snapshot);
        assert_eq!(e.owner(), &pid("P2"));
        assert_eq!(e.transfer_chain().len(), 2);
    }

    #[test]
    fn transfer_after_delete_is_rejected() {
        let mut e = e1();
        e.mark_deleted();
        let err = e.transfer(pid("P2"), ts(60)).unwrap_err();
        assert!(matches!(err, StateError::InvalidState { operation: "transfer", .. }));
        assert_eq!(e.transfer_chain(), &[pid("P1")]);
    }

    #[test]
    fn content_descriptors_drop_empty_strings() {
        let e = Evidence::create(
            NewEvidence::new(EvidenceId::new("E3").unwrap(), "usb", pid("P1"))
                .with_content("", Some(0), "image/raw"),
            ts(0),
        );
        assert_eq!(e.file_hash(), None);
        assert_eq!(e.file_size(), Some(0));
        assert_eq!(e.file_type(), Some("image/raw"));
    }

    #[test]
    fn wire_shape_uses_stored_field_names() {
        let e = Evidence::create(
            NewEvidence::new(EvidenceId::new("E1").unwrap(), "hard drive", pid("P1"))
                .in_case(CaseId::new("C1").unwrap())
                .with_content("abc123", Some(512), "disk"),
            ts(0),
        );
        let json = serde_json::to_value(&e).unwrap();
        assert_eq!(json["evidenceID"], "E1");
        assert_eq!(json["caseID"], "C1");
        assert_eq!(json["transferChain"][0], "P1");
        assert_eq!(json["transferTime"][0], "2026-01-01T00:00:00Z");
        assert_eq!(json["fileSize"], 512);
        assert_eq!(json["status"], "Active");
    }

    #[test]
    fn decode_accepts_legacy_empty_fields() {
        let payload = br#"{"evidenceID":"E9","creator":"P1","owner":"P1","description":"x",
            "caseID":"","transferChain":["P1"],"transferTime":["2026-01-01T00:00:00Z"],
            "fileHash":"","fileSize":0,"fileType":""}"#;
        let e: Evidence = decode("E9", payload).unwrap();
        assert_eq!(e.case_id(), None);
        assert_eq!(e.file_hash(), None);
        assert_eq!(e.status(), EvidenceStatus::Active);
    }

    #[test]
    fn decode_rejects_owner_mismatch() {
        let payload = br#"{"evidenceID":"E1","creator":"P1","owner":"DELETED","description":"",
            "transferChain":["P1"],"transferTime":["2026-01-01T00:00:00Z"]}"#;
        let err = decode::<Evidence>("E1", payload).unwrap_err();
        assert!(err.to_string().contains("last custodian"));
    }

    #[test]
    fn decode_rejects_misaligned_history() {
        let payload = br#"{"evidenceID":"E1","creator":"P1","owner":"P2","description":"",
            "transferChain":["P1","P2"],"transferTime":["2026-01-01T00:00:00Z"]}"#;
        assert!(matches!(
            decode::<Evidence>("E1", payload),
            Err(StateError::Corrupt { .. })
        ));

        let empty = br#"{"evidenceID":"E1","creator":"P1","owner":"P1","description":"",
            "transferChain":[],"transferTime":[]}"#;
        assert!(decode::<Evidence>("E1", empty).is_err());
    }

    #[test]
    fn encode_decode_preserves_record() {
        let mut e = e1();
        e.transfer(pid("P2"), ts(30)).unwrap();
        e.mark_deleted();
        let back: Evidence = decode("E1", &encode(&e).unwrap()).unwrap();
        assert_eq!(back, e);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn arb_participant() -> impl Strategy<Value = ParticipantId> {
            "P[0-9]{1,3}".prop_map(|s| ParticipantId::new(s).unwrap())
        }

        proptest! {
            #[test]
            fn n_transfers_keep_owner_at_chain_end(
                owners in prop::collection::vec(arb_participant(), 0..20)
            ) {
                let mut e = e1();
                for (i, owner) in owners.iter().enumerate() {
                    e.transfer(owner.clone(), ts(i as i64 + 1)).unwrap();
                }
                prop_assert_eq!(e.transfer_chain().len(), owners.len() + 1);
                prop_assert_eq!(e.transfer_time().len(), owners.len() + 1);
                prop_assert_eq!(e.owner(), &e.transfer_chain()[owners.len()]);

                let back: Evidence = decode("E1", &encode(&e).unwrap()).unwrap();
                prop_assert_eq!(back, e);
            }
        }
    }
}
