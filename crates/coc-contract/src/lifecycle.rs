//! # Evidence Lifecycle Manager
//!
//! Create, transfer, delete, and read evidence. Each mutation follows the
//! same sequence inside one invocation:
//!
//! 1. authorize the caller for the operation;
//! 2. read current state from the ledger;
//! 3. apply the [`Evidence`] transition;
//! 4. buffer the updated record;
//! 5. buffer exactly one audit entry.
//!
//! Any error returns immediately. There is no manual rollback: the host
//! commits the invocation's writes together or not at all.
//!
//! ## Audit actors
//!
//! | Action | `performedBy` |
//! |--------|---------------|
//! | Created | the creator (or the role constant for role entry points) |
//! | Transferred | the caller's raw identity |
//! | Deleted | the caller's raw identity |

use coc_core::{EvidenceId, ParticipantId};
use coc_ledger::Ledger;
use coc_policy::Operation;
use coc_state::{ActionType, AuditLogEntry, Evidence, NewEvidence, Record};

use crate::audit;
use crate::contract::CustodyContract;
use crate::error::ContractError;
use crate::store;

/// Owner recorded by [`CustodyContract::create_evidence_first_responder`].
pub const FIRST_RESPONDER_OWNER: &str = "FirstResponder";

/// Owner recorded by [`CustodyContract::create_evidence_second_investigator`].
pub const SECOND_INVESTIGATOR_OWNER: &str = "SecondInvestigator";

impl CustodyContract<'_> {
    /// Register new evidence with an explicit owner (and optionally a
    /// distinct creator, case link, and content descriptors).
    pub fn create_evidence(
        &self,
        ledger: &mut dyn Ledger,
        new: NewEvidence,
    ) -> Result<Evidence, ContractError> {
        self.create_as(ledger, Operation::CreateEvidence, new)
    }

    /// Register evidence owned by the first-responder role constant.
    pub fn create_evidence_first_responder(
        &self,
        ledger: &mut dyn Ledger,
        evidence_id: EvidenceId,
        description: &str,
    ) -> Result<Evidence, ContractError> {
        let owner = ParticipantId::new(FIRST_RESPONDER_OWNER)?;
        self.create_as(
            ledger,
            Operation::CreateEvidenceFirstResponder,
            NewEvidence::new(evidence_id, description, owner),
        )
    }

    /// Register evidence owned by the second-investigator role constant.
    pub fn create_evidence_second_investigator(
        &self,
        ledger: &mut dyn Ledger,
        evidence_id: EvidenceId,
        description: &str,
    ) -> Result<Evidence, ContractError> {
        let owner = ParticipantId::new(SECOND_INVESTIGATOR_OWNER)?;
        self.create_as(
            ledger,
            Operation::CreateEvidenceSecondInvestigator,
            NewEvidence::new(evidence_id, description, owner),
        )
    }

    fn create_as(
        &self,
        ledger: &mut dyn Ledger,
        operation: Operation,
        new: NewEvidence,
    ) -> Result<Evidence, ContractError> {
        tracing::debug!(operation = %operation, evidence_id = %new.evidence_id(), "invoked");
        self.authorize(ledger, operation)?;
        store::ensure_vacant(ledger, Evidence::KIND, new.evidence_id().as_str())?;

        let evidence = Evidence::create(new, ledger.tx_timestamp());
        store::write(ledger, &evidence)?;
        let entry = audit::append(
            ledger,
            evidence.evidence_id(),
            ActionType::Created,
            evidence.creator().as_str(),
            evidence.owner(),
        )?;
        tracing::info!(
            evidence_id = %evidence.evidence_id(),
            owner = %evidence.owner(),
            log_id = %entry.log_id,
            "evidence created"
        );
        Ok(evidence)
    }

    /// Hand custody of `evidence_id` to `new_owner`.
    ///
    /// Fails with `InvalidState` once the evidence is deleted.
    pub fn transfer_evidence(
        &self,
        ledger: &mut dyn Ledger,
        evidence_id: &EvidenceId,
        new_owner: ParticipantId,
    ) -> Result<Evidence, ContractError> {
        tracing::debug!(
            operation = "TransferEvidence",
            evidence_id = %evidence_id,
            new_owner = %new_owner,
            "invoked"
        );
        self.authorize(ledger, Operation::TransferEvidence)?;
        let mut evidence: Evidence = store::require(ledger, evidence_id.as_str())?;

        evidence.transfer(new_owner, ledger.tx_timestamp())?;
        store::write(ledger, &evidence)?;
        let performed_by = ledger.caller().id.clone();
        let entry = audit::append(
            ledger,
            evidence.evidence_id(),
            ActionType::Transferred,
            &performed_by,
            evidence.owner(),
        )?;
        tracing::info!(
            evidence_id = %evidence_id,
            owner = %evidence.owner(),
            transfers = evidence.transfer_count(),
            log_id = %entry.log_id,
            "evidence transferred"
        );
        Ok(evidence)
    }

    /// Soft-delete `evidence_id`. Repeating a delete leaves the record
    /// unchanged but still appends a new audit entry.
    pub fn delete_evidence(
        &self,
        ledger: &mut dyn Ledger,
        evidence_id: &EvidenceId,
    ) -> Result<Evidence, ContractError> {
        tracing::debug!(operation = "DeleteEvidence", evidence_id = %evidence_id, "invoked");
        self.authorize(ledger, Operation::DeleteEvidence)?;
        let mut evidence: Evidence = store::require(ledger, evidence_id.as_str())?;

        let changed = evidence.mark_deleted();
        store::write(ledger, &evidence)?;
        let performed_by = ledger.caller().id.clone();
        let entry = audit::append(
            ledger,
            evidence.evidence_id(),
            ActionType::Deleted,
            &performed_by,
            evidence.owner(),
        )?;
        tracing::info!(
            evidence_id = %evidence_id,
            already_deleted = !changed,
            log_id = %entry.log_id,
            "evidence deleted"
        );
        Ok(evidence)
    }

    /// Read one evidence record.
    pub fn get_evidence_details(
        &self,
        ledger: &dyn Ledger,
        evidence_id: &EvidenceId,
    ) -> Result<Evidence, ContractError> {
        tracing::debug!(operation = "GetEvidenceDetails", evidence_id = %evidence_id, "invoked");
        self.authorize(ledger, Operation::GetEvidenceDetails)?;
        store::require(ledger, evidence_id.as_str())
    }

    /// The audit entries for one evidence record, in transaction id order.
    pub fn get_evidence_history(
        &self,
        ledger: &dyn Ledger,
        evidence_id: &EvidenceId,
    ) -> Result<Vec<AuditLogEntry>, ContractError> {
        tracing::debug!(operation = "GetEvidenceHistory", evidence_id = %evidence_id, "invoked");
        self.authorize(ledger, Operation::GetEvidenceHistory)?;
        store::require::<Evidence>(ledger, evidence_id.as_str())?;
        audit::list_for_evidence(ledger, evidence_id)
    }

    /// The full audit log, in transaction id order.
    pub fn get_transaction_logs(
        &self,
        ledger: &dyn Ledger,
    ) -> Result<Vec<AuditLogEntry>, ContractError> {
        tracing::debug!(operation = "GetTransactionLogs", "invoked");
        self.authorize(ledger, Operation::GetTransactionLogs)?;
        audit::list_all(ledger)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{caller, commit, header, ledger};
    use crate::ErrorKind;
    use coc_policy::{AccessPolicy, PolicyConfig};
    use coc_state::EvidenceStatus;

    fn eid(s: &str) -> EvidenceId {
        EvidenceId::new(s).unwrap()
    }

    fn pid(s: &str) -> ParticipantId {
        ParticipantId::new(s).unwrap()
    }

    #[test]
    fn create_writes_record_and_one_entry() {
        let policy = AccessPolicy::default();
        let contract = CustodyContract::new(&policy);
        let ledger = ledger();
        let mut tx = ledger.begin(header("tx-1", 0, caller("x509::P1", "first responder")));

        let e = contract
            .create_evidence(&mut tx, NewEvidence::new(eid("E1"), "laptop", pid("P1")))
            .unwrap();
        assert_eq!(e.transfer_chain(), &[pid("P1")]);
        assert_eq!(tx.pending_writes(), 2);
        commit(tx);

        let tx = ledger.begin(header("tx-2", 1, caller("x509::P1", "first responder")));
        let logs = contract.get_transaction_logs(&tx).unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].action_type, ActionType::Created);
        assert_eq!(logs[0].performed_by, "P1");
    }

    #[test]
    fn create_on_occupied_key_fails() {
        let policy = AccessPolicy::open();
        let contract = CustodyContract::new(&policy);
        let ledger = ledger();
        let mut tx = ledger.begin(header("tx-1", 0, caller("c", "court")));
        contract
            .create_evidence(&mut tx, NewEvidence::new(eid("E1"), "a", pid("P1")))
            .unwrap();
        commit(tx);

        let mut tx = ledger.begin(header("tx-2", 1, caller("c", "court")));
        let err = contract
            .create_evidence(&mut tx, NewEvidence::new(eid("E1"), "b", pid("P2")))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AlreadyExists);
        assert_eq!(tx.pending_writes(), 0);
    }

    #[test]
    fn create_denied_for_counsel() {
        let policy = AccessPolicy::default();
        let contract = CustodyContract::new(&policy);
        let ledger = ledger();
        let mut tx = ledger.begin(header("tx-1", 0, caller("x509::D", "defense")));
        let err = contract
            .create_evidence(&mut tx, NewEvidence::new(eid("E1"), "a", pid("D")))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
        assert_eq!(tx.pending_writes(), 0);
    }

    #[test]
    fn role_entry_points_use_owner_constants() {
        let policy = PolicyConfig::organization_gated().build().unwrap();
        let contract = CustodyContract::new(&policy);
        let ledger = ledger();

        let mut tx = ledger.begin(header("tx-1", 0, caller("c1", "")));
        let e = contract
            .create_evidence_first_responder(&mut tx, eid("E1"), "knife")
            .unwrap();
        assert_eq!(e.owner().as_str(), FIRST_RESPONDER_OWNER);
        commit(tx);

        // The test caller belongs to Org1MSP.
        let mut tx = ledger.begin(header("tx-2", 1, caller("c1", "")));
        let err = contract
            .create_evidence_second_investigator(&mut tx, eid("E2"), "glove")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
        assert!(err.to_string().contains("CreateEvidenceSecondInvestigator"));
    }

    #[test]
    fn transfer_updates_owner_and_logs_caller() {
        let policy = AccessPolicy::default();
        let contract = CustodyContract::new(&policy);
        let ledger = ledger();
        let mut tx = ledger.begin(header("tx-1", 0, caller("x509::P1", "first responder")));
        contract
            .create_evidence(&mut tx, NewEvidence::new(eid("E1"), "a", pid("P1")))
            .unwrap();
        commit(tx);

        let mut tx = ledger.begin(header("tx-2", 60, caller("x509::P1", "first responder")));
        let e = contract.transfer_evidence(&mut tx, &eid("E1"), pid("P2")).unwrap();
        assert_eq!(e.owner(), &pid("P2"));
        assert_eq!(e.transfer_time()[1], tx.tx_timestamp());
        commit(tx);

        let tx = ledger.begin(header("tx-3", 61, caller("x509::P1", "first responder")));
        let history = contract.get_evidence_history(&tx, &eid("E1")).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[1].action_type, ActionType::Transferred);
        assert_eq!(history[1].performed_by, "x509::P1");
        assert_eq!(history[1].owner, pid("P2"));
    }

    #[test]
    fn transfer_missing_evidence_is_not_found() {
        let policy = AccessPolicy::default();
        let contract = CustodyContract::new(&policy);
        let ledger = ledger();
        let mut tx = ledger.begin(header("tx-1", 0, caller("x", "court")));
        let err = contract
            .transfer_evidence(&mut tx, &eid("E404"), pid("P2"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn deleted_evidence_cannot_be_transferred() {
        let policy = AccessPolicy::default();
        let contract = CustodyContract::new(&policy);
        let ledger = ledger();
        let fr = || caller("x509::P1", "first responder");

        let mut tx = ledger.begin(header("tx-1", 0, fr()));
        contract
            .create_evidence(&mut tx, NewEvidence::new(eid("E1"), "a", pid("P1")))
            .unwrap();
        commit(tx);
        let mut tx = ledger.begin(header("tx-2", 1, fr()));
        contract.delete_evidence(&mut tx, &eid("E1")).unwrap();
        commit(tx);

        let mut tx = ledger.begin(header("tx-3", 2, fr()));
        let err = contract.transfer_evidence(&mut tx, &eid("E1"), pid("P2")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidState);
        assert_eq!(tx.pending_writes(), 0);
    }

    #[test]
    fn repeated_delete_keeps_record_and_adds_entries() {
        let policy = AccessPolicy::default();
        let contract = CustodyContract::new(&policy);
        let ledger = ledger();
        let fr = || caller("x509::P1", "first responder");

        let mut tx = ledger.begin(header("tx-1", 0, fr()));
        contract
            .create_evidence(&mut tx, NewEvidence::new(eid("E1"), "a", pid("P1")))
            .unwrap();
        commit(tx);

        let mut first = None;
        for (i, tx_id) in ["tx-2", "tx-3"].iter().enumerate() {
            let mut tx = ledger.begin(header(tx_id, 10 + i as i64, fr()));
            let e = contract.delete_evidence(&mut tx, &eid("E1")).unwrap();
            assert_eq!(e.status(), EvidenceStatus::Deleted);
            assert_eq!(e.owner(), &pid("P1"));
            first.get_or_insert(e.clone());
            assert_eq!(Some(&e), first.as_ref());
            commit(tx);
        }

        let tx = ledger.begin(header("tx-4", 20, fr()));
        let deletes: Vec<_> = contract
            .get_transaction_logs(&tx)
            .unwrap()
            .into_iter()
            .filter(|e| e.action_type == ActionType::Deleted)
            .map(|e| e.log_id)
            .collect();
        assert_eq!(deletes, vec!["LOG-tx-2", "LOG-tx-3"]);
    }

    #[test]
    fn get_details_distinguishes_missing_and_corrupt() {
        let policy = AccessPolicy::open();
        let contract = CustodyContract::new(&policy);
        let ledger = ledger();
        let mut tx = ledger.begin(header("seed", 0, caller("x", "court")));
        tx.put_state("E-bad", b"{\"evidenceID\":\"E-bad\"}".to_vec()).unwrap();
        commit(tx);

        let tx = ledger.begin(header("tx-1", 1, caller("x", "court")));
        assert_eq!(
            contract.get_evidence_details(&tx, &eid("nonexistent")).unwrap_err().kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            contract.get_evidence_details(&tx, &eid("E-bad")).unwrap_err().kind(),
            ErrorKind::Serialization
        );
    }

    #[test]
    fn history_of_unknown_evidence_is_not_found() {
        let policy = AccessPolicy::open();
        let contract = CustodyContract::new(&policy);
        let ledger = ledger();
        let tx = ledger.begin(header("tx-1", 0, caller("x", "court")));
        assert_eq!(
            contract.get_evidence_history(&tx, &eid("E1")).unwrap_err().kind(),
            ErrorKind::NotFound
        );
    }
}
