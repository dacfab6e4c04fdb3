//! # Case Registry
//!
//! Keyed case records with set membership. Associations are guarded by
//! existence checks on both sides; a closed case rejects membership changes.
//! Case operations are not audited.

use coc_core::{CaseId, EvidenceId, ParticipantId};
use coc_ledger::Ledger;
use coc_policy::Operation;
use coc_state::{Case, Evidence, Participant, Record};

use crate::contract::CustodyContract;
use crate::error::ContractError;
use crate::store;

impl CustodyContract<'_> {
    /// Open a new case.
    pub fn create_case(
        &self,
        ledger: &mut dyn Ledger,
        case_id: CaseId,
        title: &str,
        description: &str,
    ) -> Result<Case, ContractError> {
        tracing::debug!(operation = "CreateCase", case_id = %case_id, "invoked");
        self.authorize(ledger, Operation::CreateCase)?;
        store::ensure_vacant(ledger, Case::KIND, case_id.as_str())?;

        let case = Case::open(case_id, title, description);
        store::write(ledger, &case)?;
        tracing::info!(case_id = %case.case_id, "case created");
        Ok(case)
    }

    /// Read a case.
    pub fn get_case(&self, ledger: &dyn Ledger, case_id: &CaseId) -> Result<Case, ContractError> {
        tracing::debug!(operation = "GetCase", case_id = %case_id, "invoked");
        self.authorize(ledger, Operation::GetCase)?;
        store::require(ledger, case_id.as_str())
    }

    /// Link existing evidence to an open case.
    pub fn add_evidence_to_case(
        &self,
        ledger: &mut dyn Ledger,
        case_id: &CaseId,
        evidence_id: EvidenceId,
    ) -> Result<Case, ContractError> {
        tracing::debug!(
            operation = "AddEvidenceToCase",
            case_id = %case_id,
            evidence_id = %evidence_id,
            "invoked"
        );
        self.authorize(ledger, Operation::AddEvidenceToCase)?;
        let mut case: Case = store::require(ledger, case_id.as_str())?;
        store::require::<Evidence>(ledger, evidence_id.as_str())?;

        let added = case.add_evidence(evidence_id)?;
        store::write(ledger, &case)?;
        tracing::info!(case_id = %case_id, added, "evidence linked to case");
        Ok(case)
    }

    /// Assign an existing participant to an open case.
    pub fn add_investigator_to_case(
        &self,
        ledger: &mut dyn Ledger,
        case_id: &CaseId,
        participant_id: ParticipantId,
    ) -> Result<Case, ContractError> {
        tracing::debug!(
            operation = "AddInvestigatorToCase",
            case_id = %case_id,
            participant_id = %participant_id,
            "invoked"
        );
        self.authorize(ledger, Operation::AddInvestigatorToCase)?;
        let mut case: Case = store::require(ledger, case_id.as_str())?;
        store::require::<Participant>(ledger, participant_id.as_str())?;

        let added = case.add_investigator(participant_id)?;
        store::write(ledger, &case)?;
        tracing::info!(case_id = %case_id, added, "investigator assigned to case");
        Ok(case)
    }

    /// Close an open case.
    pub fn close_case(
        &self,
        ledger: &mut dyn Ledger,
        case_id: &CaseId,
    ) -> Result<Case, ContractError> {
        self.change_status(ledger, case_id, Operation::CloseCase, Case::close)
    }

    /// Reopen a closed case.
    pub fn reopen_case(
        &self,
        ledger: &mut dyn Ledger,
        case_id: &CaseId,
    ) -> Result<Case, ContractError> {
        self.change_status(ledger, case_id, Operation::ReopenCase, Case::reopen)
    }

    fn change_status(
        &self,
        ledger: &mut dyn Ledger,
        case_id: &CaseId,
        operation: Operation,
        transition: fn(&mut Case) -> Result<(), coc_state::StateError>,
    ) -> Result<Case, ContractError> {
        tracing::debug!(operation = %operation, case_id = %case_id, "invoked");
        self.authorize(ledger, operation)?;
        let mut case: Case = store::require(ledger, case_id.as_str())?;
        transition(&mut case)?;
        store::write(ledger, &case)?;
        tracing::info!(case_id = %case_id, status = %case.status, "case status changed");
        Ok(case)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{caller, commit, header, ledger};
    use crate::ErrorKind;
    use coc_policy::AccessPolicy;
    use coc_state::{CaseStatus, NewEvidence};

    fn cid() -> CaseId {
        CaseId::new("C1").unwrap()
    }

    fn seeded() -> coc_ledger::MemoryLedger {
        let policy = AccessPolicy::default();
        let contract = CustodyContract::new(&policy);
        let ledger = ledger();
        let mut tx = ledger.begin(header("seed", 0, caller("x509::P1", "first responder")));
        contract.create_case(&mut tx, cid(), "Burglary", "Warehouse").unwrap();
        commit(tx);
        let mut tx = ledger.begin(header("seed-2", 1, caller("x509::P1", "first responder")));
        contract
            .add_participant(&mut tx, ParticipantId::new("P1").unwrap(), "Alice", "first responder")
            .unwrap();
        commit(tx);
        let mut tx = ledger.begin(header("seed-3", 2, caller("x509::P1", "first responder")));
        contract
            .create_evidence(
                &mut tx,
                NewEvidence::new(
                    EvidenceId::new("E1").unwrap(),
                    "laptop",
                    ParticipantId::new("P1").unwrap(),
                ),
            )
            .unwrap();
        commit(tx);
        ledger
    }

    #[test]
    fn duplicate_case_fails() {
        let policy = AccessPolicy::default();
        let contract = CustodyContract::new(&policy);
        let ledger = seeded();
        let mut tx = ledger.begin(header("tx-1", 5, caller("x", "second investigator")));
        assert_eq!(
            contract.create_case(&mut tx, cid(), "t", "d").unwrap_err().kind(),
            ErrorKind::AlreadyExists
        );
    }

    #[test]
    fn associations_require_both_records() {
        let policy = AccessPolicy::default();
        let contract = CustodyContract::new(&policy);
        let ledger = seeded();
        let mut tx = ledger.begin(header("tx-1", 5, caller("x", "second investigator")));

        let case = contract
            .add_evidence_to_case(&mut tx, &cid(), EvidenceId::new("E1").unwrap())
            .unwrap();
        assert!(case.evidence_ids.contains(&EvidenceId::new("E1").unwrap()));

        assert_eq!(
            contract
                .add_evidence_to_case(&mut tx, &cid(), EvidenceId::new("E9").unwrap())
                .unwrap_err()
                .kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            contract
                .add_investigator_to_case(&mut tx, &cid(), ParticipantId::new("P9").unwrap())
                .unwrap_err()
                .kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            contract
                .add_investigator_to_case(
                    &mut tx,
                    &CaseId::new("C9").unwrap(),
                    ParticipantId::new("P1").unwrap()
                )
                .unwrap_err()
                .kind(),
            ErrorKind::NotFound
        );
    }

    #[test]
    fn closed_case_rejects_membership_until_reopened() {
        let policy = AccessPolicy::default();
        let contract = CustodyContract::new(&policy);
        let ledger = seeded();

        let mut tx = ledger.begin(header("tx-1", 5, caller("x", "second investigator")));
        assert_eq!(contract.close_case(&mut tx, &cid()).unwrap().status, CaseStatus::Closed);
        commit(tx);

        let mut tx = ledger.begin(header("tx-2", 6, caller("x", "second investigator")));
        assert_eq!(
            contract
                .add_investigator_to_case(&mut tx, &cid(), ParticipantId::new("P1").unwrap())
                .unwrap_err()
                .kind(),
            ErrorKind::InvalidState
        );
        assert_eq!(
            contract.close_case(&mut tx, &cid()).unwrap_err().kind(),
            ErrorKind::InvalidState
        );
        contract.reopen_case(&mut tx, &cid()).unwrap();
        commit(tx);

        let mut tx = ledger.begin(header("tx-3", 7, caller("x", "second investigator")));
        let case = contract
            .add_investigator_to_case(&mut tx, &cid(), ParticipantId::new("P1").unwrap())
            .unwrap();
        assert_eq!(case.investigator_ids.len(), 1);
        commit(tx);

        let tx = ledger.begin(header("tx-4", 8, caller("x", "second investigator")));
        assert_eq!(contract.get_case(&tx, &cid()).unwrap().investigator_ids.len(), 1);
    }

    #[test]
    fn unresolved_callers_cannot_touch_registries() {
        let policy = AccessPolicy::default();
        let contract = CustodyContract::new(&policy);
        let ledger = seeded();
        let anonymous = coc_ledger::CallerIdentity::new("anonymous", "");

        let mut tx = ledger.begin(header("tx-1", 5, anonymous.clone()));
        assert_eq!(
            contract.close_case(&mut tx, &cid()).unwrap_err().kind(),
            ErrorKind::Unauthorized
        );
        assert_eq!(
            contract
                .add_participant(
                    &mut tx,
                    ParticipantId::new("P7").unwrap(),
                    "Eve",
                    "first responder"
                )
                .unwrap_err()
                .kind(),
            ErrorKind::Unauthorized
        );
        assert_eq!(tx.pending_writes(), 0);
        drop(tx);

        let mut tx = ledger.begin(header("tx-2", 6, caller("x", "court")));
        assert_eq!(
            contract.reopen_case(&mut tx, &cid()).unwrap_err().kind(),
            ErrorKind::Unauthorized
        );
        assert_eq!(contract.get_case(&tx, &cid()).unwrap().status, CaseStatus::Open);
    }
}
