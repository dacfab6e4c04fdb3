//! # Participant Registry
//!
//! Participants are registered once and never updated or removed. The role
//! tag must be one of the known roles.

use coc_core::ParticipantId;
use coc_ledger::Ledger;
use coc_policy::{Operation, Role};
use coc_state::{Participant, Record};

use crate::contract::CustodyContract;
use crate::error::ContractError;
use crate::store;

impl CustodyContract<'_> {
    /// Register a participant. Fails with `AlreadyExists` if the key is taken.
    pub fn add_participant(
        &self,
        ledger: &mut dyn Ledger,
        participant_id: ParticipantId,
        name: &str,
        role: &str,
    ) -> Result<Participant, ContractError> {
        tracing::debug!(operation = "AddParticipant", participant_id = %participant_id, "invoked");
        self.authorize(ledger, Operation::AddParticipant)?;
        let role = Role::from_tag(role).ok_or_else(|| {
            ContractError::invalid_argument(format!("unknown participant role \"{role}\""))
        })?;
        store::ensure_vacant(ledger, Participant::KIND, participant_id.as_str())?;

        let participant = Participant::new(participant_id, name, role.as_str());
        store::write(ledger, &participant)?;
        tracing::info!(
            participant_id = %participant.participant_id,
            role = %role,
            "participant registered"
        );
        Ok(participant)
    }

    /// Read a participant.
    pub fn get_participant(
        &self,
        ledger: &dyn Ledger,
        participant_id: &ParticipantId,
    ) -> Result<Participant, ContractError> {
        tracing::debug!(operation = "GetParticipant", participant_id = %participant_id, "invoked");
        self.authorize(ledger, Operation::GetParticipant)?;
        store::require(ledger, participant_id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{caller, commit, header, ledger};
    use crate::ErrorKind;
    use coc_policy::AccessPolicy;

    fn pid(s: &str) -> ParticipantId {
        ParticipantId::new(s).unwrap()
    }

    #[test]
    fn register_then_get() {
        let policy = AccessPolicy::default();
        let contract = CustodyContract::new(&policy);
        let ledger = ledger();
        let mut tx = ledger.begin(header("tx-1", 0, caller("admin", "first responder")));
        contract
            .add_participant(&mut tx, pid("P1"), "Alice", "first responder")
            .unwrap();
        commit(tx);

        let tx = ledger.begin(header("tx-2", 1, caller("admin", "first responder")));
        let p = contract.get_participant(&tx, &pid("P1")).unwrap();
        assert_eq!(p.name, "Alice");
        assert_eq!(p.role, "first responder");
    }

    #[test]
    fn duplicate_registration_fails() {
        let policy = AccessPolicy::default();
        let contract = CustodyContract::new(&policy);
        let ledger = ledger();
        let mut tx = ledger.begin(header("tx-1", 0, caller("admin", "first responder")));
        contract.add_participant(&mut tx, pid("P1"), "Alice", "court").unwrap();
        commit(tx);

        let mut tx = ledger.begin(header("tx-2", 1, caller("admin", "first responder")));
        let err = contract
            .add_participant(&mut tx, pid("P1"), "Mallory", "prosecutor")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AlreadyExists);
    }

    #[test]
    fn unknown_role_is_invalid() {
        let policy = AccessPolicy::default();
        let contract = CustodyContract::new(&policy);
        let ledger = ledger();
        let mut tx = ledger.begin(header("tx-1", 0, caller("admin", "first responder")));
        let err = contract
            .add_participant(&mut tx, pid("P1"), "Alice", "judge")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(tx.pending_writes(), 0);
    }

    #[test]
    fn missing_participant_is_not_found() {
        let policy = AccessPolicy::default();
        let contract = CustodyContract::new(&policy);
        let ledger = ledger();
        let tx = ledger.begin(header("tx-1", 0, caller("admin", "first responder")));
        assert_eq!(
            contract.get_participant(&tx, &pid("P9")).unwrap_err().kind(),
            ErrorKind::NotFound
        );
    }
}
