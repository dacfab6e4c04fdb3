//! # Operation Dispatch
//!
//! Maps a host invocation (function name plus string arguments) onto a
//! contract operation. Read operations return the record or list as JSON;
//! mutations return an empty payload.
//!
//! | Function | Arguments |
//! |----------|-----------|
//! | `CreateEvidence` | `evidenceID, description, owner` |
//! | `CreateEvidence` | `evidenceID, creator, owner, description, caseID, fileHash, fileSize, fileType` |
//! | `CreateEvidenceFirstResponder` | `evidenceID, description` |
//! | `CreateEvidenceSecondInvestigator` | `evidenceID, description` |
//! | `TransferEvidence` | `evidenceID, newOwner` |
//! | `DeleteEvidence` | `evidenceID` |
//! | `GetEvidenceDetails` | `evidenceID` |
//! | `GetEvidenceHistory` | `evidenceID` |
//! | `GetTransactionLogs` | none |
//! | `AddParticipant` | `participantID, name, role` |
//! | `GetParticipant` | `participantID` |
//! | `CreateCase` | `caseID, title, description` |
//! | `GetCase` | `caseID` |
//! | `AddEvidenceToCase` | `caseID, evidenceID` |
//! | `AddInvestigatorToCase` | `caseID, participantID` |
//! | `CloseCase` | `caseID` |
//! | `ReopenCase` | `caseID` |

use coc_core::{CaseId, EvidenceId, ParticipantId};
use coc_ledger::Ledger;
use coc_policy::{AccessPolicy, Operation};
use coc_state::NewEvidence;
use serde::Serialize;

use crate::contract::CustodyContract;
use crate::error::ContractError;

/// Run `function` with `args` against `ledger` under `policy`.
pub fn dispatch(
    ledger: &mut dyn Ledger,
    policy: &AccessPolicy,
    function: &str,
    args: &[String],
) -> Result<Vec<u8>, ContractError> {
    CustodyContract::new(policy).invoke(ledger, function, args)
}

impl CustodyContract<'_> {
    /// Run `function` with `args` against `ledger`.
    pub fn invoke(
        &self,
        ledger: &mut dyn Ledger,
        function: &str,
        args: &[String],
    ) -> Result<Vec<u8>, ContractError> {
        let operation = Operation::from_name(function).ok_or_else(|| {
            ContractError::invalid_argument(format!("unknown function \"{function}\""))
        })?;

        match operation {
            Operation::CreateEvidence => {
                let new = match args {
                    [id, description, owner] => NewEvidence::new(
                        EvidenceId::new(id.as_str())?,
                        description.as_str(),
                        ParticipantId::new(owner.as_str())?,
                    ),
                    [id, creator, owner, description, case_id, file_hash, file_size, file_type] => {
                        let mut new = NewEvidence::new(
                            EvidenceId::new(id.as_str())?,
                            description.as_str(),
                            ParticipantId::new(owner.as_str())?,
                        )
                        .with_creator(ParticipantId::new(creator.as_str())?)
                        .with_content(
                            file_hash.as_str(),
                            parse_file_size(file_size)?,
                            file_type.as_str(),
                        );
                        if !case_id.is_empty() {
                            new = new.in_case(CaseId::new(case_id.as_str())?);
                        }
                        new
                    }
                    _ => {
                        return Err(ContractError::invalid_argument(format!(
                            "CreateEvidence expects 3 or 8 arguments, got {}",
                            args.len()
                        )))
                    }
                };
                self.create_evidence(ledger, new)?;
                Ok(Vec::new())
            }
            Operation::CreateEvidenceFirstResponder => {
                let [id, description] = arity(operation, args)?;
                let id = EvidenceId::new(id.as_str())?;
                self.create_evidence_first_responder(ledger, id, description)?;
                Ok(Vec::new())
            }
            Operation::CreateEvidenceSecondInvestigator => {
                let [id, description] = arity(operation, args)?;
                let id = EvidenceId::new(id.as_str())?;
                self.create_evidence_second_investigator(ledger, id, description)?;
                Ok(Vec::new())
            }
            Operation::TransferEvidence => {
                let [id, new_owner] = arity(operation, args)?;
                self.transfer_evidence(
                    ledger,
                    &EvidenceId::new(id.as_str())?,
                    ParticipantId::new(new_owner.as_str())?,
                )?;
                Ok(Vec::new())
            }
            Operation::DeleteEvidence => {
                let [id] = arity(operation, args)?;
                self.delete_evidence(ledger, &EvidenceId::new(id.as_str())?)?;
                Ok(Vec::new())
            }
            Operation::GetEvidenceDetails => {
                let [id] = arity(operation, args)?;
                payload(&self.get_evidence_details(ledger, &EvidenceId::new(id.as_str())?)?)
            }
            Operation::GetEvidenceHistory => {
                let [id] = arity(operation, args)?;
                payload(&self.get_evidence_history(ledger, &EvidenceId::new(id.as_str())?)?)
            }
            Operation::GetTransactionLogs => {
                arity::<0>(operation, args)?;
                payload(&self.get_transaction_logs(ledger)?)
            }
            Operation::AddParticipant => {
                let [id, name, role] = arity(operation, args)?;
                self.add_participant(ledger, ParticipantId::new(id.as_str())?, name, role)?;
                Ok(Vec::new())
            }
            Operation::GetParticipant => {
                let [id] = arity(operation, args)?;
                payload(&self.get_participant(ledger, &ParticipantId::new(id.as_str())?)?)
            }
            Operation::CreateCase => {
                let [id, title, description] = arity(operation, args)?;
                self.create_case(ledger, CaseId::new(id.as_str())?, title, description)?;
                Ok(Vec::new())
            }
            Operation::GetCase => {
                let [id] = arity(operation, args)?;
                payload(&self.get_case(ledger, &CaseId::new(id.as_str())?)?)
            }
            Operation::AddEvidenceToCase => {
                let [case_id, evidence_id] = arity(operation, args)?;
                self.add_evidence_to_case(
                    ledger,
                    &CaseId::new(case_id.as_str())?,
                    EvidenceId::new(evidence_id.as_str())?,
                )?;
                Ok(Vec::new())
            }
            Operation::AddInvestigatorToCase => {
                let [case_id, participant_id] = arity(operation, args)?;
                self.add_investigator_to_case(
                    ledger,
                    &CaseId::new(case_id.as_str())?,
                    ParticipantId::new(participant_id.as_str())?,
                )?;
                Ok(Vec::new())
            }
            Operation::CloseCase => {
                let [id] = arity(operation, args)?;
                self.close_case(ledger, &CaseId::new(id.as_str())?)?;
                Ok(Vec::new())
            }
            Operation::ReopenCase => {
                let [id] = arity(operation, args)?;
                self.reopen_case(ledger, &CaseId::new(id.as_str())?)?;
                Ok(Vec::new())
            }
        }
    }
}

fn arity<'a, const N: usize>(
    operation: Operation,
    args: &'a [String],
) -> Result<&'a [String; N], ContractError> {
    args.try_into().map_err(|_| {
        ContractError::invalid_argument(format!(
            "{operation} expects {N} argument{}, got {}",
            if N == 1 { "" } else { "s" },
            args.len()
        ))
    })
}

fn parse_file_size(raw: &str) -> Result<Option<u64>, ContractError> {
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<u64>().map(Some).map_err(|e| {
        ContractError::invalid_argument(format!("fileSize \"{raw}\" is not a byte count: {e}"))
    })
}

fn payload<T: Serialize>(value: &T) -> Result<Vec<u8>, ContractError> {
    serde_json::to_vec(value).map_err(|e| ContractError::Serialization {
        kind: "payload",
        key: String::new(),
        reason: e.to_string(),
    })
}
