//! # Contract Operations
//!
//! Names of the operations the contract exposes to its host. These are the
//! dispatcher function names and the keys of the organization allow-list.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::role::Action;

/// An operation exposed to the host's dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Operation {
    /// Create evidence with an explicit owner.
    CreateEvidence,
    /// Create evidence owned by the first-responder role constant.
    CreateEvidenceFirstResponder,
    /// Create evidence owned by the second-investigator role constant.
    CreateEvidenceSecondInvestigator,
    /// Hand evidence to a new owner.
    TransferEvidence,
    /// Soft-delete evidence.
    DeleteEvidence,
    /// Read one evidence record.
    GetEvidenceDetails,
    /// Read the audit entries for one evidence record.
    GetEvidenceHistory,
    /// Read the full audit log.
    GetTransactionLogs,
    /// Register a participant.
    AddParticipant,
    /// Read a participant.
    GetParticipant,
    /// Open a new case.
    CreateCase,
    /// Read a case.
    GetCase,
    /// Attach evidence to a case.
    AddEvidenceToCase,
    /// Attach an investigator to a case.
    AddInvestigatorToCase,
    /// Close a case.
    CloseCase,
    /// Reopen a closed case.
    ReopenCase,
}

impl Operation {
    /// Every operation, in declaration order.
    pub const ALL: [Operation; 16] = [
        Operation::CreateEvidence,
        Operation::CreateEvidenceFirstResponder,
        Operation::CreateEvidenceSecondInvestigator,
        Operation::TransferEvidence,
        Operation::DeleteEvidence,
        Operation::GetEvidenceDetails,
        Operation::GetEvidenceHistory,
        Operation::GetTransactionLogs,
        Operation::AddParticipant,
        Operation::GetParticipant,
        Operation::CreateCase,
        Operation::GetCase,
        Operation::AddEvidenceToCase,
        Operation::AddInvestigatorToCase,
        Operation::CloseCase,
        Operation::ReopenCase,
    ];

    /// The dispatcher function name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreateEvidence => "CreateEvidence",
            Self::CreateEvidenceFirstResponder => "CreateEvidenceFirstResponder",
            Self::CreateEvidenceSecondInvestigator => "CreateEvidenceSecondInvestigator",
            Self::TransferEvidence => "TransferEvidence",
            Self::DeleteEvidence => "DeleteEvidence",
            Self::GetEvidenceDetails => "GetEvidenceDetails",
            Self::GetEvidenceHistory => "GetEvidenceHistory",
            Self::GetTransactionLogs => "GetTransactionLogs",
            Self::AddParticipant => "AddParticipant",
            Self::GetParticipant => "GetParticipant",
            Self::CreateCase => "CreateCase",
            Self::GetCase => "GetCase",
            Self::AddEvidenceToCase => "AddEvidenceToCase",
            Self::AddInvestigatorToCase => "AddInvestigatorToCase",
            Self::CloseCase => "CloseCase",
            Self::ReopenCase => "ReopenCase",
        }
    }

    /// Resolve a dispatcher function name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.as_str() == name)
    }

    /// The role-table action guarding this operation.
    ///
    /// Registry and case writes count as `create`, closing a case as
    /// `delete`, and every read as `display`.
    pub fn action(&self) -> Action {
        match self {
            Self::CreateEvidence
            | Self::CreateEvidenceFirstResponder
            | Self::CreateEvidenceSecondInvestigator
            | Self::AddParticipant
            | Self::CreateCase
            | Self::AddEvidenceToCase
            | Self::AddInvestigatorToCase
            | Self::ReopenCase => Action::Create,
            Self::TransferEvidence => Action::Transfer,
            Self::DeleteEvidence | Self::CloseCase => Action::Delete,
            Self::GetEvidenceDetails
            | Self::GetEvidenceHistory
            | Self::GetTransactionLogs
            | Self::GetParticipant
            | Self::GetCase => Action::Display,
        }
    }

    /// Whether the operation reads or writes evidence records.
    pub fn is_evidence(&self) -> bool {
        matches!(
            self,
            Self::CreateEvidence
                | Self::CreateEvidenceFirstResponder
                | Self::CreateEvidenceSecondInvestigator
                | Self::TransferEvidence
                | Self::DeleteEvidence
                | Self::GetEvidenceDetails
                | Self::GetEvidenceHistory
                | Self::GetTransactionLogs
        )
    }

    /// Whether the operation writes ledger state.
    pub fn is_mutating(&self) -> bool {
        !matches!(
            self,
            Self::GetEvidenceDetails
                | Self::GetEvidenceHistory
                | Self::GetTransactionLogs
                | Self::GetParticipant
                | Self::GetCase
        )
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
