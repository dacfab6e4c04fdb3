//! # Cases
//!
//! Groups evidence and investigators under an investigation. Membership is
//! a set; adding an existing member is a no-op. A closed case accepts no
//! membership changes until it is reopened.

use std::collections::BTreeSet;
use std::fmt;

use coc_core::{CaseId, EvidenceId, ParticipantId};
use serde::{Deserialize, Serialize};

use crate::codec::Record;
use crate::error::StateError;

/// Case status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CaseStatus {
    /// Accepting evidence and investigators.
    #[default]
    Open,
    /// Membership frozen.
    Closed,
}

impl fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => f.write_str("Open"),
            Self::Closed => f.write_str("Closed"),
        }
    }
}

/// An investigation grouping evidence and investigators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Case {
    /// Unique case key.
    #[serde(rename = "caseID")]
    pub case_id: CaseId,
    /// Short title.
    pub title: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Evidence linked to the case.
    #[serde(rename = "evidenceIDs", default)]
    pub evidence_ids: BTreeSet<EvidenceId>,
    /// Investigators assigned to the case.
    #[serde(rename = "investigatorIDs", default)]
    pub investigator_ids: BTreeSet<ParticipantId>,
    /// Open or closed.
    #[serde(default)]
    pub status: CaseStatus,
}

impl Case {
    /// A new, empty, open case.
    pub fn open(case_id: CaseId, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            case_id,
            title: title.into(),
            description: description.into(),
            evidence_ids: BTreeSet::new(),
            investigator_ids: BTreeSet::new(),
            status: CaseStatus::Open,
        }
    }

    /// Link evidence. Returns `false` if it was already linked.
    pub fn add_evidence(&mut self, evidence_id: EvidenceId) -> Result<bool, StateError> {
        self.require(CaseStatus::Open, "add evidence")?;
        Ok(self.evidence_ids.insert(evidence_id))
    }

    /// Assign an investigator. Returns `false` if already assigned.
    pub fn add_investigator(&mut self, participant_id: ParticipantId) -> Result<bool, StateError> {
        self.require(CaseStatus::Open, "add investigator")?;
        Ok(self.investigator_ids.insert(participant_id))
    }

    /// Open → Closed.
    pub fn close(&mut self) -> Result<(), StateError> {
        self.require(CaseStatus::Open, "close")?;
        self.status = CaseStatus::Closed;
        Ok(())
    }

    /// Closed → Open.
    pub fn reopen(&mut self) -> Result<(), StateError> {
        self.require(CaseStatus::Closed, "reopen")?;
        self.status = CaseStatus::Open;
        Ok(())
    }

    fn require(&self, expected: CaseStatus, operation: &'static str) -> Result<(), StateError> {
        if self.status != expected {
            return Err(StateError::InvalidState {
                kind: "case",
                id: self.case_id.to_string(),
                state: self.status.to_string(),
                operation,
            });
        }
        Ok(())
    }
}

impl Record for Case {
    const KIND: &'static str = "case";

    fn key(&self) -> String {
        self.case_id.as_str().to_string()
    }
}
