//! # Roles and Actions
//!
//! The closed set of participant role tags and the abstract actions a role
//! may be granted. Tags are the exact strings carried in the caller's
//! `role` attribute and in participant records.

use std::fmt;

use serde::{Deserialize, Serialize};

// ── Role ────────────────────────────────────────────────────────────────────

/// Participant role tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Collects evidence at the scene.
    #[serde(rename = "first responder")]
    FirstResponder,
    /// Performs follow-up forensic analysis.
    #[serde(rename = "second investigator")]
    SecondInvestigator,
    /// Prosecution counsel.
    #[serde(rename = "prosecutor")]
    Prosecutor,
    /// Defense counsel.
    #[serde(rename = "defense")]
    Defense,
    /// The court.
    #[serde(rename = "court")]
    Court,
}

impl Role {
    /// Every role, in declaration order.
    pub const ALL: [Role; 5] = [
        Role::FirstResponder,
        Role::SecondInvestigator,
        Role::Prosecutor,
        Role::Defense,
        Role::Court,
    ];

    /// The role tag as carried in identity attributes.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FirstResponder => "first responder",
            Self::SecondInvestigator => "second investigator",
            Self::Prosecutor => "prosecutor",
            Self::Defense => "defense",
            Self::Court => "court",
        }
    }

    /// Resolve a tag. Matching is exact; anything else is not a role.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == tag)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Action ──────────────────────────────────────────────────────────────────

/// Abstract action a role may be permitted to perform on evidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Register new evidence.
    Create,
    /// Hand custody to another participant.
    Transfer,
    /// Soft-delete evidence.
    Delete,
    /// Read evidence and its audit history.
    Display,
}

impl Action {
    /// Every action, in declaration order.
    pub const ALL: [Action; 4] = [
        Action::Create,
        Action::Transfer,
        Action::Delete,
        Action::Display,
    ];

    /// Lowercase action name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Transfer => "transfer",
            Self::Delete => "delete",
            Self::Display => "display",
        }
    }

    /// Resolve a lowercase action name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.as_str() == name)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
