//! # Record Identifiers
//!
//! Newtypes for the primary keys of evidence, participant, and case records.
//! Each identifier is a distinct type: an [`EvidenceId`] cannot be passed
//! where a [`ParticipantId`] is expected.
//!
//! ## Keyspace Invariant
//!
//! Evidence, participant, and case records are stored under their bare
//! identifiers, sharing one keyspace with audit log entries keyed by
//! [`LOG_KEY_PREFIX`]. Constructors reject identifiers that are empty or
//! start with that prefix, so a record can never shadow a log entry and a
//! prefix scan of the log never picks up a record.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Reserved key prefix for audit log entries.
pub const LOG_KEY_PREFIX: &str = "LOG-";

/// Deserialize through the validating constructor so that a stored record
/// carrying an invalid identifier is rejected instead of silently accepted.
macro_rules! impl_validating_deserialize {
    ($ty:ident) => {
        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let raw = String::deserialize(deserializer)?;
                Self::new(raw).map_err(serde::de::Error::custom)
            }
        }
    };
}

fn validate_key(kind: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyIdentifier { kind });
    }
    if value.starts_with(LOG_KEY_PREFIX) {
        return Err(ValidationError::ReservedPrefix {
            kind,
            value: value.to_string(),
            prefix: LOG_KEY_PREFIX,
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// EvidenceId
// ---------------------------------------------------------------------------

/// Primary key of an evidence record. Immutable for the life of the record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct EvidenceId(String);

impl EvidenceId {
    /// Create an evidence identifier, rejecting empty and reserved values.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        validate_key("evidence", &s)?;
        Ok(Self(s))
    }

    /// The identifier as stored in the ledger key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl_validating_deserialize!(EvidenceId);

impl std::fmt::Display for EvidenceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// ParticipantId
// ---------------------------------------------------------------------------

/// Primary key of a participant record.
///
/// Custody chains and owner fields hold participant identifiers, but they
/// are not required to reference a registered participant: the role-specific
/// creation entry points record role-mapped constants such as
/// `FirstResponder` as the owner.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ParticipantId(String);

impl ParticipantId {
    /// Create a participant identifier, rejecting empty and reserved values.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        validate_key("participant", &s)?;
        Ok(Self(s))
    }

    /// The identifier as stored in the ledger key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl_validating_deserialize!(ParticipantId);

impl std::fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// CaseId
// ---------------------------------------------------------------------------

/// Primary key of a case record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct CaseId(String);

impl CaseId {
    /// Create a case identifier, rejecting empty and reserved values.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        validate_key("case", &s)?;
        Ok(Self(s))
    }

    /// The identifier as stored in the ledger key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl_validating_deserialize!(CaseId);

impl std::fmt::Display for CaseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
