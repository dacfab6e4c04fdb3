//! # Error Types
//!
//! Validation and canonicalization errors shared by every crate in the
//! workspace. Each variant carries the rejected input so operators can
//! diagnose a bad invocation without inspecting ledger state.

use thiserror::Error;

/// Validation errors for domain primitive newtypes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Identifier is empty or whitespace only.
    #[error("{kind} identifier must be non-empty")]
    EmptyIdentifier {
        /// Which identifier namespace rejected the value.
        kind: &'static str,
    },

    /// Identifier collides with the reserved audit log key prefix.
    #[error("{kind} identifier \"{value}\" uses the reserved prefix \"{prefix}\"")]
    ReservedPrefix {
        /// Which identifier namespace rejected the value.
        kind: &'static str,
        /// The rejected identifier.
        value: String,
        /// The reserved prefix.
        prefix: &'static str,
    },

    /// Timestamp string is not valid UTC RFC 3339.
    #[error("invalid timestamp: \"{value}\" ({reason})")]
    InvalidTimestamp {
        /// The string that failed to parse.
        value: String,
        /// Why it was rejected.
        reason: String,
    },
}

/// Error during canonical serialization.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// Float values have no deterministic canonical form.
    #[error("float values are not permitted in canonical representations: {0}")]
    FloatRejected(f64),

    /// JSON serialization failed.
    #[error("serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}
