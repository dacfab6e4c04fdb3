//! # Contract Errors
//!
//! [`ContractError`] is what the host receives when an invocation fails.
//! Every failure aborts the whole invocation; the host discards buffered
//! writes, so no variant implies partial state.

use std::fmt;

use coc_core::ValidationError;
use coc_ledger::LedgerError;
use coc_policy::AuthorizationError;
use coc_state::StateError;
use thiserror::Error;

/// Stable error classification for hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Key absent.
    NotFound,
    /// Create or register on an occupied key.
    AlreadyExists,
    /// Policy check failed.
    Unauthorized,
    /// Stored payload malformed, or a record could not be encoded.
    Serialization,
    /// Underlying ledger call failed.
    Storage,
    /// Operation invalid in the record's current state.
    InvalidState,
    /// Malformed invocation arguments.
    InvalidArgument,
}

impl ErrorKind {
    /// Kind name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotFound => "NotFound",
            Self::AlreadyExists => "AlreadyExists",
            Self::Unauthorized => "Unauthorized",
            Self::Serialization => "Serialization",
            Self::Storage => "Storage",
            Self::InvalidState => "InvalidState",
            Self::InvalidArgument => "InvalidArgument",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors surfaced by contract operations.
#[derive(Error, Debug)]
pub enum ContractError {
    /// No record stored under the key.
    #[error("{kind} \"{id}\" not found")]
    NotFound {
        /// Record kind.
        kind: &'static str,
        /// Requested identifier.
        id: String,
    },

    /// The key is already occupied.
    #[error("{kind} \"{id}\" already exists")]
    AlreadyExists {
        /// Record kind being created.
        kind: &'static str,
        /// Occupied identifier.
        id: String,
    },

    /// The caller was refused by the access policy.
    #[error("unauthorized: {0}")]
    Unauthorized(#[from] AuthorizationError),

    /// A payload could not be decoded or encoded.
    #[error("{kind} \"{key}\" serialization failed: {reason}")]
    Serialization {
        /// Record kind.
        kind: &'static str,
        /// Ledger key involved.
        key: String,
        /// Decoder or encoder message.
        reason: String,
    },

    /// The ledger rejected or failed a call.
    #[error("storage error: {0}")]
    Storage(#[from] LedgerError),

    /// The record's state forbids the operation.
    #[error("invalid state: {kind} {id} is {state}; cannot {operation}")]
    InvalidState {
        /// Record kind.
        kind: &'static str,
        /// Record identifier.
        id: String,
        /// Current state.
        state: String,
        /// Rejected operation.
        operation: &'static str,
    },

    /// The invocation arguments are malformed.
    #[error("invalid argument: {reason}")]
    InvalidArgument {
        /// What was wrong.
        reason: String,
    },
}

impl ContractError {
    /// Classify the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::AlreadyExists { .. } => ErrorKind::AlreadyExists,
            Self::Unauthorized(_) => ErrorKind::Unauthorized,
            Self::Serialization { .. } => ErrorKind::Serialization,
            Self::Storage(_) => ErrorKind::Storage,
            Self::InvalidState { .. } => ErrorKind::InvalidState,
            Self::InvalidArgument { .. } => ErrorKind::InvalidArgument,
        }
    }

    pub(crate) fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }
}

impl From<ValidationError> for ContractError {
    fn from(err: ValidationError) -> Self {
        Self::invalid_argument(err.to_string())
    }
}

impl From<StateError> for ContractError {
    fn from(err: StateError) -> Self {
        match err {
            StateError::InvalidState {
                kind,
                id,
                state,
                operation,
            } => Self::InvalidState {
                kind,
                id,
                state,
                operation,
            },
            StateError::Corrupt { kind, key, reason } => Self::Serialization { kind, key, reason },
            StateError::Encode(e) => Self::Serialization {
                kind: "record",
                key: String::new(),
                reason: e.to_string(),
            },
        }
    }
}
