//! # State Errors
//!
//! State machine rejections carry the record, its current state, and the
//! attempted operation. Decode failures carry the record kind and key.

use coc_core::CanonicalizationError;
use thiserror::Error;

/// Errors raised by record transitions and the record codec.
#[derive(Error, Debug)]
pub enum StateError {
    /// The operation is not valid in the record's current state.
    #[error("{kind} {id} is {state}; cannot {operation}")]
    InvalidState {
        /// Record kind (`evidence`, `case`).
        kind: &'static str,
        /// Record identifier.
        id: String,
        /// Current state name.
        state: String,
        /// The rejected operation.
        operation: &'static str,
    },

    /// A stored payload does not decode into a valid record.
    #[error("{kind} record \"{key}\" is corrupt: {reason}")]
    Corrupt {
        /// Record kind.
        kind: &'static str,
        /// Ledger key the payload was read from.
        key: String,
        /// Decoder or invariant failure.
        reason: String,
    },

    /// A record could not be encoded.
    #[error("failed to encode record: {0}")]
    Encode(#[from] CanonicalizationError),
}
