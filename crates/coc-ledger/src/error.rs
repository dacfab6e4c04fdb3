//! # Ledger Errors

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the ledger port or the reference in-memory host.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// The underlying store rejected or failed a call.
    #[error("ledger storage failure on key \"{key}\": {reason}")]
    Storage {
        /// The key being read or written.
        key: String,
        /// Host-reported reason.
        reason: String,
    },

    /// Keys must be non-empty.
    #[error("ledger keys must be non-empty")]
    EmptyKey,

    /// Range bounds are inverted.
    #[error("invalid range scan: start \"{start}\" is after end \"{end}\"")]
    InvalidRange {
        /// Inclusive start key.
        start: String,
        /// Exclusive end key.
        end: String,
    },

    /// A transaction with this identifier has already been committed.
    #[error("transaction {tx_id} has already been committed")]
    DuplicateTransaction {
        /// The reused transaction identifier.
        tx_id: String,
    },

    /// Snapshot file could not be read or written.
    #[error("snapshot io error at {}: {source}", path.display())]
    SnapshotIo {
        /// The snapshot path.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Snapshot file is not valid JSON of the expected shape.
    #[error("snapshot format error: {0}")]
    SnapshotFormat(#[from] serde_json::Error),

    /// Snapshots store values as UTF-8 text; binary values cannot be saved.
    #[error("value under key \"{key}\" is not valid UTF-8 and cannot be snapshotted")]
    NonUtf8Value {
        /// The offending key.
        key: String,
    },
}
