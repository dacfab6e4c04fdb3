//! # Record Codec
//!
//! Records are stored as canonical JSON (RFC 8785 via [`CanonicalBytes`]),
//! so every replica executing the same transaction writes byte-identical
//! values. Decoding validates identifiers and record invariants; a payload
//! that fails either is reported as [`StateError::Corrupt`].

use coc_core::CanonicalBytes;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StateError;

/// A record stored under its own ledger key.
pub trait Record: Serialize + DeserializeOwned {
    /// Human-readable record kind used in errors and logs.
    const KIND: &'static str;

    /// The ledger key this record is stored under.
    fn key(&self) -> String;
}

/// Encode a record to its stored byte form.
pub fn encode<R: Record>(record: &R) -> Result<Vec<u8>, StateError> {
    Ok(CanonicalBytes::new(record)?.as_bytes().to_vec())
}

/// Decode a stored payload read from `key`.
pub fn decode<R: Record>(key: &str, bytes: &[u8]) -> Result<R, StateError> {
    serde_json::from_slice(bytes).map_err(|e| StateError::Corrupt {
        kind: R::KIND,
        key: key.to_string(),
        reason: e.to_string(),
    })
}
