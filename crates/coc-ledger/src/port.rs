//! # The Ledger Port
//!
//! Everything the contract needs from its host, expressed as one trait.
//! Implementations wrap a host's transaction stub; [`crate::MemoryTransaction`]
//! is the reference implementation.

use coc_core::Timestamp;

use crate::error::LedgerError;
use crate::identity::CallerIdentity;

/// A key and its stored value.
pub type KeyValue = (String, Vec<u8>);

/// Lazy, finite, ascending-key iterator returned by [`Ledger::range_scan`].
pub type RangeIter<'a> = Box<dyn Iterator<Item = Result<KeyValue, LedgerError>> + 'a>;

/// Ledger access for a single transaction.
///
/// Reads observe a consistent snapshot of committed state. Writes are
/// buffered by the host and committed atomically when the invocation
/// succeeds; a transaction does not observe its own buffered writes.
pub trait Ledger {
    /// Read the committed value under `key`, if any.
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError>;

    /// Buffer a write of `value` under `key`.
    fn put_state(&mut self, key: &str, value: Vec<u8>) -> Result<(), LedgerError>;

    /// Scan committed keys in `[start, end)` in ascending key order.
    ///
    /// An empty `start` or `end` leaves that side of the range unbounded.
    /// The iterator is not restartable across invocations.
    fn range_scan(&self, start: &str, end: &str) -> Result<RangeIter<'_>, LedgerError>;

    /// The host-provided transaction identifier.
    fn tx_id(&self) -> &str;

    /// The host-agreed transaction timestamp.
    fn tx_timestamp(&self) -> Timestamp;

    /// The resolved identity of the caller.
    fn caller(&self) -> &CallerIdentity;

    /// Whether a non-empty value is stored under `key`.
    fn exists(&self, key: &str) -> Result<bool, LedgerError> {
        Ok(self
            .get_state(key)?
            .is_some_and(|value| !value.is_empty()))
    }
}
