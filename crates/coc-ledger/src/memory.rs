//! # In-Memory Transactional Ledger
//!
//! A reference host for tests and the CLI. Committed state lives in a
//! `BTreeMap` so range scans come back in key order. Each invocation runs
//! inside a [`MemoryTransaction`] that buffers its writes; [`commit`] applies
//! them under one write lock, and dropping the transaction discards them.
//!
//! The lock is `parking_lot` (non-poisoning) and is never held across a
//! call back into contract code: reads clone out of the map.
//!
//! [`commit`]: MemoryTransaction::commit

use std::collections::{BTreeMap, BTreeSet};
use std::ops::Bound;
use std::sync::Arc;

use coc_core::Timestamp;
use parking_lot::RwLock;

use crate::error::LedgerError;
use crate::identity::CallerIdentity;
use crate::port::{KeyValue, Ledger, RangeIter};

#[derive(Debug, Default)]
pub(crate) struct LedgerState {
    pub(crate) entries: BTreeMap<String, Vec<u8>>,
    pub(crate) committed_tx: BTreeSet<String>,
}

/// Committed ledger state shared by every transaction opened on it.
#[derive(Debug, Clone, Default)]
pub struct MemoryLedger {
    pub(crate) state: Arc<RwLock<LedgerState>>,
}

/// Host-supplied transaction context: identifier, agreed time, and caller.
#[derive(Debug, Clone)]
pub struct TxHeader {
    /// Globally unique transaction identifier.
    pub tx_id: String,
    /// Agreed transaction timestamp.
    pub timestamp: Timestamp,
    /// Resolved caller identity.
    pub caller: CallerIdentity,
}

impl TxHeader {
    /// Build a header.
    pub fn new(tx_id: impl Into<String>, timestamp: Timestamp, caller: CallerIdentity) -> Self {
        Self {
            tx_id: tx_id.into(),
            timestamp,
            caller,
        }
    }
}

impl MemoryLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a transaction against the current committed state.
    pub fn begin(&self, header: TxHeader) -> MemoryTransaction {
        MemoryTransaction {
            state: Arc::clone(&self.state),
            header,
            writes: BTreeMap::new(),
        }
    }

    /// Read a committed value directly, outside any transaction.
    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.state.read().entries.get(key).cloned()
    }

    /// All committed keys in ascending order.
    pub fn keys(&self) -> Vec<String> {
        self.state.read().entries.keys().cloned().collect()
    }

    /// Number of committed keys.
    pub fn len(&self) -> usize {
        self.state.read().entries.len()
    }

    /// Whether the ledger holds no keys.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether a transaction with this identifier has been committed.
    pub fn is_committed(&self, tx_id: &str) -> bool {
        self.state.read().committed_tx.contains(tx_id)
    }
}

/// One invocation's view of a [`MemoryLedger`].
#[derive(Debug)]
pub struct MemoryTransaction {
    state: Arc<RwLock<LedgerState>>,
    header: TxHeader,
    writes: BTreeMap<String, Vec<u8>>,
}

impl MemoryTransaction {
    /// Number of buffered writes.
    pub fn pending_writes(&self) -> usize {
        self.writes.len()
    }

    /// Apply every buffered write at once.
    ///
    /// Returns the number of keys written. A transaction identifier can be
    /// committed only once; a replayed identifier is rejected and none of
    /// its writes are applied.
    pub fn commit(self) -> Result<usize, LedgerError> {
        let MemoryTransaction {
            state,
            header,
            writes,
        } = self;
        let mut guard = state.write();
        if guard.committed_tx.contains(&header.tx_id) {
            return Err(LedgerError::DuplicateTransaction {
                tx_id: header.tx_id,
            });
        }
        let count = writes.len();
        guard.entries.extend(writes);
        tracing::debug!(tx_id = %header.tx_id, writes = count, "transaction committed");
        guard.committed_tx.insert(header.tx_id);
        Ok(count)
    }

    /// Discard every buffered write.
    pub fn rollback(self) {
        tracing::debug!(
            tx_id = %self.header.tx_id,
            discarded = self.writes.len(),
            "transaction rolled back"
        );
    }
}

impl Ledger for MemoryTransaction {
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError> {
        if key.is_empty() {
            return Err(LedgerError::EmptyKey);
        }
        Ok(self.state.read().entries.get(key).cloned())
    }

    fn put_state(&mut self, key: &str, value: Vec<u8>) -> Result<(), LedgerError> {
        if key.is_empty() {
            return Err(LedgerError::EmptyKey);
        }
        self.writes.insert(key.to_string(), value);
        Ok(())
    }

    fn range_scan(&self, start: &str, end: &str) -> Result<RangeIter<'_>, LedgerError> {
        if !start.is_empty() && !end.is_empty() && start > end {
            return Err(LedgerError::InvalidRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        let lower = if start.is_empty() {
            Bound::Unbounded
        } else {
            Bound::Included(start.to_string())
        };
        let upper = if end.is_empty() {
            Bound::Unbounded
        } else {
            Bound::Excluded(end.to_string())
        };
        let items: Vec<KeyValue> = self
            .state
            .read()
            .entries
            .range::<String, _>((lower, upper))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        Ok(Box::new(items.into_iter().map(Ok)))
    }

    fn tx_id(&self) -> &str {
        &self.header.tx_id
    }

    fn tx_timestamp(&self) -> Timestamp {
        self.header.timestamp
    }

    fn caller(&self) -> &CallerIdentity {
        &self.header.caller
    }
}
