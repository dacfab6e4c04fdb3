//! # JSON Snapshots
//!
//! Persists the committed state of a [`MemoryLedger`] between CLI runs.
//! Values are stored as UTF-8 text (every record the contract writes is
//! JSON), and the set of committed transaction identifiers is kept so a
//! replayed identifier is still rejected after a reload.
//!
//! Writes go to a temporary sibling file which is then renamed over the
//! target, so a crash mid-write leaves the previous snapshot intact.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::LedgerError;
use crate::memory::{LedgerState, MemoryLedger};

#[derive(Debug, Default, Serialize, Deserialize)]
struct Snapshot {
    state: BTreeMap<String, String>,
    #[serde(default)]
    transactions: BTreeSet<String>,
}

impl MemoryLedger {
    /// Load a ledger from a snapshot file. A missing file yields an empty ledger.
    pub fn load(path: &Path) -> Result<Self, LedgerError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no snapshot found, starting empty");
                return Ok(Self::new());
            }
            Err(source) => {
                return Err(LedgerError::SnapshotIo {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let snapshot: Snapshot = serde_json::from_str(&content)?;
        let ledger = Self::new();
        {
            let mut guard = ledger.state.write();
            *guard = LedgerState {
                entries: snapshot
                    .state
                    .into_iter()
                    .map(|(k, v)| (k, v.into_bytes()))
                    .collect(),
                committed_tx: snapshot.transactions,
            };
        }
        tracing::debug!(path = %path.display(), keys = ledger.len(), "snapshot loaded");
        Ok(ledger)
    }

    /// Write the committed state to a snapshot file.
    pub fn save(&self, path: &Path) -> Result<(), LedgerError> {
        let snapshot = {
            let guard = self.state.read();
            let mut state = BTreeMap::new();
            for (key, value) in &guard.entries {
                let text = String::from_utf8(value.clone())
                    .map_err(|_| LedgerError::NonUtf8Value { key: key.clone() })?;
                state.insert(key.clone(), text);
            }
            Snapshot {
                state,
                transactions: guard.committed_tx.clone(),
            }
        };

        let json = serde_json::to_string_pretty(&snapshot)?;
        let io_err = |source| LedgerError::SnapshotIo {
            path: path.to_path_buf(),
            source,
        };
        let temp_path = path.with_extension("json.tmp");
        let mut file = fs::File::create(&temp_path).map_err(io_err)?;
        file.write_all(json.as_bytes()).map_err(io_err)?;
        file.sync_all().map_err(io_err)?;
        fs::rename(&temp_path, path).map_err(io_err)?;
        Ok(())
    }
}
