//! Typed record access over the ledger port.

use coc_ledger::Ledger;
use coc_state::{decode, encode, Record};

use crate::error::ContractError;

/// Read and decode the record under `key`. Absent and empty values are `None`.
pub(crate) fn read<R: Record>(ledger: &dyn Ledger, key: &str) -> Result<Option<R>, ContractError> {
    match ledger.get_state(key)? {
        Some(bytes) if !bytes.is_empty() => Ok(Some(decode(key, &bytes)?)),
        _ => Ok(None),
    }
}

/// Read the record under `key`, failing with `NotFound` when absent.
pub(crate) fn require<R: Record>(ledger: &dyn Ledger, key: &str) -> Result<R, ContractError> {
    read(ledger, key)?.ok_or_else(|| ContractError::NotFound {
        kind: R::KIND,
        id: key.to_string(),
    })
}

/// Fail with `AlreadyExists` when `key` holds a value.
pub(crate) fn ensure_vacant(
    ledger: &dyn Ledger,
    kind: &'static str,
    key: &str,
) -> Result<(), ContractError> {
    if ledger.exists(key)? {
        return Err(ContractError::AlreadyExists {
            kind,
            id: key.to_string(),
        });
    }
    Ok(())
}

/// Encode and buffer a write of `record` under its own key.
pub(crate) fn write<R: Record>(ledger: &mut dyn Ledger, record: &R) -> Result<(), ContractError> {
    let key = record.key();
    let bytes = encode(record).map_err(|e| ContractError::Serialization {
        kind: R::KIND,
        key: key.clone(),
        reason: e.to_string(),
    })?;
    ledger.put_state(&key, bytes)?;
    Ok(())
}
