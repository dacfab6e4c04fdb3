//! Shared unit-test fixtures.

use coc_core::Timestamp;
use coc_ledger::{CallerIdentity, MemoryLedger, MemoryTransaction, TxHeader};

/// 2026-01-01T00:00:00Z.
const EPOCH: i64 = 1_767_225_600;

pub(crate) fn ledger() -> MemoryLedger {
    MemoryLedger::new()
}

/// An Org1MSP caller with the given role attribute.
pub(crate) fn caller(id: &str, role: &str) -> CallerIdentity {
    CallerIdentity::new(id, "Org1MSP").with_attribute("role", role)
}

pub(crate) fn header(tx_id: &str, offset_secs: i64, caller: CallerIdentity) -> TxHeader {
    let at = Timestamp::from_epoch_secs(EPOCH + offset_secs).expect("valid timestamp");
    TxHeader::new(tx_id, at, caller)
}

pub(crate) fn header_at(tx_id: &str, offset_secs: i64, caller_id: &str) -> TxHeader {
    header(tx_id, offset_secs, caller(caller_id, "first responder"))
}

pub(crate) fn commit(tx: MemoryTransaction) {
    tx.commit().expect("commit");
}
