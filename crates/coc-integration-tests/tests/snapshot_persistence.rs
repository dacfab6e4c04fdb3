//! # Snapshot Persistence
//!
//! A ledger saved to disk and reloaded continues exactly where it left off.

mod common;

use coc_contract::ErrorKind;
use coc_ledger::MemoryLedger;
use coc_policy::AccessPolicy;
use coc_state::ActionType;

use common::{p1, p2, Host};

#[test]
fn custody_continues_across_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledger.json");

    let mut host = Host::new(AccessPolicy::default());
    host.call(&p1(), "AddParticipant", &["P1", "Alice", "first responder"])
        .unwrap();
    host.call(&p1(), "CreateEvidence", &["E1", "laptop", "P1"])
        .unwrap();
    host.ledger.save(&path).unwrap();
    let keys = host.ledger.keys();

    let reloaded = MemoryLedger::load(&path).unwrap();
    assert_eq!(reloaded.keys(), keys);
    assert!(reloaded.is_committed("tx-0002"));

    let mut host = Host::with_ledger(reloaded, AccessPolicy::default()).resume_at(2);
    host.call(&p2(), "TransferEvidence", &["E1", "P2"]).unwrap();
    assert_eq!(
        host.call(&p1(), "AddParticipant", &["P1", "Alice", "first responder"])
            .unwrap_err()
            .kind(),
        ErrorKind::AlreadyExists
    );

    let actions: Vec<ActionType> = host.logs().iter().map(|e| e.action_type).collect();
    assert_eq!(actions, vec![ActionType::Created, ActionType::Transferred]);
    assert_eq!(host.evidence("E1").transfer_chain().len(), 2);
}

#[test]
fn replaying_a_committed_transaction_after_reload_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledger.json");

    let mut host = Host::new(AccessPolicy::default());
    host.call(&p1(), "CreateEvidence", &["E1", "laptop", "P1"])
        .unwrap();
    host.ledger.save(&path).unwrap();

    // Numbering restarts at tx-0001, which the snapshot already holds.
    let mut host = Host::with_ledger(MemoryLedger::load(&path).unwrap(), AccessPolicy::default());
    let err = host
        .call(&p1(), "CreateEvidence", &["E2", "phone", "P1"])
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Storage);
    assert!(host.ledger.get("E2").is_none());
}

#[test]
fn missing_snapshot_is_an_empty_ledger() {
    let dir = tempfile::tempdir().unwrap();
    let ledger = MemoryLedger::load(&dir.path().join("never-written.json")).unwrap();
    assert!(ledger.is_empty());
}
