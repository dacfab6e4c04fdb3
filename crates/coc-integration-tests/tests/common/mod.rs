//! Shared harness: an in-memory host that runs each call as its own
//! transaction with a monotonically increasing id and timestamp.

#![allow(dead_code)]

use coc_contract::{execute, ContractError};
use coc_core::Timestamp;
use coc_ledger::{CallerIdentity, MemoryLedger, TxHeader};
use coc_policy::AccessPolicy;
use coc_state::{AuditLogEntry, Evidence};

/// 2026-01-01T00:00:00Z.
pub const EPOCH: i64 = 1_767_225_600;

pub struct Host {
    pub ledger: MemoryLedger,
    pub policy: AccessPolicy,
    calls: i64,
}

impl Host {
    pub fn new(policy: AccessPolicy) -> Self {
        Self::with_ledger(MemoryLedger::new(), policy)
    }

    pub fn with_ledger(ledger: MemoryLedger, policy: AccessPolicy) -> Self {
        Self {
            ledger,
            policy,
            calls: 0,
        }
    }

    /// Continue numbering after `calls` earlier invocations.
    pub fn resume_at(mut self, calls: i64) -> Self {
        self.calls = calls;
        self
    }

    /// Transaction ids are zero-padded so key order matches call order.
    pub fn call(
        &mut self,
        caller: &CallerIdentity,
        function: &str,
        args: &[&str],
    ) -> Result<Vec<u8>, ContractError> {
        self.calls += 1;
        let header = TxHeader::new(
            format!("tx-{:04}", self.calls),
            Timestamp::from_epoch_secs(EPOCH + 60 * self.calls).unwrap(),
            caller.clone(),
        );
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        execute(&self.ledger, header, &self.policy, function, &args)
    }

    pub fn evidence(&mut self, id: &str) -> Evidence {
        let bytes = self.call(&court(), "GetEvidenceDetails", &[id]).unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    pub fn logs(&mut self) -> Vec<AuditLogEntry> {
        let bytes = self.call(&court(), "GetTransactionLogs", &[]).unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }
}

pub fn with_role(id: &str, role: &str) -> CallerIdentity {
    CallerIdentity::new(id, "Org1MSP").with_attribute("role", role)
}

pub fn p1() -> CallerIdentity {
    with_role("x509::CN=P1,OU=client", "first responder")
}

pub fn p2() -> CallerIdentity {
    with_role("x509::CN=P2,OU=client", "second investigator")
}

pub fn p3() -> CallerIdentity {
    with_role("x509::CN=P3,OU=client", "prosecutor")
}

pub fn court() -> CallerIdentity {
    with_role("x509::CN=judge,OU=client", "court")
}
