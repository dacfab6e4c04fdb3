//! # The Custody Contract
//!
//! [`CustodyContract`] binds the injected [`AccessPolicy`] to the contract
//! operations. It holds no ledger state: every operation takes the
//! invocation's ledger handle, reads current state, and buffers its writes
//! there. Operations are split by component:
//!
//! - evidence lifecycle: [`crate::lifecycle`]
//! - participant registry: [`crate::participants`]
//! - case registry: [`crate::cases`]

use coc_ledger::Ledger;
use coc_policy::{AccessPolicy, Operation};

use crate::error::ContractError;

/// Contract operations under one access policy.
#[derive(Debug, Clone, Copy)]
pub struct CustodyContract<'p> {
    policy: &'p AccessPolicy,
}

impl<'p> CustodyContract<'p> {
    /// Bind the contract to `policy`.
    pub fn new(policy: &'p AccessPolicy) -> Self {
        Self { policy }
    }

    /// The policy in force.
    pub fn policy(&self) -> &'p AccessPolicy {
        self.policy
    }

    /// Authorize the invocation's caller for `operation`.
    pub(crate) fn authorize(
        &self,
        ledger: &dyn Ledger,
        operation: Operation,
    ) -> Result<(), ContractError> {
        self.policy.authorize(ledger.caller(), operation)?;
        Ok(())
    }
}
