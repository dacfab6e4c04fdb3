//! # In-Memory Host
//!
//! Runs one invocation against a [`MemoryLedger`] with the atomicity the
//! production ledger provides: every write the invocation buffered commits
//! together on success, and none of them survive a failure.

use coc_ledger::{MemoryLedger, TxHeader};
use coc_policy::AccessPolicy;

use crate::dispatch::dispatch;
use crate::error::ContractError;

/// Execute `function(args)` as transaction `header` and commit on success.
pub fn execute(
    ledger: &MemoryLedger,
    header: TxHeader,
    policy: &AccessPolicy,
    function: &str,
    args: &[String],
) -> Result<Vec<u8>, ContractError> {
    let mut tx = ledger.begin(header);
    match dispatch(&mut tx, policy, function, args) {
        Ok(payload) => {
            tx.commit()?;
            Ok(payload)
        }
        Err(err) => {
            tracing::debug!(function, error = %err, "invocation failed, discarding writes");
            tx.rollback();
            Err(err)
        }
    }
}
