//! # coc-contract — Chain-of-Custody Contract
//!
//! Transaction logic executed against an external replicated key-value
//! ledger. Tracks who created each item of evidence, who holds it now,
//! every custody transfer, and an append-only audit log of every mutating
//! action, with access gated by role and organization.
//!
//! ## Control Flow
//!
//! ```text
//! host invocation ─▶ dispatch ─▶ AccessPolicy::authorize
//!                                     │
//!                                     ▼
//!                  lifecycle / registries ─▶ Ledger (read current state)
//!                                     │
//!                                     ▼
//!                       buffered record write + audit entry
//!                                     │
//!                                     ▼
//!                      host commits both, or neither
//! ```
//!
//! ## Security Invariant
//!
//! Every successful create, transfer, or delete buffers exactly one audit
//! entry in the same invocation as the record write. Errors are returned,
//! never swallowed, so a mutation cannot commit without its entry.
//!
//! ## Crate Policy
//!
//! - No process-wide mutable state and no caching across invocations.
//! - No clock reads: timestamps come from [`coc_ledger::Ledger::tx_timestamp`].
//! - Authorization is delegated entirely to the injected
//!   [`coc_policy::AccessPolicy`].

pub mod audit;
pub mod cases;
pub mod contract;
pub mod dispatch;
pub mod error;
pub mod host;
pub mod lifecycle;
pub mod participants;
mod store;

#[cfg(test)]
mod testing;

pub use contract::CustodyContract;
pub use dispatch::dispatch;
pub use error::{ContractError, ErrorKind};
pub use host::execute;
pub use lifecycle::{FIRST_RESPONDER_OWNER, SECOND_INVESTIGATOR_OWNER};
