//! # coc-ledger — Ledger Access Port
//!
//! The custody contract runs as transaction logic against an external,
//! replicated key-value ledger. This crate defines the narrow port the
//! contract consumes ([`Ledger`]) and an in-memory implementation
//! ([`MemoryLedger`]) that reproduces the host guarantees the contract
//! relies on.
//!
//! ## Host Guarantees
//!
//! - Every write issued by one invocation commits together or not at all.
//!   The contract performs no manual rollback: on error it returns, and the
//!   host discards the buffered writes.
//! - The transaction identifier is globally unique and identical on every
//!   replica executing the same transaction, so keys derived from it are
//!   deterministic.
//! - The transaction timestamp is agreed by the ordering layer, not read
//!   from a local clock.
//! - Caller identity (organization plus attested attributes) is resolved by
//!   the host before the contract runs.
//!
//! ## Crate Policy
//!
//! - Depends only on `coc-core` internally.
//! - `MemoryLedger` is a reference host for tests and the CLI, not a
//!   replicated store.

pub mod error;
pub mod identity;
pub mod memory;
pub mod port;
pub mod snapshot;

pub use error::LedgerError;
pub use identity::CallerIdentity;
pub use memory::{MemoryLedger, MemoryTransaction, TxHeader};
pub use port::{KeyValue, Ledger, RangeIter};
