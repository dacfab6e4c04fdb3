//! # coc-state — Custody Records and State Machines
//!
//! The in-process forms of everything the contract stores:
//!
//! - [`Evidence`] — the custody state machine (`Active` → `Deleted`) with
//!   its append-only, index-aligned custody history.
//! - [`Participant`] — immutable registry entries.
//! - [`Case`] — evidence and investigator sets with `Open`/`Closed` status.
//! - [`AuditLogEntry`] — one immutable entry per mutating evidence action.
//!
//! Records are transient: each operation decodes them from the ledger,
//! applies a transition, and encodes them back. The [`codec`] writes
//! canonical JSON and re-validates invariants on every read.
//!
//! ## Crate Policy
//!
//! - Depends only on `coc-core`. No ledger access and no authorization here.
//! - Transitions take the host-agreed timestamp as an argument; nothing in
//!   this crate reads a clock.

pub mod audit;
pub mod case;
pub mod codec;
pub mod error;
pub mod evidence;
pub mod participant;

pub use audit::{log_key, ActionType, AuditLogEntry};
pub use case::{Case, CaseStatus};
pub use codec::{decode, encode, Record};
pub use error::StateError;
pub use evidence::{Evidence, EvidenceStatus, NewEvidence};
pub use participant::Participant;
