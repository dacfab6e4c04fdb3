//! # coc-core — Foundational Types for the Custody Ledger
//!
//! Every other crate in the workspace depends on `coc-core`; it depends on
//! nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for record keys.** `EvidenceId`, `ParticipantId`,
//!    `CaseId` are distinct types with validated constructors. An identifier
//!    can never be empty and can never start with the reserved audit log
//!    prefix, so the shared ledger keyspace stays unambiguous.
//!
//! 2. **Host-agreed time only.** `Timestamp` is UTC with seconds precision.
//!    Transaction logic never reads a local clock; timestamps are handed in by
//!    the host so every replica derives identical records.
//!
//! 3. **`CanonicalBytes` for digests.** Audit digests are computed over
//!    RFC 8785 canonical JSON, never over ad-hoc `serde_json::to_vec()` output.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `coc-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod canonical;
pub mod digest;
pub mod error;
pub mod identity;
pub mod temporal;

pub use canonical::CanonicalBytes;
pub use digest::{sha256_digest, ContentDigest};
pub use error::{CanonicalizationError, ValidationError};
pub use identity::{CaseId, EvidenceId, ParticipantId, LOG_KEY_PREFIX};
pub use temporal::Timestamp;
