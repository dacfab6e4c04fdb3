//! # coc-policy — Access Control Policy
//!
//! Decides whether a caller may invoke a contract operation. Two strategies
//! are supported and may be enabled together:
//!
//! - **Role-based** ([`RolePermissions`]): the caller's attested role tag
//!   maps to a set of permitted [`Action`]s.
//! - **Organization-based** ([`OrganizationPermissions`]): each
//!   [`Operation`] carries an allow-list of caller organizations.
//!
//! [`AccessPolicy::authorize`] ANDs the enabled strategies and fails closed.
//! The tables are immutable configuration data ([`PolicyConfig`]) injected
//! into the contract, never literals scattered across operations.
//!
//! ## Crate Policy
//!
//! - Depends only on `coc-ledger` (for [`coc_ledger::CallerIdentity`]).
//! - Table lookups are pure; the only side effect of `authorize` is a
//!   `tracing` warning on denial.

pub mod access;
pub mod config;
pub mod error;
pub mod operation;
pub mod role;
pub mod table;

pub use access::{AccessPolicy, RoleCheck, DEFAULT_ROLE_ATTRIBUTE};
pub use config::{PolicyConfig, RoleConfig, FIRST_RESPONDER_ORG, SECOND_INVESTIGATOR_ORG};
pub use error::{AuthorizationError, PolicyConfigError};
pub use operation::Operation;
pub use role::{Action, Role};
pub use table::{OrganizationPermissions, RolePermissions, ANY_ORGANIZATION};
