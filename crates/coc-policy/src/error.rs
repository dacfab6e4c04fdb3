//! # Policy Errors
//!
//! Authorization failures name the rejected identity (role tag or
//! organization), the requested action, and the operation, so a denial can
//! be audited without exposing unrelated ledger state.

use std::path::PathBuf;

use thiserror::Error;

use crate::operation::Operation;

/// A caller was refused an operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthorizationError {
    /// The resolved role or organization is not granted the action.
    #[error("{subject} is not permitted to {action} (operation {operation})")]
    Denied {
        /// The rejected identity, e.g. `role "prosecutor"` or `organization "Org3MSP"`.
        subject: String,
        /// The requested action or operation name.
        action: String,
        /// The operation that was refused.
        operation: Operation,
    },

    /// A required identity attribute could not be resolved.
    #[error("caller has no \"{attribute}\" attribute; {operation} denied")]
    MissingAttribute {
        /// The attribute name.
        attribute: String,
        /// The operation that was refused.
        operation: Operation,
    },

    /// The caller's role attribute is not one of the known role tags.
    #[error("unknown role \"{role}\"; {operation} denied")]
    UnknownRole {
        /// The unrecognized tag.
        role: String,
        /// The operation that was refused.
        operation: Operation,
    },
}

impl AuthorizationError {
    /// The operation that was refused.
    pub fn operation(&self) -> Operation {
        match self {
            Self::Denied { operation, .. }
            | Self::MissingAttribute { operation, .. }
            | Self::UnknownRole { operation, .. } => *operation,
        }
    }
}

/// A policy configuration could not be loaded or is inconsistent.
#[derive(Error, Debug)]
pub enum PolicyConfigError {
    /// The policy file could not be read.
    #[error("failed to read policy file {}: {source}", path.display())]
    Io {
        /// The policy file path.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The policy document is not valid YAML of the expected shape.
    #[error("policy parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// The role table names a role outside the closed set.
    #[error("policy names unknown role \"{role}\"")]
    UnknownRole {
        /// The unrecognized tag.
        role: String,
    },

    /// The organization table names an operation the contract does not expose.
    #[error("policy names unknown operation \"{operation}\"")]
    UnknownOperation {
        /// The unrecognized name.
        operation: String,
    },

    /// The role attribute name is blank.
    #[error("role attribute name must be non-empty")]
    EmptyRoleAttribute,
}
