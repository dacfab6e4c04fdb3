//! # Composed Access Policy
//!
//! An [`AccessPolicy`] combines up to two strategies:
//!
//! - **Role-based**: the caller's role attribute must be granted the
//!   operation's action in the [`RolePermissions`] table. Every operation,
//!   participant and case management included, resolves the role first.
//! - **Organization-based**: the caller's organization must appear in the
//!   operation's allow-list in the [`OrganizationPermissions`] table.
//!
//! Enabled strategies are combined with logical AND. Evaluation fails
//! closed: an unresolved organization, a missing role attribute, or an
//! unknown role tag is a denial, never a default grant.

use coc_ledger::CallerIdentity;

use crate::error::AuthorizationError;
use crate::operation::Operation;
use crate::role::Role;
use crate::table::{OrganizationPermissions, RolePermissions};

/// Default caller attribute carrying the role tag.
pub const DEFAULT_ROLE_ATTRIBUTE: &str = "role";

/// Role-based strategy: which attribute to read and the table to consult.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleCheck {
    /// Caller attribute carrying the role tag.
    pub attribute: String,
    /// Role-to-action grants.
    pub permissions: RolePermissions,
}

/// Authorization policy injected into the contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessPolicy {
    roles: Option<RoleCheck>,
    organizations: Option<OrganizationPermissions>,
}

impl AccessPolicy {
    /// A policy with no checks at all.
    pub fn open() -> Self {
        Self {
            roles: None,
            organizations: None,
        }
    }

    /// Role-based checks only.
    pub fn role_based(attribute: impl Into<String>, permissions: RolePermissions) -> Self {
        Self {
            roles: Some(RoleCheck {
                attribute: attribute.into(),
                permissions,
            }),
            organizations: None,
        }
    }

    /// Organization-based checks only.
    pub fn organization_based(organizations: OrganizationPermissions) -> Self {
        Self {
            roles: None,
            organizations: Some(organizations),
        }
    }

    /// Add (or replace) the organization strategy.
    pub fn with_organizations(mut self, organizations: OrganizationPermissions) -> Self {
        self.organizations = Some(organizations);
        self
    }

    /// The role strategy, if enabled.
    pub fn roles(&self) -> Option<&RoleCheck> {
        self.roles.as_ref()
    }

    /// The organization strategy, if enabled.
    pub fn organizations(&self) -> Option<&OrganizationPermissions> {
        self.organizations.as_ref()
    }

    /// Whether no strategy is enabled.
    pub fn is_open(&self) -> bool {
        self.roles.is_none() && self.organizations.is_none()
    }

    /// Decide whether `caller` may invoke `operation`.
    pub fn authorize(
        &self,
        caller: &CallerIdentity,
        operation: Operation,
    ) -> Result<(), AuthorizationError> {
        let result = self
            .check_organization(caller, operation)
            .and_then(|()| self.check_role(caller, operation));
        if let Err(err) = &result {
            tracing::warn!(
                caller = %caller.id,
                msp_id = %caller.msp_id,
                operation = %operation,
                error = %err,
                "authorization denied"
            );
        }
        result
    }

    fn check_organization(
        &self,
        caller: &CallerIdentity,
        operation: Operation,
    ) -> Result<(), AuthorizationError> {
        let Some(table) = &self.organizations else {
            return Ok(());
        };
        let Some(organization) = caller.organization() else {
            return Err(AuthorizationError::MissingAttribute {
                attribute: "msp_id".to_string(),
                operation,
            });
        };
        if table.permits(organization, operation) {
            Ok(())
        } else {
            Err(AuthorizationError::Denied {
                subject: format!("organization \"{organization}\""),
                action: operation.as_str().to_string(),
                operation,
            })
        }
    }

    fn check_role(
        &self,
        caller: &CallerIdentity,
        operation: Operation,
    ) -> Result<(), AuthorizationError> {
        let Some(check) = &self.roles else {
            return Ok(());
        };
        let action = operation.action();
        let Some(tag) = caller.attribute(&check.attribute) else {
            return Err(AuthorizationError::MissingAttribute {
                attribute: check.attribute.clone(),
                operation,
            });
        };
        if Role::from_tag(tag).is_none() {
            return Err(AuthorizationError::UnknownRole {
                role: tag.to_string(),
                operation,
            });
        }
        if check.permissions.permits_tag(tag, action) {
            Ok(())
        } else {
            Err(AuthorizationError::Denied {
                subject: format!("role \"{tag}\""),
                action: action.as_str().to_string(),
                operation,
            })
        }
    }
}

impl Default for AccessPolicy {
    /// The role table with the organization strategy disabled.
    fn default() -> Self {
        Self::role_based(DEFAULT_ROLE_ATTRIBUTE, RolePermissions::default())
    }
}
