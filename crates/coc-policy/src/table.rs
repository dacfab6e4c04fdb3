//! # Permission Tables
//!
//! The two lookup tables behind the access policy. Both are immutable data
//! built once from configuration; lookups are pure functions with no side
//! effects, so each table can be checked exhaustively in isolation.

use std::collections::{BTreeMap, BTreeSet};

use crate::operation::Operation;
use crate::role::{Action, Role};

/// Organization allow-list entry meaning "any organization".
pub const ANY_ORGANIZATION: &str = "*";

// ── Role table ──────────────────────────────────────────────────────────────

/// Mapping from role to the set of permitted actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RolePermissions {
    table: BTreeMap<Role, BTreeSet<Action>>,
}

impl RolePermissions {
    /// Build a table from explicit grants. Roles absent from `table` are
    /// granted nothing.
    pub fn new(table: BTreeMap<Role, BTreeSet<Action>>) -> Self {
        Self { table }
    }

    /// Whether `role` may perform `action`.
    pub fn permits(&self, role: Role, action: Action) -> bool {
        self.table
            .get(&role)
            .is_some_and(|actions| actions.contains(&action))
    }

    /// Whether a raw role tag may perform `action`. Unknown tags are denied.
    pub fn permits_tag(&self, tag: &str, action: Action) -> bool {
        Role::from_tag(tag).is_some_and(|role| self.permits(role, action))
    }

    /// The actions granted to `role`, in ascending order.
    pub fn actions(&self, role: Role) -> Vec<Action> {
        self.table
            .get(&role)
            .map(|actions| actions.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Iterate `(role, actions)` grants.
    pub fn iter(&self) -> impl Iterator<Item = (Role, &BTreeSet<Action>)> {
        self.table.iter().map(|(role, actions)| (*role, actions))
    }
}

impl Default for RolePermissions {
    /// Investigators may do everything; counsel and the court may read and
    /// hand on custody.
    fn default() -> Self {
        let full: BTreeSet<Action> = Action::ALL.into_iter().collect();
        let limited: BTreeSet<Action> = [Action::Display, Action::Transfer].into_iter().collect();
        let table = Role::ALL
            .into_iter()
            .map(|role| {
                let grants = match role {
                    Role::FirstResponder | Role::SecondInvestigator => full.clone(),
                    Role::Prosecutor | Role::Defense | Role::Court => limited.clone(),
                };
                (role, grants)
            })
            .collect();
        Self { table }
    }
}

// ── Organization table ──────────────────────────────────────────────────────

/// Mapping from operation to the organizations allowed to invoke it.
///
/// Operations absent from the table are denied to everyone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrganizationPermissions {
    table: BTreeMap<Operation, BTreeSet<String>>,
}

impl OrganizationPermissions {
    /// Build a table from explicit allow-lists.
    pub fn new(table: BTreeMap<Operation, BTreeSet<String>>) -> Self {
        Self { table }
    }

    /// Allow `organizations` to invoke `operation`, replacing any earlier entry.
    pub fn allow<I, S>(mut self, operation: Operation, organizations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.table
            .insert(operation, organizations.into_iter().map(Into::into).collect());
        self
    }

    /// Whether `organization` may invoke `operation`.
    pub fn permits(&self, organization: &str, operation: Operation) -> bool {
        self.table.get(&operation).is_some_and(|allowed| {
            allowed.contains(ANY_ORGANIZATION) || allowed.contains(organization)
        })
    }

    /// The allow-list for `operation`, if the table has an entry.
    pub fn allowed(&self, operation: Operation) -> Option<&BTreeSet<String>> {
        self.table.get(&operation)
    }

    /// Iterate `(operation, organizations)` entries.
    pub fn iter(&self) -> impl Iterator<Item = (Operation, &BTreeSet<String>)> {
        self.table.iter().map(|(op, orgs)| (*op, orgs))
    }
}
