//! # Policy Configuration
//!
//! The permission tables are deployment data. A [`PolicyConfig`] is the
//! serde form of an [`AccessPolicy`], loaded from YAML:
//!
//! ```yaml
//! roles:
//!   attribute: role
//!   permissions:
//!     first responder: [create, delete, display, transfer]
//!     prosecutor: [display, transfer]
//! organizations:
//!   CreateEvidenceFirstResponder: [Org1MSP]
//!   TransferEvidence: [Org1MSP, Org2MSP]
//!   GetEvidenceDetails: ["*"]
//! ```
//!
//! Omitting a section disables that strategy. Role tags and operation names
//! are validated when the config is built into a policy.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::access::{AccessPolicy, DEFAULT_ROLE_ATTRIBUTE};
use crate::error::PolicyConfigError;
use crate::operation::Operation;
use crate::role::{Action, Role};
use crate::table::{OrganizationPermissions, RolePermissions, ANY_ORGANIZATION};

/// Organization allowed to create evidence as first responder.
pub const FIRST_RESPONDER_ORG: &str = "Org1MSP";

/// Organization allowed to create evidence as second investigator.
pub const SECOND_INVESTIGATOR_ORG: &str = "Org2MSP";

fn default_role_attribute() -> String {
    DEFAULT_ROLE_ATTRIBUTE.to_string()
}

/// Role-based section of a policy file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoleConfig {
    /// Caller attribute carrying the role tag.
    #[serde(default = "default_role_attribute")]
    pub attribute: String,
    /// Role tag to granted actions.
    #[serde(default)]
    pub permissions: BTreeMap<String, BTreeSet<Action>>,
}

/// Serializable access policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicyConfig {
    /// Role-based strategy; `None` disables it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<RoleConfig>,
    /// Operation name to allowed organizations; `None` disables the strategy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organizations: Option<BTreeMap<String, BTreeSet<String>>>,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        let permissions = RolePermissions::default()
            .iter()
            .map(|(role, actions)| (role.as_str().to_string(), actions.clone()))
            .collect();
        Self {
            roles: Some(RoleConfig {
                attribute: default_role_attribute(),
                permissions,
            }),
            organizations: None,
        }
    }
}

impl PolicyConfig {
    /// No checks at all.
    pub fn open() -> Self {
        Self {
            roles: None,
            organizations: None,
        }
    }

    /// Organization allow-list only. Each creation entry point is bound to
    /// one organization, both investigator organizations may transfer,
    /// delete and manage cases, and any organization may read.
    pub fn organization_gated() -> Self {
        let investigators = [FIRST_RESPONDER_ORG, SECOND_INVESTIGATOR_ORG];
        let organizations = Operation::ALL
            .into_iter()
            .map(|op| {
                let allowed: BTreeSet<String> = match op {
                    Operation::CreateEvidenceFirstResponder => {
                        [FIRST_RESPONDER_ORG.to_string()].into()
                    }
                    Operation::CreateEvidenceSecondInvestigator => {
                        [SECOND_INVESTIGATOR_ORG.to_string()].into()
                    }
                    op if op.is_mutating() => {
                        investigators.iter().map(|o| o.to_string()).collect()
                    }
                    _ => [ANY_ORGANIZATION.to_string()].into(),
                };
                (op.as_str().to_string(), allowed)
            })
            .collect();
        Self {
            roles: None,
            organizations: Some(organizations),
        }
    }

    /// Parse a YAML policy document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, PolicyConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a YAML policy file.
    pub fn load(path: &Path) -> Result<Self, PolicyConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| PolicyConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Render as YAML.
    pub fn to_yaml(&self) -> Result<String, PolicyConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Validate and build the runtime policy.
    pub fn build(&self) -> Result<AccessPolicy, PolicyConfigError> {
        let mut policy = match &self.roles {
            Some(section) => {
                if section.attribute.trim().is_empty() {
                    return Err(PolicyConfigError::EmptyRoleAttribute);
                }
                let mut table = BTreeMap::new();
                for (tag, actions) in &section.permissions {
                    let role = Role::from_tag(tag)
                        .ok_or_else(|| PolicyConfigError::UnknownRole { role: tag.clone() })?;
                    table.insert(role, actions.clone());
                }
                AccessPolicy::role_based(section.attribute.clone(), RolePermissions::new(table))
            }
            None => AccessPolicy::open(),
        };

        if let Some(section) = &self.organizations {
            let mut table = BTreeMap::new();
            for (name, orgs) in section {
                let operation =
                    Operation::from_name(name).ok_or_else(|| PolicyConfigError::UnknownOperation {
                        operation: name.clone(),
                    })?;
                table.insert(operation, orgs.clone());
            }
            policy = policy.with_organizations(OrganizationPermissions::new(table));
        }
        Ok(policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coc_ledger::CallerIdentity;

    #[test]
    fn default_config_builds_default_policy() {
        let policy = PolicyConfig::default().build().unwrap();
        assert_eq!(policy, AccessPolicy::default());
    }

    #[test]
    fn open_config_builds_open_policy() {
        assert!(PolicyConfig::open().build().unwrap().is_open());
    }

    #[test]
    fn organization_gated_binds_creation_entry_points() {
        let policy = PolicyConfig::organization_gated().build().unwrap();
        let org1 = CallerIdentity::new("c1", "Org1MSP");
        let org2 = CallerIdentity::new("c2", "Org2MSP");
        let org3 = CallerIdentity::new("c3", "Org3MSP");

        assert!(policy
            .authorize(&org1, Operation::CreateEvidenceFirstResponder)
            .is_ok());
        assert!(policy
            .authorize(&org2, Operation::CreateEvidenceFirstResponder)
            .is_err());
        assert!(policy
            .authorize(&org2, Operation::CreateEvidenceSecondInvestigator)
            .is_ok());
        assert!(policy.authorize(&org1, Operation::DeleteEvidence).is_ok());
        assert!(policy.authorize(&org3, Operation::TransferEvidence).is_err());
        assert!(policy.authorize(&org3, Operation::GetTransactionLogs).is_ok());
        assert!(policy.authorize(&org3, Operation::GetCase).is_ok());
        assert!(policy.authorize(&org3, Operation::AddParticipant).is_err());
    }

    #[test]
    fn parses_yaml_with_both_sections() {
        let yaml = r#"
roles:
  permissions:
    court: [display]
organizations:
  GetEvidenceDetails: ["*"]
"#;
        let config = PolicyConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.roles.as_ref().unwrap().attribute, "role");
        let policy = config.build().unwrap();

        let court = CallerIdentity::new("c", "Org5MSP").with_attribute("role", "court");
        assert!(policy.authorize(&court, Operation::GetEvidenceDetails).is_ok());
        assert!(policy.authorize(&court, Operation::TransferEvidence).is_err());
    }

    #[test]
    fn rejects_unknown_role_and_operation() {
        let yaml = "roles:\n  permissions:\n    judge: [display]\n";
        assert!(matches!(
            PolicyConfig::from_yaml_str(yaml).unwrap().build(),
            Err(PolicyConfigError::UnknownRole { .. })
        ));

        let yaml = "organizations:\n  InitLedger: [Org1MSP]\n";
        assert!(matches!(
            PolicyConfig::from_yaml_str(yaml).unwrap().build(),
            Err(PolicyConfigError::UnknownOperation { .. })
        ));
    }

    #[test]
    fn rejects_unknown_action_and_fields() {
        assert!(matches!(
            PolicyConfig::from_yaml_str("roles:\n  permissions:\n    court: [approve]\n"),
            Err(PolicyConfigError::Parse(_))
        ));
        assert!(matches!(
            PolicyConfig::from_yaml_str("endorsement: majority\n"),
            Err(PolicyConfigError::Parse(_))
        ));
    }

    #[test]
    fn rejects_blank_role_attribute() {
        let yaml = "roles:\n  attribute: \"  \"\n";
        assert!(matches!(
            PolicyConfig::from_yaml_str(yaml).unwrap().build(),
            Err(PolicyConfigError::EmptyRoleAttribute)
        ));
    }

    #[test]
    fn yaml_round_trip() {
        let config = PolicyConfig::organization_gated();
        let yaml = config.to_yaml().unwrap();
        assert_eq!(PolicyConfig::from_yaml_str(&yaml).unwrap(), config);
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("policy.yaml");
        std::fs::write(&path, PolicyConfig::default().to_yaml().unwrap()).unwrap();
        assert_eq!(PolicyConfig::load(&path).unwrap(), PolicyConfig::default());

        assert!(matches!(
            PolicyConfig::load(&dir.path().join("missing.yaml")),
            Err(PolicyConfigError::Io { .. })
        ));
    }
}
