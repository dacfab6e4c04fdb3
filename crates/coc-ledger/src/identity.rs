//! # Caller Identity
//!
//! The host resolves the caller's certificate into an organization (MSP)
//! identifier, a raw client identity string, and a set of attested custom
//! attributes. The contract only reads these values.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Identity of the participant submitting the current transaction.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CallerIdentity {
    /// Raw client identity as reported by the host (e.g. the certificate
    /// subject). Recorded verbatim as the actor of deletions and transfers.
    pub id: String,
    /// Organization (membership service provider) identifier.
    pub msp_id: String,
    /// Attested custom attributes, e.g. `role`.
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

impl CallerIdentity {
    /// Create an identity with no attributes.
    pub fn new(id: impl Into<String>, msp_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            msp_id: msp_id.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Add an attested attribute.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Look up an attribute value. Absent and empty values both resolve to `None`.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// The organization identifier, or `None` when the host could not resolve one.
    pub fn organization(&self) -> Option<&str> {
        Some(self.msp_id.as_str()).filter(|m| !m.trim().is_empty())
    }
}
