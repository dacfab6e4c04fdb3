//! # coc-cli — Command-Line Host
//!
//! Provides the `coc` command-line interface. The binary plays the part of
//! the ledger host: it resolves a caller identity from flags, agrees on a
//! transaction id and timestamp, runs exactly one contract invocation
//! against a snapshot-persisted [`coc_ledger::MemoryLedger`], and commits
//! the result back to the snapshot only when the invocation succeeds.
//!
//! ## Subcommands
//!
//! - `coc invoke` — Run one contract function.
//! - `coc policy` — Show, tabulate, or check the effective access policy.
//! - `coc audit` — List audit entries with their content digests.
//!
//! ```bash
//! coc invoke --caller x509::alice --msp Org1MSP --attr "role=first responder" \
//!     CreateEvidence E1 "seized laptop" P1
//! coc invoke --caller x509::bob --msp Org2MSP GetEvidenceHistory E1
//! coc --policy policy.yaml policy check --msp Org2MSP TransferEvidence
//! ```

pub mod audit;
pub mod invoke;
pub mod policy;

use std::path::Path;

use anyhow::{Context, Result};

use coc_policy::PolicyConfig;

/// Default ledger snapshot path, relative to the working directory.
pub const DEFAULT_LEDGER_PATH: &str = "ledger.json";

/// Load the policy file, or fall back to the built-in role table.
pub fn load_policy_config(path: Option<&Path>) -> Result<PolicyConfig> {
    match path {
        Some(path) => {
            let config = PolicyConfig::load(path)
                .with_context(|| format!("loading policy from {}", path.display()))?;
            tracing::debug!(path = %path.display(), "loaded policy file");
            Ok(config)
        }
        None => Ok(PolicyConfig::default()),
    }
}

/// Parse a `NAME=VALUE` caller attribute.
pub fn parse_attribute(raw: &str) -> std::result::Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got `{raw}`"))?;
    if name.trim().is_empty() {
        return Err("attribute name must not be empty".to_string());
    }
    Ok((name.to_string(), value.to_string()))
}
