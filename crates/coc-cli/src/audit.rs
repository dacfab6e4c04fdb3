//! # Audit Subcommand
//!
//! Offline listing of the audit log in a ledger snapshot, with the SHA-256
//! digest of each entry's canonical form so auditors can compare entries
//! across replicas.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use coc_core::{EvidenceId, Timestamp};
use coc_ledger::{CallerIdentity, MemoryLedger, TxHeader};
use coc_state::AuditLogEntry;

/// Arguments for the `coc audit` subcommand.
#[derive(Args, Debug)]
pub struct AuditArgs {
    /// Ledger snapshot file.
    #[arg(long, env = "COC_LEDGER", default_value = crate::DEFAULT_LEDGER_PATH)]
    pub ledger: PathBuf,

    /// Restrict the listing to one evidence record.
    #[arg(long, value_name = "EVIDENCE_ID")]
    pub evidence: Option<String>,

    /// Print entries as JSON lines instead of a table.
    #[arg(long)]
    pub json: bool,
}

/// Execute the audit subcommand.
pub fn run_audit(args: &AuditArgs) -> Result<u8> {
    for line in audit_lines(args)? {
        println!("{line}");
    }
    Ok(0)
}

fn audit_lines(args: &AuditArgs) -> Result<Vec<String>> {
    let entries = read_entries(args)?;
    entries
        .iter()
        .map(|entry| {
            let digest = entry
                .digest()
                .with_context(|| format!("digesting {}", entry.log_id))?;
            if args.json {
                let mut value = serde_json::to_value(entry)?;
                value["digest"] = serde_json::Value::String(format!("sha256:{}", digest.to_hex()));
                Ok(serde_json::to_string(&value)?)
            } else {
                Ok(format!(
                    "{}  {}  {:<11}  {}  by {}  owner {}  sha256:{}",
                    entry.log_id,
                    entry.timestamp,
                    entry.action_type.as_str(),
                    entry.evidence_id,
                    entry.performed_by,
                    entry.owner,
                    digest.to_hex()
                ))
            }
        })
        .collect()
}

fn read_entries(args: &AuditArgs) -> Result<Vec<AuditLogEntry>> {
    let ledger = MemoryLedger::load(&args.ledger)
        .with_context(|| format!("loading ledger snapshot {}", args.ledger.display()))?;
    // Read-only view; never committed.
    let view = ledger.begin(TxHeader::new(
        "audit-view",
        Timestamp::from_utc(chrono::Utc::now()),
        CallerIdentity::default(),
    ));
    let entries = match &args.evidence {
        Some(id) => {
            let id = EvidenceId::new(id.as_str())?;
            coc_contract::audit::list_for_evidence(&view, &id)?
        }
        None => coc_contract::audit::list_all(&view)?,
    };
    view.rollback();
    Ok(entries)
}
