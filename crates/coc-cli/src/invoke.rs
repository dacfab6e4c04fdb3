//! # Invoke Subcommand
//!
//! Runs one contract function as one transaction. The snapshot is loaded,
//! the invocation executes against a fresh transaction, and on success the
//! committed state is written back. A rejected invocation leaves the
//! snapshot untouched.
//!
//! Exit codes: 0 on success, 2 when the contract rejects the invocation,
//! 1 on operational failure (unreadable snapshot, bad flags).

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use coc_contract::{execute, ContractError};
use coc_core::Timestamp;
use coc_ledger::{CallerIdentity, MemoryLedger, TxHeader};
use coc_policy::AccessPolicy;

/// Arguments for the `coc invoke` subcommand.
#[derive(Args, Debug)]
pub struct InvokeArgs {
    /// Ledger snapshot file. Created on first successful write.
    #[arg(long, env = "COC_LEDGER", default_value = crate::DEFAULT_LEDGER_PATH)]
    pub ledger: PathBuf,

    /// Transaction id. A time-ordered UUIDv7 when omitted, so audit log
    /// keys sort in commit order.
    #[arg(long)]
    pub tx_id: Option<String>,

    /// Transaction timestamp (RFC 3339, `Z` suffix). Current time when omitted.
    #[arg(long)]
    pub timestamp: Option<String>,

    /// Raw client identity of the caller.
    #[arg(long = "caller", value_name = "ID")]
    pub caller: String,

    /// Caller organization (MSP) identifier.
    #[arg(long, value_name = "MSP", default_value = "")]
    pub msp: String,

    /// Attested caller attribute. Repeatable.
    #[arg(long = "attr", value_name = "NAME=VALUE", value_parser = crate::parse_attribute)]
    pub attributes: Vec<(String, String)>,

    /// Contract function name, e.g. `CreateEvidence`.
    pub function: String,

    /// Positional string arguments for the function.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

impl InvokeArgs {
    fn header(&self) -> Result<TxHeader> {
        let tx_id = self
            .tx_id
            .clone()
            .unwrap_or_else(|| uuid::Uuid::now_v7().to_string());
        let timestamp = match &self.timestamp {
            Some(raw) => Timestamp::parse(raw).context("invalid --timestamp")?,
            None => Timestamp::from_utc(chrono::Utc::now()),
        };
        let caller = self.attributes.iter().fold(
            CallerIdentity::new(&self.caller, &self.msp),
            |caller, (name, value)| caller.with_attribute(name, value),
        );
        Ok(TxHeader::new(tx_id, timestamp, caller))
    }
}

/// Execute the invoke subcommand.
pub fn run_invoke(args: &InvokeArgs, policy: &AccessPolicy) -> Result<u8> {
    match invoke(args, policy)? {
        Ok(payload) => {
            if !payload.is_empty() {
                let value: serde_json::Value =
                    serde_json::from_slice(&payload).context("contract returned invalid JSON")?;
                println!("{}", serde_json::to_string_pretty(&value)?);
            }
            Ok(0)
        }
        Err(err) => {
            eprintln!("ERROR [{}]: {err}", err.kind());
            Ok(2)
        }
    }
}

/// Run the invocation and persist on success.
///
/// The outer error is operational; the inner one is the contract's verdict.
pub fn invoke(
    args: &InvokeArgs,
    policy: &AccessPolicy,
) -> Result<std::result::Result<Vec<u8>, ContractError>> {
    let ledger = MemoryLedger::load(&args.ledger)
        .with_context(|| format!("loading ledger snapshot {}", args.ledger.display()))?;
    let header = args.header()?;
    let tx_id = header.tx_id.clone();

    let outcome = execute(&ledger, header, policy, &args.function, &args.args);
    if outcome.is_ok() {
        ledger
            .save(&args.ledger)
            .with_context(|| format!("saving ledger snapshot {}", args.ledger.display()))?;
        tracing::info!(function = %args.function, tx_id = %tx_id, "transaction committed");
    }
    Ok(outcome)
}
