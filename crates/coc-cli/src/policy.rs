//! # Policy Subcommand
//!
//! Inspect the effective access policy without touching a ledger.

use anyhow::{bail, Result};
use clap::{Args, Subcommand};

use coc_ledger::CallerIdentity;
use coc_policy::{Action, Operation, PolicyConfig, Role};

/// Arguments for the `coc policy` subcommand.
#[derive(Args, Debug)]
pub struct PolicyArgs {
    #[command(subcommand)]
    pub command: PolicyCommand,
}

#[derive(Subcommand, Debug)]
pub enum PolicyCommand {
    /// Print the effective policy as YAML.
    Show,

    /// Print the role × action matrix.
    Table,

    /// Decide whether a caller may invoke an operation.
    Check(CheckArgs),
}

/// Arguments for `coc policy check`.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Caller organization (MSP) identifier.
    #[arg(long, value_name = "MSP", default_value = "")]
    pub msp: String,

    /// Attested caller attribute. Repeatable.
    #[arg(long = "attr", value_name = "NAME=VALUE", value_parser = crate::parse_attribute)]
    pub attributes: Vec<(String, String)>,

    /// Contract function name, e.g. `TransferEvidence`.
    pub operation: String,
}

/// Execute the policy subcommand.
///
/// Returns exit code: 0 on success or an allowed check, 1 on a denied check.
pub fn run_policy(args: &PolicyArgs, config: &PolicyConfig) -> Result<u8> {
    match &args.command {
        PolicyCommand::Show => {
            print!("{}", config.to_yaml()?);
            Ok(0)
        }
        PolicyCommand::Table => {
            print!("{}", render_table(config)?);
            Ok(0)
        }
        PolicyCommand::Check(check) => {
            let verdict = check_operation(check, config)?;
            match &verdict {
                Ok(()) => println!("ALLOW {}", check.operation),
                Err(reason) => println!("DENY {}: {reason}", check.operation),
            }
            Ok(if verdict.is_ok() { 0 } else { 1 })
        }
    }
}

fn check_operation(
    check: &CheckArgs,
    config: &PolicyConfig,
) -> Result<std::result::Result<(), coc_policy::AuthorizationError>> {
    let Some(operation) = Operation::from_name(&check.operation) else {
        bail!("unknown operation: {}", check.operation);
    };
    let caller = check.attributes.iter().fold(
        CallerIdentity::new("policy-check", &check.msp),
        |caller, (name, value)| caller.with_attribute(name, value),
    );
    Ok(config.build()?.authorize(&caller, operation))
}

fn render_table(config: &PolicyConfig) -> Result<String> {
    let policy = config.build()?;
    let Some(roles) = policy.roles() else {
        return Ok("role strategy disabled\n".to_string());
    };

    let width = Role::ALL.iter().map(|r| r.as_str().len()).max().unwrap_or(0);
    let mut out = format!("{:width$}", "");
    for action in Action::ALL {
        out.push_str(&format!("  {:>8}", action.as_str()));
    }
    out.push('\n');
    for role in Role::ALL {
        out.push_str(&format!("{:width$}", role.as_str()));
        for action in Action::ALL {
            let mark = if roles.permissions.permits(role, action) { "yes" } else { "-" };
            out.push_str(&format!("  {mark:>8}"));
        }
        out.push('\n');
    }
    Ok(out)
}
