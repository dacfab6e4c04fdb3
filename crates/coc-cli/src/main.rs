//! # coc CLI entry point
//!
//! Parses command-line arguments, installs the tracing subscriber, loads the
//! access policy, and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use coc_cli::audit::{run_audit, AuditArgs};
use coc_cli::invoke::{run_invoke, InvokeArgs};
use coc_cli::policy::{run_policy, PolicyArgs};

/// Chain-of-custody ledger host.
///
/// Runs contract invocations against a local ledger snapshot, inspects the
/// access policy, and lists the audit log.
#[derive(Parser, Debug)]
#[command(name = "coc", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,

    /// Access policy file (YAML). Defaults to the built-in role table.
    #[arg(long, env = "COC_POLICY", global = true)]
    policy: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run one contract function as one transaction.
    Invoke(InvokeArgs),

    /// Show, tabulate, or check the access policy.
    Policy(PolicyArgs),

    /// List audit log entries with their content digests.
    Audit(AuditArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins over -v when set.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    // stdout carries payloads; logs go to stderr.
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if cli.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "coc CLI starting");

    let config = || coc_cli::load_policy_config(cli.policy.as_deref());
    let result = match &cli.command {
        Commands::Invoke(args) => config().and_then(|c| run_invoke(args, &c.build()?)),
        Commands::Policy(args) => config().and_then(|c| run_policy(args, &c)),
        Commands::Audit(args) => run_audit(args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
