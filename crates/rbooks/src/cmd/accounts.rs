//! rbooks-accounts - Verify that every used account is declared.
//!
//! Compares the accounts the engine finds in the transaction files with the
//! `account` directives of the declarations file. A used account is covered
//! by its own declaration or by a declared ancestor.
//!
//! # Usage
//!
//! ```bash
//! rbooks-accounts
//! rbooks-accounts --format json
//! ```
//!
//! # Exit codes
//!
//! - 0: every used account is declared
//! - 1: undefined accounts, or an error

use crate::cmd::common::{finish, init_tracing, EngineArgs, LedgerArgs};
use crate::report;
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use rbooks_engine::{CommandRunner, Engine};
use rbooks_loader::LedgerDir;
use rbooks_validate::{validate, AccountReport};
use serde::Serialize;
use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

const BIN_NAME: &str = "rbooks-accounts";

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text (default)
    #[default]
    Text,
    /// JSON document on stdout
    Json,
}

/// Check that every account used by a transaction is declared.
#[derive(Parser, Debug)]
#[command(name = BIN_NAME)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(flatten)]
    ledger: LedgerArgs,

    #[command(flatten)]
    engine: EngineArgs,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    declarations: &'a Path,
    #[serde(flatten)]
    report: &'a AccountReport,
}

/// Validate account usage and print the result.
///
/// Returns `Ok(false)` when undefined accounts were found.
pub fn run<R, O, E>(
    ledger: &LedgerDir,
    engine: &Engine<R>,
    format: OutputFormat,
    out: &mut O,
    err: &mut E,
) -> Result<bool>
where
    R: CommandRunner,
    O: Write,
    E: Write,
{
    let declarations = ledger.declarations_file();
    let defined = ledger
        .defined_accounts()
        .with_context(|| format!("failed to read declarations from {}", declarations.display()))?;
    let files = ledger.transaction_files()?;
    let used = engine
        .list_accounts(files.paths())
        .context("failed to list the accounts used by transactions")?;

    let report = validate(&defined, &used);

    match format {
        OutputFormat::Json => {
            let doc = JsonOutput {
                declarations: &declarations,
                report: &report,
            };
            serde_json::to_writer_pretty(&mut *out, &doc)?;
            writeln!(out)?;
        }
        OutputFormat::Text => print_text(&report, &declarations, out, err)?,
    }

    Ok(report.valid)
}

fn print_text<O: Write, E: Write>(
    report: &AccountReport,
    declarations: &Path,
    out: &mut O,
    err: &mut E,
) -> io::Result<()> {
    writeln!(out, "Validating accounts...\n")?;
    writeln!(out, "Declared accounts: {}", report.defined_count)?;
    writeln!(out, "Used accounts:     {}\n", report.used_count)?;

    if !report.checked {
        return report::print_note("No accounts used by transactions", out);
    }

    if report.valid {
        return report::print_summary(true, "All accounts are declared", out);
    }

    report::print_summary(false, "Undefined accounts found:", err)?;
    writeln!(err)?;
    for account in &report.undefined {
        writeln!(err, "   - {account}")?;
    }
    writeln!(err)?;
    writeln!(err, "hint: add these accounts to {}", declarations.display())
}

/// Main entry point for the accounts command.
pub fn main() -> ExitCode {
    let args = Args::parse();

    if let Some(shell) = args.ledger.generate_completions {
        crate::cmd::completions::generate_completions::<Args>(shell, BIN_NAME);
        return ExitCode::SUCCESS;
    }

    init_tracing(args.ledger.verbose);

    let result = run(
        &args.ledger.ledger(),
        &args.engine.engine(),
        args.format,
        &mut io::stdout().lock(),
        &mut io::stderr().lock(),
    );
    finish(result)
}
