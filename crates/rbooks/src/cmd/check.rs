//! rbooks-check - Check that every transaction balances.
//!
//! Runs `balance --no-total` over every ledger file. The engine rejects
//! unbalanced or malformed transactions, so a clean run means the books
//! balance; a failing run prints the engine's diagnostics verbatim.
//!
//! # Usage
//!
//! ```bash
//! rbooks-check
//! rbooks-check --ledger-dir ~/books --engine hledger
//! ```

use crate::cmd::common::{finish, init_tracing, EngineArgs, LedgerArgs};
use crate::report;
use anyhow::Result;
use clap::Parser;
use rbooks_engine::{CommandRunner, Engine, EngineError, Invocation};
use rbooks_loader::{LedgerDir, Selector};
use std::io::{self, Write};
use std::process::ExitCode;

const BIN_NAME: &str = "rbooks-check";

/// Check that every transaction in the ledger directory balances.
#[derive(Parser, Debug)]
#[command(name = BIN_NAME)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(flatten)]
    ledger: LedgerArgs,

    #[command(flatten)]
    engine: EngineArgs,
}

/// Run the balance check.
///
/// Returns `Ok(false)` when the engine rejects the ledger.
pub fn run<R, O, E>(ledger: &LedgerDir, engine: &Engine<R>, out: &mut O, err: &mut E) -> Result<bool>
where
    R: CommandRunner,
    O: Write,
    E: Write,
{
    writeln!(out, "Checking that all transactions balance...\n")?;

    let files = ledger.resolve(&Selector::All)?;
    if files.is_empty() {
        report::print_note("No ledger files found", out)?;
        return Ok(true);
    }
    report::print_file_list(&files, out)?;

    let invocation = Invocation::new("balance")
        .files(files.paths())
        .flag("--no-total");

    match engine.run(&invocation) {
        Ok(balances) => {
            if !balances.trim().is_empty() {
                writeln!(out, "Balances by account:\n")?;
                writeln!(out, "{balances}")?;
            }
            report::print_summary(true, "All transactions balance", out)?;
            Ok(true)
        }
        Err(EngineError::Failed { stderr, stdout, .. }) => {
            report::print_summary(false, "The ledger engine reported errors:", err)?;
            writeln!(err)?;
            if !stderr.trim().is_empty() {
                writeln!(err, "{}", stderr.trim_end())?;
            }
            if !stdout.trim().is_empty() {
                writeln!(err, "{}", stdout.trim_end())?;
            }
            writeln!(err)?;
            writeln!(
                err,
                "hint: transactions may be unbalanced: check that each transaction's postings sum to zero"
            )?;
            Ok(false)
        }
        Err(e) => Err(e.into()),
    }
}

/// Main entry point for the check command.
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
        &mut io::stdout().lock(),
        &mut io::stderr().lock(),
    );
    finish(result)
}
