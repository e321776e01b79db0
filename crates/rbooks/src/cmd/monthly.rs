//! rbooks-monthly - Income, expenses and balances for one month.
//!
//! # Usage
//!
//! ```bash
//! rbooks-monthly                 # current month
//! rbooks-monthly --month 2026-01
//! ```

use crate::cmd::common::{finish, init_tracing, parse_month, EngineArgs, LedgerArgs};
use crate::report;
use anyhow::Result;
use clap::Parser;
use rbooks_core::Period;
use rbooks_engine::{CommandRunner, Engine, Invocation};
use rbooks_loader::{LedgerDir, Selector};
use std::io::{self, Write};
use std::process::ExitCode;

const BIN_NAME: &str = "rbooks-monthly";

const NONE: &str = "(none)";
const NOT_COMPUTED: &str = "(cannot be computed)";

/// Summarize one month of the ledger.
#[derive(Parser, Debug)]
#[command(name = BIN_NAME)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(flatten)]
    ledger: LedgerArgs,

    #[command(flatten)]
    engine: EngineArgs,

    /// Month to summarize (YYYY-MM); defaults to the current month
    #[arg(long, value_name = "YYYY-MM", value_parser = parse_month)]
    month: Option<Period>,
}

/// Print the monthly summary for `month`.
///
/// Income and expenses are bounded to the month; asset and liability
/// balances are cumulative. Sections the engine cannot produce print a
/// placeholder.
pub fn run<R, W>(ledger: &LedgerDir, engine: &Engine<R>, month: &Period, out: &mut W) -> Result<bool>
where
    R: CommandRunner,
    W: Write,
{
    writeln!(out, "Monthly summary: {month}\n")?;

    let files = ledger.resolve(&Selector::from(*month))?;
    if files.is_empty() {
        report::print_note("No ledger files found", out)?;
        return Ok(true);
    }
    report::print_file_list(&files, out)?;

    let balance = || Invocation::new("balance").files(files.paths());
    let sections = [
        (
            "Income",
            balance().account("Income").period(month).depth(2),
            NONE,
        ),
        (
            "Expenses",
            balance().account("Expenses").period(month).depth(2),
            NONE,
        ),
        ("Assets", balance().account("Assets").depth(2), NONE),
        ("Liabilities", balance().account("Liabilities").depth(2), NONE),
        (
            "Net income for the month",
            balance()
                .account("Income")
                .account("Expenses")
                .period(month),
            NOT_COMPUTED,
        ),
    ];

    for (i, (title, invocation, fallback)) in sections.iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        report::print_heading(title, out)?;
        report::print_engine_section(engine, invocation, fallback, out)?;
    }
    Ok(true)
}

/// Main entry point for the monthly command.
pub fn main() -> ExitCode {
    let args = Args::parse();

    if let Some(shell) = args.ledger.generate_completions {
        crate::cmd::completions::generate_completions::<Args>(shell, BIN_NAME);
        return ExitCode::SUCCESS;
    }

    init_tracing(args.ledger.verbose);

    let month = args.month.unwrap_or_else(Period::current_month);
    let result = run(
        &args.ledger.ledger(),
        &args.engine.engine(),
        &month,
        &mut io::stdout().lock(),
    );
    finish(result)
}
