//! rbooks-yearly - Year-end profit and loss statement and balance sheet.
//!
//! The layout follows a sole proprietor's annual return: sales, other
//! income, one line per expense category, net income, then the balance
//! sheet at year end.
//!
//! # Usage
//!
//! ```bash
//! rbooks-yearly                # current year
//! rbooks-yearly --year 2025
//! ```

use crate::cmd::common::{finish, init_tracing, parse_year, EngineArgs, LedgerArgs};
use crate::report;
use anyhow::Result;
use clap::Parser;
use rbooks_core::Period;
use rbooks_engine::{CommandRunner, Engine, Invocation};
use rbooks_loader::{LedgerDir, Selector};
use std::io::{self, Write};
use std::process::ExitCode;

const BIN_NAME: &str = "rbooks-yearly";

const NONE: &str = "(none)";
const NOT_COMPUTED: &str = "(cannot be computed)";

/// Expense categories shown one by one, as `(label, account)`.
pub const EXPENSE_CATEGORIES: [(&str, &str); 10] = [
    ("Advertising", "Expenses:Advertising"),
    ("Supplies", "Expenses:Supplies"),
    ("Communication", "Expenses:Communication"),
    ("Utilities", "Expenses:Utilities"),
    ("Rent", "Expenses:Rent"),
    ("Travel and transportation", "Expenses:Travel"),
    ("Meetings and entertainment", "Expenses:Meals"),
    ("Outsourcing", "Expenses:Outsourcing"),
    ("Taxes and dues", "Expenses:Taxes"),
    ("Depreciation", "Expenses:Depreciation"),
];

/// Produce the year-end statements.
#[derive(Parser, Debug)]
#[command(name = BIN_NAME)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(flatten)]
    ledger: LedgerArgs,

    #[command(flatten)]
    engine: EngineArgs,

    /// Fiscal year (YYYY); defaults to the current year
    #[arg(long, value_name = "YYYY", value_parser = parse_year)]
    year: Option<Period>,
}

/// Print the profit and loss statement and the balance sheet for `year`.
pub fn run<R, W>(ledger: &LedgerDir, engine: &Engine<R>, year: &Period, out: &mut W) -> Result<bool>
where
    R: CommandRunner,
    W: Write,
{
    report::print_banner(&format!("Annual statements for fiscal year {year}"), out)?;

    let files = ledger.resolve(&Selector::from(*year))?;
    if files.is_empty() {
        report::print_note("No ledger files found", out)?;
        return Ok(true);
    }
    report::print_file_list(&files, out)?;

    let balance = || Invocation::new("balance").files(files.paths());

    report::print_banner("Profit and Loss Statement", out)?;

    report::print_heading("Income", out)?;
    writeln!(out, "\nSales")?;
    let sales = balance().account("Income:Sales").period(year).depth(3);
    report::print_engine_section(engine, &sales, NONE, out)?;
    writeln!(out, "\nAll income")?;
    let income = balance().account("Income").period(year).depth(3);
    report::print_engine_section(engine, &income, NONE, out)?;

    writeln!(out)?;
    report::print_heading("Expenses", out)?;
    for (label, account) in EXPENSE_CATEGORIES {
        writeln!(out, "\n{label}")?;
        let invocation = balance().account(account).period(year);
        report::print_engine_section(engine, &invocation, NONE, out)?;
    }

    writeln!(out)?;
    report::print_heading("Net income", out)?;
    let net = balance().account("Income").account("Expenses").period(year);
    report::print_engine_section(engine, &net, NOT_COMPUTED, out)?;
    writeln!(out)?;

    report::print_banner("Balance Sheet", out)?;
    for (i, section) in ["Assets", "Liabilities", "Equity"].into_iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        report::print_heading(section, out)?;
        let invocation = balance().account(section).depth(3);
        report::print_engine_section(engine, &invocation, NONE, out)?;
    }

    writeln!(out)?;
    report::print_summary(true, &format!("Statements for {year} complete"), out)?;
    Ok(true)
}

/// Main entry point for the yearly command.
pub fn main() -> ExitCode {
    let args = Args::parse();

    if let Some(shell) = args.ledger.generate_completions {
        crate::cmd::completions::generate_completions::<Args>(shell, BIN_NAME);
        return ExitCode::SUCCESS;
    }

    init_tracing(args.ledger.verbose);

    let year = args.year.unwrap_or_else(Period::current_year);
    let result = run(
        &args.ledger.ledger(),
        &args.engine.engine(),
        &year,
        &mut io::stdout().lock(),
    );
    finish(result)
}
