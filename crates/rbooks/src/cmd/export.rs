//! rbooks-export - Export transactions for spreadsheets and accounting software.
//!
//! Runs the engine's `register` report for a year or a month and writes it
//! either as CSV (`date,account,description,amount,total`) or verbatim.
//!
//! # Usage
//!
//! ```bash
//! rbooks-export                          # current year, transactions.csv
//! rbooks-export --year 2025 --output 2025.csv
//! rbooks-export --month 2026-01 --format raw --output 2026-01.txt
//! ```

use crate::cmd::common::{finish, init_tracing, parse_month, parse_year, EngineArgs, LedgerArgs};
use crate::report;
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use rbooks_core::{render_csv, to_table, Period};
use rbooks_engine::{CommandRunner, Engine, Invocation};
use rbooks_loader::{LedgerDir, Selector};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const BIN_NAME: &str = "rbooks-export";

/// Export file format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// Comma-separated values (default)
    #[default]
    Csv,
    /// The engine's register output, unchanged
    Raw,
}

/// Export transactions as CSV or raw register text.
#[derive(Parser, Debug)]
#[command(name = BIN_NAME)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(flatten)]
    ledger: LedgerArgs,

    #[command(flatten)]
    engine: EngineArgs,

    /// Export one year (YYYY); defaults to the current year
    #[arg(long, value_name = "YYYY", value_parser = parse_year)]
    year: Option<Period>,

    /// Export one month (YYYY-MM); takes precedence over --year
    #[arg(long, value_name = "YYYY-MM", value_parser = parse_month)]
    month: Option<Period>,

    /// Output file
    #[arg(short, long, value_name = "PATH", default_value = "transactions.csv")]
    output: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value = "csv")]
    format: ExportFormat,
}

/// What to export and where.
#[derive(Debug, Clone)]
pub struct ExportRequest {
    /// The period to export.
    pub period: Period,
    /// Destination file.
    pub output: PathBuf,
    /// Output format.
    pub format: ExportFormat,
}

impl ExportRequest {
    fn from_args(args: &Args) -> Self {
        Self {
            period: args
                .month
                .or(args.year)
                .unwrap_or_else(Period::current_year),
            output: args.output.clone(),
            format: args.format,
        }
    }
}

/// Run the export.
///
/// Nothing is written when there are no ledger files or no transactions.
pub fn run<R, W>(
    ledger: &LedgerDir,
    engine: &Engine<R>,
    request: &ExportRequest,
    out: &mut W,
) -> Result<bool>
where
    R: CommandRunner,
    W: Write,
{
    let period = &request.period;
    let what = if period.is_year() { "year" } else { "month" };
    writeln!(out, "Exporting {what} {period} to {}\n", request.output.display())?;

    let files = ledger.resolve(&Selector::from(*period))?;
    if files.is_empty() {
        report::print_note("No ledger files found", out)?;
        return Ok(true);
    }
    report::print_file_list(&files, out)?;

    let invocation = engine.with_iso_dates(
        Invocation::new("register")
            .files(files.paths())
            .period(period),
    );
    writeln!(out, "Running: {}\n", engine.command_line(&invocation))?;

    let register = engine.run(&invocation)?;
    if register.trim().is_empty() {
        report::print_note("No transactions in this period", out)?;
        return Ok(true);
    }

    match request.format {
        ExportFormat::Raw => {
            write_output(&request.output, &register)?;
            report::print_summary(
                true,
                &format!("Exported register text to {}", request.output.display()),
                out,
            )?;
        }
        ExportFormat::Csv => {
            let rows = to_table(&register);
            write_output(&request.output, &render_csv(&rows))?;
            report::print_summary(
                true,
                &format!(
                    "Exported {} transaction lines to {}",
                    rows.len(),
                    request.output.display()
                ),
                out,
            )?;
        }
    }
    Ok(true)
}

fn write_output(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
}

/// Main entry point for the export command.
pub fn main() -> ExitCode {
    let args = Args::parse();

    if let Some(shell) = args.ledger.generate_completions {
        crate::cmd::completions::generate_completions::<Args>(shell, BIN_NAME);
        return ExitCode::SUCCESS;
    }

    init_tracing(args.ledger.verbose);

    let request = ExportRequest::from_args(&args);
    let result = run(
        &args.ledger.ledger(),
        &args.engine.engine(),
        &request,
        &mut io::stdout().lock(),
    );
    finish(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rbooks_engine::{EngineError, EngineOutput};
    use std::fs;
    use tempfile::TempDir;

    const REGISTER: &str = "\
2024/01/15 Opening capital  Assets:Bank:Business  100,000 JPY  100,000 JPY
2024/01/15 Opening capital  Equity:Capital       -100,000 JPY  0 JPY
";

    struct RegisterRunner(&'static str);

    impl CommandRunner for RegisterRunner {
        fn run(&self, _: &str, args: &[String]) -> Result<EngineOutput, EngineError> {
            assert!(args.iter().any(|a| a == "register"));
            Ok(EngineOutput {
                status: Some(0),
                stdout: self.0.to_string(),
                stderr: String::new(),
            })
        }
    }

    fn books() -> (TempDir, LedgerDir) {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("ledger");
        fs::create_dir_all(root.join("2024")).unwrap();
        fs::write(root.join("accounts.ledger"), "").unwrap();
        fs::write(root.join("2024/01.ledger"), "").unwrap();
        let dir = LedgerDir::new(root);
        (temp, dir)
    }

    fn request(temp: &TempDir, format: ExportFormat) -> ExportRequest {
        ExportRequest {
            period: Period::year(2024).unwrap(),
            output: temp.path().join("out.csv"),
            format,
        }
    }

    #[test]
    fn test_csv_export() {
        let (temp, dir) = books();
        let engine = Engine::with_runner("ledger", RegisterRunner(REGISTER));
        let request = request(&temp, ExportFormat::Csv);

        let mut out = Vec::new();
        assert!(run(&dir, &engine, &request, &mut out).unwrap());

        let csv = fs::read_to_string(&request.output).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("date,account,description,amount,total"));
        assert_eq!(
            lines.next(),
            Some("2024-01-15,Assets:Bank:Business,Opening capital,100,000 JPY,100,000 JPY")
        );
        assert_eq!(lines.count(), 1);

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Running: ledger -f "));
        assert!(text.contains("--begin 2024-01-01 --end 2025-01-01 --date-format %Y-%m-%d"));
        assert!(text.contains("Exported 2 transaction lines"));
    }

    #[test]
    fn test_hledger_export_keeps_its_own_dates() {
        let (temp, dir) = books();
        let engine = Engine::with_runner("hledger", RegisterRunner(REGISTER));
        let request = request(&temp, ExportFormat::Csv);

        let mut out = Vec::new();
        run(&dir, &engine, &request, &mut out).unwrap();
        assert!(!String::from_utf8(out).unwrap().contains("--date-format"));
    }

    #[test]
    fn test_raw_export_is_verbatim() {
        let (temp, dir) = books();
        let engine = Engine::with_runner("ledger", RegisterRunner(REGISTER));
        let request = request(&temp, ExportFormat::Raw);

        run(&dir, &engine, &request, &mut Vec::<u8>::new()).unwrap();
        assert_eq!(fs::read_to_string(&request.output).unwrap(), REGISTER);
    }

    #[test]
    fn test_empty_register_writes_nothing() {
        let (temp, dir) = books();
        let engine = Engine::with_runner("ledger", RegisterRunner("\n"));
        let request = request(&temp, ExportFormat::Csv);

        let mut out = Vec::new();
        assert!(run(&dir, &engine, &request, &mut out).unwrap());
        assert!(!request.output.exists());
        assert!(String::from_utf8(out).unwrap().contains("No transactions"));
    }
}
