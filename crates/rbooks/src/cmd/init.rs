//! rbooks-init - Create a new year directory.
//!
//! Writes `YYYY/opening`, `YYYY/closing` and the twelve month files from the
//! templates directory. Existing files are left alone, so rerunning is safe.
//!
//! # Usage
//!
//! ```bash
//! rbooks-init                    # current year
//! rbooks-init --year 2027 --templates-dir ~/books/templates
//! ```

use crate::cmd::common::{finish, init_tracing, parse_year, LedgerArgs};
use crate::report;
use anyhow::{Context, Result};
use clap::Parser;
use rbooks_core::Period;
use rbooks_loader::{scaffold_year, LedgerDir};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const BIN_NAME: &str = "rbooks-init";

/// Scaffold a year directory with opening, closing and monthly files.
#[derive(Parser, Debug)]
#[command(name = BIN_NAME)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(flatten)]
    ledger: LedgerArgs,

    /// Year to create (YYYY); defaults to the current year
    #[arg(long, value_name = "YYYY", value_parser = parse_year)]
    year: Option<Period>,

    /// Directory holding `opening`, `closing` and `monthly` templates
    #[arg(long, value_name = "DIR", default_value = "templates")]
    templates_dir: PathBuf,
}

/// Scaffold `year` under `ledger`.
pub fn run<W: Write>(ledger: &LedgerDir, year: i32, templates_dir: &Path, out: &mut W) -> Result<bool> {
    writeln!(out, "Initializing fiscal year {year:04}...\n")?;

    let scaffold = scaffold_year(ledger, year, templates_dir)
        .with_context(|| format!("failed to initialize {}", ledger.year_dir(year).display()))?;

    writeln!(out, "Year directory: {}\n", scaffold.year_dir.display())?;
    for name in &scaffold.created {
        report::print_summary(true, &format!("created {name}"), out)?;
    }
    for name in &scaffold.skipped {
        report::print_note(&format!("kept existing {name}"), out)?;
    }

    writeln!(out)?;
    writeln!(out, "Created: {} files", scaffold.created.len())?;
    if !scaffold.skipped.is_empty() {
        writeln!(out, "Skipped: {} existing files", scaffold.skipped.len())?;
    }

    let year_dir = scaffold.year_dir.display();
    writeln!(out, "\nNext steps:")?;
    writeln!(
        out,
        "   1. {year_dir}/{} - enter opening balances",
        ledger.file_name("opening")
    )?;
    writeln!(
        out,
        "   2. {year_dir}/{} - record each month's transactions",
        ledger.file_name("MM")
    )?;
    writeln!(
        out,
        "   3. {year_dir}/{} - add year-end adjusting entries",
        ledger.file_name("closing")
    )?;
    Ok(true)
}

/// Main entry point for the init command.
pub fn main() -> ExitCode {
    let args = Args::parse();

    if let Some(shell) = args.ledger.generate_completions {
        crate::cmd::completions::generate_completions::<Args>(shell, BIN_NAME);
        return ExitCode::SUCCESS;
    }

    init_tracing(args.ledger.verbose);

    let year = args.year.unwrap_or_else(Period::current_year).year_number();
    let result = run(
        &args.ledger.ledger(),
        year,
        &args.templates_dir,
        &mut io::stdout().lock(),
    );
    finish(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_creates_year_and_reports_next_steps() {
        let temp = TempDir::new().unwrap();
        let templates = temp.path().join("templates");
        fs::create_dir_all(&templates).unwrap();
        fs::write(templates.join("monthly.ledger.tpl"), "; YYYY-MM\n").unwrap();
        let dir = LedgerDir::new(temp.path().join("ledger"));

        let mut out = Vec::new();
        assert!(run(&dir, 2027, &templates, &mut out).unwrap());

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Created: 14 files"));
        assert!(!text.contains("Skipped"));
        assert!(text.contains("closing.ledger - add year-end adjusting entries"));
        assert_eq!(
            fs::read_to_string(dir.month_file(2027, 3)).unwrap(),
            "; 2027-03\n"
        );
    }

    #[test]
    fn test_rerun_keeps_existing_files() {
        let temp = TempDir::new().unwrap();
        let dir = LedgerDir::new(temp.path().join("ledger"));
        let templates = temp.path().join("missing-templates");

        run(&dir, 2027, &templates, &mut Vec::<u8>::new()).unwrap();
        fs::write(dir.month_file(2027, 1), "edited\n").unwrap();

        let mut out = Vec::new();
        run(&dir, 2027, &templates, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Created: 0 files"));
        assert!(text.contains("Skipped: 14 existing files"));
        assert_eq!(fs::read_to_string(dir.month_file(2027, 1)).unwrap(), "edited\n");
    }
}
