//! Arguments and plumbing shared by every command.

use crate::cmd::completions::ShellType;
use clap::Args;
use rbooks_core::Period;
use rbooks_engine::{Engine, DEFAULT_ENGINE};
use rbooks_loader::{LedgerDir, DEFAULT_EXTENSION};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Where the ledger files live.
#[derive(Args, Debug, Clone)]
pub struct LedgerArgs {
    /// Root of the year-partitioned ledger directory
    #[arg(
        long,
        value_name = "DIR",
        env = "RBOOKS_LEDGER_DIR",
        default_value = "ledger"
    )]
    pub ledger_dir: PathBuf,

    /// File extension of ledger files, without the dot
    #[arg(
        long,
        value_name = "EXT",
        env = "RBOOKS_EXTENSION",
        default_value = DEFAULT_EXTENSION
    )]
    pub extension: String,

    /// Show verbose output (resolved files, engine command lines)
    #[arg(short, long)]
    pub verbose: bool,

    /// Generate shell completions and exit
    #[arg(long, value_name = "SHELL", hide = true)]
    pub generate_completions: Option<ShellType>,
}

impl LedgerArgs {
    /// The ledger directory these arguments point at.
    pub fn ledger(&self) -> LedgerDir {
        LedgerDir::new(&self.ledger_dir).with_extension(&self.extension)
    }
}

/// Which engine program to run.
#[derive(Args, Debug, Clone)]
pub struct EngineArgs {
    /// Ledger engine program (`ledger` or `hledger`)
    #[arg(
        long,
        value_name = "PROGRAM",
        env = "RBOOKS_ENGINE",
        default_value = DEFAULT_ENGINE
    )]
    pub engine: String,
}

impl EngineArgs {
    /// The engine, run as a child process.
    pub fn engine(&self) -> Engine {
        Engine::new(&self.engine)
    }
}

/// Parse a `--year` value (`YYYY`).
pub fn parse_year(s: &str) -> Result<Period, String> {
    let period: Period = s.parse().map_err(|e| format!("{e}"))?;
    if period.is_year() {
        Ok(period)
    } else {
        Err(format!("expected a year (YYYY), got '{s}'"))
    }
}

/// Parse a `--month` value (`YYYY-MM`).
pub fn parse_month(s: &str) -> Result<Period, String> {
    let period: Period = s.parse().map_err(|e| format!("{e}"))?;
    if period.is_year() {
        Err(format!("expected a month (YYYY-MM), got '{s}'"))
    } else {
        Ok(period)
    }
}

/// Install the tracing subscriber on stderr.
///
/// `--verbose` forces debug output; otherwise `RUST_LOG` decides, with
/// warnings shown by default.
pub fn init_tracing(verbose: bool) {
    let builder = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false);
    let result = if verbose {
        builder.with_max_level(Level::DEBUG).try_init()
    } else {
        builder
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
            )
            .try_init()
    };
    // A subscriber may already be installed (tests); keep it.
    drop(result);
}

/// Turn a command result into the process exit code.
///
/// `Ok(true)` is success, `Ok(false)` a reported failure (unbalanced
/// ledger, undefined accounts) and `Err` an unexpected error.
pub fn finish(result: anyhow::Result<bool>) -> ExitCode {
    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Cli {
        #[command(flatten)]
        ledger: LedgerArgs,
    }

    #[test]
    fn test_extension_flag_reaches_ledger_dir() {
        let cli = Cli::try_parse_from(["rbooks", "--ledger-dir", "books", "--extension", ".journal"])
            .unwrap();
        let dir = cli.ledger.ledger();
        assert_eq!(dir.extension(), "journal");
        assert_eq!(dir.declarations_file(), PathBuf::from("books/accounts.journal"));
    }

    #[test]
    fn test_parse_year_and_month() {
        assert_eq!(parse_year("2026").unwrap().to_string(), "2026");
        assert!(parse_year("2026-01").is_err());
        assert_eq!(parse_month("2026-01").unwrap().to_string(), "2026-01");
        assert!(parse_month("2026").is_err());
        assert!(parse_month("2026-13").is_err());
    }
}
