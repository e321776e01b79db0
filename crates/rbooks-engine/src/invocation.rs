//! Building engine command lines.

use chrono::NaiveDate;
use rbooks_core::Period;
use std::path::{Path, PathBuf};

/// One engine report request.
///
/// Arguments are emitted in a fixed order: `-f FILE` for every file, the
/// report name, account filters, `--begin`, `--end`, `--depth`, then any
/// extra flags.
///
/// ```
/// use rbooks_engine::Invocation;
///
/// let inv = Invocation::new("balance")
///     .files(["ledger/accounts.ledger", "ledger/2026/01.ledger"])
///     .account("Income")
///     .depth(2);
/// assert_eq!(
///     inv.args(),
///     ["-f", "ledger/accounts.ledger", "-f", "ledger/2026/01.ledger", "balance", "Income", "--depth", "2"]
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invocation {
    files: Vec<PathBuf>,
    report: String,
    accounts: Vec<String>,
    begin: Option<NaiveDate>,
    end: Option<NaiveDate>,
    depth: Option<u32>,
    flags: Vec<String>,
}

impl Invocation {
    /// Request the named report (`balance`, `register`, `accounts`, ...).
    pub fn new(report: impl Into<String>) -> Self {
        Self {
            report: report.into(),
            ..Self::default()
        }
    }

    /// Add input files, in order.
    #[must_use]
    pub fn files<I, P>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        self.files
            .extend(files.into_iter().map(|p| p.as_ref().to_path_buf()));
        self
    }

    /// Restrict the report to an account (pattern).
    #[must_use]
    pub fn account(mut self, account: impl Into<String>) -> Self {
        self.accounts.push(account.into());
        self
    }

    /// Inclusive start date.
    #[must_use]
    pub const fn begin(mut self, date: NaiveDate) -> Self {
        self.begin = Some(date);
        self
    }

    /// Exclusive end date.
    #[must_use]
    pub const fn end(mut self, date: NaiveDate) -> Self {
        self.end = Some(date);
        self
    }

    /// Bound the report to `period` (`--begin` start, `--end` first day after).
    #[must_use]
    pub fn period(self, period: &Period) -> Self {
        self.begin(period.begin()).end(period.end())
    }

    /// Limit the account depth shown.
    #[must_use]
    pub const fn depth(mut self, depth: u32) -> Self {
        self.depth = Some(depth);
        self
    }

    /// Append a raw engine flag such as `--no-total`.
    #[must_use]
    pub fn flag(mut self, flag: impl Into<String>) -> Self {
        self.flags.push(flag.into());
        self
    }

    /// The report name.
    pub fn report(&self) -> &str {
        &self.report
    }

    /// Number of input files.
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// The full argument vector.
    pub fn args(&self) -> Vec<String> {
        let mut args = Vec::with_capacity(self.files.len() * 2 + 8);
        for file in &self.files {
            args.push("-f".to_string());
            args.push(file.display().to_string());
        }
        args.push(self.report.clone());
        args.extend(self.accounts.iter().cloned());
        if let Some(begin) = self.begin {
            args.push("--begin".to_string());
            args.push(begin.format("%Y-%m-%d").to_string());
        }
        if let Some(end) = self.end {
            args.push("--end".to_string());
            args.push(end.format("%Y-%m-%d").to_string());
        }
        if let Some(depth) = self.depth {
            args.push("--depth".to_string());
            args.push(depth.to_string());
        }
        args.extend(self.flags.iter().cloned());
        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argument_order() {
        let period: Period = "2025-12".parse().unwrap();
        let inv = Invocation::new("balance")
            .files(["a.ledger"])
            .account("Income")
            .account("Expenses")
            .flag("--flat")
            .depth(3)
            .period(&period);

        assert_eq!(
            inv.args(),
            [
                "-f",
                "a.ledger",
                "balance",
                "Income",
                "Expenses",
                "--begin",
                "2025-12-01",
                "--end",
                "2026-01-01",
                "--depth",
                "3",
                "--flat",
            ]
        );
    }

    #[test]
    fn test_bare_report() {
        assert_eq!(Invocation::new("accounts").args(), ["accounts"]);
    }
}
