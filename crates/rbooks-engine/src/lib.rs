//! The external ledger engine, seen through a narrow port.
//!
//! rbooks never computes balances itself. Reports are produced by a
//! plain-text accounting program (`ledger` or `hledger`) that is called with
//! `-f FILE` arguments and a report name. This crate builds those calls and
//! interprets the results:
//!
//! - [`Invocation`] - the argument vector for one report
//! - [`CommandRunner`] - how the engine is started ([`SystemRunner`] in production)
//! - [`Engine`] - runs invocations and turns exit codes into [`EngineError`]s
//!
//! # Example
//!
//! ```no_run
//! use rbooks_engine::{Engine, Invocation};
//!
//! let engine = Engine::new("ledger");
//! let text = engine.run(&Invocation::new("balance").files(["ledger/accounts.ledger"]).flag("--no-total"))?;
//! print!("{text}");
//! # Ok::<(), rbooks_engine::EngineError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod invocation;
mod runner;

pub use invocation::Invocation;
pub use runner::{CommandRunner, EngineOutput, SystemRunner};

use rbooks_core::AccountName;
use std::collections::BTreeSet;
use std::path::Path;
use thiserror::Error;

/// Default engine program.
pub const DEFAULT_ENGINE: &str = "ledger";

/// Errors from running the engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The engine could not be started (usually: not installed).
    #[error("failed to run {program}: {source}")]
    Spawn {
        /// The program that was run.
        program: String,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The engine exited with a non-zero status.
    #[error("{program} {}: {}", describe_status(.status), .stderr.trim())]
    Failed {
        /// The program that was run.
        program: String,
        /// Exit code, if any.
        status: Option<i32>,
        /// Diagnostic output, verbatim.
        stderr: String,
        /// Whatever was printed on standard output.
        stdout: String,
    },
}

fn describe_status(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!("exited with status {code}"),
        None => "was terminated by a signal".to_string(),
    }
}

/// The engine program plus the runner used to start it.
#[derive(Debug, Clone)]
pub struct Engine<R = SystemRunner> {
    program: String,
    runner: R,
}

impl Engine<SystemRunner> {
    /// Run `program` as a child process.
    pub fn new(program: impl Into<String>) -> Self {
        Self::with_runner(program, SystemRunner)
    }
}

impl Default for Engine<SystemRunner> {
    fn default() -> Self {
        Self::new(DEFAULT_ENGINE)
    }
}

impl<R: CommandRunner> Engine<R> {
    /// Use a custom runner.
    pub fn with_runner(program: impl Into<String>, runner: R) -> Self {
        Self {
            program: program.into(),
            runner,
        }
    }

    /// The engine program name.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Is the program `hledger` (by file name, so `/usr/bin/hledger` counts)?
    pub fn is_hledger(&self) -> bool {
        Path::new(&self.program)
            .file_stem()
            .is_some_and(|stem| stem == "hledger")
    }

    /// Make `invocation` print dates as `YYYY-MM-DD`.
    ///
    /// `hledger` already does. `ledger` defaults to `%y-%b-%d` and needs an
    /// explicit `--date-format`.
    #[must_use]
    pub fn with_iso_dates(&self, invocation: Invocation) -> Invocation {
        if self.is_hledger() {
            invocation
        } else {
            invocation.flag("--date-format").flag("%Y-%m-%d")
        }
    }

    /// The command line as a user would type it (for display).
    pub fn command_line(&self, invocation: &Invocation) -> String {
        std::iter::once(self.program.clone())
            .chain(invocation.args())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Run an invocation and return the captured output, whatever the status.
    pub fn execute(&self, invocation: &Invocation) -> Result<EngineOutput, EngineError> {
        tracing::debug!(
            command = %self.command_line(invocation),
            files = invocation.file_count(),
            "running engine"
        );
        let output = self.runner.run(&self.program, &invocation.args())?;
        tracing::debug!(status = ?output.status, stdout_len = output.stdout.len(), "engine finished");
        Ok(output)
    }

    /// Run an invocation and return its standard output.
    ///
    /// # Errors
    ///
    /// [`EngineError::Failed`] if the engine exits non-zero.
    pub fn run(&self, invocation: &Invocation) -> Result<String, EngineError> {
        let output = self.execute(invocation)?;
        if output.success() {
            Ok(output.stdout)
        } else {
            Err(EngineError::Failed {
                program: self.program.clone(),
                status: output.status,
                stderr: output.stderr,
                stdout: output.stdout,
            })
        }
    }

    /// List the accounts referenced by `files`.
    ///
    /// The engine may exit non-zero because of an unrelated problem in the
    /// files (an unbalanced transaction, say) while still printing the
    /// account list. Such partial output is accepted. A failing run with no
    /// output is an error.
    pub fn list_accounts<P: AsRef<Path>>(
        &self,
        files: &[P],
    ) -> Result<BTreeSet<AccountName>, EngineError> {
        if files.is_empty() {
            return Ok(BTreeSet::new());
        }

        let output = self.execute(&Invocation::new("accounts").files(files))?;
        let accounts = parse_account_listing(&output.stdout);

        if !output.success() {
            if accounts.is_empty() {
                return Err(EngineError::Failed {
                    program: self.program.clone(),
                    status: output.status,
                    stderr: output.stderr,
                    stdout: output.stdout,
                });
            }
            tracing::warn!(
                status = ?output.status,
                stderr = %output.stderr.trim(),
                "engine reported errors; using the accounts it listed"
            );
        }

        Ok(accounts)
    }
}

/// One account per non-blank line of an `accounts` report.
pub fn parse_account_listing(text: &str) -> BTreeSet<AccountName> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(AccountName::new)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Replays a fixed output and records the arguments it was called with.
    struct ScriptedRunner {
        output: EngineOutput,
        calls: RefCell<Vec<(String, Vec<String>)>>,
    }

    impl ScriptedRunner {
        fn new(status: i32, stdout: &str, stderr: &str) -> Self {
            Self {
                output: EngineOutput {
                    status: Some(status),
                    stdout: stdout.to_string(),
                    stderr: stderr.to_string(),
                },
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl CommandRunner for ScriptedRunner {
        fn run(&self, program: &str, args: &[String]) -> Result<EngineOutput, EngineError> {
            self.calls
                .borrow_mut()
                .push((program.to_string(), args.to_vec()));
            Ok(self.output.clone())
        }
    }

    #[test]
    fn test_run_returns_stdout_on_success() {
        let runner = ScriptedRunner::new(0, "  100 JPY  Assets\n", "");
        let engine = Engine::with_runner("ledger", &runner);

        let out = engine
            .run(&Invocation::new("balance").files(["a.ledger"]))
            .unwrap();

        assert_eq!(out, "  100 JPY  Assets\n");
        let calls = runner.calls.borrow();
        assert_eq!(calls[0].0, "ledger");
        assert_eq!(calls[0].1, ["-f", "a.ledger", "balance"]);
    }

    #[test]
    fn test_run_surfaces_stderr_on_failure() {
        let runner = ScriptedRunner::new(1, "", "Error: Transaction does not balance\n");
        let engine = Engine::with_runner("ledger", &runner);

        let err = engine.run(&Invocation::new("balance")).unwrap_err();

        match &err {
            EngineError::Failed { status, stderr, .. } => {
                assert_eq!(*status, Some(1));
                assert!(stderr.contains("does not balance"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(
            err.to_string(),
            "ledger exited with status 1: Error: Transaction does not balance"
        );
    }

    #[test]
    fn test_list_accounts_accepts_partial_output() {
        let runner = ScriptedRunner::new(
            1,
            "Assets:Bank\n\n  Expenses:Rent  \nAssets:Bank\n",
            "Error: unbalanced",
        );
        let engine = Engine::with_runner("ledger", &runner);

        let accounts = engine.list_accounts(&["2026/01.ledger"]).unwrap();

        let names: Vec<&str> = accounts.iter().map(AccountName::as_str).collect();
        assert_eq!(names, ["Assets:Bank", "Expenses:Rent"]);
        assert_eq!(runner.calls.borrow()[0].1, ["-f", "2026/01.ledger", "accounts"]);
    }

    #[test]
    fn test_list_accounts_fails_without_output() {
        let runner = ScriptedRunner::new(1, "", "Error: parse error");
        let engine = Engine::with_runner("ledger", &runner);

        let err = engine.list_accounts(&["2026/01.ledger"]).unwrap_err();
        assert!(matches!(err, EngineError::Failed { .. }));
    }

    #[test]
    fn test_list_accounts_without_files_skips_engine() {
        let runner = ScriptedRunner::new(0, "Assets\n", "");
        let engine = Engine::with_runner("ledger", &runner);

        let files: [&str; 0] = [];
        assert!(engine.list_accounts(&files).unwrap().is_empty());
        assert!(runner.calls.borrow().is_empty());
    }

    #[test]
    fn test_iso_dates_only_added_for_ledger() {
        let inv = || Invocation::new("register").files(["a.ledger"]);

        let ledger = Engine::new("ledger").with_iso_dates(inv());
        assert_eq!(
            ledger.args(),
            ["-f", "a.ledger", "register", "--date-format", "%Y-%m-%d"]
        );

        let hledger = Engine::new("/usr/local/bin/hledger").with_iso_dates(inv());
        assert_eq!(hledger.args(), ["-f", "a.ledger", "register"]);
    }

    #[test]
    fn test_command_line_for_display() {
        let engine = Engine::new("hledger");
        let inv = Invocation::new("register").files(["a.ledger"]).flag("--flat");
        assert_eq!(engine.command_line(&inv), "hledger -f a.ledger register --flat");
    }
}
