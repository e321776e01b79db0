//! Console output shared by the commands.

use rbooks_engine::{CommandRunner, Engine, Invocation};
use std::io::{self, Write};
use std::path::PathBuf;

/// Width of section rules.
pub const RULE_WIDTH: usize = 70;

/// Print the files a report is based on.
pub fn print_file_list<'a, W, I>(files: I, writer: &mut W) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a PathBuf>,
    I::IntoIter: ExactSizeIterator,
{
    let files = files.into_iter();
    let count = files.len();
    let noun = if count == 1 { "file" } else { "files" };
    writeln!(writer, "Using {count} ledger {noun}:")?;
    for file in files {
        writeln!(writer, "  - {}", file.display())?;
    }
    writeln!(writer)
}

/// Print a double-ruled banner.
pub fn print_banner<W: Write>(title: &str, writer: &mut W) -> io::Result<()> {
    let rule = "═".repeat(RULE_WIDTH);
    writeln!(writer, "{rule}")?;
    writeln!(writer, "  {title}")?;
    writeln!(writer, "{rule}")?;
    writeln!(writer)
}

/// Print a section heading with a single rule under it.
pub fn print_heading<W: Write>(title: &str, writer: &mut W) -> io::Result<()> {
    writeln!(writer, "{title}")?;
    writeln!(writer, "{}", "─".repeat(RULE_WIDTH))
}

/// Run one report and print it, or `fallback` if the engine fails or
/// prints nothing.
///
/// Summaries are a sequence of independent reports; one failing section
/// should not hide the others. Returns whether the engine succeeded.
pub fn print_engine_section<R, W>(
    engine: &Engine<R>,
    invocation: &Invocation,
    fallback: &str,
    writer: &mut W,
) -> io::Result<bool>
where
    R: CommandRunner,
    W: Write,
{
    match engine.run(invocation) {
        Ok(text) if !text.trim().is_empty() => {
            write!(writer, "{text}")?;
            if !text.ends_with('\n') {
                writeln!(writer)?;
            }
            Ok(true)
        }
        Ok(_) => {
            writeln!(writer, "   {fallback}")?;
            Ok(true)
        }
        Err(e) => {
            tracing::debug!(report = invocation.report(), error = %e, "section failed");
            writeln!(writer, "   {fallback}")?;
            Ok(false)
        }
    }
}

/// Print a one-line success or failure summary.
pub fn print_summary<W: Write>(ok: bool, message: &str, writer: &mut W) -> io::Result<()> {
    if ok {
        writeln!(writer, "\x1b[32m\u{2713}\x1b[0m {message}")
    } else {
        writeln!(writer, "\x1b[31m\u{2717}\x1b[0m {message}")
    }
}

/// Print an informational note (nothing to do, nothing found).
pub fn print_note<W: Write>(message: &str, writer: &mut W) -> io::Result<()> {
    writeln!(writer, "\x1b[33m\u{2139}\x1b[0m {message}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rbooks_engine::{EngineError, EngineOutput};

    struct FixedRunner(EngineOutput);

    impl CommandRunner for FixedRunner {
        fn run(&self, _: &str, _: &[String]) -> Result<EngineOutput, EngineError> {
            Ok(self.0.clone())
        }
    }

    fn engine(status: i32, stdout: &str) -> Engine<FixedRunner> {
        Engine::with_runner(
            "ledger",
            FixedRunner(EngineOutput {
                status: Some(status),
                stdout: stdout.to_string(),
                stderr: String::new(),
            }),
        )
    }

    #[test]
    fn test_file_list() {
        let files = vec![PathBuf::from("ledger/accounts.ledger")];
        let mut out = Vec::new();
        print_file_list(&files, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Using 1 ledger file:\n  - ledger/accounts.ledger\n\n"
        );
    }

    #[test]
    fn test_section_prints_report() {
        let mut out = Vec::new();
        let ok = print_engine_section(
            &engine(0, "  5,000 JPY  Income:Sales"),
            &Invocation::new("balance"),
            "(none)",
            &mut out,
        )
        .unwrap();
        assert!(ok);
        assert_eq!(String::from_utf8(out).unwrap(), "  5,000 JPY  Income:Sales\n");
    }

    #[test]
    fn test_section_falls_back_on_failure_and_empty_output() {
        let mut out = Vec::new();
        let ok = print_engine_section(
            &engine(1, "partial"),
            &Invocation::new("balance"),
            "(none)",
            &mut out,
        )
        .unwrap();
        assert!(!ok);

        print_engine_section(&engine(0, "\n"), &Invocation::new("balance"), "(none)", &mut out)
            .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "   (none)\n   (none)\n");
    }
}
