//! Running the engine as a child process.

use crate::EngineError;
use std::process::Command;

/// Captured result of one engine run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineOutput {
    /// Exit code, `None` if the process was killed by a signal.
    pub status: Option<i32>,
    /// Standard output.
    pub stdout: String,
    /// Standard error.
    pub stderr: String,
}

impl EngineOutput {
    /// Did the engine exit with status 0?
    pub const fn success(&self) -> bool {
        matches!(self.status, Some(0))
    }
}

/// Something that can run the engine.
///
/// [`SystemRunner`] spawns a real process; tests substitute a scripted runner.
pub trait CommandRunner {
    /// Run `program` with `args`, wait for it and capture its output.
    ///
    /// A non-zero exit is *not* an error here; only a failure to start is.
    fn run(&self, program: &str, args: &[String]) -> Result<EngineOutput, EngineError>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, program: &str, args: &[String]) -> Result<EngineOutput, EngineError> {
        (**self).run(program, args)
    }
}

/// Runs the engine with [`std::process::Command`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[String]) -> Result<EngineOutput, EngineError> {
        let output = Command::new(program)
            .args(args)
            .output()
            .map_err(|source| EngineError::Spawn {
                program: program.to_string(),
                source,
            })?;

        Ok(EngineOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
