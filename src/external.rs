use crate::command::{ExecutableCommand, LoopStatus};
use crate::lexer::ArgumentList;
use anyhow::Result;
use std::io::{self, ErrorKind, Write};
use std::process::{Child, Command, ExitStatus};

/// Command that is not a builtin: the first token names a program to run.
///
/// The program is resolved by the platform's spawn routine (a `PATH` search
/// for bare names), inherits the shell's standard streams, environment and
/// working directory, and runs in the foreground until it finishes.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExternalCommand;

/// Why a program could not be run to completion.
#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    /// The child was created but the program image could not be loaded.
    #[error("{program}: {source}")]
    Exec { program: String, source: io::Error },
    /// No child process could be created at all.
    #[error("{0}")]
    Spawn(#[source] io::Error),
    /// Waiting for the child failed.
    #[error("{0}")]
    Wait(#[source] io::Error),
}

/// Terminal state of a child the shell waited for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildOutcome {
    Exited(i32),
    Signaled(i32),
    Unknown,
}

impl ChildOutcome {
    pub fn from_status(status: ExitStatus) -> Self {
        match status.code() {
            Some(code) => ChildOutcome::Exited(code),
            None => terminated_by_signal(status),
        }
    }

    /// Status the way a POSIX shell would show it in `$?`.
    pub fn shell_code(self) -> i32 {
        match self {
            ChildOutcome::Exited(code) => code,
            ChildOutcome::Signaled(signal) => 128 + signal,
            ChildOutcome::Unknown => -1,
        }
    }
}

#[cfg(unix)]
fn terminated_by_signal(status: ExitStatus) -> ChildOutcome {
    use std::os::unix::process::ExitStatusExt;
    match status.signal() {
        Some(signal) => ChildOutcome::Signaled(signal),
        None => ChildOutcome::Unknown,
    }
}

#[cfg(not(unix))]
fn terminated_by_signal(_status: ExitStatus) -> ChildOutcome {
    ChildOutcome::Unknown
}

impl ExternalCommand {
    /// Start `program` with `operands` and block until it exits or is killed.
    pub fn spawn_and_wait(
        &self,
        program: &str,
        operands: &[&str],
    ) -> Result<ChildOutcome, LaunchError> {
        let mut child = self.spawn(program, operands)?;
        self.wait(&mut child)
    }

    pub fn spawn(&self, program: &str, operands: &[&str]) -> Result<Child, LaunchError> {
        let child = Command::new(program)
            .args(operands)
            .spawn()
            .map_err(|err| classify_spawn_error(program, err))?;
        tracing::debug!(pid = child.id(), program, "spawned");
        Ok(child)
    }

    /// Wait until `child` has exited or been killed by a signal.
    ///
    /// `Child::wait` does not ask for stop notifications, so a suspended child
    /// keeps the shell waiting instead of being taken for a finished one.
    pub fn wait(&self, child: &mut Child) -> Result<ChildOutcome, LaunchError> {
        let status = child.wait().map_err(LaunchError::Wait)?;
        Ok(ChildOutcome::from_status(status))
    }
}

fn classify_spawn_error(program: &str, err: io::Error) -> LaunchError {
    match err.kind() {
        ErrorKind::NotFound | ErrorKind::PermissionDenied => LaunchError::Exec {
            program: program.to_owned(),
            source: err,
        },
        _ => LaunchError::Spawn(err),
    }
}

impl ExecutableCommand for ExternalCommand {
    fn execute(
        &self,
        args: &ArgumentList<'_>,
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
    ) -> Result<LoopStatus> {
        let Some(program) = args.command() else {
            return Ok(LoopStatus::Continue);
        };
        // The child writes straight to the inherited descriptor.
        stdout.flush()?;

        match self.spawn_and_wait(program, args.operands()) {
            Ok(outcome) => {
                tracing::debug!(program, ?outcome, code = outcome.shell_code(), "child finished");
            }
            Err(err) => {
                tracing::debug!(program, error = ?err, "launch failed");
                writeln!(stderr, "jsh: {err}")?;
            }
        }
        Ok(LoopStatus::Continue)
    }
}
