use crate::lexer::ArgumentList;
use anyhow::Result;
use std::io::Write;

/// Whether the read-eval loop should keep going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopStatus {
    Continue,
    Terminate,
}

impl LoopStatus {
    pub fn should_continue(self) -> bool {
        self == LoopStatus::Continue
    }
}

/// Object-safe trait for anything the shell can run with an argument list.
///
/// Implemented by the built-ins and by the external process launcher.
/// Failures that belong to the command (a bad `cd` target, a program that
/// can't be started) are reported on `stderr` by the command itself; an `Err`
/// is only returned when writing to the streams fails.
pub trait ExecutableCommand {
    fn execute(
        &self,
        args: &ArgumentList<'_>,
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
    ) -> Result<LoopStatus>;
}
