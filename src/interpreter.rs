use crate::builtin;
use crate::command::{ExecutableCommand, LoopStatus};
use crate::config::Options;
use crate::external::ExternalCommand;
use crate::lexer::{self, ArgumentList};
use crate::reader::LineSource;
use anyhow::Context;
use std::io::Write;

pub const BANNER: &str = "Welcome to J Shell";

/// The read-eval loop: prompt, read a line, split it, run it, repeat.
///
/// Example
/// ```
/// use jsh::{Interpreter, LineReader};
/// let mut input = LineReader::new("help\nexit\n".as_bytes());
/// let mut out = Vec::new();
/// let mut err = Vec::new();
/// Interpreter::default().repl(&mut input, &mut out, &mut err).unwrap();
/// assert!(String::from_utf8(out).unwrap().contains("\tcd\n"));
/// ```
pub struct Interpreter {
    prompt: String,
    banner: bool,
}

impl Interpreter {
    pub fn new(options: &Options) -> Self {
        Self {
            prompt: options.prompt.clone(),
            banner: !options.quiet,
        }
    }

    /// Run one tokenized command line.
    ///
    /// A blank line does nothing. Built-ins decide the loop status themselves;
    /// an external program never ends the loop, whatever its exit code.
    pub fn execute(
        &self,
        args: &ArgumentList<'_>,
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
    ) -> anyhow::Result<LoopStatus> {
        let Some(name) = args.command() else {
            return Ok(LoopStatus::Continue);
        };
        match builtin::lookup(name) {
            Some(builtin) => {
                tracing::debug!(builtin = builtin.name(), "running builtin");
                builtin.execute(args, stdout, stderr)
            }
            None => {
                ExternalCommand.execute(args, stdout, stderr)?;
                Ok(LoopStatus::Continue)
            }
        }
    }

    /// Read and execute lines from `source` until `exit` or end of input.
    ///
    /// A read error is reported once on `stderr` and ends the loop. An `Err` is
    /// only returned when the output streams themselves fail, including while
    /// a command writes its output.
    pub fn repl(
        &self,
        source: &mut dyn LineSource,
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
    ) -> anyhow::Result<()> {
        if self.banner {
            writeln!(stdout, "{BANNER}")?;
        }

        loop {
            let line = match source.next_line(&self.prompt, stdout) {
                Ok(Some(line)) => line,
                Ok(None) => {
                    tracing::debug!("end of input");
                    break;
                }
                Err(err) => {
                    writeln!(stderr, "jsh: {err:#}")?;
                    break;
                }
            };

            let args = lexer::split_line(&line);
            let status = self
                .execute(&args, stdout, stderr)
                .context("can't write command output")?;
            if !status.should_continue() {
                break;
            }
        }
        stdout.flush()?;
        Ok(())
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new(&Options::default())
    }
}
