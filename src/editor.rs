use crate::config::Options;
use crate::reader::{Line, LineReader, LineSource};
use anyhow::Context;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::io::{self, IsTerminal, Write};

/// Line source for interactive terminals: cursor movement and in-memory history.
pub struct Editor {
    inner: DefaultEditor,
}

impl Editor {
    pub fn new() -> rustyline::Result<Self> {
        Ok(Self {
            inner: DefaultEditor::new()?,
        })
    }
}

impl LineSource for Editor {
    fn next_line(&mut self, prompt: &str, _stdout: &mut dyn Write) -> anyhow::Result<Option<Line>> {
        match self.inner.readline(prompt) {
            Ok(text) => {
                if !text.trim().is_empty() {
                    self.inner.add_history_entry(text.as_str())?;
                }
                Ok(Some(Line::from(text)))
            }
            // Ctrl-C drops the line being typed, like any other shell.
            Err(ReadlineError::Interrupted) => Ok(Some(Line::default())),
            Err(ReadlineError::Eof) => Ok(None),
            Err(err) => Err(err).context("can't read from terminal"),
        }
    }
}

/// Pick where command lines come from for this process.
///
/// A terminal gets the line editor unless `--plain` was given; redirected
/// input, or an editor that fails to start, falls back to [`LineReader`].
pub fn stdin_source(options: &Options) -> Box<dyn LineSource> {
    if !options.plain && io::stdin().is_terminal() {
        match Editor::new() {
            Ok(editor) => return Box::new(editor),
            Err(err) => tracing::warn!(%err, "line editor unavailable, reading plain input"),
        }
    }
    Box::new(LineReader::new(io::stdin().lock()))
}
