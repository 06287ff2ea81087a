use crate::buffer::ChunkedBuf;
use anyhow::Context;
use std::fmt;
use std::io::{BufRead, ErrorKind, Write};

/// Initial capacity of a line buffer, and the amount it grows by.
pub const LINE_CHUNK: usize = 1024;

/// One line of user input with the trailing newline removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line {
    text: String,
}

impl Line {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Build a line from raw bytes, replacing invalid UTF-8 sequences.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        let text = match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
        };
        Self { text }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl From<String> for Line {
    fn from(text: String) -> Self {
        Self { text }
    }
}

impl From<&str> for Line {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Anything the interpreter can pull command lines from.
///
/// `Ok(None)` means the input is exhausted and the loop should stop.
pub trait LineSource {
    /// Show `prompt` (on `stdout` or however the source sees fit) and read the next line.
    fn next_line(&mut self, prompt: &str, stdout: &mut dyn Write) -> anyhow::Result<Option<Line>>;
}

/// Reads newline-terminated lines from a buffered byte stream.
///
/// Works with a locked standard input as well as with any in-memory reader,
/// which is what the tests use.
pub struct LineReader<R> {
    input: R,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(input: R) -> Self {
        Self { input }
    }

    /// Read bytes up to the next newline or the end of input.
    ///
    /// The newline itself is consumed and dropped. Returns `Ok(None)` only when
    /// the input ends before a single byte was read; a final line without a
    /// trailing newline is still returned.
    pub fn read_line(&mut self) -> std::io::Result<Option<Line>> {
        let mut buf = ChunkedBuf::with_chunk(LINE_CHUNK);
        let mut saw_input = false;

        loop {
            let available = match self.input.fill_buf() {
                Ok(bytes) => bytes,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            };

            if available.is_empty() {
                return Ok(saw_input.then(|| Line::from_bytes(buf.into_vec())));
            }
            saw_input = true;

            match available.iter().position(|&b| b == b'\n') {
                Some(end) => {
                    for &b in &available[..end] {
                        buf.push(b);
                    }
                    self.input.consume(end + 1);
                    return Ok(Some(Line::from_bytes(buf.into_vec())));
                }
                None => {
                    let taken = available.len();
                    for &b in available {
                        buf.push(b);
                    }
                    self.input.consume(taken);
                }
            }
        }
    }

    pub fn into_inner(self) -> R {
        self.input
    }
}

impl<R: BufRead> LineSource for LineReader<R> {
    fn next_line(&mut self, prompt: &str, stdout: &mut dyn Write) -> anyhow::Result<Option<Line>> {
        write!(stdout, "{prompt}")?;
        stdout.flush()?;
        self.read_line().context("can't read from standard input")
    }
}
