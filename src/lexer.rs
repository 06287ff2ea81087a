//! Splitting a command line into whitespace-delimited tokens.
//!
//! There is no quoting, escaping or substitution: every run of non-delimiter
//! characters is one token. Tokens are `&str` slices of the [`Line`] they came
//! from, so an [`ArgumentList`] cannot outlive its line.

use crate::buffer::ChunkedBuf;
use crate::reader::Line;

/// Characters that separate tokens: space, tab, carriage return, newline and bell.
pub const DELIMITERS: [char; 5] = [' ', '\t', '\r', '\n', '\x07'];

/// Initial capacity of a token list, and the amount it grows by.
pub const TOKEN_CHUNK: usize = 64;

/// Tokens of one command line. The first is the command name.
#[derive(Debug)]
pub struct ArgumentList<'a> {
    tokens: ChunkedBuf<&'a str>,
}

impl<'a> ArgumentList<'a> {
    /// Command name, or `None` for a blank line.
    pub fn command(&self) -> Option<&'a str> {
        self.get(0)
    }

    /// Everything after the command name.
    pub fn operands(&self) -> &[&'a str] {
        self.tokens.as_slice().get(1..).unwrap_or_default()
    }

    pub fn get(&self, index: usize) -> Option<&'a str> {
        self.tokens.as_slice().get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn as_slice(&self) -> &[&'a str] {
        self.tokens.as_slice()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.tokens.as_slice().iter().copied()
    }
}

/// Split `line` on [`DELIMITERS`], dropping empty tokens.
pub fn split_line(line: &Line) -> ArgumentList<'_> {
    let mut tokens = ChunkedBuf::with_chunk(TOKEN_CHUNK);
    for token in line
        .as_str()
        .split(&DELIMITERS[..])
        .filter(|token| !token.is_empty())
    {
        tokens.push(token);
    }
    ArgumentList { tokens }
}
