//! A minimal interactive shell.
//!
//! Each line read from the input is split on whitespace and either handed to
//! one of the built-ins (`cd`, `help`, `exit`) or launched as an external
//! program, with the shell waiting for it to finish before reading the next
//! line. There are no pipelines, redirections, quoting or variable expansion.
//!
//! The main entry point is [`Interpreter`], which drives the read-eval loop
//! over any [`LineSource`]: a [`LineReader`] over a byte stream, or the
//! terminal line [`Editor`].

mod buffer;
mod builtin;
pub mod command;
pub mod config;
mod editor;
pub mod external;
mod interpreter;
pub mod lexer;
mod reader;

pub use buffer::ChunkedBuf;
pub use builtin::{Builtin, lookup as lookup_builtin};
pub use config::Options;
pub use editor::{Editor, stdin_source};
/// Just a convenient re-export of the read-eval loop.
///
/// See [`Interpreter`] for the high-level API and examples.
pub use interpreter::Interpreter;
pub use reader::{Line, LineReader, LineSource};
