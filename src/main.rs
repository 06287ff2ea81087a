use anyhow::Result;
use jsh::{Interpreter, Options};
use std::io;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> Result<()> {
    // Diagnostics go to stderr and stay quiet unless RUST_LOG asks for more.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let options: Options = argh::from_env();
    tracing::debug!(?options, "starting");

    let mut source = jsh::stdin_source(&options);
    Interpreter::new(&options).repl(source.as_mut(), &mut io::stdout(), &mut io::stderr())
}
