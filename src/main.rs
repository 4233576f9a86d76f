// main.rs

use std::io::{self, IsTerminal};

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use calc_repl::{Config, LineEditor, ReaderLines, Repl};

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let config = Config::load()?;
    init_tracing(&config.log_level);

    if io::stdin().is_terminal() {
        Repl::new(LineEditor::new()?, io::stdout(), config).run()
    } else {
        Repl::new(ReaderLines::new(io::stdin().lock()), io::stdout().lock(), config).run()
    }
}
