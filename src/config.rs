// config.rs

use std::path::PathBuf;

use clap::Parser;

use crate::error::ConfigError;

pub const DEFAULT_HISTORY_FILE: &str = "history.csv";
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Interactive calculator with a persistent calculation history.
#[derive(Debug, Parser)]
#[command(name = "calc-repl", version)]
pub struct Cli {
    /// File used by the `save` and `load` commands.
    #[arg(long, env = "HISTORY_FILE", default_value = DEFAULT_HISTORY_FILE)]
    pub history_file: PathBuf,

    /// Log filter used when RUST_LOG is not set (e.g. `info`, `calc_repl=debug`).
    #[arg(long, env = "CALC_LOG", default_value = DEFAULT_LOG_LEVEL)]
    pub log_level: String,
}

/// Settings injected into the REPL at construction.
///
/// Logging goes through the ambient `tracing` dispatcher; tests swap in their
/// own subscriber with `tracing::subscriber::with_default`.
#[derive(Debug, Clone)]
pub struct Config {
    pub history_file: PathBuf,
    pub log_level: String,
}

impl Config {
    pub fn new(history_file: impl Into<PathBuf>) -> Self {
        Self {
            history_file: history_file.into(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }

    /// Reads `.env` (if present), then command-line arguments and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_cli(Cli::parse())
    }

    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        if cli.history_file.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "HISTORY_FILE".to_string(),
                message: "history file path must not be empty".to_string(),
            });
        }
        Ok(Self {
            history_file: cli.history_file,
            log_level: cli.log_level,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::try_parse_from(["calc-repl", "--history-file", "calcs.csv", "--log-level", "debug"]).unwrap();
        let config = Config::from_cli(cli).unwrap();
        assert_eq!(config.history_file, PathBuf::from("calcs.csv"));
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn empty_history_path_is_rejected() {
        let cli = Cli {
            history_file: PathBuf::new(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        };
        assert!(Config::from_cli(cli).is_err());
    }
}
