// error.rs

use std::path::PathBuf;

use thiserror::Error;

/// Arithmetic domain errors raised by a [`crate::operations::Calculator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CalcError {
    #[error("Division by zero is not allowed.")]
    DivisionByZero,
}

/// A line of text that is not a well-formed `<op> <a> <b> = <result>` record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid calculation record {line:?}: {reason}")]
pub struct InvalidRecordError {
    pub line: String,
    pub reason: &'static str,
}

impl InvalidRecordError {
    pub(crate) fn new(line: &str, reason: &'static str) -> Self {
        Self {
            line: line.to_string(),
            reason,
        }
    }
}

/// Why `History::load` left the in-memory log untouched.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("The file {} was not found.", .0.display())]
    NotFound(PathBuf),

    #[error("The file {} is empty.", .0.display())]
    Empty(PathBuf),

    #[error("The file {} does not contain '{column}' column.", .path.display())]
    MissingColumn { path: PathBuf, column: &'static str },

    #[error("The file {} could not be parsed: {reason}", .path.display())]
    Malformed { path: PathBuf, reason: String },

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl LoadError {
    /// True for files that exist but hold no usable `calculations` column.
    pub fn is_empty_or_malformed(&self) -> bool {
        matches!(
            self,
            LoadError::Empty(_) | LoadError::MissingColumn { .. } | LoadError::Malformed { .. }
        )
    }
}

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("Failed to write {}: {source}", .path.display())]
    Csv { path: PathBuf, source: csv::Error },

    #[error("Failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {key}: {message}")]
    InvalidValue { key: String, message: String },
}
