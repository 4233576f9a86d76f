// lib.rs

pub mod completion;
pub mod config;
pub mod error;
pub mod history;
pub mod operations;
pub mod parser;
pub mod repl;
pub mod util;

pub use config::Config;
pub use error::{CalcError, InvalidRecordError, LoadError, SaveError};
pub use history::{CalculationRecord, History};
pub use operations::{Arithmetic, Calculator, Operator};
pub use repl::{LineEditor, LineSource, ReaderLines, Repl, ScriptedLines, State};
