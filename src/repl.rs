// repl.rs

use std::collections::VecDeque;
use std::io::{BufRead, Write};

use anyhow::Result;
use itertools::Itertools;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{CompletionType, Config as EditorConfig, Editor};
use tracing::{error, info, warn};

use crate::completion::CalcCompleter;
use crate::config::Config;
use crate::history::{CalculationRecord, History};
use crate::operations::{Arithmetic, Calculator, Operator};
use crate::parser::{classify, Command, Input};
use crate::util::{render_float, writeln_ignore_broken_pipe};

pub const PROMPT: &str = "calc> ";

pub const NO_INPUT: &str = "No input detected. Please enter a valid command or operation.";
pub const INVALID_FORMAT: &str = "Invalid input. Please follow the format: <operation> <num1> <num2>.";
pub const EXITING: &str = "Exiting calculator...";

/// Where the REPL gets its next line from. `Ok(None)` is end of input.
pub trait LineSource {
    fn next_line(&mut self, prompt: &str) -> Result<Option<String>>;
}

/// Interactive terminal input with line recall and tab completion.
pub struct LineEditor {
    rl: Editor<CalcCompleter, DefaultHistory>,
}

impl LineEditor {
    pub fn new() -> Result<Self> {
        let config = EditorConfig::builder()
            .completion_type(CompletionType::List)
            .auto_add_history(false)
            .build();
        let mut rl = Editor::with_config(config)?;
        rl.set_helper(Some(CalcCompleter::new()));
        Ok(Self { rl })
    }
}

impl LineSource for LineEditor {
    fn next_line(&mut self, prompt: &str) -> Result<Option<String>> {
        match self.rl.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = self.rl.add_history_entry(line.as_str());
                }
                Ok(Some(line))
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
            Err(ReadlineError::Io(ref e)) if e.kind() == std::io::ErrorKind::InvalidData => {
                warn!("Input line was not valid UTF-8");
                Ok(Some(char::REPLACEMENT_CHARACTER.to_string()))
            }
            Err(err) => Err(err.into()),
        }
    }
}

/// Pre-recorded input lines, consumed front to back.
pub struct ScriptedLines {
    lines: VecDeque<String>,
}

impl ScriptedLines {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }
}

impl LineSource for ScriptedLines {
    fn next_line(&mut self, _prompt: &str) -> Result<Option<String>> {
        Ok(self.lines.pop_front())
    }
}

/// Non-interactive input read one line at a time, e.g. a pipe.
pub struct ReaderLines<R> {
    reader: R,
}

impl<R: BufRead> ReaderLines<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> LineSource for ReaderLines<R> {
    fn next_line(&mut self, _prompt: &str) -> Result<Option<String>> {
        let mut buf = Vec::new();
        if self.reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        // Undecodable bytes become U+FFFD and the line is rejected by the classifier.
        let line = String::from_utf8_lossy(&buf);
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum State {
    Running,
    Terminated,
}

/// Read-eval-print loop: classifies each line and routes it to the
/// calculator or to the history log.
pub struct Repl<S, W, C = Arithmetic> {
    source: S,
    out: W,
    calculator: C,
    history: History,
    config: Config,
    state: State,
}

impl<S: LineSource, W: Write> Repl<S, W, Arithmetic> {
    pub fn new(source: S, out: W, config: Config) -> Self {
        Self::with_calculator(source, out, Arithmetic, config)
    }
}

impl<S: LineSource, W: Write, C: Calculator> Repl<S, W, C> {
    pub fn with_calculator(source: S, out: W, calculator: C, config: Config) -> Self {
        Self {
            source,
            out,
            calculator,
            history: History::new(),
            config,
            state: State::Running,
        }
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Runs until `exit` or end of input. Only output failures escape.
    pub fn run(&mut self) -> Result<()> {
        info!("Calculator started");
        self.banner()?;
        while self.state == State::Running {
            match self.source.next_line(PROMPT)? {
                Some(line) => self.dispatch(&line)?,
                None => {
                    info!("End of input");
                    self.terminate()?;
                }
            }
        }
        self.out.flush()?;
        Ok(())
    }

    /// Handles exactly one input line.
    pub fn dispatch(&mut self, line: &str) -> std::io::Result<()> {
        match classify(line) {
            Input::Empty => self.say(NO_INPUT),
            Input::Command(cmd) => self.command(cmd),
            Input::InvalidFormat => {
                self.say(INVALID_FORMAT)?;
                self.say(format!("Supported operations: {}.", Operator::canonical_list()))
            }
            Input::UnknownOperator(name) => {
                warn!(operator = name, "Unknown operation");
                self.say(format!(
                    "Unknown operation. Supported operations: {}.",
                    Operator::canonical_list()
                ))
            }
            Input::Calculation { op, spelling, a, b } => match self.calculator.apply(op, a, b) {
                Ok(result) => {
                    self.history
                        .append(CalculationRecord::new(spelling, a, b, result));
                    self.say(format!("Result: {}", render_float(result)))
                }
                Err(err) => {
                    warn!(%op, a, b, "{}", err);
                    self.say(err.to_string())
                }
            },
        }
    }

    fn command(&mut self, cmd: Command) -> std::io::Result<()> {
        match cmd {
            Command::Exit => self.terminate(),
            Command::History => {
                let records = self.history.snapshot();
                if records.is_empty() {
                    return self.say("History is empty.");
                }
                self.say("Calculation History:")?;
                for record in &records {
                    self.say(record.as_str())?;
                }
                Ok(())
            }
            Command::Clear => {
                self.history.clear();
                self.say("History Cleared.")
            }
            Command::Undo => match self.history.undo_last() {
                Some(_) => self.say("Last calculation undone."),
                None => self.say("History is already empty."),
            },
            Command::Save => {
                let path = self.config.history_file.clone();
                match self.history.save(&path) {
                    Ok(()) => self.say(format!("History successfully saved to {}.", path.display())),
                    Err(err) => {
                        error!("{}", err);
                        self.say(err.to_string())
                    }
                }
            }
            Command::Load => {
                let path = self.config.history_file.clone();
                match self.history.load(&path) {
                    Ok(count) => self.say(format!(
                        "History successfully loaded from {} ({} records).",
                        path.display(),
                        count
                    )),
                    Err(err) => self.say(err.to_string()),
                }
            }
            Command::Help => self.help(),
        }
    }

    fn terminate(&mut self) -> std::io::Result<()> {
        info!("Exiting calculator");
        self.state = State::Terminated;
        self.say(EXITING)
    }

    fn banner(&mut self) -> std::io::Result<()> {
        self.say("Welcome to the Calculator!")?;
        self.say(format!("Available operations: {}", Operator::canonical_list()))?;
        self.say(format!("Available commands: {}", command_list()))?;
        self.say("Format is <operation> <number1> <number2>")
    }

    fn help(&mut self) -> std::io::Result<()> {
        self.say("History Features: undo, clear, history, save, load.")?;
        self.say(format!("Math Functions: {}.", Operator::canonical_list()))?;
        self.say("Aliases: subtract, multiply, divide, exponent, modulus.")?;
        self.say("Other: help, exit.")
    }

    fn say(&mut self, msg: impl AsRef<str>) -> std::io::Result<()> {
        writeln_ignore_broken_pipe(&mut self.out, msg)
    }
}

fn command_list() -> String {
    Command::ALL
        .iter()
        .map(|cmd| cmd.name())
        .join(", ")
}
