// completion.rs

use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::{ValidationContext, ValidationResult, Validator};
use rustyline::{Context, Helper};

use crate::operations::Operator;
use crate::parser::Command;

/// Completes the first word of a line with a command name or operator spelling.
#[derive(Default)]
pub struct CalcCompleter;

impl CalcCompleter {
    pub fn new() -> Self {
        Self
    }

    pub fn candidates(prefix: &str) -> Vec<String> {
        let mut names: Vec<String> = Command::ALL
            .iter()
            .map(|cmd| cmd.name())
            .chain(Operator::spellings())
            .filter(|name| name.starts_with(prefix))
            .map(str::to_string)
            .collect();
        names.sort();
        names.dedup();
        names
    }
}

impl Completer for CalcCompleter {
    type Candidate = Pair;
    fn complete(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Result<(usize, Vec<Pair>), ReadlineError> {
        let prefix = &line[..pos];
        // Only the leading word is completed; operands are free-form numbers.
        if prefix.chars().any(char::is_whitespace) {
            return Ok((pos, Vec::new()));
        }
        let completions = Self::candidates(prefix)
            .into_iter()
            .map(|n| Pair {
                display: n.clone(),
                replacement: format!("{} ", n),
            })
            .collect();
        Ok((0, completions))
    }
}

impl Hinter for CalcCompleter {
    type Hint = String;
    fn hint(&self, _line: &str, _pos: usize, _ctx: &Context<'_>) -> Option<String> {
        None
    }
}

impl Highlighter for CalcCompleter {}

impl Validator for CalcCompleter {
    fn validate(&self, _ctx: &mut ValidationContext) -> Result<ValidationResult, ReadlineError> {
        Ok(ValidationResult::Valid(None))
    }
}

impl Helper for CalcCompleter {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_matches_commands_and_operators() {
        assert_eq!(CalcCompleter::candidates("su"), vec!["sub", "subtract"]);
        assert_eq!(CalcCompleter::candidates("h"), vec!["help", "history"]);
        assert_eq!(CalcCompleter::candidates("e"), vec!["exit", "expo", "exponent"]);
    }

    #[test]
    fn empty_prefix_lists_everything() {
        let all = CalcCompleter::candidates("");
        assert!(all.contains(&"load".to_string()));
        assert!(all.contains(&"modulus".to_string()));
    }
}
