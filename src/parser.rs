// parser.rs

use crate::operations::Operator;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Command {
    Exit,
    History,
    Clear,
    Undo,
    Save,
    Load,
    Help,
}

impl Command {
    pub const ALL: [Command; 7] = [
        Command::Exit,
        Command::History,
        Command::Clear,
        Command::Undo,
        Command::Save,
        Command::Load,
        Command::Help,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Command::Exit => "exit",
            Command::History => "history",
            Command::Clear => "clear",
            Command::Undo => "undo",
            Command::Save => "save",
            Command::Load => "load",
            Command::Help => "help",
        }
    }

    /// Matches the whole (trimmed) line against a command name, ignoring case.
    pub fn parse(line: &str) -> Option<Command> {
        let word = line.trim();
        Command::ALL
            .into_iter()
            .find(|cmd| cmd.name().eq_ignore_ascii_case(word))
    }
}

/// What a single input line asks the REPL to do.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Input<'a> {
    Empty,
    Command(Command),
    Calculation {
        op: Operator,
        spelling: &'a str,
        a: f64,
        b: f64,
    },
    UnknownOperator(&'a str),
    InvalidFormat,
}

/// Classifies a line; the first matching rule wins:
/// blank, reserved command, `<op> <num1> <num2>` shape, known operator.
pub fn classify(line: &str) -> Input<'_> {
    if line.trim().is_empty() {
        return Input::Empty;
    }
    if let Some(cmd) = Command::parse(line) {
        return Input::Command(cmd);
    }
    match line.split_whitespace().collect::<Vec<&str>>().as_slice() {
        &[spelling, a, b] => {
            let (Ok(a), Ok(b)) = (a.parse::<f64>(), b.parse::<f64>()) else {
                return Input::InvalidFormat;
            };
            match Operator::lookup(spelling) {
                Some(op) => Input::Calculation {
                    op,
                    spelling,
                    a,
                    b,
                },
                None => Input::UnknownOperator(spelling),
            }
        }
        _ => Input::InvalidFormat,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_lines_are_empty() {
        assert_eq!(classify(""), Input::Empty);
        assert_eq!(classify("   \t "), Input::Empty);
    }

    #[test]
    fn commands_ignore_case_and_padding() {
        assert_eq!(classify("EXIT"), Input::Command(Command::Exit));
        assert_eq!(classify("eXiT"), Input::Command(Command::Exit));
        assert_eq!(classify("  history "), Input::Command(Command::History));
        assert_eq!(classify("Undo"), Input::Command(Command::Undo));
    }

    #[test]
    fn commands_take_no_arguments() {
        assert_eq!(classify("save other.csv"), Input::InvalidFormat);
    }

    #[test]
    fn calculation_keeps_typed_spelling() {
        assert_eq!(
            classify("subtract 5 1"),
            Input::Calculation {
                op: Operator::Subtract,
                spelling: "subtract",
                a: 5.0,
                b: 1.0,
            }
        );
        assert_eq!(
            classify("  add   -2.5\t3e2 "),
            Input::Calculation {
                op: Operator::Add,
                spelling: "add",
                a: -2.5,
                b: 300.0,
            }
        );
    }

    #[test]
    fn wrong_token_count_is_invalid() {
        assert_eq!(classify("add 2"), Input::InvalidFormat);
        assert_eq!(classify("add 2 3 4"), Input::InvalidFormat);
        assert_eq!(classify("unknown_command"), Input::InvalidFormat);
    }

    #[test]
    fn non_numeric_operand_is_invalid() {
        assert_eq!(classify("add two three"), Input::InvalidFormat);
        assert_eq!(classify("ad two 3"), Input::InvalidFormat);
    }

    #[test]
    fn unknown_operator_after_valid_numbers() {
        assert_eq!(classify("ad 2 3"), Input::UnknownOperator("ad"));
        assert_eq!(classify("ADD 2 3"), Input::UnknownOperator("ADD"));
    }
}
