// operations.rs

use std::fmt;

use itertools::Itertools;

use crate::error::CalcError;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Exponent,
    Modulus,
}

/// Accepted spellings, canonical short form first for each operator.
const SPELLINGS: &[(&str, Operator)] = &[
    ("add", Operator::Add),
    ("sub", Operator::Subtract),
    ("subtract", Operator::Subtract),
    ("multi", Operator::Multiply),
    ("multiply", Operator::Multiply),
    ("div", Operator::Divide),
    ("divide", Operator::Divide),
    ("expo", Operator::Exponent),
    ("exponent", Operator::Exponent),
    ("mod", Operator::Modulus),
    ("modulus", Operator::Modulus),
];

impl Operator {
    pub const ALL: [Operator; 6] = [
        Operator::Add,
        Operator::Subtract,
        Operator::Multiply,
        Operator::Divide,
        Operator::Exponent,
        Operator::Modulus,
    ];

    /// Case-sensitive lookup of an operator spelling.
    pub fn lookup(name: &str) -> Option<Operator> {
        SPELLINGS
            .iter()
            .find(|(spelling, _)| *spelling == name)
            .map(|(_, op)| *op)
    }

    pub fn name(self) -> &'static str {
        match self {
            Operator::Add => "add",
            Operator::Subtract => "sub",
            Operator::Multiply => "multi",
            Operator::Divide => "div",
            Operator::Exponent => "expo",
            Operator::Modulus => "mod",
        }
    }

    /// Every accepted spelling, aliases included.
    pub fn spellings() -> impl Iterator<Item = &'static str> {
        SPELLINGS.iter().map(|(spelling, _)| *spelling)
    }

    /// `"add, sub, multi, div, expo, mod"`
    pub fn canonical_list() -> String {
        Operator::ALL.iter().map(|op| op.name()).join(", ")
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Stateless arithmetic evaluator consumed by the REPL.
pub trait Calculator {
    fn apply(&self, op: Operator, a: f64, b: f64) -> Result<f64, CalcError>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Arithmetic;

impl Calculator for Arithmetic {
    fn apply(&self, op: Operator, a: f64, b: f64) -> Result<f64, CalcError> {
        match op {
            Operator::Add => Ok(a + b),
            Operator::Subtract => Ok(a - b),
            Operator::Multiply => Ok(a * b),
            Operator::Divide => {
                if b == 0.0 {
                    return Err(CalcError::DivisionByZero);
                }
                Ok(a / b)
            }
            Operator::Exponent => Ok(a.powf(b)),
            Operator::Modulus => {
                if b == 0.0 {
                    return Err(CalcError::DivisionByZero);
                }
                Ok(floored_mod(a, b))
            }
        }
    }
}

// Remainder takes the sign of the divisor.
fn floored_mod(a: f64, b: f64) -> f64 {
    let r = a % b;
    if r != 0.0 && (r < 0.0) != (b < 0.0) {
        r + b
    } else {
        r
    }
}
