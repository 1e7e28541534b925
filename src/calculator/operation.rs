//! The closed set of operations the calculator understands.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use super::error::CalcError;

/// A single discrete calculator operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    Add,
    Sub,
    Mul,
    Div,
    Sin,
    Cos,
    Tan,
    Cot,
    Log,
    Power,
    Modulo,
    Pi,
}

impl Operation {
    /// Every operation, in display order.
    pub const ALL: [Operation; 12] = [
        Self::Add,
        Self::Sub,
        Self::Mul,
        Self::Div,
        Self::Sin,
        Self::Cos,
        Self::Tan,
        Self::Cot,
        Self::Log,
        Self::Power,
        Self::Modulo,
        Self::Pi,
    ];

    /// The canonical token for this operation.
    pub fn token(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Cot => "cot",
            Self::Log => "log",
            Self::Power => "power",
            Self::Modulo => "mod",
            Self::Pi => "pi",
        }
    }

    /// How many operands the operation accepts.
    ///
    /// Trigonometric operations take an angle and an optional multiplier.
    pub fn arity(self) -> RangeInclusive<usize> {
        match self {
            Self::Pi => 0..=0,
            Self::Sin | Self::Cos | Self::Tan | Self::Cot => 1..=2,
            Self::Add
            | Self::Sub
            | Self::Mul
            | Self::Div
            | Self::Log
            | Self::Power
            | Self::Modulo => 2..=2,
        }
    }

    /// Check if this is one of the angle-based operations.
    pub fn is_trigonometric(self) -> bool {
        matches!(self, Self::Sin | Self::Cos | Self::Tan | Self::Cot)
    }
}

impl FromStr for Operation {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        let op = match token.to_lowercase().as_str() {
            "+" | "add" => Self::Add,
            "-" | "sub" | "subtract" => Self::Sub,
            "*" | "x" | "×" | "mul" | "multiply" => Self::Mul,
            "/" | "÷" | "div" | "divide" => Self::Div,
            "sin" => Self::Sin,
            "cos" => Self::Cos,
            "tan" => Self::Tan,
            "cot" => Self::Cot,
            "log" => Self::Log,
            "power" | "pow" | "^" => Self::Power,
            "mod" | "modulo" | "%" => Self::Modulo,
            "pi" | "π" => Self::Pi,
            _ => return Err(CalcError::UnknownOperation(token.to_string())),
        };
        Ok(op)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}
