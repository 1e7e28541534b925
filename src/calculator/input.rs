//! Classification of user-typed text for the interactive surfaces.
//!
//! Decides whether a line is a number, an operator token or one of the
//! prompt commands before anything reaches the evaluator.

use lazy_static::lazy_static;
use regex::Regex;

use super::error::{CalcError, CalcResult};
use super::operation::Operation;

lazy_static! {
    /// Matches a plain decimal literal: optional sign, digits with an
    /// optional fraction (or a bare fraction), optional exponent.
    static ref DECIMAL_LITERAL: Regex = Regex::new(
        r"^[+-]?(\d+(\.\d*)?|\.\d+)([eE][+-]?\d+)?$"
    ).unwrap();
}

/// One classified line of user input.
#[derive(Clone, Debug, PartialEq)]
pub enum Input {
    /// Blank line.
    Empty,
    /// A finite decimal number.
    Number(f64),
    /// The `pi` constant typed where a number is expected.
    Pi,
    /// A recognized operation token.
    Operator(Operation),
    /// Discard the pending step.
    Back,
    /// Leave the prompt.
    Exit,
    /// Show usage.
    Help,
    /// Anything else.
    Unknown(String),
}

/// Classify a line of user input.
///
/// Commands are matched case-insensitively. `pi` is reported as [`Input::Pi`]
/// rather than an operator; callers decide which meaning applies.
pub fn classify(text: &str) -> Input {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Input::Empty;
    }

    match trimmed.to_lowercase().as_str() {
        "exit" | "quit" => return Input::Exit,
        "back" => return Input::Back,
        "help" | "?" => return Input::Help,
        "pi" | "π" => return Input::Pi,
        _ => {}
    }

    if let Ok(value) = parse_number(trimmed) {
        return Input::Number(value);
    }

    match trimmed.parse::<Operation>() {
        Ok(op) => Input::Operator(op),
        Err(_) => Input::Unknown(trimmed.to_string()),
    }
}

/// Parse a finite decimal number.
///
/// Words such as `inf` or `nan` are rejected even though `f64::from_str`
/// accepts them.
pub fn parse_number(text: &str) -> CalcResult<f64> {
    let trimmed = text.trim();
    if !DECIMAL_LITERAL.is_match(trimmed) {
        return Err(CalcError::InvalidInput(format!(
            "'{}' is not a valid number",
            trimmed
        )));
    }

    let value: f64 = trimmed
        .parse()
        .map_err(|_| CalcError::InvalidInput(format!("'{}' is not a valid number", trimmed)))?;

    if !value.is_finite() {
        return Err(CalcError::InvalidInput(format!(
            "'{}' is out of range",
            trimmed
        )));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_accepted() {
        assert_eq!(classify("42"), Input::Number(42.0));
        assert_eq!(classify("  42.5 "), Input::Number(42.5));
        assert_eq!(classify("-3"), Input::Number(-3.0));
        assert_eq!(classify("+.5"), Input::Number(0.5));
        assert_eq!(classify("7."), Input::Number(7.0));
        assert_eq!(classify("1e3"), Input::Number(1000.0));
    }

    #[test]
    fn test_operators_and_commands() {
        assert_eq!(classify("+"), Input::Operator(Operation::Add));
        assert_eq!(classify("-"), Input::Operator(Operation::Sub));
        assert_eq!(classify("MOD"), Input::Operator(Operation::Modulo));
        assert_eq!(classify("pi"), Input::Pi);
        assert_eq!(classify("Back"), Input::Back);
        assert_eq!(classify("exit"), Input::Exit);
        assert_eq!(classify("help"), Input::Help);
        assert_eq!(classify("   "), Input::Empty);
    }

    #[test]
    fn test_unknown_input() {
        assert_eq!(classify("sqrt"), Input::Unknown("sqrt".to_string()));
        assert_eq!(classify("2+2"), Input::Unknown("2+2".to_string()));
        assert_eq!(classify("inf"), Input::Unknown("inf".to_string()));
    }

    #[test]
    fn test_parse_number_rejects_non_numbers() {
        for text in ["abc", "", "nan", "inf", "-infinity", "1,000", "1e", "--1"] {
            assert!(
                matches!(parse_number(text), Err(CalcError::InvalidInput(_))),
                "{text:?} should not parse"
            );
        }
        assert!(matches!(
            parse_number("1e400"),
            Err(CalcError::InvalidInput(_))
        ));
    }
}
