//! One-shot evaluation from command-line arguments.

use crate::calculator::input::parse_number;
use crate::calculator::{CalcResult, Operation, describe, evaluate, format_plain};

/// Evaluate `token` over textual `operands` and render `description = result`.
pub fn run_once(token: &str, operands: &[String]) -> CalcResult<String> {
    let operation: Operation = token.parse()?;
    let values = operands
        .iter()
        .map(|arg| parse_number(arg))
        .collect::<CalcResult<Vec<f64>>>()?;

    let result = evaluate(operation, &values)?;
    Ok(format!(
        "{} = {}",
        describe(operation, &values),
        format_plain(result)
    ))
}
