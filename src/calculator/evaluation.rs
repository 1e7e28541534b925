//! Operation evaluation.
//!
//! Every function here is pure: no logging, no printing, no shared state.
//! Floating-point faults are turned into [`CalcError`] values before they
//! can escape as `inf` or `NaN`.

use std::f64::consts::PI;

use super::error::{CalcError, CalcResult};
use super::operation::Operation;

/// Evaluate `operation` over `operands`.
///
/// Operand layout per operation:
/// - `Add`, `Sub`, `Mul`, `Div`, `Modulo`: `[a, b]`
/// - `Log`: `[number, base]`
/// - `Power`: `[base, exponent]`
/// - `Sin`, `Cos`, `Tan`, `Cot`: `[angle]` or `[multiplier, angle]`, angle in degrees
/// - `Pi`: `[]`
pub fn evaluate(operation: Operation, operands: &[f64]) -> CalcResult<f64> {
    check_arity(operation, operands)?;

    match (operation, operands) {
        (Operation::Add, &[a, b]) => Ok(a + b),
        (Operation::Sub, &[a, b]) => Ok(a - b),
        (Operation::Mul, &[a, b]) => Ok(a * b),
        (Operation::Div, &[a, b]) => divide(a, b),
        (Operation::Modulo, &[a, b]) => modulo(a, b),
        (Operation::Power, &[base, exponent]) => power(base, exponent),
        (Operation::Log, &[number, base]) => logarithm(number, base),
        (Operation::Pi, &[]) => Ok(PI),
        (trig, &[angle]) if trig.is_trigonometric() => trigonometric(trig, None, angle),
        (trig, &[multiplier, angle]) if trig.is_trigonometric() => {
            trigonometric(trig, Some(multiplier), angle)
        }
        (op, _) => Err(arity_error(op, operands.len())),
    }
}

/// Parse `token` into an [`Operation`] and evaluate it.
///
/// An unrecognized token fails with [`CalcError::UnknownOperation`].
pub fn evaluate_token(token: &str, operands: &[f64]) -> CalcResult<f64> {
    let operation: Operation = token.parse()?;
    evaluate(operation, operands)
}

fn check_arity(operation: Operation, operands: &[f64]) -> CalcResult<()> {
    if operation.arity().contains(&operands.len()) {
        Ok(())
    } else {
        Err(arity_error(operation, operands.len()))
    }
}

fn arity_error(operation: Operation, got: usize) -> CalcError {
    let arity = operation.arity();
    let expected = if arity.start() == arity.end() {
        arity.start().to_string()
    } else {
        format!("{} or {}", arity.start(), arity.end())
    };
    CalcError::InvalidInput(format!(
        "{} expects {} operand(s), got {}",
        operation, expected, got
    ))
}

/// Divide `a` by `b`.
pub fn divide(a: f64, b: f64) -> CalcResult<f64> {
    if b == 0.0 {
        return Err(CalcError::DivisionByZero);
    }
    Ok(a / b)
}

/// Floating-point remainder of `a / b`; the sign follows the dividend.
pub fn modulo(a: f64, b: f64) -> CalcResult<f64> {
    if b == 0.0 {
        return Err(CalcError::ModuloByZero);
    }
    Ok(a % b)
}

/// Raise `base` to `exponent`.
pub fn power(base: f64, exponent: f64) -> CalcResult<f64> {
    let result = base.powf(exponent);
    if !result.is_finite() {
        return Err(CalcError::Overflow);
    }
    Ok(result)
}

/// Logarithm of `number` in `base`.
pub fn logarithm(number: f64, base: f64) -> CalcResult<f64> {
    if number <= 0.0 {
        return Err(CalcError::DomainError(
            "Logarithm requires positive number".to_string(),
        ));
    }
    if base <= 0.0 || base == 1.0 {
        return Err(CalcError::DomainError(
            "Logarithm base must be positive and not equal to 1".to_string(),
        ));
    }
    Ok(number.ln() / base.ln())
}

/// `multiplier × f(angle)` with `angle` in degrees.
///
/// A missing multiplier is the identity.
pub fn trigonometric(operation: Operation, multiplier: Option<f64>, angle: f64) -> CalcResult<f64> {
    let radians = angle.to_radians();
    let value = match operation {
        Operation::Sin => radians.sin(),
        Operation::Cos => radians.cos(),
        Operation::Tan => radians.tan(),
        Operation::Cot => {
            let tan = radians.tan();
            if tan == 0.0 {
                return Err(CalcError::DomainError(format!(
                    "Trigonometric calculation error: cotangent is undefined at {}°",
                    angle
                )));
            }
            1.0 / tan
        }
        other => {
            return Err(CalcError::InvalidInput(format!(
                "{} is not a trigonometric operation",
                other
            )));
        }
    };
    Ok(multiplier.unwrap_or(1.0) * value)
}
