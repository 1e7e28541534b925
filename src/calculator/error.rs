//! Error kinds returned by the evaluator.

use thiserror::Error;

/// Result type for calculator operations.
pub type CalcResult<T> = Result<T, CalcError>;

/// Errors that can occur while evaluating an operation.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum CalcError {
    /// The operation token is not one of the recognized operations.
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    /// Division with a divisor of exactly zero.
    #[error("Division by zero")]
    DivisionByZero,

    /// Modulo with a divisor of exactly zero.
    #[error("Modulo by zero")]
    ModuloByZero,

    /// An operand lies outside the valid input range of the operation.
    ///
    /// The message is shown as is.
    #[error("{0}")]
    DomainError(String),

    /// The result of a power computation is not a finite number.
    #[error("Power calculation error: result is not a finite number")]
    Overflow,

    /// A value that should be a number could not be read as one.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
