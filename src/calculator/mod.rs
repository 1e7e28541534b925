//! Calculator core.
//!
//! This module provides functionality to:
//! - Name the supported operations as a closed enum
//! - Evaluate an operation over its operands, returning structured errors
//! - Describe and format results for display
//! - Classify user-typed text for the interactive surfaces

mod error;
mod evaluation;
mod format;
pub mod input;
mod operation;

pub use error::{CalcError, CalcResult};
pub use evaluation::{
    divide, evaluate, evaluate_token, logarithm, modulo, power, trigonometric,
};
pub use format::{describe, format_display, format_plain};
pub use operation::Operation;
