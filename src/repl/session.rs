//! The interactive session state and line processing.
//!
//! The accumulator lives in a [`Session`] owned by the caller and is passed
//! into every call of [`process_line`]. Nothing here touches the terminal.

use crate::calculator::input::{Input, classify};
use crate::calculator::{CalcError, Operation, describe, evaluate, format_display};

/// Where the session is in the number → operator → operand cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Session {
    /// No current value yet.
    #[default]
    AwaitingNumber,
    /// A current value is held; the next line names an operator.
    Ready { current: f64 },
    /// An operator was chosen and needs its second value.
    AwaitingOperand { current: f64, operation: Operation },
    /// A trigonometric or logarithm operation was chosen before any value.
    ///
    /// Trig waits for the angle. Log waits for the number, then the base.
    AwaitingFirstOperand { operation: Operation, number: Option<f64> },
}

/// Result of processing one line.
#[derive(Debug, PartialEq)]
pub enum Step {
    /// Keep prompting, printing the output if any.
    Continue(Option<String>),
    /// Leave the prompt.
    Exit,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// The accumulator, if one is held.
    pub fn current(&self) -> Option<f64> {
        match *self {
            Self::AwaitingNumber | Self::AwaitingFirstOperand { .. } => None,
            Self::Ready { current } | Self::AwaitingOperand { current, .. } => Some(current),
        }
    }

    /// Short label for what the next line should contain.
    pub fn expecting(&self) -> &'static str {
        match self {
            Self::AwaitingNumber => "number",
            Self::Ready { .. } => "operator",
            Self::AwaitingOperand { operation, .. } => match operation {
                Operation::Log => "base",
                op if op.is_trigonometric() => "angle in degrees",
                _ => "another number",
            },
            Self::AwaitingFirstOperand { operation, number } => match (operation, number) {
                (Operation::Log, None) => "number",
                (Operation::Log, Some(_)) => "base",
                _ => "angle in degrees",
            },
        }
    }
}

/// Process a single line of input against the session.
///
/// Evaluator errors are reported in the returned output and leave the
/// previous accumulator in place.
pub fn process_line(session: &mut Session, line: &str) -> Step {
    let input = classify(line);

    match input {
        Input::Empty => return Step::Continue(None),
        Input::Exit => return Step::Exit,
        Input::Help => return Step::Continue(Some(HELP_TEXT.to_string())),
        _ => {}
    }

    let state = *session;
    let output = match state {
        Session::AwaitingNumber => match input {
            Input::Number(value) => start_with(session, value),
            Input::Pi => start_with(session, std::f64::consts::PI),
            Input::Back => "Nothing to discard. Enter a number.".to_string(),
            Input::Operator(operation) if starts_without_value(operation) => {
                *session = Session::AwaitingFirstOperand {
                    operation,
                    number: None,
                };
                return Step::Continue(None);
            }
            _ => error_line(&CalcError::InvalidInput(
                "enter a number, 'pi', 'log', a trigonometric function, or 'exit'".to_string(),
            )),
        },

        Session::Ready { current } => match input {
            Input::Back => {
                *session = Session::AwaitingNumber;
                "Value discarded. Enter a number.".to_string()
            }
            Input::Pi | Input::Operator(Operation::Pi) => {
                apply(session, Session::Ready { current }, Operation::Pi, &[])
            }
            Input::Operator(operation) => {
                *session = Session::AwaitingOperand { current, operation };
                return Step::Continue(None);
            }
            _ => error_line(&CalcError::UnknownOperation(line.trim().to_string())),
        },

        Session::AwaitingOperand { current, operation } => match input {
            Input::Back => {
                *session = Session::Ready { current };
                format!("Operation discarded. Current value: {}", format_display(current))
            }
            Input::Number(value) => apply(
                session,
                Session::Ready { current },
                operation,
                &[current, value],
            ),
            Input::Pi => apply(
                session,
                Session::Ready { current },
                operation,
                &[current, std::f64::consts::PI],
            ),
            _ => error_line(&CalcError::InvalidInput(format!(
                "expected {}, or 'back'",
                session.expecting()
            ))),
        },

        Session::AwaitingFirstOperand { operation, number } => {
            let value = match input {
                Input::Number(value) => value,
                Input::Pi => std::f64::consts::PI,
                Input::Back => {
                    *session = Session::AwaitingNumber;
                    return Step::Continue(Some(
                        "Operation discarded. Enter a number.".to_string(),
                    ));
                }
                _ => {
                    return Step::Continue(Some(error_line(&CalcError::InvalidInput(format!(
                        "expected {}, or 'back'",
                        session.expecting()
                    )))));
                }
            };

            match (operation, number) {
                (Operation::Log, None) => {
                    *session = Session::AwaitingFirstOperand {
                        operation,
                        number: Some(value),
                    };
                    return Step::Continue(None);
                }
                (Operation::Log, Some(number)) => {
                    apply(session, Session::AwaitingNumber, operation, &[number, value])
                }
                _ => apply(session, Session::AwaitingNumber, operation, &[value]),
            }
        }
    };

    Step::Continue(Some(output))
}

/// Operations that can open a session before any value is entered.
fn starts_without_value(operation: Operation) -> bool {
    operation == Operation::Log || operation.is_trigonometric()
}

fn start_with(session: &mut Session, value: f64) -> String {
    *session = Session::Ready { current: value };
    format!("Current value: {}", format_display(value))
}

/// Evaluate and move the session to `Ready` with the result, or to `fallback` on failure.
fn apply(
    session: &mut Session,
    fallback: Session,
    operation: Operation,
    operands: &[f64],
) -> String {
    match evaluate(operation, operands) {
        Ok(result) => {
            *session = Session::Ready { current: result };
            format!("{} = {}", describe(operation, operands), format_display(result))
        }
        Err(e) => {
            *session = fallback;
            error_line(&e)
        }
    }
}

fn error_line(err: &CalcError) -> String {
    format!("Error: {}", err)
}

const HELP_TEXT: &str = r#"scicalc interactive mode

Enter a number (or pi) to start, then an operator. Operators that need a
second value ask for it; the result becomes the new current value.
You can also start with log (asks for number and base) or a trigonometric
function (asks for the angle).

Operators:
  +  -  *  /         Basic arithmetic with another number
  mod                Remainder (sign follows the current value)
  power              Current value raised to an exponent
  log                Logarithm of the current value in a given base
  sin cos tan cot    Current value × f(angle), angle in degrees
  pi                 Replace the current value with π

Commands:
  back               Discard the pending operator, or the current value
  help               Show this help
  exit               Quit
"#;
