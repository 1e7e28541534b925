//! Request and response bodies of the calculator API.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::calculator::input::parse_number;
use crate::calculator::{CalcError, CalcResult, Operation};

/// Body of `POST /api/calculate`.
///
/// Operand fields are kept as raw JSON so that numeric strings are accepted
/// and anything else is reported as invalid input rather than a decode error.
#[derive(Debug, Default, Deserialize)]
pub struct CalculateRequest {
    #[serde(default)]
    pub operation: Option<Value>,
    #[serde(default)]
    pub num1: Option<Value>,
    #[serde(default)]
    pub num2: Option<Value>,
    #[serde(default)]
    pub angle: Option<Value>,
    #[serde(default)]
    pub number: Option<Value>,
    #[serde(default)]
    pub base: Option<Value>,
    #[serde(default)]
    pub exponent: Option<Value>,
}

impl CalculateRequest {
    /// The operation token, if one was given.
    ///
    /// Falsy JSON (`null`, `false`, `0`, blank strings, empty arrays and
    /// objects) counts as missing. Other non-string values are passed through
    /// as their JSON text so they fail as unknown operations.
    pub fn operation_token(&self) -> Option<String> {
        match &self.operation {
            None | Some(Value::Null) | Some(Value::Bool(false)) => None,
            Some(Value::Number(n)) if n.as_f64() == Some(0.0) => None,
            Some(Value::String(s)) if s.trim().is_empty() => None,
            Some(Value::Array(items)) if items.is_empty() => None,
            Some(Value::Object(map)) if map.is_empty() => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => Some(other.to_string()),
        }
    }

    /// Resolve the request into an operation and its operand list.
    ///
    /// Missing operands take the defaults of the web form: `num1`/`num2`
    /// are 0 (the modulo divisor is 1), the logarithm is `log_10(1)`,
    /// power is `0^0`, and the trigonometric angle is 0 with no multiplier.
    pub fn resolve(&self, token: &str) -> CalcResult<(Operation, Vec<f64>)> {
        let operation: Operation = token.parse()?;

        let operands = match operation {
            Operation::Add | Operation::Sub | Operation::Mul | Operation::Div => vec![
                operand("num1", &self.num1)?.unwrap_or(0.0),
                operand("num2", &self.num2)?.unwrap_or(0.0),
            ],
            Operation::Modulo => vec![
                operand("num1", &self.num1)?.unwrap_or(0.0),
                operand("num2", &self.num2)?.unwrap_or(1.0),
            ],
            Operation::Log => vec![
                operand("number", &self.number)?.unwrap_or(1.0),
                operand("base", &self.base)?.unwrap_or(10.0),
            ],
            Operation::Power => vec![
                operand("base", &self.base)?.unwrap_or(0.0),
                operand("exponent", &self.exponent)?.unwrap_or(0.0),
            ],
            Operation::Sin | Operation::Cos | Operation::Tan | Operation::Cot => {
                let angle = operand("angle", &self.angle)?.unwrap_or(0.0);
                match multiplier(&self.num1)? {
                    Some(m) => vec![m, angle],
                    None => vec![angle],
                }
            }
            Operation::Pi => Vec::new(),
        };

        Ok((operation, operands))
    }
}

/// Read an optional numeric field. `null` is treated as absent.
fn operand(name: &str, value: &Option<Value>) -> CalcResult<Option<f64>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_f64()
            .filter(|v| v.is_finite())
            .map(Some)
            .ok_or_else(|| CalcError::InvalidInput(format!("{} is out of range", name))),
        Some(Value::String(s)) => parse_number(s)
            .map(Some)
            .map_err(|e| CalcError::InvalidInput(format!("{}: {}", name, detail(e)))),
        Some(_) => Err(CalcError::InvalidInput(format!("{} must be a number", name))),
    }
}

/// The trigonometric multiplier, where an empty string also means "none".
fn multiplier(value: &Option<Value>) -> CalcResult<Option<f64>> {
    match value {
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        other => operand("num1", other),
    }
}

fn detail(err: CalcError) -> String {
    match err {
        CalcError::InvalidInput(msg) => msg,
        other => other.to_string(),
    }
}

/// Body of every `POST /api/calculate` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculateResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CalculateResponse {
    pub fn success(result: f64, operation: String) -> Self {
        Self {
            success: true,
            result: Some(result),
            operation: Some(operation),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            result: None,
            operation: None,
            error: Some(error.into()),
        }
    }
}

/// Body of `GET /api/health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            service: "Calculator API".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Reasons a calculate request fails.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Body missing, not JSON, or not a non-empty object.
    #[error("No data provided")]
    NoData,

    /// Body has no usable `operation` field.
    #[error("Operation not specified")]
    MissingOperation,

    /// The evaluator (or operand coercion) rejected the input.
    #[error(transparent)]
    Calc(#[from] CalcError),

    /// Anything the caller could not have caused.
    #[error("Server error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NoData | Self::MissingOperation | Self::Calc(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(CalculateResponse::failure(self.to_string()))).into_response()
    }
}
