//! HTTP surface of the calculator.
//!
//! Routes:
//! - `GET /` serves the web calculator page
//! - `POST /api/calculate` evaluates one operation
//! - `GET /api/health` reports liveness
//!
//! Handlers call the evaluator inline. No state is shared between requests.

pub mod api;

use anyhow::{Context, Result};
use axum::body::Bytes;
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::Value;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::calculator::{CalcError, describe, evaluate};
use crate::config::ServerConfig;

pub use api::{ApiError, CalculateRequest, CalculateResponse, HealthResponse};

const INDEX_HTML: &str = include_str!("index.html");

/// Build the application router.
pub fn router(config: &ServerConfig) -> Router {
    let router = Router::new()
        .route("/", get(index))
        .route("/api/calculate", post(calculate))
        .route("/api/health", get(health))
        .layer(TraceLayer::new_for_http());

    if config.cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}

/// Bind the configured address and serve until Ctrl-C.
pub async fn serve(config: &ServerConfig) -> Result<()> {
    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;

    let local = listener
        .local_addr()
        .context("Failed to read bound address")?;
    tracing::info!("Calculator API listening on http://{}", local);

    axum::serve(listener, router(config))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server terminated with an error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown requested");
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

async fn calculate(body: Bytes) -> Result<Json<CalculateResponse>, ApiError> {
    let outcome = handle_calculate(&body);
    if let Err(e) = &outcome {
        tracing::warn!(status = %e.status(), "Rejected calculation: {}", e);
    }
    outcome.map(Json)
}

/// Decode, evaluate and describe one calculate request.
fn handle_calculate(body: &[u8]) -> Result<CalculateResponse, ApiError> {
    let data = match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) if !map.is_empty() => Value::Object(map),
        Err(e) if is_number_out_of_range(&e) => {
            let message = format!("number out of range at column {}", e.column());
            return Err(CalcError::InvalidInput(message).into());
        }
        _ => return Err(ApiError::NoData),
    };

    let request: CalculateRequest = serde_json::from_value(data)
        .map_err(|e| ApiError::Internal(format!("failed to decode request: {}", e)))?;
    let token = request
        .operation_token()
        .ok_or(ApiError::MissingOperation)?;

    let (operation, operands) = request.resolve(&token)?;
    let result = evaluate(operation, &operands)?;
    let description = describe(operation, &operands);

    // JSON has no representation for inf/NaN.
    if !result.is_finite() {
        return Err(ApiError::Internal(format!(
            "result of {} is not a finite number",
            description
        )));
    }

    tracing::debug!(%operation, result, "Calculated {}", description);
    Ok(CalculateResponse::success(result, description))
}

/// Whether the body is valid JSON apart from a number that does not fit in an f64.
fn is_number_out_of_range(err: &serde_json::Error) -> bool {
    err.is_syntax() && err.to_string().starts_with("number out of range")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::json;
    use tower::ServiceExt;

    async fn send(request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let app = router(&ServerConfig::default());
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, bytes.to_vec())
    }

    async fn post_raw(body: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri("/api/calculate")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let (status, bytes) = send(request).await;
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn post(body: Value) -> (StatusCode, Value) {
        post_raw(&body.to_string()).await
    }

    fn result_of(data: &Value) -> f64 {
        data["result"].as_f64().unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        let request = Request::builder()
            .uri("/api/health")
            .body(Body::empty())
            .unwrap();
        let (status, bytes) = send(request).await;
        assert_eq!(status, StatusCode::OK);

        let data: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(data["status"], "healthy");
        assert_eq!(data["service"], "Calculator API");
        assert!(data["version"].is_string());
    }

    #[tokio::test]
    async fn test_index_returns_html() {
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();
        let (status, bytes) = send(request).await;
        assert_eq!(status, StatusCode::OK);

        let html = String::from_utf8(bytes).unwrap();
        assert!(html.contains("<!DOCTYPE html>"));
        assert!(html.contains("Scientific Calculator"));
        assert!(html.contains(r#"data-mode="basic""#));
        assert!(html.contains("localStorage"));
        assert!(html.contains(r#"addEventListener("keydown""#));
    }

    #[tokio::test]
    async fn test_basic_operations() {
        let cases = [
            ("+", 5.0, 3.0, 8.0),
            ("-", 10.0, 3.0, 7.0),
            ("*", 5.0, 4.0, 20.0),
            ("/", 10.0, 2.0, 5.0),
            ("mod", 10.0, 3.0, 1.0),
        ];
        for (op, a, b, expected) in cases {
            let (status, data) = post(json!({"operation": op, "num1": a, "num2": b})).await;
            assert_eq!(status, StatusCode::OK, "{op}");
            assert_eq!(data["success"], true);
            assert_eq!(result_of(&data), expected, "{op}");
            assert!(data.get("error").is_none());
        }
    }

    #[tokio::test]
    async fn test_operation_description() {
        let (_, data) = post(json!({"operation": "+", "num1": 5, "num2": 3})).await;
        assert_eq!(data["operation"], "5 + 3");

        let (_, data) = post(json!({"operation": "sin", "num1": 2, "angle": 30})).await;
        assert_eq!(data["operation"], "2 × sin(30°)");
    }

    #[tokio::test]
    async fn test_scientific_operations() {
        let (status, data) = post(json!({"operation": "sin", "angle": 30})).await;
        assert_eq!(status, StatusCode::OK);
        assert!((result_of(&data) - 0.5).abs() < 1e-10);

        let (_, data) = post(json!({"operation": "cos", "angle": 60})).await;
        assert!((result_of(&data) - 0.5).abs() < 1e-10);

        let (_, data) = post(json!({"operation": "tan", "angle": 45})).await;
        assert!((result_of(&data) - 1.0).abs() < 1e-10);

        let (_, data) = post(json!({"operation": "log", "number": 100, "base": 10})).await;
        assert!((result_of(&data) - 2.0).abs() < 1e-10);

        let (_, data) = post(json!({"operation": "power", "base": 2, "exponent": 8})).await;
        assert_eq!(result_of(&data), 256.0);

        let (_, data) = post(json!({"operation": "pi"})).await;
        assert!((result_of(&data) - 3.14159265358979).abs() < 1e-10);
        assert_eq!(data["operation"], "π");
    }

    #[tokio::test]
    async fn test_numeric_strings_accepted() {
        let (status, data) = post(json!({"operation": "+", "num1": "2.5", "num2": " 4 "})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(result_of(&data), 6.5);
    }

    #[tokio::test]
    async fn test_evaluator_errors_are_bad_requests() {
        let bodies = [
            json!({"operation": "/", "num1": 10, "num2": 0}),
            json!({"operation": "mod", "num1": 10, "num2": 0}),
            json!({"operation": "log", "number": -1, "base": 10}),
            json!({"operation": "cot", "angle": 0}),
            json!({"operation": "power", "base": 10, "exponent": 400}),
            json!({"operation": "invalid", "num1": 5, "num2": 3}),
            json!({"operation": "+", "num1": "abc", "num2": 3}),
        ];
        for body in bodies {
            let (status, data) = post(body.clone()).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
            assert_eq!(data["success"], false);
            assert!(data["error"].is_string());
            assert!(data.get("result").is_none());
        }
    }

    #[tokio::test]
    async fn test_error_messages() {
        let (_, data) = post(json!({"operation": "/", "num1": 10, "num2": 0})).await;
        assert_eq!(data["error"], "Division by zero");

        let (_, data) = post(json!({"operation": "sqrt", "num1": 4})).await;
        assert_eq!(data["error"], "Unknown operation: sqrt");
    }

    #[tokio::test]
    async fn test_no_data() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/calculate")
            .body(Body::empty())
            .unwrap();
        let (status, bytes) = send(request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let data: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(data["success"], false);
        assert_eq!(data["error"], "No data provided");

        for body in ["{not json", "{}", "[1, 2]", "42"] {
            let (status, data) = post_raw(body).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
            assert_eq!(data["error"], "No data provided");
        }
    }

    #[tokio::test]
    async fn test_no_operation() {
        let (status, data) = post(json!({"num1": 5, "num2": 3})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(data["success"], false);
        assert_eq!(data["error"], "Operation not specified");

        for operation in ["false", "0", "[]", "{}", "\"\""] {
            let body = format!(r#"{{"operation": {operation}, "num1": 5, "num2": 3}}"#);
            let (status, data) = post_raw(&body).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
            assert_eq!(data["error"], "Operation not specified", "{body}");
        }
    }

    #[tokio::test]
    async fn test_number_out_of_range_is_invalid_input() {
        let (status, data) = post_raw(r#"{"operation": "+", "num1": 1e400, "num2": 1}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(data["success"], false);
        let error = data["error"].as_str().unwrap();
        assert!(error.starts_with("Invalid input: number out of range"), "{error}");
    }

    #[tokio::test]
    async fn test_unrepresentable_result_is_server_error() {
        let (status, data) = post(json!({"operation": "*", "num1": 1e308, "num2": 10})).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(data["success"], false);
        assert!(data["error"].as_str().unwrap().starts_with("Server error:"));
    }
}
