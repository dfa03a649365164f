//! Server API tests

use super::*;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use std::collections::HashMap;
use tower::ServiceExt;

fn setup_test_app() -> Router {
    create_router(&ServerConfig::default())
}

async fn get_body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body();
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn analyze_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/analyze")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn analyze(body: &str) -> (StatusCode, serde_json::Value) {
    let response = setup_test_app()
        .oneshot(analyze_request(body))
        .await
        .unwrap();
    let status = response.status();
    (status, get_body_json(response).await)
}

// ========== /analyze Tests ==========

#[tokio::test]
async fn test_analyze_high_spending() {
    let (status, json) = analyze(r#"{"totalSpent": 75}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json,
        serde_json::json!({
            "suggestion": "You've spent a lot of WPU recently—consider saving some!"
        })
    );
}

#[tokio::test]
async fn test_analyze_rising_spending() {
    let (status, json) = analyze(r#"{"totalSpent": 30}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json["suggestion"],
        "Your spending is increasing—keep an eye on your budget!"
    );
}

#[tokio::test]
async fn test_analyze_missing_total_defaults_to_zero() {
    let (status, json) = analyze("{}").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["suggestion"], "Your spending looks good—keep it up!");
}

#[tokio::test]
async fn test_analyze_null_total_defaults_to_zero() {
    let (status, json) = analyze(r#"{"totalSpent": null}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["suggestion"], "Your spending looks good—keep it up!");
}

#[tokio::test]
async fn test_analyze_boundaries() {
    let (_, at_high) = analyze(r#"{"totalSpent": 50}"#).await;
    assert_eq!(
        at_high["suggestion"],
        "Your spending is increasing—keep an eye on your budget!"
    );

    let (_, at_rising) = analyze(r#"{"totalSpent": 20.0}"#).await;
    assert_eq!(at_rising["suggestion"], "Your spending looks good—keep it up!");
}

#[tokio::test]
async fn test_analyze_negative_total() {
    let (status, json) = analyze(r#"{"totalSpent": -12.5}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["suggestion"], "Your spending looks good—keep it up!");
}

#[tokio::test]
async fn test_analyze_ignores_unknown_fields() {
    let (status, json) = analyze(r#"{"totalSpent": 21, "account": "0xabc"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json["suggestion"],
        "Your spending is increasing—keep an eye on your budget!"
    );
}

#[tokio::test]
async fn test_analyze_non_numeric_total() {
    let (status, json) = analyze(r#"{"totalSpent": "lots"}"#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "totalSpent must be a number");
}

#[tokio::test]
async fn test_analyze_non_object_body() {
    let (status, json) = analyze("[75]").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Request body must be a JSON object");
}

#[tokio::test]
async fn test_analyze_invalid_json() {
    let (status, json) = analyze("{not json").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn test_analyze_requires_json_content_type() {
    let app = setup_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/analyze")
                .body(Body::from(r#"{"totalSpent": 75}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = get_body_json(response).await;
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn test_analyze_rejects_get() {
    let app = setup_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/analyze")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

// ========== Middleware Tests ==========

#[tokio::test]
async fn test_nosniff_header() {
    let response = setup_test_app()
        .oneshot(analyze_request("{}"))
        .await
        .unwrap();

    assert_eq!(
        response.headers().get("x-content-type-options").unwrap(),
        "nosniff"
    );
}

#[tokio::test]
async fn test_cors_allows_any_origin_by_default() {
    let response = setup_test_app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/analyze")
                .header("origin", "http://localhost:8080")
                .header("content-type", "application/json")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .unwrap(),
        "*"
    );
}

#[tokio::test]
async fn test_cors_preflight() {
    let response = setup_test_app()
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/analyze")
                .header("origin", "http://localhost:8080")
                .header("access-control-request-method", "POST")
                .header("access-control-request-headers", "content-type")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let methods = response
        .headers()
        .get("access-control-allow-methods")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(methods.contains("POST"));
}

#[tokio::test]
async fn test_cors_origin_list() {
    let config = ServerConfig {
        allowed_origins: vec!["http://wallet.local".to_string()],
        ..Default::default()
    };
    let app = create_router(&config);

    let allowed = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/analyze")
                .header("origin", "http://wallet.local")
                .header("content-type", "application/json")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(
        allowed
            .headers()
            .get("access-control-allow-origin")
            .unwrap(),
        "http://wallet.local"
    );

    let other = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/analyze")
                .header("origin", "http://evil.example")
                .header("content-type", "application/json")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert!(other.headers().get("access-control-allow-origin").is_none());
}

// ========== Error Response Tests ==========

#[tokio::test]
async fn test_internal_error_is_generic_500() {
    let err: AppError = anyhow::anyhow!("ledger unavailable").into();
    let response = err.into_response();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = get_body_json(response).await;
    assert_eq!(json["error"], "An internal error occurred");
}

#[tokio::test]
async fn test_io_error_converts_to_500() {
    let io = std::io::Error::new(std::io::ErrorKind::Other, "disk gone");
    let response = AppError::from(io).into_response();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_bad_request_keeps_message() {
    let response = AppError::bad_request("totalSpent must be a number").into_response();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = get_body_json(response).await;
    assert_eq!(json["error"], "totalSpent must be a number");
}

// ========== Config Tests ==========

fn config_from(vars: &[(&str, &str)]) -> ServerConfig {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    ServerConfig::from_vars(|key| vars.get(key).cloned())
}

#[test]
fn test_config_defaults() {
    let config = config_from(&[]);
    assert_eq!(config, ServerConfig::default());
    assert_eq!(config.port, 5000);
    assert_eq!(config.host, "0.0.0.0");
    assert_eq!(config.allowed_origins, vec!["*".to_string()]);
}

#[test]
fn test_config_from_vars() {
    let config = config_from(&[
        ("PORT", "8081"),
        ("PULSE_HOST", "127.0.0.1"),
        (
            "PULSE_ALLOWED_ORIGINS",
            "http://a.local, http://b.local,",
        ),
    ]);
    assert_eq!(config.port, 8081);
    assert_eq!(config.host, "127.0.0.1");
    assert_eq!(
        config.allowed_origins,
        vec!["http://a.local".to_string(), "http://b.local".to_string()]
    );
}

#[test]
fn test_config_invalid_port_falls_back() {
    assert_eq!(config_from(&[("PORT", "not-a-port")]).port, DEFAULT_PORT);
    assert_eq!(config_from(&[("PORT", "70000")]).port, DEFAULT_PORT);
}

#[test]
fn test_config_empty_origins_is_same_origin() {
    let config = config_from(&[("PULSE_ALLOWED_ORIGINS", "")]);
    assert!(config.allowed_origins.is_empty());
}

#[test]
fn test_parse_origins() {
    assert_eq!(parse_origins("*"), vec!["*".to_string()]);
    assert!(parse_origins(" , ").is_empty());
}
