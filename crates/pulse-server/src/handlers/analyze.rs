//! Spending analysis handler

use axum::{extract::rejection::JsonRejection, Json};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::AppError;
use pulse_core::classify;

/// Analysis response
#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub suggestion: &'static str,
}

/// POST /analyze - Suggest a spending action for `totalSpent`
///
/// A missing or null `totalSpent` counts as 0.
pub async fn analyze_spending(
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let Json(body) = payload.map_err(|e| AppError::bad_request(&e.body_text()))?;
    let total_spent = total_spent_from_body(&body)?;

    let suggestion = classify(total_spent);
    debug!(total_spent, suggestion = suggestion.as_str(), "Classified spending");

    Ok(Json(AnalyzeResponse {
        suggestion: suggestion.message(),
    }))
}

fn total_spent_from_body(body: &Value) -> Result<f64, AppError> {
    let object = body
        .as_object()
        .ok_or_else(|| AppError::bad_request("Request body must be a JSON object"))?;

    match object.get("totalSpent") {
        None | Some(Value::Null) => Ok(0.0),
        Some(value) => value
            .as_f64()
            .ok_or_else(|| AppError::bad_request("totalSpent must be a number")),
    }
}
