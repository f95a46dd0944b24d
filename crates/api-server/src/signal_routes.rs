//! Signal Routes
//!
//! Signal generation, configuration echo and ticker validation endpoints.

use analysis_core::RecordStatus;
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;

use crate::{method_not_allowed, AppError, AppState};

/// Calendar days fetched when checking that a ticker exists
const VALIDATE_LOOKBACK_DAYS: i64 = 5;

#[cfg(test)]
#[path = "signal_routes_tests.rs"]
mod signal_routes_tests;

/// Validated body of `POST /api/signal`
#[derive(Debug, Clone, PartialEq)]
pub struct SignalRequest {
    pub ticker: String,
    pub texts: Vec<String>,
}

#[derive(Serialize)]
pub struct ConfigResponse {
    pub sentiment_threshold: f64,
    pub rsi_buy_threshold: f64,
    pub rsi_period: usize,
    pub service_version: String,
}

#[derive(Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub ticker: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

pub fn signal_routes() -> Router<AppState> {
    Router::new()
        .route("/api/signal", post(generate_signal).fallback(method_not_allowed))
        .route("/api/config", get(get_config).fallback(method_not_allowed))
        .route("/api/validate/:ticker", get(validate_ticker).fallback(method_not_allowed))
}

/// Check the shape of a signal request. `reddit_posts` is accepted in place
/// of `texts`.
pub fn validate_request_payload(payload: &Value) -> Result<SignalRequest, String> {
    let obj = match payload {
        Value::Null => return Err("Request body is empty".to_string()),
        Value::Object(map) if map.is_empty() => return Err("Request body is empty".to_string()),
        Value::Object(map) => map,
        _ => return Err("Request body must be a JSON object".to_string()),
    };

    let ticker = match obj.get("ticker") {
        None => return Err("Missing required field: ticker".to_string()),
        Some(Value::String(s)) => s.trim(),
        Some(_) => return Err("ticker must be a string".to_string()),
    };

    let texts = match obj.get("texts").or_else(|| obj.get("reddit_posts")) {
        None => return Err("Missing required field: texts".to_string()),
        Some(Value::Array(items)) => items,
        Some(_) => return Err("texts must be a list".to_string()),
    };

    if ticker.is_empty() {
        return Err("ticker cannot be empty".to_string());
    }

    let texts = texts
        .iter()
        .map(|item| item.as_str().map(str::to_string))
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| "texts must be a list of strings".to_string())?;

    Ok(SignalRequest {
        ticker: ticker.to_uppercase(),
        texts,
    })
}

fn status_code_for(status: RecordStatus) -> StatusCode {
    match status {
        RecordStatus::Success => StatusCode::OK,
        RecordStatus::Partial => StatusCode::PARTIAL_CONTENT,
        RecordStatus::Error => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// POST /api/signal
async fn generate_signal(State(state): State<AppState>, body: Bytes) -> Result<(StatusCode, Json<Value>), AppError> {
    let payload: Value = if body.iter().all(u8::is_ascii_whitespace) {
        Value::Null
    } else {
        serde_json::from_slice(&body).map_err(|e| AppError::bad_request(format!("Invalid JSON body: {}", e)))?
    };

    let request = validate_request_payload(&payload).map_err(AppError::bad_request)?;
    tracing::info!(
        "Signal request for {} with {} texts",
        request.ticker,
        request.texts.len()
    );

    let record = state.generator.generate(&request.ticker, &request.texts).await;
    let code = status_code_for(record.status);

    Ok((code, Json(serde_json::to_value(&record)?)))
}

/// GET /api/config
async fn get_config(State(state): State<AppState>) -> Json<ConfigResponse> {
    let config = state.generator.config();
    Json(ConfigResponse {
        sentiment_threshold: config.sentiment_threshold,
        rsi_buy_threshold: config.rsi_buy_threshold,
        rsi_period: config.rsi_period,
        service_version: config.service_version.clone(),
    })
}

/// GET /api/validate/:ticker
async fn validate_ticker(
    State(state): State<AppState>,
    Path(ticker): Path<String>,
) -> (StatusCode, Json<ValidateResponse>) {
    let ticker = ticker.trim().to_uppercase();

    match state
        .generator
        .provider()
        .daily_history(&ticker, VALIDATE_LOOKBACK_DAYS)
        .await
    {
        Ok(bars) if !bars.is_empty() => (
            StatusCode::OK,
            Json(ValidateResponse {
                valid: true,
                ticker,
                reason: None,
            }),
        ),
        Ok(_) => (
            StatusCode::NOT_FOUND,
            Json(ValidateResponse {
                valid: false,
                ticker,
                reason: None,
            }),
        ),
        Err(e) => {
            tracing::warn!("Ticker validation failed for {}: {}", ticker, e);
            (
                StatusCode::NOT_FOUND,
                Json(ValidateResponse {
                    valid: false,
                    ticker,
                    reason: Some(e.to_string()),
                }),
            )
        }
    }
}
