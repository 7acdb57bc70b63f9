//! Route handlers
//!
//! - `GET /` - landing page
//! - `GET /health`, `GET /api/health` - liveness
//! - `GET|POST /analyze`, `GET|POST /api/analyze` - run one analysis

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse, Response};
use research_stock::Ticker;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{error, info};

use crate::error::ApiError;
use crate::state::AppState;

const INDEX_HTML: &str = include_str!("../static/index.html");

/// Successful analysis body
#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub ok: bool,
    pub ticker: String,
    pub report: String,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeQuery {
    ticker: Option<String>,
}

/// `GET /`
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// `GET /health`
pub async fn health() -> Json<Value> {
    Json(json!({ "ok": true }))
}

/// `GET /analyze?ticker=...`
pub async fn analyze_get(
    State(state): State<AppState>,
    Query(query): Query<AnalyzeQuery>,
) -> Response {
    run_analysis(&state, query.ticker).await
}

/// `POST /analyze` with `{"ticker": ...}`; a missing or unreadable body means the default ticker
pub async fn analyze_post(State(state): State<AppState>, body: Bytes) -> Response {
    let payload: Option<Value> = serde_json::from_slice(&body).ok();
    run_analysis(&state, ticker_from_json(payload.as_ref())).await
}

/// `ticker` field of a JSON body; non-string values are used in their JSON form
fn ticker_from_json(payload: Option<&Value>) -> Option<String> {
    match payload?.get("ticker")? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

async fn run_analysis(state: &AppState, raw: Option<String>) -> Response {
    let raw = raw.unwrap_or_else(|| state.default_ticker().to_string());
    let Ok(ticker) = Ticker::parse(&raw) else {
        return ApiError::BadRequest("ticker is required".to_string()).into_response();
    };

    info!(ticker = %ticker, "Analyze request");
    match state.researcher.analyze(ticker.as_str()).await {
        Ok(analysis) => Json(AnalyzeResponse {
            ok: true,
            ticker: analysis.ticker.to_string(),
            report: analysis.report,
        })
        .into_response(),
        Err(e) => {
            error!(ticker = %ticker, error = %e, "Analysis failed");
            ApiError::Analysis {
                ticker: ticker.to_string(),
                message: e.to_string(),
            }
            .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticker_from_json() {
        assert_eq!(
            ticker_from_json(Some(&json!({"ticker": " msft "}))).as_deref(),
            Some(" msft ")
        );
        assert_eq!(ticker_from_json(Some(&json!({"ticker": 123}))).as_deref(), Some("123"));
        assert_eq!(ticker_from_json(Some(&json!({"ticker": null}))), None);
        assert_eq!(ticker_from_json(Some(&json!({"other": "x"}))), None);
        assert_eq!(ticker_from_json(Some(&json!(["AAPL"]))), None);
        assert_eq!(ticker_from_json(None), None);
    }
}
