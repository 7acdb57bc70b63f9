use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// API-layer error type
#[derive(Debug)]
pub enum ApiError {
    /// 400 - ticker empty after normalization
    BadRequest(String),

    /// 500 - analysis failed for `ticker`
    Analysis { ticker: String, message: String },
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorBody {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    ticker: Option<String>,
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, ticker, error) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, None, msg),
            ApiError::Analysis { ticker, message } => {
                (StatusCode::INTERNAL_SERVER_ERROR, Some(ticker), message)
            }
        };

        let body = ErrorBody {
            ok: false,
            ticker,
            error,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body_shapes() {
        let json = serde_json::to_value(ErrorBody {
            ok: false,
            ticker: None,
            error: "ticker is required".to_string(),
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"ok": false, "error": "ticker is required"}));

        let response = ApiError::Analysis {
            ticker: "AAPL".to_string(),
            message: "boom".to_string(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
