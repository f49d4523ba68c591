//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Maps validation, shaping and upstream errors to HTTP status codes and a
//! JSON body carrying an error code, message and optional details. Internal
//! and upstream failure details are logged, never returned.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use plaidgate_client::PlaidApiError;
use plaidgate_core::{ShapingError, ValidationError};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

/// Structured JSON error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "VALIDATION_ERROR").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Additional context: offending fields, or the upstream error code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// Missing or invalid API key (401).
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Query parameters failed validation (400).
    #[error("validation error: {0}")]
    Validation(ValidationError),

    /// Query string could not be decoded (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The institution does not support the requested product (400).
    /// Carries the upstream message verbatim.
    #[error("{0}")]
    ProductsNotSupported(String),

    /// Plaid rejected the call or could not be reached (502).
    #[error("upstream error: {message}")]
    Upstream {
        message: String,
        error_code: Option<String>,
    },

    /// Plaid did not answer in time (504).
    #[error("upstream timeout: {0}")]
    UpstreamTimeout(String),

    /// Internal server error (500). Message is logged but not returned to client.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Return the HTTP status code and machine-readable error code for this error.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            Self::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            Self::ProductsNotSupported(_) => (StatusCode::BAD_REQUEST, "PRODUCTS_NOT_SUPPORTED"),
            Self::Upstream { .. } => (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR"),
            Self::UpstreamTimeout(_) => (StatusCode::GATEWAY_TIMEOUT, "UPSTREAM_TIMEOUT"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }

    fn message(&self) -> String {
        match self {
            Self::Unauthorized(msg) | Self::BadRequest(msg) | Self::ProductsNotSupported(msg) => {
                msg.clone()
            }
            Self::Validation(err) => err.to_string(),
            Self::Upstream { .. } => "The upstream financial data service returned an error".into(),
            Self::UpstreamTimeout(_) => {
                "The upstream financial data service did not respond in time".into()
            }
            Self::Internal(_) => "An internal error occurred".into(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            Self::Validation(err) => Some(json!(err.violations())),
            Self::Upstream {
                error_code: Some(code),
                ..
            } => Some(json!({ "error_code": code })),
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        match &self {
            Self::Internal(_) => tracing::error!(error = %self, "internal server error"),
            Self::Upstream { .. } | Self::UpstreamTimeout(_) => {
                tracing::error!(error = %self, "upstream failure")
            }
            _ => {}
        }

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.message(),
                details: self.details(),
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err)
    }
}

/// A payload that does not fit its output shape is an upstream contract
/// mismatch, not a caller error.
impl From<ShapingError> for AppError {
    fn from(err: ShapingError) -> Self {
        Self::Internal(err.to_string())
    }
}

impl From<PlaidApiError> for AppError {
    fn from(err: PlaidApiError) -> Self {
        match &err {
            PlaidApiError::Timeout { .. } => Self::UpstreamTimeout(err.to_string()),
            PlaidApiError::Config(_) => Self::Internal(err.to_string()),
            PlaidApiError::Api { .. }
            | PlaidApiError::Transport { .. }
            | PlaidApiError::Deserialization { .. } => Self::Upstream {
                error_code: err.error_code().map(str::to_string),
                message: err.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use plaidgate_client::PlaidErrorBody;
    use plaidgate_core::Violation;

    async fn body_json(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn status_codes() {
        let cases = [
            (AppError::Unauthorized("x".into()), StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            (AppError::BadRequest("x".into()), StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            (
                AppError::ProductsNotSupported("x".into()),
                StatusCode::BAD_REQUEST,
                "PRODUCTS_NOT_SUPPORTED",
            ),
            (
                AppError::Upstream {
                    message: "x".into(),
                    error_code: None,
                },
                StatusCode::BAD_GATEWAY,
                "UPSTREAM_ERROR",
            ),
            (
                AppError::UpstreamTimeout("x".into()),
                StatusCode::GATEWAY_TIMEOUT,
                "UPSTREAM_TIMEOUT",
            ),
            (
                AppError::Internal("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
            ),
        ];
        for (err, status, code) in cases {
            assert_eq!(err.status_and_code(), (status, code));
        }
    }

    #[tokio::test]
    async fn validation_lists_fields_in_details() {
        let err = ValidationError::from_violations(vec![
            Violation::new("count", "must be an integer"),
            Violation::new("foo", "should not exist"),
        ])
        .unwrap();
        let (status, body) = body_json(err.into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["details"][1]["field"], "foo");
        assert_eq!(body["error"]["details"][1]["message"], "should not exist");
    }

    #[tokio::test]
    async fn internal_message_is_hidden() {
        let (status, body) = body_json(AppError::Internal("secret detail".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["message"], "An internal error occurred");
        assert!(body["error"].get("details").is_none());
    }

    #[tokio::test]
    async fn upstream_api_error_exposes_code_only() {
        let plaid = PlaidApiError::Api {
            endpoint: "POST /item/get".into(),
            status: 400,
            error: Some(PlaidErrorBody {
                error_type: "INVALID_INPUT".into(),
                error_code: "INVALID_ACCESS_TOKEN".into(),
                error_message: "provided access token is in an invalid format".into(),
                display_message: None,
                request_id: Some("req".into()),
            }),
            body: "{}".into(),
        };
        let (status, body) = body_json(plaid.into()).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["details"]["error_code"], "INVALID_ACCESS_TOKEN");
        assert!(!body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("invalid format"));
    }

    #[test]
    fn timeout_maps_to_gateway_timeout() {
        let err: AppError = PlaidApiError::Timeout {
            endpoint: "POST /item/get".into(),
            timeout_secs: 30,
        }
        .into();
        assert!(matches!(err, AppError::UpstreamTimeout(_)));
    }
}
