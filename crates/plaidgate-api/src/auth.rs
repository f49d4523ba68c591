//! # API Key Middleware
//!
//! Every route under the API prefix requires an `X-Api-Key` header equal to
//! the configured key. The check runs before query validation and before any
//! upstream call; a rejected request never reaches a handler.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use subtle::ConstantTimeEq;
use thiserror::Error;
use zeroize::Zeroizing;

use crate::error::AppError;

/// Header carrying the caller's key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Expected key, injected into request extensions.
///
/// Custom `Debug` redacts the key value to prevent credential leakage in logs.
#[derive(Clone)]
pub struct ApiKeyConfig {
    pub key: Zeroizing<String>,
}

impl ApiKeyConfig {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: Zeroizing::new(key.into()),
        }
    }
}

impl std::fmt::Debug for ApiKeyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeyConfig")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Why a request was rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    #[error("missing X-Api-Key header")]
    Missing,
    #[error("invalid API key")]
    Invalid,
}

/// Accept the request iff `header_value` equals `expected`.
pub fn verify_api_key(header_value: Option<&str>, expected: &str) -> Result<(), AuthError> {
    match header_value {
        None => Err(AuthError::Missing),
        Some(provided) if constant_time_eq(provided, expected) => Ok(()),
        Some(_) => Err(AuthError::Invalid),
    }
}

/// Constant-time comparison of API keys.
///
/// When lengths differ, performs a dummy comparison so timing does not
/// depend on where the inputs diverge.
fn constant_time_eq(provided: &str, expected: &str) -> bool {
    let provided = provided.as_bytes();
    let expected = expected.as_bytes();
    if provided.len() != expected.len() {
        let _ = expected.ct_eq(expected);
        return false;
    }
    provided.ct_eq(expected).into()
}

/// Reject requests whose `X-Api-Key` does not match [`ApiKeyConfig`].
///
/// Fails closed when no [`ApiKeyConfig`] extension is installed.
pub async fn api_key_middleware(request: Request, next: Next) -> Response {
    let Some(config) = request.extensions().get::<ApiKeyConfig>().cloned() else {
        return AppError::Internal("API key middleware installed without ApiKeyConfig".into())
            .into_response();
    };

    let provided = request
        .headers()
        .get(API_KEY_HEADER)
        .map(|v| v.to_str().unwrap_or_default());

    match verify_api_key(provided, config.key.as_str()) {
        Ok(()) => next.run(request).await,
        Err(reason) => {
            tracing::warn!(
                %reason,
                path = %request.uri().path(),
                "authentication failed"
            );
            AppError::Unauthorized(reason.to_string()).into_response()
        }
    }
}
