//! Plaid client error types.

use crate::types::PlaidErrorBody;

/// Errors from Plaid API calls.
#[derive(Debug, thiserror::Error)]
pub enum PlaidApiError {
    /// Connection-level failure; no HTTP response was received.
    #[error("transport error calling {endpoint}: {source}")]
    Transport {
        endpoint: String,
        source: reqwest::Error,
    },
    /// The request did not complete within the configured timeout.
    #[error("{endpoint} timed out after {timeout_secs}s")]
    Timeout {
        endpoint: String,
        timeout_secs: u64,
    },
    /// Plaid returned a non-2xx status.
    #[error("Plaid {endpoint} returned {status}: {body}")]
    Api {
        endpoint: String,
        status: u16,
        /// Parsed error body, when the response carried one.
        error: Option<PlaidErrorBody>,
        body: String,
    },
    /// A 2xx body could not be decoded.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        endpoint: String,
        source: serde_json::Error,
    },
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

impl PlaidApiError {
    /// Upstream `error_code`, e.g. `PRODUCTS_NOT_SUPPORTED`.
    pub fn error_code(&self) -> Option<&str> {
        self.body().map(|b| b.error_code.as_str())
    }

    /// Upstream `error_message`.
    pub fn error_message(&self) -> Option<&str> {
        self.body().map(|b| b.error_message.as_str())
    }

    /// Upstream `request_id` for correlating with Plaid support.
    pub fn request_id(&self) -> Option<&str> {
        self.body().and_then(|b| b.request_id.as_deref())
    }

    /// HTTP status Plaid answered with, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    fn body(&self) -> Option<&PlaidErrorBody> {
        match self {
            Self::Api { error, .. } => error.as_ref(),
            _ => None,
        }
    }
}
