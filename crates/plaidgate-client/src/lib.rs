//! # plaidgate-client -- Typed Rust client for the Plaid API
//!
//! Provides typed access to the seven Plaid operations the gateway serves:
//! - **Tokens** ([`tokens`]): sandbox public-token creation and exchange
//! - **Institutions** ([`institutions`]): directory listing
//! - **Item data** ([`data`]): identity, item status, investment holdings
//!   and transactions
//!
//! ## Wire Convention
//!
//! Every Plaid endpoint is a `POST` with a JSON body. Credentials travel in
//! the `PLAID-CLIENT-ID` and `PLAID-SECRET` headers, set once on the
//! underlying `reqwest::Client`. Requests are never retried; a failure is
//! returned to the caller as a [`PlaidApiError`].

pub mod config;
pub mod data;
pub mod error;
pub mod institutions;
pub mod tokens;
pub mod types;

pub use config::{ConfigError, PlaidConfig};
pub use error::PlaidApiError;
pub use types::PlaidErrorBody;

use std::time::Duration;

use plaidgate_core::PlaidEnvironment;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// API version pinned on every request.
pub const PLAID_VERSION: &str = "2020-09-14";

const CLIENT_ID_HEADER: &str = "plaid-client-id";
const SECRET_HEADER: &str = "plaid-secret";
const VERSION_HEADER: &str = "plaid-version";

/// Plaid API client. Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct PlaidClient {
    http: reqwest::Client,
    base_url: url::Url,
    environment: PlaidEnvironment,
    timeout_secs: u64,
}

impl PlaidClient {
    /// Create a new Plaid client from configuration.
    pub fn new(config: PlaidConfig) -> Result<Self, PlaidApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static(CLIENT_ID_HEADER),
            HeaderValue::from_str(&config.client_id)
                .map_err(|_| ConfigError::InvalidHeader("PLAID_CLIENT_ID"))?,
        );
        let mut secret = HeaderValue::from_str(config.secret.as_str())
            .map_err(|_| ConfigError::InvalidHeader("PLAID secret"))?;
        secret.set_sensitive(true);
        headers.insert(HeaderName::from_static(SECRET_HEADER), secret);
        headers.insert(
            HeaderName::from_static(VERSION_HEADER),
            HeaderValue::from_static(PLAID_VERSION),
        );

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| PlaidApiError::Transport {
                endpoint: "client_init".into(),
                source: e,
            })?;

        Ok(Self {
            http,
            base_url: config.base_url,
            environment: config.environment,
            timeout_secs: config.timeout_secs,
        })
    }

    /// Environment this client talks to.
    pub fn environment(&self) -> PlaidEnvironment {
        self.environment
    }

    /// `POST {base_url}{path}` with `body`, decoding a 2xx response as `R`.
    async fn post<B, R>(&self, path: &'static str, body: &B) -> Result<R, PlaidApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let endpoint = format!("POST {path}");
        let url = format!("{}{path}", self.base_url.as_str().trim_end_matches('/'));
        tracing::debug!(%endpoint, "calling Plaid");

        let resp = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| self.send_error(&endpoint, e))?;

        let status = resp.status();
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| self.send_error(&endpoint, e))?;

        if !status.is_success() {
            let error = serde_json::from_slice::<PlaidErrorBody>(&bytes).ok();
            tracing::warn!(
                %endpoint,
                status = status.as_u16(),
                error_code = error.as_ref().map(|e| e.error_code.as_str()),
                request_id = error.as_ref().and_then(|e| e.request_id.as_deref()),
                "Plaid returned an error"
            );
            return Err(PlaidApiError::Api {
                endpoint,
                status: status.as_u16(),
                error,
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }

        serde_json::from_slice(&bytes)
            .map_err(|source| PlaidApiError::Deserialization { endpoint, source })
    }

    fn send_error(&self, endpoint: &str, source: reqwest::Error) -> PlaidApiError {
        if source.is_timeout() {
            PlaidApiError::Timeout {
                endpoint: endpoint.to_string(),
                timeout_secs: self.timeout_secs,
            }
        } else {
            PlaidApiError::Transport {
                endpoint: endpoint.to_string(),
                source,
            }
        }
    }
}
