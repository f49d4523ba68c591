//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers via
//! the `State` extractor. Everything in it is immutable after startup: the
//! service configuration and one pooled Plaid client.

use std::sync::Arc;

use chrono::Utc;
use plaidgate_client::PlaidClient;
use plaidgate_core::QueryContext;
use zeroize::Zeroizing;

/// Default HTTP listen port.
pub const DEFAULT_PORT: u16 = 3000;

/// Service configuration.
///
/// Custom `Debug` redacts the API key.
#[derive(Clone)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// Port TLS is terminated on in front of the service. Reported only.
    pub https_port: Option<u16>,
    /// Expected `X-Api-Key` value.
    pub api_key: Zeroizing<String>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("port", &self.port)
            .field("https_port", &self.https_port)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `PORT` (default: 3000)
    /// - `HTTPS_PORT` (optional)
    /// - `API_KEY` (required)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_key = lookup("API_KEY")
            .filter(|k| !k.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        Ok(Self {
            port: port(&lookup, "PORT")?.unwrap_or(DEFAULT_PORT),
            https_port: port(&lookup, "HTTPS_PORT")?,
            api_key: Zeroizing::new(api_key),
        })
    }

    /// Configuration for tests: fixed key, default port.
    pub fn with_api_key(api_key: &str) -> Self {
        Self {
            port: DEFAULT_PORT,
            https_port: None,
            api_key: Zeroizing::new(api_key.to_string()),
        }
    }
}

fn port(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<u16>, ConfigError> {
    lookup(var)
        .map(|raw| {
            raw.trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(var, raw))
        })
        .transpose()
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("API_KEY environment variable is required")]
    MissingApiKey,
    #[error("{0} must be a port number, got \"{1}\"")]
    InvalidPort(&'static str, String),
}

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub plaid: Arc<PlaidClient>,
}

impl AppState {
    pub fn new(config: AppConfig, plaid: PlaidClient) -> Self {
        Self {
            config: Arc::new(config),
            plaid: Arc::new(plaid),
        }
    }

    /// Validation context for the current request: the client's environment
    /// and today's UTC date.
    pub fn query_context(&self) -> QueryContext {
        QueryContext {
            environment: self.plaid.environment(),
            today: Utc::now().date_naive(),
        }
    }
}
