//! Plaid client configuration.
//!
//! The environment selector decides the default base URL and which secret
//! variable is read. `PLAID_BASE_URL` overrides the host, which is how tests
//! point the client at a mock server.

use plaidgate_core::PlaidEnvironment;
use url::Url;
use zeroize::Zeroizing;

/// Default upstream request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for connecting to Plaid.
///
/// Custom `Debug` implementation redacts the `secret` field to prevent
/// credential leakage in log output.
#[derive(Clone)]
pub struct PlaidConfig {
    /// Upstream environment. Also fixes the accepted access-token prefix.
    pub environment: PlaidEnvironment,
    /// Base URL every request path is appended to.
    pub base_url: Url,
    /// Sent as `PLAID-CLIENT-ID`.
    pub client_id: String,
    /// Sent as `PLAID-SECRET`. Zeroed on drop.
    pub secret: Zeroizing<String>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl std::fmt::Debug for PlaidConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaidConfig")
            .field("environment", &self.environment)
            .field("base_url", &self.base_url)
            .field("client_id", &self.client_id)
            .field("secret", &"[REDACTED]")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl PlaidConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `PLAID_ENV` (default: `sandbox`)
    /// - `PLAID_CLIENT_ID` (required)
    /// - `PLAID_SANDBOX` (required when the environment is `sandbox`)
    /// - `PLAID_DEV` (required when the environment is `development`)
    /// - `PLAID_BASE_URL` (default: derived from the environment)
    /// - `PLAID_TIMEOUT_SECS` (default: 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let environment = match lookup("PLAID_ENV") {
            Some(raw) => raw
                .parse::<PlaidEnvironment>()
                .map_err(|_| ConfigError::InvalidEnvironment(raw))?,
            None => PlaidEnvironment::default(),
        };

        let client_id = non_empty(&lookup, "PLAID_CLIENT_ID")?;
        let secret_var = secret_var(environment);
        let secret = Zeroizing::new(non_empty(&lookup, secret_var)?);

        let raw_url = lookup("PLAID_BASE_URL").unwrap_or_else(|| environment.base_url().to_string());
        let base_url = Url::parse(&raw_url)
            .map_err(|e| ConfigError::InvalidUrl("PLAID_BASE_URL".to_string(), e.to_string()))?;

        Ok(Self {
            environment,
            base_url,
            client_id,
            secret,
            timeout_secs: timeout_secs(&lookup)?.unwrap_or(DEFAULT_TIMEOUT_SECS),
        })
    }

    /// Create a sandbox configuration pointing at a local mock server.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` if `base_url` cannot be parsed.
    pub fn local_mock(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            environment: PlaidEnvironment::Sandbox,
            base_url: Url::parse(base_url)
                .map_err(|e| ConfigError::InvalidUrl(base_url.to_string(), e.to_string()))?,
            client_id: "test-client-id".to_string(),
            secret: Zeroizing::new("test-secret".to_string()),
            timeout_secs: 5,
        })
    }
}

/// Variable holding the secret for `environment`.
pub fn secret_var(environment: PlaidEnvironment) -> &'static str {
    match environment {
        PlaidEnvironment::Sandbox => "PLAID_SANDBOX",
        PlaidEnvironment::Development => "PLAID_DEV",
    }
}

fn timeout_secs(lookup: &impl Fn(&str) -> Option<String>) -> Result<Option<u64>, ConfigError> {
    lookup("PLAID_TIMEOUT_SECS")
        .map(|raw| match raw.trim().parse::<u64>() {
            Ok(secs) if secs > 0 => Ok(secs),
            _ => Err(ConfigError::InvalidTimeout(raw)),
        })
        .transpose()
}

fn non_empty(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<String, ConfigError> {
    lookup(var)
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigError::MissingVar(var))
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    MissingVar(&'static str),
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
    #[error("PLAID_ENV must be sandbox or development, got \"{0}\"")]
    InvalidEnvironment(String),
    #[error("PLAID_TIMEOUT_SECS must be a positive number of seconds, got \"{0}\"")]
    InvalidTimeout(String),
    #[error("{0} contains characters not allowed in an HTTP header")]
    InvalidHeader(&'static str),
}
