//! Upstream environment selector.
//!
//! Plaid runs one host per environment. The selector decides the base URL,
//! which configured secret is sent, and the prefix access tokens carry.

use serde::{Deserialize, Serialize};

use crate::error::FieldError;

/// A Plaid environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaidEnvironment {
    /// Test institutions and synthetic data.
    #[default]
    Sandbox,
    /// Live institutions with a capped number of Items.
    Development,
}

impl PlaidEnvironment {
    /// Return the string representation used in tokens and configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sandbox => "sandbox",
            Self::Development => "development",
        }
    }

    /// Default HTTPS base URL for this environment.
    pub fn base_url(&self) -> &'static str {
        match self {
            Self::Sandbox => "https://sandbox.plaid.com",
            Self::Development => "https://development.plaid.com",
        }
    }

    /// Prefix every access token issued in this environment starts with.
    pub fn access_token_prefix(&self) -> &'static str {
        match self {
            Self::Sandbox => "access-sandbox-",
            Self::Development => "access-development-",
        }
    }
}

impl std::fmt::Display for PlaidEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PlaidEnvironment {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sandbox" => Ok(Self::Sandbox),
            "development" | "dev" => Ok(Self::Development),
            _ => Err(FieldError::UnknownEnvironment(s.to_string())),
        }
    }
}
