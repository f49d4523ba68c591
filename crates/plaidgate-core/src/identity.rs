//! # Access Token Newtype
//!
//! Plaid access tokens look like `access-sandbox-<uuid>`: an environment
//! prefix followed by a hyphenated UUID. The gateway never stores them; it
//! only checks the shape before forwarding so malformed tokens are rejected
//! without an upstream round trip.
//!
//! Matching is case-insensitive on both the prefix and the hex digits.

use serde::Serialize;
use uuid::Uuid;

use crate::environment::PlaidEnvironment;
use crate::error::FieldError;

/// Length of a hyphenated UUID (8-4-4-4-12 plus four hyphens).
const HYPHENATED_UUID_LEN: usize = 36;

/// A Plaid access token scoped to one Item.
///
/// Serializes as the plain string it was constructed from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct AccessToken(String);

impl AccessToken {
    /// Validate `raw` against the token format for `environment`.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::InvalidAccessToken`] if the prefix does not
    /// match the environment or the suffix is not a hyphenated UUID.
    pub fn parse(
        raw: impl Into<String>,
        environment: PlaidEnvironment,
    ) -> Result<Self, FieldError> {
        let raw = raw.into();
        let prefix = environment.access_token_prefix();

        let prefix_ok = raw
            .get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix));
        let suffix_ok = raw
            .get(prefix.len()..)
            .is_some_and(is_hyphenated_uuid);

        if prefix_ok && suffix_ok {
            Ok(Self(raw))
        } else {
            Err(FieldError::InvalidAccessToken {
                environment: environment.as_str(),
            })
        }
    }

    /// Access the token string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

fn is_hyphenated_uuid(s: &str) -> bool {
    s.len() == HYPHENATED_UUID_LEN && Uuid::try_parse(s).is_ok()
}
