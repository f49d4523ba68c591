//! Token exchange output.

use serde::{Deserialize, Serialize};

/// `GET /plaid/token` response. The public token used to obtain it is never
/// exposed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessTokenResponse {
    pub access_token: String,
}
