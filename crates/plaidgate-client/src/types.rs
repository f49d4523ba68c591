//! Request and response bodies for the Plaid endpoints this client calls.
//!
//! Response types model only what the client itself needs. Data endpoints
//! return raw JSON so the caller can shape it.

use chrono::NaiveDate;
use plaidgate_core::{AccessToken, Product};
use serde::{Deserialize, Serialize};

/// Plaid's error envelope on non-2xx responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaidErrorBody {
    pub error_type: String,
    pub error_code: String,
    pub error_message: String,
    #[serde(default)]
    pub display_message: Option<String>,
    #[serde(default)]
    pub request_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SandboxPublicTokenCreateRequest<'a> {
    pub institution_id: &'a str,
    pub initial_products: &'a [Product],
}

#[derive(Debug, Clone, Deserialize)]
pub struct SandboxPublicTokenCreateResponse {
    pub public_token: String,
    #[serde(default)]
    pub request_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ItemPublicTokenExchangeRequest<'a> {
    pub public_token: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ItemPublicTokenExchangeResponse {
    pub access_token: String,
    #[serde(default)]
    pub item_id: Option<String>,
    #[serde(default)]
    pub request_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct InstitutionsGetRequest<'a> {
    pub count: u32,
    pub offset: u32,
    pub country_codes: &'a [&'a str],
}

/// Body shared by the access-token-only endpoints.
#[derive(Debug, Serialize)]
pub struct AccessTokenRequest<'a> {
    pub access_token: &'a AccessToken,
}

#[derive(Debug, Serialize)]
pub struct TransactionsGetRequest<'a> {
    pub access_token: &'a AccessToken,
    /// Serialized as `YYYY-MM-DD`.
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}
