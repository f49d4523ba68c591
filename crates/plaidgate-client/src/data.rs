//! Item data endpoints.
//!
//! Each takes an access token and returns the raw JSON payload; the caller
//! shapes it into its output type.
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | POST   | `/identity/get`             | Account owners on file |
//! | POST   | `/item/get`                 | Item metadata and status |
//! | POST   | `/investments/holdings/get` | Holdings and securities |
//! | POST   | `/transactions/get`         | Transactions in a date range |

use chrono::NaiveDate;
use plaidgate_core::AccessToken;
use serde_json::Value;

use crate::error::PlaidApiError;
use crate::types::{AccessTokenRequest, TransactionsGetRequest};
use crate::PlaidClient;

impl PlaidClient {
    pub async fn get_identity(&self, access_token: &AccessToken) -> Result<Value, PlaidApiError> {
        self.post("/identity/get", &AccessTokenRequest { access_token })
            .await
    }

    pub async fn get_item(&self, access_token: &AccessToken) -> Result<Value, PlaidApiError> {
        self.post("/item/get", &AccessTokenRequest { access_token })
            .await
    }

    pub async fn get_investment_holdings(
        &self,
        access_token: &AccessToken,
    ) -> Result<Value, PlaidApiError> {
        self.post(
            "/investments/holdings/get",
            &AccessTokenRequest { access_token },
        )
        .await
    }

    /// Both bounds are inclusive.
    pub async fn get_transactions(
        &self,
        access_token: &AccessToken,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Value, PlaidApiError> {
        self.post(
            "/transactions/get",
            &TransactionsGetRequest {
                access_token,
                start_date,
                end_date,
            },
        )
        .await
    }
}
