//! Sandbox token flow.
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | POST   | `/sandbox/public_token/create` | Create a public token for a test institution |
//! | POST   | `/item/public_token/exchange`  | Exchange a public token for an access token |

use plaidgate_core::Product;

use crate::error::PlaidApiError;
use crate::types::{
    ItemPublicTokenExchangeRequest, ItemPublicTokenExchangeResponse,
    SandboxPublicTokenCreateRequest, SandboxPublicTokenCreateResponse,
};
use crate::PlaidClient;

impl PlaidClient {
    /// Create a sandbox Item at `institution_id` and return its public token.
    pub async fn create_sandbox_public_token(
        &self,
        institution_id: &str,
        initial_products: &[Product],
    ) -> Result<SandboxPublicTokenCreateResponse, PlaidApiError> {
        self.post(
            "/sandbox/public_token/create",
            &SandboxPublicTokenCreateRequest {
                institution_id,
                initial_products,
            },
        )
        .await
    }

    /// Exchange a public token for a long-lived access token.
    pub async fn exchange_public_token(
        &self,
        public_token: &str,
    ) -> Result<ItemPublicTokenExchangeResponse, PlaidApiError> {
        self.post(
            "/item/public_token/exchange",
            &ItemPublicTokenExchangeRequest { public_token },
        )
        .await
    }
}
