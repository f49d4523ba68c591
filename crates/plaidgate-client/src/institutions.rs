//! Institution directory.

use serde_json::Value;

use crate::error::PlaidApiError;
use crate::types::InstitutionsGetRequest;
use crate::PlaidClient;

impl PlaidClient {
    /// `POST /institutions/get`. Returns the raw payload for shaping.
    pub async fn list_institutions(
        &self,
        count: u32,
        offset: u32,
        country_codes: &[&str],
    ) -> Result<Value, PlaidApiError> {
        self.post(
            "/institutions/get",
            &InstitutionsGetRequest {
                count,
                offset,
                country_codes,
            },
        )
        .await
    }
}
