//! # Plaid Routes
//!
//! One handler per upstream operation. Each runs the same single pass:
//! validated query in, one or two Plaid calls, shaped DTO out. Authentication
//! has already happened in the API key middleware.
//!
//! | Route                                   | Plaid call(s) |
//! |-----------------------------------------|---------------|
//! | `GET /plaid/token`                      | `/sandbox/public_token/create` then `/item/public_token/exchange` |
//! | `GET /plaid/institutions`               | `/institutions/get` |
//! | `GET /plaid/identity/get`               | `/identity/get` |
//! | `GET /plaid/item/get`                   | `/item/get` |
//! | `GET /plaid/investments/holdings/get`   | `/investments/holdings/get` |
//! | `GET /plaid/transactions/get`           | `/transactions/get` |

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use plaidgate_client::PlaidApiError;
use plaidgate_core::dto::{
    AccessTokenResponse, IdentityRecord, Institution, InstitutionList, InvestmentsRecord,
    ItemRecord, TransactionsRecord,
};
use plaidgate_core::{
    shape, AccessTokenQuery, InstitutionsQuery, TokenQuery, TransactionsQuery,
};

use crate::error::AppError;
use crate::extractors::ValidatedQuery;
use crate::state::AppState;

/// Country institutions are listed for.
const INSTITUTION_COUNTRY_CODES: &[&str] = &["US"];

/// Upstream error code reclassified as a caller error on the holdings route.
const PRODUCTS_NOT_SUPPORTED: &str = "PRODUCTS_NOT_SUPPORTED";

/// Build the Plaid router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/plaid/token", get(get_access_token))
        .route("/plaid/institutions", get(list_institutions))
        .route("/plaid/identity/get", get(get_identity))
        .route("/plaid/item/get", get(get_item))
        .route(
            "/plaid/investments/holdings/get",
            get(get_investment_holdings),
        )
        .route("/plaid/transactions/get", get(get_transactions))
}

/// Create a sandbox Item and exchange its public token. Only the access
/// token is returned.
async fn get_access_token(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<TokenQuery>,
) -> Result<Json<AccessTokenResponse>, AppError> {
    let created = state
        .plaid
        .create_sandbox_public_token(&query.institution_id, &query.initial_products)
        .await?;
    let exchanged = state
        .plaid
        .exchange_public_token(&created.public_token)
        .await?;

    tracing::info!(
        institution_id = %query.institution_id,
        item_id = exchanged.item_id.as_deref(),
        "issued sandbox access token"
    );
    Ok(Json(AccessTokenResponse {
        access_token: exchanged.access_token,
    }))
}

async fn list_institutions(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<InstitutionsQuery>,
) -> Result<Json<Vec<Institution>>, AppError> {
    let raw = state
        .plaid
        .list_institutions(query.count, query.offset, INSTITUTION_COUNTRY_CODES)
        .await?;
    let list: InstitutionList = shape(raw)?;
    tracing::debug!(
        returned = list.institutions.len(),
        total = list.total,
        request_id = list.request_id.as_deref(),
        "listed institutions"
    );
    Ok(Json(list.institutions))
}

async fn get_identity(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<AccessTokenQuery>,
) -> Result<Json<IdentityRecord>, AppError> {
    let raw = state.plaid.get_identity(&query.access_token).await?;
    let record: IdentityRecord = shape(raw)?;
    tracing::debug!(request_id = record.request_id.as_deref(), "fetched identity");
    Ok(Json(record))
}

async fn get_item(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<AccessTokenQuery>,
) -> Result<Json<ItemRecord>, AppError> {
    let raw = state.plaid.get_item(&query.access_token).await?;
    let record: ItemRecord = shape(raw)?;
    tracing::debug!(request_id = record.request_id.as_deref(), "fetched item");
    Ok(Json(record))
}

async fn get_investment_holdings(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<AccessTokenQuery>,
) -> Result<Json<InvestmentsRecord>, AppError> {
    let raw = state
        .plaid
        .get_investment_holdings(&query.access_token)
        .await
        .map_err(holdings_error)?;
    let record: InvestmentsRecord = shape(raw)?;
    tracing::debug!(
        request_id = record.request_id.as_deref(),
        "fetched investment holdings"
    );
    Ok(Json(record))
}

async fn get_transactions(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<TransactionsQuery>,
) -> Result<Json<TransactionsRecord>, AppError> {
    let raw = state
        .plaid
        .get_transactions(&query.access_token, query.start_date, query.end_date)
        .await?;
    let record: TransactionsRecord = shape(raw)?;
    tracing::debug!(
        request_id = record.request_id.as_deref(),
        start_date = %query.start_date,
        end_date = %query.end_date,
        total = record.total_transactions,
        "fetched transactions"
    );
    Ok(Json(record))
}

/// An institution without investment support is the caller's problem, so
/// it surfaces as a 400 with Plaid's own message.
fn holdings_error(err: PlaidApiError) -> AppError {
    if err.error_code() == Some(PRODUCTS_NOT_SUPPORTED) {
        let message = err.error_message().unwrap_or(PRODUCTS_NOT_SUPPORTED).to_string();
        tracing::warn!(%message, "holdings requested for unsupported institution");
        return AppError::ProductsNotSupported(message);
    }
    err.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use plaidgate_client::PlaidErrorBody;

    fn api_error(code: &str) -> PlaidApiError {
        PlaidApiError::Api {
            endpoint: "POST /investments/holdings/get".into(),
            status: 400,
            error: Some(PlaidErrorBody {
                error_type: "ITEM_ERROR".into(),
                error_code: code.into(),
                error_message: "no investment accounts".into(),
                display_message: None,
                request_id: None,
            }),
            body: String::new(),
        }
    }

    #[test]
    fn router_builds_successfully() {
        let _router = router();
    }

    #[test]
    fn products_not_supported_becomes_bad_request() {
        match holdings_error(api_error("PRODUCTS_NOT_SUPPORTED")) {
            AppError::ProductsNotSupported(msg) => assert_eq!(msg, "no investment accounts"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn other_holdings_errors_stay_upstream() {
        assert!(matches!(
            holdings_error(api_error("ITEM_LOGIN_REQUIRED")),
            AppError::Upstream { .. }
        ));
        assert!(matches!(
            holdings_error(PlaidApiError::Timeout {
                endpoint: "POST /investments/holdings/get".into(),
                timeout_secs: 30,
            }),
            AppError::UpstreamTimeout(_)
        ));
    }
}
