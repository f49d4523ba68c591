//! # Query Extraction & Validation
//!
//! [`ValidatedQuery`] decodes the raw query string into ordered pairs and
//! hands them to the route's [`FromQuery`] schema. Decoding failures become
//! [`AppError::BadRequest`]; schema failures become [`AppError::Validation`]
//! listing every offending field.

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use plaidgate_core::{FromQuery, QueryParams};

use crate::error::AppError;
use crate::state::AppState;

/// A validated query schema.
///
/// ```ignore
/// async fn handler(ValidatedQuery(q): ValidatedQuery<TokenQuery>) -> Result<..., AppError> {
///     // q is fully validated, defaults resolved
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ValidatedQuery<T>(pub T);

#[axum::async_trait]
impl<T> FromRequestParts<AppState> for ValidatedQuery<T>
where
    T: FromQuery + Send,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let params = query_params(parts)?;
        let value = T::from_query(&params, &state.query_context())?;
        Ok(Self(value))
    }
}

/// Decode the request's query string, preserving order and repeated keys.
pub fn query_params(parts: &Parts) -> Result<QueryParams, AppError> {
    Query::<Vec<(String, String)>>::try_from_uri(&parts.uri)
        .map(|Query(pairs)| QueryParams::new(pairs))
        .map_err(|err| AppError::BadRequest(err.body_text()))
}
