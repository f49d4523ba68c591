//! # plaidgate-api: Axum Gateway for Plaid
//!
//! Serves a fixed set of read-only Plaid lookups behind a static API key.
//! Each route validates its query, makes one upstream call (two for the
//! token exchange), and shapes the payload into a fixed DTO.
//!
//! ## API Surface
//!
//! | Path                                           | Module             | Auth |
//! |------------------------------------------------|--------------------|------|
//! | `/api/v1/plaid/*`                              | [`routes::plaid`]  | `X-Api-Key` |
//! | `/health/liveness`, `/health/readiness`        | this module        | none |
//! | `/metrics`                                     | this module        | none |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! CorsLayer → TraceLayer → MetricsMiddleware → ApiKeyMiddleware → Handler
//! ```

pub mod auth;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::middleware::from_fn;
use axum::routing::get;
use axum::{Extension, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::ApiKeyConfig;
use crate::error::AppError;
use crate::middleware::metrics::ApiMetrics;
use crate::state::AppState;

/// Prefix every API route is mounted under.
pub const API_PREFIX: &str = "/api/v1";

/// Assemble the full application router with all routes and middleware.
pub fn app(state: AppState) -> Router {
    app_with_metrics(state, ApiMetrics::new())
}

/// [`app`] with caller-supplied metrics, so tests can read the counters.
///
/// Health probes and `/metrics` are mounted outside the API key middleware
/// so they remain accessible without credentials.
pub fn app_with_metrics(state: AppState, metrics: ApiMetrics) -> Router {
    let api_key = ApiKeyConfig {
        key: state.config.api_key.clone(),
    };

    let api = Router::new()
        .merge(routes::plaid::router())
        .layer(from_fn(auth::api_key_middleware))
        .layer(from_fn(middleware::metrics::metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(Extension(api_key))
        .layer(Extension(metrics.clone()))
        .with_state(state);

    let ops = Router::new()
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness))
        .route("/metrics", get(render_metrics))
        .layer(Extension(metrics));

    Router::new()
        .nest(API_PREFIX, api)
        .merge(ops)
        .layer(CorsLayer::permissive())
}

/// Liveness probe. Always 200 while the process is up.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe. Nothing needs warming, so always ready.
async fn readiness() -> &'static str {
    "ready"
}

async fn render_metrics(Extension(metrics): Extension<ApiMetrics>) -> Result<String, AppError> {
    metrics.gather_and_encode().map_err(AppError::Internal)
}
