//! # Prometheus Metrics
//!
//! HTTP request counters and latency for the API routes, kept in a
//! dedicated Prometheus registry and encoded in the text exposition format
//! at `/metrics`.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::{MatchedPath, Request};
use axum::middleware::Next;
use axum::response::Response;
use prometheus::core::Collector;
use prometheus::{Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder};

/// Label used for requests that matched no route.
const UNMATCHED_PATH: &str = "unmatched";

/// Shared metrics state backed by a Prometheus registry.
#[derive(Clone)]
pub struct ApiMetrics {
    inner: Arc<Inner>,
}

struct Inner {
    registry: Registry,
    http_requests_total: IntCounterVec,
    http_client_errors_total: IntCounterVec,
    http_server_errors_total: IntCounterVec,
    http_request_duration_seconds: HistogramVec,
}

impl std::fmt::Debug for ApiMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiMetrics")
            .field("requests", &self.requests())
            .field("client_errors", &self.client_errors())
            .field("server_errors", &self.server_errors())
            .finish()
    }
}

impl ApiMetrics {
    /// Create a new metrics instance with a fresh Prometheus registry.
    pub fn new() -> Self {
        let registry = Registry::new();

        let http_requests_total = IntCounterVec::new(
            Opts::new("plaidgate_http_requests_total", "API requests handled"),
            &["method", "path", "status"],
        )
        .expect("metric can be created");

        let http_client_errors_total = IntCounterVec::new(
            Opts::new(
                "plaidgate_http_client_errors_total",
                "API requests answered with a 4xx status",
            ),
            &["method", "path", "status"],
        )
        .expect("metric can be created");

        let http_server_errors_total = IntCounterVec::new(
            Opts::new(
                "plaidgate_http_server_errors_total",
                "API requests answered with a 5xx status",
            ),
            &["method", "path", "status"],
        )
        .expect("metric can be created");

        let http_request_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "plaidgate_http_request_duration_seconds",
                "API request duration in seconds, upstream calls included",
            )
            .buckets(vec![0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
            &["method", "path"],
        )
        .expect("metric can be created");

        registry
            .register(Box::new(http_requests_total.clone()))
            .expect("metric can be registered");
        registry
            .register(Box::new(http_client_errors_total.clone()))
            .expect("metric can be registered");
        registry
            .register(Box::new(http_server_errors_total.clone()))
            .expect("metric can be registered");
        registry
            .register(Box::new(http_request_duration_seconds.clone()))
            .expect("metric can be registered");

        Self {
            inner: Arc::new(Inner {
                registry,
                http_requests_total,
                http_client_errors_total,
                http_server_errors_total,
                http_request_duration_seconds,
            }),
        }
    }

    /// Total requests across all labels.
    pub fn requests(&self) -> u64 {
        sum(&self.inner.http_requests_total)
    }

    /// Requests answered with a 4xx or 5xx status.
    pub fn errors(&self) -> u64 {
        self.client_errors() + self.server_errors()
    }

    pub fn client_errors(&self) -> u64 {
        sum(&self.inner.http_client_errors_total)
    }

    pub fn server_errors(&self) -> u64 {
        sum(&self.inner.http_server_errors_total)
    }

    /// Record one finished request.
    fn record_request(&self, method: &str, path: &str, status: u16, duration_secs: f64) {
        let status_str = status.to_string();
        let labels = [method, path, status_str.as_str()];
        self.inner.http_requests_total.with_label_values(&labels).inc();
        self.inner
            .http_request_duration_seconds
            .with_label_values(&[method, path])
            .observe(duration_secs);

        match status {
            400..=499 => self.inner.http_client_errors_total.with_label_values(&labels).inc(),
            500..=599 => self.inner.http_server_errors_total.with_label_values(&labels).inc(),
            _ => {}
        }
    }

    /// Gather every registered metric and encode it as Prometheus text.
    pub fn gather_and_encode(&self) -> Result<String, String> {
        let encoder = TextEncoder::new();
        let metric_families = self.inner.registry.gather();
        let mut buffer = Vec::new();
        encoder
            .encode(&metric_families, &mut buffer)
            .map_err(|e| format!("failed to encode metrics: {e}"))?;
        String::from_utf8(buffer).map_err(|e| format!("metrics encoding produced invalid UTF-8: {e}"))
    }
}

impl Default for ApiMetrics {
    fn default() -> Self {
        Self::new()
    }
}

fn sum(counter: &IntCounterVec) -> u64 {
    counter
        .collect()
        .iter()
        .flat_map(|family| family.get_metric())
        .map(|m| m.get_counter().get_value() as u64)
        .sum()
}

/// Middleware that records request counts, error counts and latency.
///
/// The `path` label is the matched route template, so query strings and
/// unknown paths never create new series.
pub async fn metrics_middleware(request: Request, next: Next) -> Response {
    let metrics = request.extensions().get::<ApiMetrics>().cloned();
    let method = request.method().to_string();
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| UNMATCHED_PATH.to_string());
    let start = Instant::now();

    let response = next.run(request).await;

    if let Some(m) = metrics {
        m.record_request(
            &method,
            &path,
            response.status().as_u16(),
            start.elapsed().as_secs_f64(),
        );
    }

    response
}
