//! Request-level middleware.

pub mod metrics;
