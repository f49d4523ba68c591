//! # Field-Level Errors
//!
//! Errors raised when a single value fails its format constraint. These
//! carry the offending input so the caller can report it verbatim; the
//! query layer folds them into a [`ValidationError`](crate::ValidationError)
//! alongside the field name.

use thiserror::Error;

/// A single value failed format validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// Access token does not match `access-<env>-<uuid>`.
    #[error("must match access-{environment}-<uuid> format")]
    InvalidAccessToken {
        /// The environment whose prefix was expected.
        environment: &'static str,
    },

    /// Product name is not part of the known enumeration.
    #[error("unknown product \"{0}\"")]
    UnknownProduct(String),

    /// Value is not an ISO-8601 date.
    #[error("must be a valid ISO 8601 date string, got \"{0}\"")]
    InvalidDate(String),

    /// Environment selector is not recognised.
    #[error("unknown Plaid environment \"{0}\" (expected sandbox or development)")]
    UnknownEnvironment(String),
}
