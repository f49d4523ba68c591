//! # Response Shaping
//!
//! Converts a raw upstream payload into one of the [`dto`](crate::dto) types
//! in two passes:
//!
//! 1. **Decode.** `serde` drops unknown and hidden fields and fails when a
//!    mandatory field is absent or has the wrong type.
//! 2. **Check.** [`Shape::check`] enforces what the type system cannot:
//!    non-empty identifiers and non-empty arrays. Failures report the dotted
//!    path of the offending field, e.g. `accounts[0].owners`.

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

/// A mandatory field decoded but was empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyField {
    /// Dotted path from the payload root.
    pub path: String,
}

impl EmptyField {
    /// Report `path` as empty.
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    fn within(self, parent: &str) -> Self {
        Self {
            path: format!("{parent}.{}", self.path),
        }
    }
}

/// An upstream payload could not be shaped into its output DTO.
#[derive(Error, Debug)]
pub enum ShapingError {
    /// The payload did not decode into the target type.
    #[error("upstream {target} payload did not decode: {source}")]
    Decode {
        /// DTO being produced.
        target: &'static str,
        /// Underlying decoder error.
        #[source]
        source: serde_json::Error,
    },

    /// A mandatory field was present but empty.
    #[error("upstream {target} payload has empty mandatory field {path}")]
    EmptyField {
        /// DTO being produced.
        target: &'static str,
        /// Dotted path of the field.
        path: String,
    },
}

/// An output DTO with post-decode invariants.
pub trait Shape {
    /// Name used in error reports and logs.
    const NAME: &'static str;

    /// Verify the invariants `serde` cannot express.
    fn check(&self) -> Result<(), EmptyField> {
        Ok(())
    }
}

/// Decode `raw` into `T` and verify it.
///
/// # Errors
///
/// [`ShapingError::Decode`] when a mandatory field is missing or mistyped,
/// [`ShapingError::EmptyField`] when one is present but empty.
pub fn shape<T>(raw: Value) -> Result<T, ShapingError>
where
    T: DeserializeOwned + Shape,
{
    let value: T = serde_json::from_value(raw).map_err(|source| ShapingError::Decode {
        target: T::NAME,
        source,
    })?;
    value.check().map_err(|e| ShapingError::EmptyField {
        target: T::NAME,
        path: e.path,
    })?;
    Ok(value)
}

// -- Check helpers ------------------------------------------------------------

/// Fail when `value` is empty or whitespace.
pub fn non_empty_str(path: &str, value: &str) -> Result<(), EmptyField> {
    if value.trim().is_empty() {
        Err(EmptyField::new(path))
    } else {
        Ok(())
    }
}

/// Fail when `items` is empty.
pub fn non_empty<T>(path: &str, items: &[T]) -> Result<(), EmptyField> {
    if items.is_empty() {
        Err(EmptyField::new(path))
    } else {
        Ok(())
    }
}

/// Run `check` on every element, prefixing failures with `path[i]`.
pub fn each<T>(
    path: &str,
    items: &[T],
    check: impl Fn(&T) -> Result<(), EmptyField>,
) -> Result<(), EmptyField> {
    for (i, item) in items.iter().enumerate() {
        check(item).map_err(|e| e.within(&format!("{path}[{i}]")))?;
    }
    Ok(())
}

/// Prefix a nested object's failure with `path`.
pub fn nested(path: &str, result: Result<(), EmptyField>) -> Result<(), EmptyField> {
    result.map_err(|e| e.within(path))
}
