//! # Validation Primitives
//!
//! [`QueryParams`] holds the raw, ordered key/value pairs of a query string.
//! Schema types in [`crate::query`] read fields out of it and record every
//! problem as a [`Violation`]. The collected violations become one
//! [`ValidationError`] so a caller sees all offending fields at once.

use serde::Serialize;

/// One offending field and the reason it was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Query parameter name.
    pub field: String,
    /// Human-readable reason.
    pub message: String,
}

impl Violation {
    /// Build a violation for `field`.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.field, self.message)
    }
}

/// A request failed validation. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    violations: Vec<Violation>,
}

impl ValidationError {
    /// Wrap a non-empty list of violations. Returns `None` when the list is
    /// empty, i.e. validation passed.
    pub fn from_violations(violations: Vec<Violation>) -> Option<Self> {
        if violations.is_empty() {
            None
        } else {
            Some(Self { violations })
        }
    }

    /// Build an error carrying exactly one violation.
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            violations: vec![Violation::new(field, message)],
        }
    }

    /// The violations, in the order they were detected.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Names of the offending fields, in detection order.
    pub fn fields(&self) -> Vec<&str> {
        self.violations.iter().map(|v| v.field.as_str()).collect()
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self.violations.iter().map(ToString::to_string).collect();
        f.write_str(&parts.join("; "))
    }
}

impl std::error::Error for ValidationError {}

/// Raw query-string parameters in arrival order. Keys may repeat.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Wrap decoded key/value pairs.
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }

    /// Every value supplied for `name`, in arrival order.
    pub fn all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.pairs
            .iter()
            .filter(move |(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// The single value supplied for `name`.
    ///
    /// Records a violation and returns `None` when the parameter is repeated.
    pub fn single(&self, name: &str, violations: &mut Vec<Violation>) -> Option<&str> {
        let mut values = self
            .pairs
            .iter()
            .filter(|(k, _)| k == name)
            .map(|(_, v)| v.as_str());
        let first = values.next()?;
        if values.next().is_some() {
            violations.push(Violation::new(name, "must be supplied at most once"));
            return None;
        }
        Some(first)
    }

    /// Record a violation for every parameter whose name is not in `allowed`.
    ///
    /// Each unknown name is reported once even when repeated.
    pub fn reject_unknown(&self, allowed: &[&str], violations: &mut Vec<Violation>) {
        let mut seen: Vec<&str> = Vec::new();
        for (key, _) in &self.pairs {
            if !allowed.contains(&key.as_str()) && !seen.contains(&key.as_str()) {
                seen.push(key.as_str());
                violations.push(Violation::new(key.as_str(), "should not exist"));
            }
        }
    }
}

impl From<Vec<(String, String)>> for QueryParams {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self::new(pairs)
    }
}
