//! # Query Schemas
//!
//! One schema type per route. Each lists the parameters it accepts in
//! [`FromQuery::FIELDS`]; anything else is rejected. Numbers are coerced
//! from their string form, dates accept `YYYY-MM-DD` or an RFC 3339
//! timestamp (whose calendar date is used).
//!
//! | Schema                | Route                              | Fields |
//! |-----------------------|------------------------------------|--------|
//! | [`TokenQuery`]        | `/plaid/token`                     | `institution_id`, `initial_products` |
//! | [`InstitutionsQuery`] | `/plaid/institutions`              | `offset`, `count` |
//! | [`AccessTokenQuery`]  | identity, item, holdings           | `access_token` |
//! | [`TransactionsQuery`] | `/plaid/transactions/get`          | `access_token`, `start_date`, `end_date` |

use chrono::{DateTime, Days, NaiveDate};

use crate::environment::PlaidEnvironment;
use crate::identity::AccessToken;
use crate::product::Product;
use crate::validation::{QueryParams, ValidationError, Violation};

/// Default page size for institution listings.
pub const DEFAULT_INSTITUTION_COUNT: u32 = 10;

/// Largest page size Plaid accepts for institution listings.
pub const MAX_INSTITUTION_COUNT: u32 = 500;

/// Request-independent inputs to validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryContext {
    /// Environment whose access-token prefix is accepted.
    pub environment: PlaidEnvironment,
    /// Calendar date used to fill in omitted transaction dates.
    pub today: NaiveDate,
}

/// A schema that can be built from raw query parameters.
pub trait FromQuery: Sized {
    /// Whitelisted parameter names.
    const FIELDS: &'static [&'static str];

    /// Validate `params` and build the schema, reporting every violation.
    fn from_query(params: &QueryParams, ctx: &QueryContext) -> Result<Self, ValidationError>;
}

/// `GET /plaid/token` parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenQuery {
    pub institution_id: String,
    /// Deduplicated, in first-seen order.
    pub initial_products: Vec<Product>,
}

impl FromQuery for TokenQuery {
    const FIELDS: &'static [&'static str] = &["institution_id", "initial_products"];

    fn from_query(params: &QueryParams, _ctx: &QueryContext) -> Result<Self, ValidationError> {
        let mut violations = Vec::new();
        params.reject_unknown(Self::FIELDS, &mut violations);

        let institution_id = required_text(params, "institution_id", &mut violations);
        let initial_products = products(params, "initial_products", &mut violations);

        finish(violations)?;
        Ok(Self {
            institution_id: institution_id.unwrap_or_default(),
            initial_products,
        })
    }
}

/// `GET /plaid/institutions` parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstitutionsQuery {
    pub count: u32,
    pub offset: u32,
}

impl FromQuery for InstitutionsQuery {
    const FIELDS: &'static [&'static str] = &["offset", "count"];

    fn from_query(params: &QueryParams, _ctx: &QueryContext) -> Result<Self, ValidationError> {
        let mut violations = Vec::new();
        params.reject_unknown(Self::FIELDS, &mut violations);

        let count = integer(params, "count", 1, MAX_INSTITUTION_COUNT, &mut violations);
        let offset = integer(params, "offset", 0, u32::MAX, &mut violations);

        finish(violations)?;
        Ok(Self {
            count: count.unwrap_or(DEFAULT_INSTITUTION_COUNT),
            offset: offset.unwrap_or(0),
        })
    }
}

/// Parameters of routes that only take an access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessTokenQuery {
    pub access_token: AccessToken,
}

impl FromQuery for AccessTokenQuery {
    const FIELDS: &'static [&'static str] = &["access_token"];

    fn from_query(params: &QueryParams, ctx: &QueryContext) -> Result<Self, ValidationError> {
        let mut violations = Vec::new();
        params.reject_unknown(Self::FIELDS, &mut violations);

        let access_token = access_token(params, ctx, &mut violations);

        match (finish(violations), access_token) {
            (Ok(()), Some(access_token)) => Ok(Self { access_token }),
            (Err(e), _) => Err(e),
            (Ok(()), None) => Err(ValidationError::single("access_token", "is required")),
        }
    }
}

/// `GET /plaid/transactions/get` parameters with defaults resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionsQuery {
    pub access_token: AccessToken,
    /// Defaults to the day before [`QueryContext::today`].
    pub start_date: NaiveDate,
    /// Defaults to [`QueryContext::today`].
    pub end_date: NaiveDate,
}

impl FromQuery for TransactionsQuery {
    const FIELDS: &'static [&'static str] = &["access_token", "start_date", "end_date"];

    fn from_query(params: &QueryParams, ctx: &QueryContext) -> Result<Self, ValidationError> {
        let mut violations = Vec::new();
        params.reject_unknown(Self::FIELDS, &mut violations);

        let access_token = access_token(params, ctx, &mut violations);
        let start = date(params, "start_date", &mut violations);
        let end = date(params, "end_date", &mut violations);

        let dates_parsed = !violations
            .iter()
            .any(|v| v.field == "start_date" || v.field == "end_date");

        let (default_start, default_end) = default_date_range(ctx.today);
        let start_date = start.unwrap_or(default_start);
        let end_date = end.unwrap_or(default_end);
        if dates_parsed && start_date > end_date {
            violations.push(Violation::new(
                "start_date",
                format!("must not be after end_date ({end_date})"),
            ));
        }

        match (finish(violations), access_token) {
            (Ok(()), Some(access_token)) => Ok(Self {
                access_token,
                start_date,
                end_date,
            }),
            (Err(e), _) => Err(e),
            (Ok(()), None) => Err(ValidationError::single("access_token", "is required")),
        }
    }
}

/// Yesterday and today relative to `today`.
pub fn default_date_range(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let yesterday = today.checked_sub_days(Days::new(1)).unwrap_or(today);
    (yesterday, today)
}

// -- Field readers ------------------------------------------------------------

fn finish(violations: Vec<Violation>) -> Result<(), ValidationError> {
    match ValidationError::from_violations(violations) {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

fn required_text(
    params: &QueryParams,
    name: &str,
    violations: &mut Vec<Violation>,
) -> Option<String> {
    match params.single(name, violations) {
        Some(v) if !v.trim().is_empty() => Some(v.to_string()),
        Some(_) => {
            violations.push(Violation::new(name, "should not be empty"));
            None
        }
        None if params.all(name).next().is_none() => {
            violations.push(Violation::new(name, "is required"));
            None
        }
        None => None,
    }
}

fn products(params: &QueryParams, name: &str, violations: &mut Vec<Violation>) -> Vec<Product> {
    let mut out: Vec<Product> = Vec::new();
    let mut any = false;
    for raw in params.all(name).flat_map(|v| v.split(',')) {
        let raw = raw.trim();
        if raw.is_empty() {
            continue;
        }
        any = true;
        match raw.parse::<Product>() {
            Ok(p) if !out.contains(&p) => out.push(p),
            Ok(_) => {}
            Err(e) => violations.push(Violation::new(name, e.to_string())),
        }
    }
    if !any {
        violations.push(Violation::new(name, "should not be empty"));
    }
    out
}

fn integer(
    params: &QueryParams,
    name: &str,
    min: u32,
    max: u32,
    violations: &mut Vec<Violation>,
) -> Option<u32> {
    let raw = params.single(name, violations)?;
    let Ok(n) = raw.trim().parse::<i64>() else {
        violations.push(Violation::new(name, "must be an integer"));
        return None;
    };
    if n < i64::from(min) || n > i64::from(max) {
        let message = if max == u32::MAX {
            format!("must not be less than {min}")
        } else {
            format!("must be between {min} and {max}")
        };
        violations.push(Violation::new(name, message));
        return None;
    }
    u32::try_from(n).ok()
}

fn date(params: &QueryParams, name: &str, violations: &mut Vec<Violation>) -> Option<NaiveDate> {
    let raw = params.single(name, violations)?;
    match parse_iso_date(raw) {
        Some(d) => Some(d),
        None => {
            violations.push(Violation::new(
                name,
                crate::error::FieldError::InvalidDate(raw.to_string()).to_string(),
            ));
            None
        }
    }
}

fn access_token(
    params: &QueryParams,
    ctx: &QueryContext,
    violations: &mut Vec<Violation>,
) -> Option<AccessToken> {
    let raw = required_text(params, "access_token", violations)?;
    match AccessToken::parse(raw, ctx.environment) {
        Ok(token) => Some(token),
        Err(e) => {
            violations.push(Violation::new("access_token", e.to_string()));
            None
        }
    }
}

/// Parse `YYYY-MM-DD`, or an RFC 3339 timestamp reduced to its date.
pub fn parse_iso_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    raw.parse::<NaiveDate>()
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOKEN: &str = "access-sandbox-8ab976e6-64bc-4b38-98f7-731e7a349970";

    fn ctx() -> QueryContext {
        QueryContext {
            environment: PlaidEnvironment::Sandbox,
            today: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        }
    }

    fn params(pairs: &[(&str, &str)]) -> QueryParams {
        QueryParams::new(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    // ── TokenQuery ───────────────────────────────────────────────

    #[test]
    fn token_query_accepts_comma_separated_products() {
        let q = TokenQuery::from_query(
            &params(&[
                ("institution_id", "ins_1"),
                ("initial_products", "transactions,auth"),
            ]),
            &ctx(),
        )
        .unwrap();
        assert_eq!(q.institution_id, "ins_1");
        assert_eq!(
            q.initial_products,
            vec![Product::Transactions, Product::Auth]
        );
    }

    #[test]
    fn token_query_accepts_repeated_product_keys_and_dedupes() {
        let q = TokenQuery::from_query(
            &params(&[
                ("institution_id", "ins_1"),
                ("initial_products", "identity"),
                ("initial_products", "identity,investments"),
            ]),
            &ctx(),
        )
        .unwrap();
        assert_eq!(
            q.initial_products,
            vec![Product::Identity, Product::Investments]
        );
    }

    #[test]
    fn token_query_reports_every_problem() {
        let err = TokenQuery::from_query(
            &params(&[("initial_products", "transactions,crypto"), ("debug", "1")]),
            &ctx(),
        )
        .unwrap_err();
        let fields = err.fields();
        assert!(fields.contains(&"debug"));
        assert!(fields.contains(&"institution_id"));
        assert!(fields.contains(&"initial_products"));
    }

    #[test]
    fn token_query_rejects_blank_institution() {
        let err = TokenQuery::from_query(
            &params(&[("institution_id", "  "), ("initial_products", "auth")]),
            &ctx(),
        )
        .unwrap_err();
        assert_eq!(err.violations()[0].message, "should not be empty");
    }

    #[test]
    fn token_query_requires_products() {
        let err = TokenQuery::from_query(
            &params(&[("institution_id", "ins_1"), ("initial_products", ",")]),
            &ctx(),
        )
        .unwrap_err();
        assert_eq!(err.fields(), vec!["initial_products"]);
    }

    // ── InstitutionsQuery ────────────────────────────────────────

    #[test]
    fn institutions_query_defaults() {
        let q = InstitutionsQuery::from_query(&params(&[]), &ctx()).unwrap();
        assert_eq!(q.count, DEFAULT_INSTITUTION_COUNT);
        assert_eq!(q.offset, 0);
    }

    #[test]
    fn institutions_query_coerces_numbers() {
        let q = InstitutionsQuery::from_query(&params(&[("count", "25"), ("offset", "50")]), &ctx())
            .unwrap();
        assert_eq!(q.count, 25);
        assert_eq!(q.offset, 50);
    }

    #[test]
    fn institutions_query_rejects_non_numeric_and_out_of_range() {
        let err = InstitutionsQuery::from_query(
            &params(&[("count", "lots"), ("offset", "-1")]),
            &ctx(),
        )
        .unwrap_err();
        assert_eq!(err.fields(), vec!["count", "offset"]);
        assert_eq!(err.violations()[0].message, "must be an integer");

        let err = InstitutionsQuery::from_query(&params(&[("count", "501")]), &ctx()).unwrap_err();
        assert!(err.violations()[0].message.contains("between 1 and 500"));

        let err = InstitutionsQuery::from_query(&params(&[("count", "0")]), &ctx()).unwrap_err();
        assert_eq!(err.fields(), vec!["count"]);
    }

    #[test]
    fn institutions_query_rejects_unknown_parameter() {
        let err = InstitutionsQuery::from_query(&params(&[("country", "US")]), &ctx()).unwrap_err();
        assert_eq!(err.to_string(), "country should not exist");
    }

    // ── AccessTokenQuery ─────────────────────────────────────────

    #[test]
    fn access_token_query_accepts_valid_token() {
        let q = AccessTokenQuery::from_query(&params(&[("access_token", TOKEN)]), &ctx()).unwrap();
        assert_eq!(q.access_token.as_str(), TOKEN);
    }

    #[test]
    fn access_token_query_rejects_malformed_token() {
        let err = AccessTokenQuery::from_query(&params(&[("access_token", "abc")]), &ctx())
            .unwrap_err();
        assert_eq!(err.fields(), vec!["access_token"]);
        assert!(err.violations()[0].message.contains("access-sandbox-<uuid>"));
    }

    #[test]
    fn access_token_query_requires_token() {
        let err = AccessTokenQuery::from_query(&params(&[]), &ctx()).unwrap_err();
        assert_eq!(err.to_string(), "access_token is required");
    }

    #[test]
    fn access_token_query_rejects_repeated_token() {
        let err = AccessTokenQuery::from_query(
            &params(&[("access_token", TOKEN), ("access_token", TOKEN)]),
            &ctx(),
        )
        .unwrap_err();
        assert_eq!(err.violations().len(), 1);
        assert_eq!(err.violations()[0].message, "must be supplied at most once");
    }

    // ── TransactionsQuery ────────────────────────────────────────

    #[test]
    fn transactions_query_defaults_to_yesterday_and_today() {
        let q = TransactionsQuery::from_query(&params(&[("access_token", TOKEN)]), &ctx()).unwrap();
        assert_eq!(q.start_date, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert_eq!(q.end_date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }

    #[test]
    fn transactions_query_accepts_explicit_dates() {
        let q = TransactionsQuery::from_query(
            &params(&[
                ("access_token", TOKEN),
                ("start_date", "2024-01-01"),
                ("end_date", "2024-01-31T23:00:00Z"),
            ]),
            &ctx(),
        )
        .unwrap();
        assert_eq!(q.start_date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(q.end_date, NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
    }

    #[test]
    fn transactions_query_rejects_bad_dates_and_token_together() {
        let err = TransactionsQuery::from_query(
            &params(&[
                ("access_token", "access-sandbox-nope"),
                ("start_date", "yesterday"),
                ("end_date", "2024-13-01"),
            ]),
            &ctx(),
        )
        .unwrap_err();
        assert_eq!(err.fields(), vec!["access_token", "start_date", "end_date"]);
    }

    #[test]
    fn transactions_query_rejects_inverted_range() {
        let err = TransactionsQuery::from_query(
            &params(&[
                ("access_token", TOKEN),
                ("start_date", "2024-02-10"),
                ("end_date", "2024-02-01"),
            ]),
            &ctx(),
        )
        .unwrap_err();
        assert_eq!(err.fields(), vec!["start_date"]);
    }

    #[test]
    fn transactions_query_malformed_start_skips_range_check() {
        let err = TransactionsQuery::from_query(
            &params(&[
                ("access_token", TOKEN),
                ("start_date", "not-a-date"),
                ("end_date", "2024-01-01"),
            ]),
            &ctx(),
        )
        .unwrap_err();
        assert_eq!(err.violations().len(), 1);
        assert!(err.violations()[0].message.contains("ISO 8601"));
    }

    #[test]
    fn transactions_query_malformed_end_skips_range_check() {
        let err = TransactionsQuery::from_query(
            &params(&[
                ("access_token", TOKEN),
                ("start_date", "2024-03-05"),
                ("end_date", "yesterday"),
            ]),
            &ctx(),
        )
        .unwrap_err();
        assert_eq!(err.fields(), vec!["end_date"]);
    }

    #[test]
    fn transactions_query_start_after_default_end_rejected() {
        let err = TransactionsQuery::from_query(
            &params(&[("access_token", TOKEN), ("start_date", "2024-03-05")]),
            &ctx(),
        )
        .unwrap_err();
        assert_eq!(err.fields(), vec!["start_date"]);
    }

    #[test]
    fn default_range_crosses_year_boundary() {
        let (start, end) = default_date_range(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
    }

    #[test]
    fn parse_iso_date_handles_offsets() {
        assert_eq!(
            parse_iso_date("2024-06-30T22:00:00-05:00"),
            NaiveDate::from_ymd_opt(2024, 6, 30)
        );
        assert_eq!(parse_iso_date("06/30/2024"), None);
    }
}
