//! Investment holdings and securities.

use serde::{Deserialize, Serialize};

use crate::dto::{Account, ItemMetadata};
use crate::shape::{each, nested, non_empty, non_empty_str, EmptyField, Shape};

/// A position in one security within one account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    pub account_id: String,
    pub security_id: String,
    #[serde(default)]
    pub cost_basis: Option<f64>,
    #[serde(default)]
    pub institution_price: Option<f64>,
    #[serde(default)]
    pub institution_price_as_of: Option<String>,
    #[serde(default)]
    pub institution_value: Option<f64>,
    #[serde(default)]
    pub iso_currency_code: Option<String>,
    #[serde(default)]
    pub quantity: Option<f64>,
    #[serde(default)]
    pub unofficial_currency_code: Option<String>,
}

impl Shape for Holding {
    const NAME: &'static str = "holding";

    fn check(&self) -> Result<(), EmptyField> {
        non_empty_str("account_id", &self.account_id)
    }
}

/// A tradable instrument referenced by holdings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Security {
    pub security_id: String,
    #[serde(default)]
    pub close_price: Option<f64>,
    #[serde(default)]
    pub close_price_as_of: Option<String>,
    #[serde(default)]
    pub cusip: Option<String>,
    #[serde(default)]
    pub institution_id: Option<String>,
    #[serde(default)]
    pub institution_security_id: Option<String>,
    #[serde(default)]
    pub is_cash_equivalent: Option<bool>,
    #[serde(default)]
    pub isin: Option<String>,
    #[serde(default)]
    pub iso_currency_code: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub proxy_security_id: Option<String>,
    #[serde(default)]
    pub sedol: Option<String>,
    #[serde(default)]
    pub ticker_symbol: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub unofficial_currency_code: Option<String>,
}

/// `GET /plaid/investments/holdings/get` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentsRecord {
    pub accounts: Vec<Account>,
    pub holdings: Vec<Holding>,
    pub securities: Vec<Security>,
    pub item: ItemMetadata,
    #[serde(default, skip_serializing)]
    pub request_id: Option<String>,
}

impl Shape for InvestmentsRecord {
    const NAME: &'static str = "investments";

    fn check(&self) -> Result<(), EmptyField> {
        non_empty("accounts", &self.accounts)?;
        each("accounts", &self.accounts, Shape::check)?;
        each("holdings", &self.holdings, Shape::check)?;
        nested("item", self.item.check())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::{shape, ShapingError};
    use serde_json::{json, Value};

    fn holdings_json() -> Value {
        json!({
            "accounts": [{
                "account_id": "acc_inv",
                "balances": {"available": null, "current": 320.76, "iso_currency_code": "USD"},
                "name": "Plaid IRA",
                "subtype": "ira",
                "type": "investment"
            }],
            "holdings": [{
                "account_id": "acc_inv",
                "security_id": "sec_1",
                "cost_basis": 1,
                "institution_price": 1,
                "institution_price_as_of": null,
                "institution_value": 0.01,
                "iso_currency_code": "USD",
                "quantity": 0.01,
                "unofficial_currency_code": null
            }],
            "securities": [{
                "security_id": "sec_1",
                "close_price": 0.011,
                "ticker_symbol": "NHX105509",
                "type": "etf",
                "is_cash_equivalent": false
            }],
            "item": {"item_id": "item_1", "available_products": ["balance"], "billed_products": ["investments"]},
            "request_id": "24MxmGFZz89Xg2f"
        })
    }

    #[test]
    fn shapes_holdings() {
        let record: InvestmentsRecord = shape(holdings_json()).unwrap();
        assert_eq!(record.securities[0].kind.as_deref(), Some("etf"));
        let out = serde_json::to_value(&record).unwrap();
        assert_eq!(out["holdings"][0]["security_id"], "sec_1");
        assert!(out.get("request_id").is_none());
    }

    #[test]
    fn empty_holdings_allowed_but_not_empty_accounts() {
        let mut raw = holdings_json();
        raw["holdings"] = json!([]);
        assert!(shape::<InvestmentsRecord>(raw.clone()).is_ok());

        raw["accounts"] = json!([]);
        assert!(matches!(
            shape::<InvestmentsRecord>(raw).unwrap_err(),
            ShapingError::EmptyField { .. }
        ));
    }

    #[test]
    fn holding_without_security_rejected() {
        let mut raw = holdings_json();
        raw["holdings"][0].as_object_mut().unwrap().remove("security_id");
        assert!(matches!(
            shape::<InvestmentsRecord>(raw).unwrap_err(),
            ShapingError::Decode { .. }
        ));
    }
}
