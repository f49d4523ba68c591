//! Transaction history.

use serde::{Deserialize, Serialize};

use crate::dto::{Account, ItemMetadata};
use crate::shape::{each, nested, non_empty, non_empty_str, EmptyField, Shape};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(default)]
    pub store_number: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMeta {
    #[serde(default)]
    pub by_order_of: Option<String>,
    #[serde(default)]
    pub payee: Option<String>,
    #[serde(default)]
    pub payer: Option<String>,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub payment_processor: Option<String>,
    #[serde(default)]
    pub ppd_id: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub reference_number: Option<String>,
}

/// One posted or pending transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub transaction_id: String,
    pub account_id: String,
    pub amount: f64,
    /// Posting date, `YYYY-MM-DD`.
    pub date: String,
    pub pending: bool,
    #[serde(default)]
    pub iso_currency_code: Option<String>,
    #[serde(default)]
    pub unofficial_currency_code: Option<String>,
    pub category: Vec<String>,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub check_number: Option<String>,
    #[serde(default)]
    pub datetime: Option<String>,
    #[serde(default)]
    pub authorized_date: Option<String>,
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub merchant_name: Option<String>,
    #[serde(default)]
    pub payment_meta: Option<PaymentMeta>,
    #[serde(default)]
    pub payment_channel: Option<String>,
    #[serde(default)]
    pub pending_transaction_id: Option<String>,
    #[serde(default)]
    pub account_owner: Option<String>,
    #[serde(default)]
    pub transaction_code: Option<String>,
    #[serde(default)]
    pub transaction_type: Option<String>,
}

impl Shape for Transaction {
    const NAME: &'static str = "transaction";

    fn check(&self) -> Result<(), EmptyField> {
        non_empty_str("transaction_id", &self.transaction_id)?;
        non_empty_str("account_id", &self.account_id)?;
        non_empty("category", &self.category)
    }
}

/// `GET /plaid/transactions/get` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionsRecord {
    pub accounts: Vec<Account>,
    pub transactions: Vec<Transaction>,
    pub item: ItemMetadata,
    pub total_transactions: u64,
    #[serde(default, skip_serializing)]
    pub request_id: Option<String>,
}

impl Shape for TransactionsRecord {
    const NAME: &'static str = "transactions";

    fn check(&self) -> Result<(), EmptyField> {
        non_empty("accounts", &self.accounts)?;
        each("accounts", &self.accounts, Shape::check)?;
        non_empty("transactions", &self.transactions)?;
        each("transactions", &self.transactions, Shape::check)?;
        nested("item", self.item.check())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::{shape, ShapingError};
    use serde_json::{json, Value};

    fn transactions_json() -> Value {
        json!({
            "accounts": [{
                "account_id": "acc_1",
                "balances": {"available": 110, "current": 110, "iso_currency_code": "USD"},
                "type": "depository"
            }],
            "transactions": [{
                "transaction_id": "txn_1",
                "account_id": "acc_1",
                "amount": 2307.21,
                "date": "2024-02-29",
                "pending": false,
                "iso_currency_code": "USD",
                "category": ["Shops", "Computers and Electronics"],
                "location": {"city": "San Francisco", "lat": 37.77, "lon": -122.42},
                "name": "Apple Store",
                "payment_meta": {"payee": null, "reference_number": null},
                "payment_channel": "in store",
                "personal_finance_category": {"primary": "GENERAL_MERCHANDISE"}
            }],
            "item": {"item_id": "item_1", "available_products": ["balance"], "billed_products": ["transactions"]},
            "total_transactions": 1,
            "request_id": "45QSn"
        })
    }

    #[test]
    fn shapes_transactions() {
        let record: TransactionsRecord = shape(transactions_json()).unwrap();
        assert_eq!(record.total_transactions, 1);
        let out = serde_json::to_value(&record).unwrap();
        assert_eq!(out["transactions"][0]["location"]["city"], "San Francisco");
        assert!(out["transactions"][0]
            .get("personal_finance_category")
            .is_none());
        assert!(out.get("request_id").is_none());
    }

    #[test]
    fn empty_transaction_list_rejected() {
        let mut raw = transactions_json();
        raw["transactions"] = json!([]);
        raw["total_transactions"] = json!(0);
        match shape::<TransactionsRecord>(raw).unwrap_err() {
            ShapingError::EmptyField { path, .. } => assert_eq!(path, "transactions"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn empty_category_rejected() {
        let mut raw = transactions_json();
        raw["transactions"][0]["category"] = json!([]);
        match shape::<TransactionsRecord>(raw).unwrap_err() {
            ShapingError::EmptyField { path, .. } => assert_eq!(path, "transactions[0].category"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn missing_category_rejected() {
        let mut raw = transactions_json();
        raw["transactions"][0].as_object_mut().unwrap().remove("category");
        assert!(matches!(
            shape::<TransactionsRecord>(raw).unwrap_err(),
            ShapingError::Decode { .. }
        ));
    }

    #[test]
    fn transaction_missing_amount_rejected() {
        let mut raw = transactions_json();
        raw["transactions"][0].as_object_mut().unwrap().remove("amount");
        assert!(matches!(
            shape::<TransactionsRecord>(raw).unwrap_err(),
            ShapingError::Decode { target: "transactions", .. }
        ));
    }

    #[test]
    fn empty_accounts_rejected() {
        let mut raw = transactions_json();
        raw["accounts"] = json!([]);
        assert!(shape::<TransactionsRecord>(raw).is_err());
    }
}
