//! Item metadata and status.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::shape::{nested, non_empty, non_empty_str, EmptyField, Shape};

/// Metadata about an Item, embedded in most upstream responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemMetadata {
    pub item_id: String,
    pub available_products: Vec<String>,
    pub billed_products: Vec<String>,
    #[serde(default)]
    pub institution_id: Option<String>,
    #[serde(default)]
    pub update_type: Option<String>,
    #[serde(default)]
    pub webhook: Option<String>,
    #[serde(default)]
    pub consent_expiration_time: Option<String>,
    #[serde(default, skip_serializing)]
    pub error: Option<Value>,
}

impl Shape for ItemMetadata {
    const NAME: &'static str = "item";

    fn check(&self) -> Result<(), EmptyField> {
        non_empty_str("item_id", &self.item_id)?;
        non_empty("available_products", &self.available_products)?;
        non_empty("billed_products", &self.billed_products)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionsStatus {
    #[serde(default)]
    pub last_successful_update: Option<String>,
    #[serde(default)]
    pub last_failed_update: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastWebhook {
    #[serde(default)]
    pub sent_at: Option<String>,
    #[serde(default)]
    pub code_sent: Option<String>,
}

/// Update status of an Item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStatus {
    #[serde(default)]
    pub transactions: Option<TransactionsStatus>,
    #[serde(default)]
    pub last_webhook: Option<LastWebhook>,
}

/// `GET /plaid/item/get` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub item: ItemMetadata,
    pub status: ItemStatus,
    #[serde(default, skip_serializing)]
    pub request_id: Option<String>,
}

impl Shape for ItemRecord {
    const NAME: &'static str = "item";

    fn check(&self) -> Result<(), EmptyField> {
        nested("item", self.item.check())
    }
}
