//! Identity records.

use serde::{Deserialize, Serialize};

use crate::dto::{Account, ItemMetadata};
use crate::shape::{each, nested, non_empty, EmptyField, Shape};

/// `GET /plaid/identity/get` response: accounts with their owners.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentityRecord {
    pub accounts: Vec<Account>,
    pub item: ItemMetadata,
    #[serde(default, skip_serializing)]
    pub request_id: Option<String>,
}

impl Shape for IdentityRecord {
    const NAME: &'static str = "identity";

    fn check(&self) -> Result<(), EmptyField> {
        non_empty("accounts", &self.accounts)?;
        each("accounts", &self.accounts, |account| {
            account.check()?;
            account.check_owners()
        })?;
        nested("item", self.item.check())
    }
}
