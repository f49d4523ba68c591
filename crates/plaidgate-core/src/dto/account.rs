//! Accounts, balances and account owners.

use serde::{Deserialize, Serialize};

use crate::shape::{each, non_empty, non_empty_str, EmptyField, Shape};

/// Balance fields for one account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Balance {
    pub available: Option<f64>,
    pub current: Option<f64>,
    #[serde(default)]
    pub iso_currency_code: Option<String>,
    #[serde(default)]
    pub limit: Option<f64>,
    #[serde(default)]
    pub unofficial_currency_code: Option<String>,
}

/// Components of a postal address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressData {
    pub city: Option<String>,
    pub street: Option<String>,
    pub country: Option<String>,
    pub postal_code: Option<String>,
    pub region: Option<String>,
}

/// An address the institution associates with an owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub data: AddressData,
    #[serde(default)]
    pub primary: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneNumber {
    pub data: String,
    #[serde(default)]
    pub primary: Option<bool>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email {
    pub data: String,
    #[serde(default)]
    pub primary: Option<bool>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

/// Identity data the institution holds for an account owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub names: Vec<String>,
    pub addresses: Vec<Address>,
    pub phone_numbers: Vec<PhoneNumber>,
    pub emails: Vec<Email>,
}

impl Shape for Owner {
    const NAME: &'static str = "owner";

    fn check(&self) -> Result<(), EmptyField> {
        non_empty("names", &self.names)?;
        non_empty("addresses", &self.addresses)?;
        non_empty("phone_numbers", &self.phone_numbers)?;
        non_empty("emails", &self.emails)
    }
}

/// A financial account attached to an Item.
///
/// `owners` is only populated by the identity endpoint and is omitted from
/// output when empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub account_id: String,
    pub balances: Balance,
    #[serde(default)]
    pub mask: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub official_name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub owners: Vec<Owner>,
    #[serde(default)]
    pub subtype: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

impl Account {
    /// Owners must be present and complete. Only identity records carry them.
    pub fn check_owners(&self) -> Result<(), EmptyField> {
        non_empty("owners", &self.owners)?;
        each("owners", &self.owners, Shape::check)
    }
}

impl Shape for Account {
    const NAME: &'static str = "account";

    fn check(&self) -> Result<(), EmptyField> {
        non_empty_str("account_id", &self.account_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::shape;
    use serde_json::json;

    fn account_json() -> serde_json::Value {
        json!({
            "account_id": "acc_1",
            "balances": {"available": 100.0, "current": 110.0, "iso_currency_code": "USD", "limit": null, "unofficial_currency_code": null},
            "mask": "0000",
            "name": "Plaid Checking",
            "official_name": "Plaid Gold Standard 0% Interest Checking",
            "subtype": "checking",
            "type": "depository",
            "verification_status": null
        })
    }

    #[test]
    fn decodes_account_and_drops_unknown_fields() {
        let account: Account = shape(account_json()).unwrap();
        assert_eq!(account.kind.as_deref(), Some("depository"));
        let out = serde_json::to_value(&account).unwrap();
        assert!(out.get("verification_status").is_none());
        assert!(out.get("owners").is_none());
        assert_eq!(out["type"], "depository");
    }

    #[test]
    fn blank_account_id_rejected() {
        let mut raw = account_json();
        raw["account_id"] = json!("");
        assert!(shape::<Account>(raw).is_err());
    }

    #[test]
    fn missing_balances_rejected() {
        let mut raw = account_json();
        raw.as_object_mut().unwrap().remove("balances");
        assert!(shape::<Account>(raw).is_err());
    }

    #[test]
    fn owner_requires_every_list() {
        let owner: Owner = serde_json::from_value(json!({
            "names": ["Alberta Charleson"],
            "addresses": [],
            "phone_numbers": [{"data": "1112223333", "primary": true, "type": "home"}],
            "emails": [{"data": "a@example.com", "primary": true, "type": "primary"}]
        }))
        .unwrap();
        assert_eq!(owner.check().unwrap_err().path, "addresses");
    }

    #[test]
    fn check_owners_requires_non_empty() {
        let account: Account = shape(account_json()).unwrap();
        assert_eq!(account.check_owners().unwrap_err().path, "owners");
    }
}
