//! Plaid product names accepted by `initial_products`.

use serde::{Deserialize, Serialize};

use crate::error::FieldError;

/// A Plaid product an Item can be initialised with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Product {
    Assets,
    Auth,
    Balance,
    Identity,
    IdentityVerification,
    Investments,
    Liabilities,
    PaymentInitiation,
    Transactions,
    CreditDetails,
    Income,
    IncomeVerification,
    DepositSwitch,
    StandingOrders,
    Transfer,
    Employment,
    RecurringTransactions,
}

impl Product {
    /// Every known product, in declaration order.
    pub const ALL: [Product; 17] = [
        Self::Assets,
        Self::Auth,
        Self::Balance,
        Self::Identity,
        Self::IdentityVerification,
        Self::Investments,
        Self::Liabilities,
        Self::PaymentInitiation,
        Self::Transactions,
        Self::CreditDetails,
        Self::Income,
        Self::IncomeVerification,
        Self::DepositSwitch,
        Self::StandingOrders,
        Self::Transfer,
        Self::Employment,
        Self::RecurringTransactions,
    ];

    /// Wire name of the product.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Assets => "assets",
            Self::Auth => "auth",
            Self::Balance => "balance",
            Self::Identity => "identity",
            Self::IdentityVerification => "identity_verification",
            Self::Investments => "investments",
            Self::Liabilities => "liabilities",
            Self::PaymentInitiation => "payment_initiation",
            Self::Transactions => "transactions",
            Self::CreditDetails => "credit_details",
            Self::Income => "income",
            Self::IncomeVerification => "income_verification",
            Self::DepositSwitch => "deposit_switch",
            Self::StandingOrders => "standing_orders",
            Self::Transfer => "transfer",
            Self::Employment => "employment",
            Self::RecurringTransactions => "recurring_transactions",
        }
    }
}

impl std::fmt::Display for Product {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Product {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| FieldError::UnknownProduct(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_str_matches_as_str_for_every_variant() {
        for product in Product::ALL {
            assert_eq!(product.as_str().parse::<Product>().unwrap(), product);
        }
    }

    #[test]
    fn serde_name_matches_as_str() {
        for product in Product::ALL {
            let json = serde_json::to_value(product).unwrap();
            assert_eq!(json, serde_json::Value::String(product.as_str().into()));
        }
    }

    #[test]
    fn unknown_product_rejected() {
        let err = "crypto".parse::<Product>().unwrap_err();
        assert_eq!(err, FieldError::UnknownProduct("crypto".into()));
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert!("Transactions".parse::<Product>().is_err());
    }
}
