//! # Output DTOs
//!
//! The shapes served to API consumers. Each mirrors the upstream record it
//! is decoded from, minus the fields that stay internal:
//!
//! - `request_id` on every top-level record is decoded (handlers log it)
//!   but never serialized.
//! - `oauth` and `routing_numbers` on institutions, and `error` on item
//!   metadata, are likewise read-only.
//!
//! Nullable upstream scalars are `Option` and serialize as `null`.

pub mod account;
pub mod identity;
pub mod institution;
pub mod investment;
pub mod item;
pub mod token;
pub mod transaction;

pub use account::{Account, Address, AddressData, Balance, Email, Owner, PhoneNumber};
pub use identity::IdentityRecord;
pub use institution::{Institution, InstitutionList};
pub use investment::{Holding, InvestmentsRecord, Security};
pub use item::{ItemMetadata, ItemRecord, ItemStatus, LastWebhook, TransactionsStatus};
pub use token::AccessTokenResponse;
pub use transaction::{Location, PaymentMeta, Transaction, TransactionsRecord};
