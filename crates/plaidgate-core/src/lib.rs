//! # plaidgate-core: Foundational Types for the Plaid Gateway
//!
//! Everything in this crate is pure: no I/O, no async, no HTTP. The API
//! crate wires these pieces into request handling, the client crate reuses
//! the identifier newtypes.
//!
//! ## Layout
//!
//! | Module          | Concern                                                  |
//! |-----------------|----------------------------------------------------------|
//! | [`environment`] | Upstream environment selector (`sandbox`, `development`) |
//! | [`identity`]    | [`AccessToken`] newtype with format validation           |
//! | [`product`]     | Closed [`Product`] enumeration                           |
//! | [`validation`]  | Violation lists and raw query parameters                 |
//! | [`query`]       | Per-route query schemas implementing [`FromQuery`]       |
//! | [`dto`]         | Output shapes served to API consumers                    |
//! | [`shape`]       | Upstream JSON → DTO conversion with mandatory-field checks |
//!
//! ## Design Principles
//!
//! 1. **Validate at construction.** An [`AccessToken`] or [`Product`] value
//!    cannot exist in an invalid state.
//!
//! 2. **Accumulate, don't short-circuit.** Query validation reports every
//!    offending field in one [`ValidationError`], not just the first.
//!
//! 3. **Whitelist on output.** DTOs model only the fields served to
//!    consumers; upstream-only fields such as `request_id` are read for
//!    logging but never serialized.

pub mod dto;
pub mod environment;
pub mod error;
pub mod identity;
pub mod product;
pub mod query;
pub mod shape;
pub mod validation;

pub use environment::PlaidEnvironment;
pub use error::FieldError;
pub use identity::AccessToken;
pub use product::Product;
pub use query::{
    AccessTokenQuery, FromQuery, InstitutionsQuery, QueryContext, TokenQuery, TransactionsQuery,
};
pub use shape::{shape, Shape, ShapingError};
pub use validation::{QueryParams, ValidationError, Violation};
