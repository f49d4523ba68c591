//! Route modules, one per upstream service.

pub mod plaid;
