//! Command implementations for the CLI.
//!
//! - draft: edit the working draft held in the session
//! - quote: price the draft, save and manage quotes
//! - rates: inspect and edit the rate catalog
//! - customer: customer records and the active customer
//! - export: HTML / CSV documents

pub mod customer;
pub mod draft;
pub mod export;
pub mod quote;
pub mod rates;
