//! Customers domain module.
//!
//! This crate contains the customer record and its rules (validation, search
//! matching, project history, parked drafts), implemented purely as
//! deterministic domain logic (no IO, no storage).

pub mod customer;

pub use customer::{Address, ContactMethod, Customer, CustomerPatch, Preferences, ProjectRecord};
