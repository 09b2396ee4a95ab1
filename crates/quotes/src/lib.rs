//! Quotes domain module.
//!
//! A quote is a frozen snapshot of a draft, its line items and its three
//! totals, plus a status. This crate holds the record and its patch rules
//! (no IO, no storage).

pub mod quote;

pub use quote::{NewQuote, Quote, QuotePatch, QuoteStatus, UNTITLED_PROJECT};
