//! `lapis-core`: shared building blocks for the quoting tool.
//!
//! This crate contains **pure domain** primitives (no file IO, no terminal concerns).

pub mod entity;
pub mod error;
pub mod id;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{CustomerId, QuoteId};
