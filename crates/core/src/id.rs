//! Strongly-typed identifiers used across the domain.
//!
//! Identifiers are short, human-readable strings: a fixed prefix followed by
//! eight upper-case hex characters taken from a random UUID (e.g. `QTE-1A2B3C4D`).

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Identifier of a customer record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(String);

/// Identifier of a saved quote.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuoteId(String);

const SUFFIX_LEN: usize = 8;

macro_rules! impl_prefixed_id {
    ($t:ty, $name:literal, $prefix:literal) => {
        impl $t {
            pub const PREFIX: &'static str = $prefix;

            /// Create a new random identifier.
            ///
            /// Prefer passing IDs explicitly in tests for determinism.
            pub fn new() -> Self {
                Self::from_uuid(Uuid::new_v4())
            }

            /// Derive an identifier from the first eight hex digits of `uuid`.
            pub fn from_uuid(uuid: Uuid) -> Self {
                let hex = uuid.simple().to_string().to_uppercase();
                Self(format!("{}{}", $prefix, &hex[..SUFFIX_LEN]))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Default for $t {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<$t> for String {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let suffix = s.strip_prefix($prefix).ok_or_else(|| {
                    DomainError::invalid_id(format!("{}: expected prefix {:?}", $name, $prefix))
                })?;
                if suffix.is_empty() || !suffix.chars().all(|c| c.is_ascii_alphanumeric()) {
                    return Err(DomainError::invalid_id(format!(
                        "{}: suffix must be non-empty and alphanumeric",
                        $name
                    )));
                }
                Ok(Self(s.to_string()))
            }
        }
    };
}

impl_prefixed_id!(CustomerId, "CustomerId", "CUST-");
impl_prefixed_id!(QuoteId, "QuoteId", "QTE-");
