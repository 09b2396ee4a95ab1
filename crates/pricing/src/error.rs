//! Rate catalog (configuration) errors.

use thiserror::Error;

pub type CatalogResult<T> = Result<T, CatalogError>;

/// A rate catalog is missing an entry the pricing formula consumes by name, or
/// holds a value outside its allowed range.
///
/// These are operator/configuration problems rather than user input problems,
/// so they are propagated to the caller untouched.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CatalogError {
    #[error("unknown location: {0:?}")]
    UnknownLocation(String),

    #[error("complexity level {level:?} missing from {table}")]
    MissingComplexityLevel { table: String, level: String },

    #[error("post-production stage {0:?} missing from catalog")]
    MissingPostProductionStage(String),

    #[error("multiplier {table}.{key} must be > 0 (got {value})")]
    NonPositiveMultiplier {
        table: String,
        key: String,
        value: f64,
    },

    #[error("{field} must be a fraction in [0, 1] (got {value})")]
    InvalidPercent { field: String, value: f64 },

    #[error("catalog defines no crew roles")]
    EmptyCrewRoles,

    #[error("unknown rate path: {0:?}")]
    UnknownRatePath(String),

    #[error("invalid value for {path}: {reason}")]
    InvalidRateValue { path: String, reason: String },
}
