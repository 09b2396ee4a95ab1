//! Rate catalog persistence.

use std::path::Path;

use lapis_pricing::RateCatalog;

use crate::error::StoreResult;
use crate::json_store::{read_json, write_json};

/// Load the persisted catalog, or the built-in defaults when none exists yet.
///
/// The loaded catalog is not validated; a missing entry surfaces as a
/// `CatalogError` when the engine consumes it.
pub fn load_rates(path: &Path) -> StoreResult<RateCatalog> {
    match read_json(path)? {
        Some(catalog) => Ok(catalog),
        None => {
            tracing::warn!(path = %path.display(), "rate catalog not found; using built-in defaults");
            Ok(RateCatalog::default())
        }
    }
}

/// Validate and overwrite the persisted catalog wholesale.
pub fn save_rates(path: &Path, catalog: &RateCatalog) -> StoreResult<()> {
    catalog.validate()?;
    write_json(path, catalog)?;
    tracing::info!(path = %path.display(), "rate catalog saved");
    Ok(())
}
