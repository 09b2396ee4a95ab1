//! Studio-side production variables.

use serde::{Deserialize, Serialize};

use lapis_core::{DomainError, DomainResult};

use crate::catalog::{Money, RateCatalog};
use crate::error::{CatalogError, CatalogResult};
use crate::labels::labeled_enum;

/// Upper bound of the contingency slider, in percent.
pub const MAX_CONTINGENCY_PERCENT: u8 = 20;

labeled_enum! {
    /// Props and set design level; selects a hard-coded cost band.
    pub enum PropsDesign {
        Basic => "basic",
        Custom => "custom",
        Elaborate => "elaborate",
    }
}

impl PropsDesign {
    /// Fixed (low, high) cost for this level.
    pub fn cost_band(self) -> (Money, Money) {
        match self {
            PropsDesign::Basic => (2_000_000, 3_000_000),
            PropsDesign::Custom => (3_000_000, 5_000_000),
            PropsDesign::Elaborate => (5_000_000, 8_000_000),
        }
    }
}

labeled_enum! {
    /// Expected amount of footage; scales editing effort only.
    pub enum FootageVolume {
        Low => "low",
        Standard => "standard",
        High => "high",
    }
}

impl FootageVolume {
    pub fn editing_factor(self) -> f64 {
        match self {
            FootageVolume::Low => 0.8,
            FootageVolume::Standard => 1.0,
            FootageVolume::High => 1.3,
        }
    }
}

/// Shoot parameters that drive production cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionVars {
    pub shooting_days: f64,
    /// Number of crew roles booked, taken in catalog order.
    pub crew_size: u32,
    /// Key into the catalog's `location` table.
    pub location: String,
    pub talent_count: u32,
    pub agency_markup: bool,
    pub props_design: PropsDesign,
    pub footage_volume: FootageVolume,
    /// Contingency in whole percent, 0..=20.
    pub contingency: u8,
}

impl Default for ProductionVars {
    fn default() -> Self {
        Self {
            shooting_days: 1.0,
            crew_size: 5,
            location: "none".to_string(),
            talent_count: 1,
            agency_markup: false,
            props_design: PropsDesign::Basic,
            footage_volume: FootageVolume::Standard,
            contingency: 10,
        }
    }
}

impl ProductionVars {
    /// Validate value ranges. Catalog lookups are checked by
    /// [`ProductionVars::check_against`].
    pub fn validate(&self) -> DomainResult<()> {
        if !self.shooting_days.is_finite() || self.shooting_days <= 0.0 {
            return Err(DomainError::validation("shooting_days must be > 0"));
        }
        if self.crew_size < 1 {
            return Err(DomainError::validation("crew_size must be at least 1"));
        }
        if self.contingency > MAX_CONTINGENCY_PERCENT {
            return Err(DomainError::validation(format!(
                "contingency must be between 0 and {MAX_CONTINGENCY_PERCENT} percent"
            )));
        }
        Ok(())
    }

    /// Confirm the selected location exists in `catalog`.
    ///
    /// A crew size above the number of defined roles is not an error; the
    /// engine books every available role.
    pub fn check_against(&self, catalog: &RateCatalog) -> CatalogResult<()> {
        if catalog.location.contains_key(&self.location) {
            Ok(())
        } else {
            Err(CatalogError::UnknownLocation(self.location.clone()))
        }
    }
}
