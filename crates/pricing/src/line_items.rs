//! Itemized cost breakdown shown to the client.
//!
//! Line items reuse the engine's amounts for every category except
//! post-production, which is quoted from a flat per-minute approximation
//! ([`flat_post_production`]) instead of the catalog-driven figure the totals
//! use ([`crate::engine::catalog_post_production`]). Summing the items therefore
//! differs from the totals by exactly that post-production gap.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::brief::Brief;
use crate::catalog::{Money, RateCatalog};
use crate::engine::{CostBreakdown, CostRange, compute_breakdown};
use crate::error::CatalogResult;
use crate::production::ProductionVars;

/// Flat post-production rate per finished minute (low, high).
pub const FLAT_POST_PER_MINUTE: (Money, Money) = (3_000_000, 5_000_000);

crate::labels::labeled_enum! {
    /// Cost categories, in display order.
    pub enum LineCategory {
        PreProduction => "Pre-production",
        CrewCosts => "Crew Costs",
        Equipment => "Equipment",
        Location => "Location",
        Talent => "Talent",
        PropsAndSetDesign => "Props & Set Design",
        PostProduction => "Post-production",
        ProducerFee => "Producer Fee",
        Contingency => "Contingency",
    }
}

/// Post-production quoted as `video_length × 3M` (low) / `× 5M` (high),
/// ignoring catalog rates and complexity.
pub fn flat_post_production(video_length: f64) -> CostRange {
    CostRange::new(
        video_length * FLAT_POST_PER_MINUTE.0 as f64,
        video_length * FLAT_POST_PER_MINUTE.1 as f64,
    )
}

/// Category → low/high, serialized as a JSON object in display order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineItems(IndexMap<LineCategory, CostRange>);

impl LineItems {
    /// Build the items from an already computed breakdown.
    pub fn from_breakdown(breakdown: &CostBreakdown, video_length: f64) -> Self {
        let items = [
            (LineCategory::PreProduction, breakdown.pre_production()),
            (LineCategory::CrewCosts, breakdown.crew),
            (LineCategory::Equipment, breakdown.equipment),
            (LineCategory::Location, breakdown.location),
            (LineCategory::Talent, breakdown.talent),
            (LineCategory::PropsAndSetDesign, breakdown.props),
            (LineCategory::PostProduction, flat_post_production(video_length)),
            (LineCategory::ProducerFee, breakdown.producer_fee),
            (LineCategory::Contingency, breakdown.contingency),
        ];
        Self(items.into_iter().collect())
    }

    pub fn get(&self, category: LineCategory) -> Option<CostRange> {
        self.0.get(&category).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (LineCategory, CostRange)> + '_ {
        self.0.iter().map(|(category, range)| (*category, *range))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of every category.
    pub fn total(&self) -> CostRange {
        self.0.values().fold(CostRange::zero(), |acc, range| acc + *range)
    }
}

/// Itemized breakdown for a draft.
pub fn generate_line_items(
    brief: &Brief,
    production: &ProductionVars,
    catalog: &RateCatalog,
) -> CatalogResult<LineItems> {
    let breakdown = compute_breakdown(brief, production, catalog)?;
    Ok(LineItems::from_breakdown(&breakdown, brief.video_length))
}
