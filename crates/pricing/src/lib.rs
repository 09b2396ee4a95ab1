//! Pricing domain module.
//!
//! This crate turns a client brief plus production variables into a low/high
//! price range, a recommended price and an itemized breakdown, driven by a
//! configurable rate catalog. Everything here is deterministic arithmetic
//! (no IO, no clocks, no storage).

mod labels;

pub mod brief;
pub mod catalog;
pub mod draft;
pub mod engine;
pub mod error;
pub mod line_items;
pub mod production;

pub use brief::{Brief, DistributionChannel, SpecialRequirement, VideoFormat};
pub use catalog::{
    ComplexityLevel, ComplexityTable, ContingencyDefault, EquipmentRates, Money,
    PostProductionStage, PostStage, ProducerFee, RateCatalog, ScriptwritingRates, StoryboardRates,
};
pub use draft::{DRAFT_FIELDS, QuoteDraft};
pub use engine::{
    CostBreakdown, CostRange, QuoteTotals, calculate_quote, catalog_post_production,
    complexity_factor, compute_breakdown,
};
pub use error::{CatalogError, CatalogResult};
pub use line_items::{LineCategory, LineItems, flat_post_production, generate_line_items};
pub use production::{FootageVolume, ProductionVars, PropsDesign};
