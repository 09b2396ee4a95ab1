//! Pricing engine.
//!
//! Pure functions from (brief, production variables, rate catalog) to a cost
//! breakdown and integer totals. Amounts are carried as `f64` through the
//! formula and truncated toward zero only when the totals are produced, and the
//! order of the additions is fixed so results are reproducible to the Rupiah.

use std::collections::BTreeSet;
use std::ops::Add;

use serde::{Deserialize, Serialize};

use crate::brief::{Brief, SpecialRequirement};
use crate::catalog::{ComplexityLevel, Money, PostStage, RateCatalog};
use crate::error::CatalogResult;
use crate::production::{FootageVolume, ProductionVars};

/// Projects whose low subtotal is below this pay no producer fee.
pub const PRODUCER_FEE_THRESHOLD: f64 = 20_000_000.0;

/// Margin applied over the low/high midpoint for the recommended price.
pub const RECOMMENDED_PRICE_MARGIN: f64 = 1.12;

pub const STORYBOARD_LOW_FACTOR: f64 = 0.8;
pub const STORYBOARD_HIGH_FACTOR: f64 = 1.2;
pub const CREW_HIGH_FACTOR: f64 = 1.2;

/// Per-head talent fee (low, high). Not part of the rate catalog.
pub const TALENT_FEE: (Money, Money) = (1_000_000, 2_000_000);
/// Agency markup applied to talent (low, high).
pub const AGENCY_MARKUP: (f64, f64) = (1.1, 1.3);

/// A low/high pair of amounts.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CostRange {
    pub low: f64,
    pub high: f64,
}

impl CostRange {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Same amount at both ends.
    pub fn fixed(amount: f64) -> Self {
        Self::new(amount, amount)
    }

    pub fn zero() -> Self {
        Self::default()
    }

    fn scale(self, factor: f64) -> Self {
        Self::new(self.low * factor, self.high * factor)
    }
}

impl Add for CostRange {
    type Output = CostRange;

    fn add(self, rhs: Self) -> Self::Output {
        CostRange::new(self.low + rhs.low, self.high + rhs.high)
    }
}

/// Final integer prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteTotals {
    pub low: Money,
    pub high: Money,
    pub recommended: Money,
}

/// Every intermediate amount of a quote calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    /// Accumulated special-requirement factor. Reported, not applied to any cost.
    pub complexity_factor: f64,
    pub scriptwriting: CostRange,
    pub storyboard: CostRange,
    pub location: CostRange,
    pub crew: CostRange,
    pub equipment: CostRange,
    pub talent: CostRange,
    pub props: CostRange,
    pub post_production: CostRange,
    pub subtotal: CostRange,
    pub producer_fee: CostRange,
    pub contingency: CostRange,
    pub total: CostRange,
}

impl CostBreakdown {
    pub fn pre_production(&self) -> CostRange {
        self.scriptwriting + self.storyboard
    }

    /// Truncate to integer prices and derive the recommended price.
    ///
    /// The recommended price is a margin over the midpoint, not a clamp, so it
    /// exceeds `high` whenever the range is narrower than the margin.
    pub fn totals(&self) -> QuoteTotals {
        let recommended = ((self.total.low + self.total.high) / 2.0) * RECOMMENDED_PRICE_MARGIN;
        QuoteTotals {
            low: self.total.low as Money,
            high: self.total.high as Money,
            recommended: recommended as Money,
        }
    }
}

/// 1.0 plus the increment of every special requirement present.
pub fn complexity_factor(requirements: &BTreeSet<SpecialRequirement>) -> f64 {
    requirements
        .iter()
        .fold(1.0, |factor, req| factor + req.complexity_increment())
}

/// Post-production cost from the catalog's per-minute rates and complexity
/// multipliers: `simple` for the low end, `complex` for the high end. The
/// footage-volume factor scales editing only.
pub fn catalog_post_production(
    video_length: f64,
    footage_volume: FootageVolume,
    catalog: &RateCatalog,
) -> CatalogResult<CostRange> {
    let editing_factor = footage_volume.editing_factor();
    let end = |level: ComplexityLevel| -> CatalogResult<f64> {
        let mut amount = 0.0;
        for stage in PostStage::ALL {
            let per_minute = catalog.post_stage(stage)?.per_minute as f64 * video_length;
            let scaled = match stage {
                PostStage::Editing => per_minute * editing_factor,
                PostStage::Color | PostStage::Sfx => per_minute,
            };
            amount += scaled * catalog.post_stage_factor(stage, level)?;
        }
        Ok(amount)
    };

    Ok(CostRange::new(
        end(ComplexityLevel::Simple)?,
        end(ComplexityLevel::Complex)?,
    ))
}

/// Run the full pricing formula.
///
/// Inputs are assumed validated; the only failures are catalog lookups by name
/// (location, complexity levels, post-production stages).
pub fn compute_breakdown(
    brief: &Brief,
    production: &ProductionVars,
    catalog: &RateCatalog,
) -> CatalogResult<CostBreakdown> {
    let complexity_factor = complexity_factor(&brief.special_requirements);

    let script_base = catalog.scriptwriting.base as f64;
    let scriptwriting = CostRange::new(
        script_base * catalog.scriptwriting_factor(ComplexityLevel::Simple)?,
        script_base * catalog.scriptwriting_factor(ComplexityLevel::Complex)?,
    );

    let storyboard_base = catalog.storyboard.base as f64 * f64::from(brief.deliverables);
    let storyboard = CostRange::new(
        storyboard_base * STORYBOARD_LOW_FACTOR,
        storyboard_base * STORYBOARD_HIGH_FACTOR,
    );

    let location = CostRange::fixed(catalog.location_cost(&production.location)? as f64);

    let crew_low = catalog.crew_day_rate(production.crew_size) * production.shooting_days;
    let crew = CostRange::new(crew_low, crew_low * CREW_HIGH_FACTOR);

    let equipment = CostRange::new(
        catalog.equipment.basic as f64 * production.shooting_days,
        catalog.equipment.premium as f64 * production.shooting_days,
    );

    let talent_count = f64::from(production.talent_count);
    let (markup_low, markup_high) = if production.agency_markup {
        AGENCY_MARKUP
    } else {
        (1.0, 1.0)
    };
    let talent = CostRange::new(
        talent_count * TALENT_FEE.0 as f64 * markup_low,
        talent_count * TALENT_FEE.1 as f64 * markup_high,
    );

    let (props_low, props_high) = production.props_design.cost_band();
    let props = CostRange::new(props_low as f64, props_high as f64);

    let post_production =
        catalog_post_production(brief.video_length, production.footage_volume, catalog)?;

    let subtotal = scriptwriting + storyboard + location + crew + equipment + talent + props
        + post_production;

    // Both ends are gated on the low subtotal.
    let producer_fee = if subtotal.low >= PRODUCER_FEE_THRESHOLD {
        subtotal.scale(catalog.producer_fee.percent)
    } else {
        CostRange::zero()
    };

    let contingency = subtotal.scale(f64::from(production.contingency) / 100.0);
    let total = subtotal + producer_fee + contingency;

    Ok(CostBreakdown {
        complexity_factor,
        scriptwriting,
        storyboard,
        location,
        crew,
        equipment,
        talent,
        props,
        post_production,
        subtotal,
        producer_fee,
        contingency,
        total,
    })
}

/// Low, high and recommended prices for a draft.
pub fn calculate_quote(
    brief: &Brief,
    production: &ProductionVars,
    catalog: &RateCatalog,
) -> CatalogResult<QuoteTotals> {
    Ok(compute_breakdown(brief, production, catalog)?.totals())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CatalogError;
    use crate::production::PropsDesign;
    use proptest::prelude::*;

    fn default_inputs() -> (Brief, ProductionVars, RateCatalog) {
        (Brief::default(), ProductionVars::default(), RateCatalog::default())
    }

    /// A catalog where only the location contributes, so subtotals are exact.
    fn location_only_catalog(location_cost: Money) -> RateCatalog {
        let mut catalog = RateCatalog::default();
        catalog.scriptwriting.base = 0;
        catalog.storyboard.base = 0;
        catalog.equipment.basic = 0;
        catalog.equipment.premium = 0;
        for rate in catalog.crew_roles.values_mut() {
            *rate = 0;
        }
        for stage in catalog.post_production.values_mut() {
            stage.per_minute = 0;
        }
        catalog.location.insert("venue".to_string(), location_cost);
        catalog
    }

    fn location_only_production() -> ProductionVars {
        ProductionVars {
            location: "venue".to_string(),
            talent_count: 0,
            props_design: PropsDesign::Basic,
            contingency: 0,
            ..ProductionVars::default()
        }
    }

    #[test]
    fn default_draft_golden_values() {
        let (brief, production, catalog) = default_inputs();
        let totals = calculate_quote(&brief, &production, &catalog).unwrap();
        assert_eq!(
            totals,
            QuoteTotals {
                low: 29_751_000,
                high: 48_222_000,
                recommended: 43_664_880,
            }
        );
    }

    #[test]
    fn default_draft_breakdown_components() {
        let (brief, production, catalog) = default_inputs();
        let b = compute_breakdown(&brief, &production, &catalog).unwrap();

        assert_eq!(b.scriptwriting, CostRange::new(1_000_000.0, 3_000_000.0));
        assert_eq!(b.location, CostRange::fixed(0.0));
        assert_eq!(b.crew.low, 9_200_000.0);
        assert_eq!(b.equipment, CostRange::new(5_000_000.0, 10_000_000.0));
        assert_eq!(b.talent, CostRange::new(1_000_000.0, 2_000_000.0));
        assert_eq!(b.props, CostRange::new(2_000_000.0, 3_000_000.0));
        assert!((b.subtotal.low - 25_320_000.0).abs() < 1e-6);
        assert!((b.subtotal.high - 41_040_000.0).abs() < 1e-6);
        assert!((b.producer_fee.low - 1_899_000.0).abs() < 1e-6);
        assert!((b.contingency.low - 2_532_000.0).abs() < 1e-6);
    }

    #[test]
    fn complexity_factor_accumulates_but_is_not_applied() {
        let (mut brief, production, catalog) = default_inputs();
        let plain = calculate_quote(&brief, &production, &catalog).unwrap();

        brief.special_requirements = SpecialRequirement::ALL.iter().copied().collect();
        let b = compute_breakdown(&brief, &production, &catalog).unwrap();

        assert!((b.complexity_factor - 1.65).abs() < 1e-9);
        assert_eq!(b.totals(), plain);
    }

    #[test]
    fn location_has_no_range() {
        let (brief, mut production, catalog) = default_inputs();
        production.location = "Styled Home (6 M)".to_string();
        let b = compute_breakdown(&brief, &production, &catalog).unwrap();
        assert_eq!(b.location, CostRange::fixed(6_000_000.0));
    }

    #[test]
    fn equipment_uses_independent_package_rates() {
        let (brief, mut production, catalog) = default_inputs();
        production.shooting_days = 2.5;
        let b = compute_breakdown(&brief, &production, &catalog).unwrap();
        assert_eq!(b.equipment, CostRange::new(12_500_000.0, 25_000_000.0));
    }

    #[test]
    fn agency_markup_scales_talent_asymmetrically() {
        let (brief, mut production, catalog) = default_inputs();
        production.talent_count = 2;
        production.agency_markup = true;
        let b = compute_breakdown(&brief, &production, &catalog).unwrap();
        assert!((b.talent.low - 2_200_000.0).abs() < 1e-6);
        assert!((b.talent.high - 5_200_000.0).abs() < 1e-6);
    }

    #[test]
    fn footage_volume_scales_editing_only() {
        let (brief, mut production, catalog) = default_inputs();
        production.footage_volume = FootageVolume::High;
        let post = catalog_post_production(brief.video_length, production.footage_volume, &catalog)
            .unwrap();

        // editing 2M * 2min * 1.3 * 0.8 + color 1M * 2 * 0.8 + sfx 0.8M * 2 * 0.7
        let expected_low = 4_160_000.0 + 1_600_000.0 + 1_120_000.0;
        assert!((post.low - expected_low).abs() < 1e-6);
    }

    #[test]
    fn producer_fee_applies_at_exact_threshold() {
        // basic props add 2M low, so the low subtotal is exactly 20M.
        let catalog = location_only_catalog(18_000_000);
        let b = compute_breakdown(&Brief::default(), &location_only_production(), &catalog).unwrap();

        assert_eq!(b.subtotal.low, PRODUCER_FEE_THRESHOLD);
        assert_eq!(b.producer_fee.low, 20_000_000.0 * 0.075);
        assert_eq!(b.producer_fee.high, 21_000_000.0 * 0.075);
    }

    #[test]
    fn producer_fee_skipped_one_below_threshold() {
        let catalog = location_only_catalog(17_999_999);
        let b = compute_breakdown(&Brief::default(), &location_only_production(), &catalog).unwrap();

        assert_eq!(b.subtotal.low, PRODUCER_FEE_THRESHOLD - 1.0);
        // The high subtotal clears the threshold but the gate is the low end.
        assert!(b.subtotal.high >= PRODUCER_FEE_THRESHOLD);
        assert_eq!(b.producer_fee, CostRange::zero());
    }

    #[test]
    fn recommended_can_exceed_high_for_narrow_ranges() {
        let catalog = location_only_catalog(100_000_000);
        let b = compute_breakdown(&Brief::default(), &location_only_production(), &catalog).unwrap();
        let totals = b.totals();

        let expected = ((b.total.low + b.total.high) / 2.0 * RECOMMENDED_PRICE_MARGIN) as Money;
        assert_eq!(totals.recommended, expected);
        assert!(totals.recommended > totals.high);
    }

    #[test]
    fn contingency_is_a_share_of_the_subtotal() {
        let (brief, mut production, catalog) = default_inputs();
        production.contingency = 0;
        let without = compute_breakdown(&brief, &production, &catalog).unwrap();
        assert_eq!(without.contingency, CostRange::zero());

        production.contingency = 20;
        let with = compute_breakdown(&brief, &production, &catalog).unwrap();
        assert!((with.contingency.low - with.subtotal.low * 0.2).abs() < 1e-6);
    }

    #[test]
    fn unknown_location_propagates() {
        let (brief, mut production, catalog) = default_inputs();
        production.location = "Atlantis".to_string();
        assert_eq!(
            calculate_quote(&brief, &production, &catalog),
            Err(CatalogError::UnknownLocation("Atlantis".to_string()))
        );
    }

    #[test]
    fn missing_post_complexity_propagates() {
        let (brief, production, mut catalog) = default_inputs();
        catalog.post_production["color"].complexity.shift_remove("simple");
        assert!(matches!(
            calculate_quote(&brief, &production, &catalog),
            Err(CatalogError::MissingComplexityLevel { .. })
        ));
    }

    #[test]
    fn oversized_catalog_rates_do_not_overflow() {
        let (mut brief, production, mut catalog) = default_inputs();
        catalog.set_rate("crew_roles.Director", 1e19).unwrap();
        catalog.set_rate("crew_roles.DOP", 1e19).unwrap();
        catalog.set_rate("storyboard.base", 1e19).unwrap();
        catalog.validate().unwrap();
        brief.deliverables = 5;

        let b = compute_breakdown(&brief, &production, &catalog).unwrap();
        assert!(b.crew.low > Money::MAX as f64);
        assert!(b.storyboard.low > Money::MAX as f64);

        // Float-to-int casts saturate, so totals pin at the ceiling.
        let totals = b.totals();
        assert_eq!(totals.low, Money::MAX);
        assert_eq!(totals.high, Money::MAX);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: same inputs and catalog give the same totals.
        #[test]
        fn calculate_quote_is_deterministic(
            video_length in 0.5f64..30.0,
            deliverables in 1u32..10,
            shooting_days in 0.5f64..14.0,
            crew_size in 1u32..20,
            talent_count in 0u32..20,
            agency_markup in any::<bool>(),
            contingency in 0u8..=20,
        ) {
            let brief = Brief { video_length, deliverables, ..Brief::default() };
            let production = ProductionVars {
                shooting_days,
                crew_size,
                talent_count,
                agency_markup,
                contingency,
                ..ProductionVars::default()
            };
            let catalog = RateCatalog::default();

            let first = calculate_quote(&brief, &production, &catalog).unwrap();
            let second = calculate_quote(&brief, &production, &catalog).unwrap();
            prop_assert_eq!(first, second);
            prop_assert!(first.low <= first.high);
        }

        /// Property: any crew size past the defined roles prices like the full roster.
        #[test]
        fn crew_overflow_never_errors(extra in 0u32..100) {
            let catalog = RateCatalog::default();
            let roles = catalog.crew_roles.len() as u32;
            let full = ProductionVars { crew_size: roles, ..ProductionVars::default() };
            let overflow = ProductionVars { crew_size: roles + extra, ..ProductionVars::default() };

            let a = compute_breakdown(&Brief::default(), &full, &catalog).unwrap();
            let b = compute_breakdown(&Brief::default(), &overflow, &catalog).unwrap();
            prop_assert_eq!(a.crew, b.crew);
        }
    }
}
