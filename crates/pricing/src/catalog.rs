//! Rate catalog: the configurable table of unit costs and multipliers.
//!
//! The persisted JSON document mirrors these structs field for field. Ordered
//! tables use [`IndexMap`] because crew roles are booked in catalog order.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, CatalogResult};

/// Amount in whole Rupiah.
pub type Money = u64;

/// Complexity level → multiplier. Must contain at least `simple` and `complex`.
pub type ComplexityTable = IndexMap<String, f64>;

/// Level names looked up in complexity tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComplexityLevel {
    Simple,
    Complex,
}

impl ComplexityLevel {
    pub fn key(self) -> &'static str {
        match self {
            ComplexityLevel::Simple => "simple",
            ComplexityLevel::Complex => "complex",
        }
    }
}

/// Post-production stages the pricing formula reads by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostStage {
    Editing,
    Color,
    Sfx,
}

impl PostStage {
    pub const ALL: [PostStage; 3] = [PostStage::Editing, PostStage::Color, PostStage::Sfx];

    pub fn key(self) -> &'static str {
        match self {
            PostStage::Editing => "editing",
            PostStage::Color => "color",
            PostStage::Sfx => "sfx",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptwritingRates {
    pub base: Money,
    pub complexity_factors: ComplexityTable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryboardRates {
    pub base: Money,
}

/// Daily equipment package rates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentRates {
    pub basic: Money,
    pub premium: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostProductionStage {
    pub per_minute: Money,
    pub complexity: ComplexityTable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProducerFee {
    /// Fraction of the subtotal, e.g. `0.075`.
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContingencyDefault {
    /// Fraction suggested for new drafts, e.g. `0.10`.
    pub default: f64,
}

/// The full rate table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateCatalog {
    pub scriptwriting: ScriptwritingRates,
    pub storyboard: StoryboardRates,
    /// Location name → fixed cost. Includes a zero-cost `none` entry.
    pub location: IndexMap<String, Money>,
    /// Role name → daily rate, in booking order.
    pub crew_roles: IndexMap<String, Money>,
    pub equipment: EquipmentRates,
    pub post_production: IndexMap<String, PostProductionStage>,
    pub producer_fee: ProducerFee,
    pub contingency: ContingencyDefault,
}

fn table(entries: &[(&str, f64)]) -> ComplexityTable {
    entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

fn money_table(entries: &[(&str, Money)]) -> IndexMap<String, Money> {
    entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

impl Default for RateCatalog {
    /// Built-in rates used when no catalog has been persisted yet.
    fn default() -> Self {
        let post_production = [
            ("editing", 2_000_000, table(&[("simple", 0.8), ("standard", 1.0), ("complex", 1.3)])),
            ("color", 1_000_000, table(&[("simple", 0.8), ("standard", 1.0), ("complex", 1.3)])),
            ("sfx", 800_000, table(&[("simple", 0.7), ("standard", 1.0), ("complex", 1.5)])),
        ]
        .into_iter()
        .map(|(name, per_minute, complexity)| {
            (name.to_string(), PostProductionStage { per_minute, complexity })
        })
        .collect();

        Self {
            scriptwriting: ScriptwritingRates {
                base: 2_000_000,
                complexity_factors: table(&[("simple", 0.5), ("standard", 1.0), ("complex", 1.5)]),
            },
            storyboard: StoryboardRates { base: 1_500_000 },
            location: money_table(&[
                ("none", 0),
                ("Studio (1.5 M)", 1_500_000),
                ("Styled Home (6 M)", 6_000_000),
                ("Rooftop Café (4.5 M)", 4_500_000),
            ]),
            crew_roles: money_table(&[
                ("Director", 3_000_000),
                ("DOP", 2_500_000),
                ("Camera Assistant", 1_000_000),
                ("Gaffer", 1_200_000),
                ("Sound Engineer", 1_500_000),
                ("Production Assistant", 800_000),
            ]),
            equipment: EquipmentRates {
                basic: 5_000_000,
                premium: 10_000_000,
            },
            post_production,
            producer_fee: ProducerFee { percent: 0.075 },
            contingency: ContingencyDefault { default: 0.10 },
        }
    }
}

fn lookup_level(table: &ComplexityTable, table_name: &str, level: ComplexityLevel) -> CatalogResult<f64> {
    table
        .get(level.key())
        .copied()
        .ok_or_else(|| CatalogError::MissingComplexityLevel {
            table: table_name.to_string(),
            level: level.key().to_string(),
        })
}

impl RateCatalog {
    /// Fixed cost of a location by key.
    pub fn location_cost(&self, key: &str) -> CatalogResult<Money> {
        self.location
            .get(key)
            .copied()
            .ok_or_else(|| CatalogError::UnknownLocation(key.to_string()))
    }

    /// Sum of the daily rates of the first `crew_size` roles.
    ///
    /// Asking for more roles than the catalog defines books all of them. The
    /// sum is taken in `f64` so arbitrarily large rates cannot overflow.
    pub fn crew_day_rate(&self, crew_size: u32) -> f64 {
        self.crew_roles
            .values()
            .take(crew_size as usize)
            .map(|rate| *rate as f64)
            .sum()
    }

    pub fn scriptwriting_factor(&self, level: ComplexityLevel) -> CatalogResult<f64> {
        lookup_level(&self.scriptwriting.complexity_factors, "scriptwriting.complexity_factors", level)
    }

    pub fn post_stage(&self, stage: PostStage) -> CatalogResult<&PostProductionStage> {
        self.post_production
            .get(stage.key())
            .ok_or_else(|| CatalogError::MissingPostProductionStage(stage.key().to_string()))
    }

    pub fn post_stage_factor(&self, stage: PostStage, level: ComplexityLevel) -> CatalogResult<f64> {
        let rates = self.post_stage(stage)?;
        lookup_level(
            &rates.complexity,
            &format!("post_production.{}.complexity", stage.key()),
            level,
        )
    }

    /// Check every invariant the pricing formula relies on.
    ///
    /// Monetary values are unsigned by construction; this covers multipliers,
    /// required keys and fractional percentages.
    pub fn validate(&self) -> CatalogResult<()> {
        check_complexity_table(&self.scriptwriting.complexity_factors, "scriptwriting.complexity_factors")?;

        if !self.location.contains_key("none") {
            return Err(CatalogError::UnknownLocation("none".to_string()));
        }
        if self.crew_roles.is_empty() {
            return Err(CatalogError::EmptyCrewRoles);
        }

        for stage in PostStage::ALL {
            let rates = self.post_stage(stage)?;
            check_complexity_table(
                &rates.complexity,
                &format!("post_production.{}.complexity", stage.key()),
            )?;
        }
        for (name, rates) in &self.post_production {
            check_complexity_table(&rates.complexity, &format!("post_production.{name}.complexity"))?;
        }

        check_fraction("producer_fee.percent", self.producer_fee.percent)?;
        check_fraction("contingency.default", self.contingency.default)?;
        Ok(())
    }

    /// Overwrite (or add) a single rate addressed by a dotted path.
    ///
    /// Paths: `scriptwriting.base`, `scriptwriting.complexity_factors.<level>`,
    /// `storyboard.base`, `location.<name>`, `crew_roles.<role>`,
    /// `equipment.basic|premium`, `post_production.<stage>.per_minute`,
    /// `post_production.<stage>.complexity.<level>`, `producer_fee.percent`,
    /// `contingency.default`. Location and role names may themselves contain
    /// dots. The catalog is left untouched on error.
    pub fn set_rate(&mut self, path: &str, value: f64) -> CatalogResult<()> {
        let unknown = || CatalogError::UnknownRatePath(path.to_string());
        let (head, rest) = path.split_once('.').ok_or_else(unknown)?;

        match (head, rest) {
            ("scriptwriting", "base") => self.scriptwriting.base = as_money(path, value)?,
            ("scriptwriting", _) => {
                let level = rest.strip_prefix("complexity_factors.").ok_or_else(unknown)?;
                self.scriptwriting
                    .complexity_factors
                    .insert(level.to_string(), as_multiplier(path, value)?);
            }
            ("storyboard", "base") => self.storyboard.base = as_money(path, value)?,
            ("location", name) if !name.is_empty() => {
                self.location.insert(name.to_string(), as_money(path, value)?);
            }
            ("crew_roles", role) if !role.is_empty() => {
                self.crew_roles.insert(role.to_string(), as_money(path, value)?);
            }
            ("equipment", "basic") => self.equipment.basic = as_money(path, value)?,
            ("equipment", "premium") => self.equipment.premium = as_money(path, value)?,
            ("post_production", _) => {
                let (stage, field) = rest.split_once('.').ok_or_else(unknown)?;
                let rates = self
                    .post_production
                    .get_mut(stage)
                    .ok_or_else(|| CatalogError::MissingPostProductionStage(stage.to_string()))?;
                match field.split_once('.') {
                    None if field == "per_minute" => rates.per_minute = as_money(path, value)?,
                    Some(("complexity", level)) if !level.is_empty() => {
                        rates.complexity.insert(level.to_string(), as_multiplier(path, value)?);
                    }
                    _ => return Err(unknown()),
                }
            }
            ("producer_fee", "percent") => {
                check_fraction(path, value)?;
                self.producer_fee.percent = value;
            }
            ("contingency", "default") => {
                check_fraction(path, value)?;
                self.contingency.default = value;
            }
            _ => return Err(unknown()),
        }
        Ok(())
    }
}

fn check_complexity_table(table: &ComplexityTable, name: &str) -> CatalogResult<()> {
    for level in [ComplexityLevel::Simple, ComplexityLevel::Complex] {
        lookup_level(table, name, level)?;
    }
    for (key, value) in table {
        if !value.is_finite() || *value <= 0.0 {
            return Err(CatalogError::NonPositiveMultiplier {
                table: name.to_string(),
                key: key.clone(),
                value: *value,
            });
        }
    }
    Ok(())
}

fn check_fraction(field: &str, value: f64) -> CatalogResult<()> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(CatalogError::InvalidPercent {
            field: field.to_string(),
            value,
        })
    }
}

fn as_money(path: &str, value: f64) -> CatalogResult<Money> {
    if !value.is_finite() || value < 0.0 || value.fract() != 0.0 {
        return Err(CatalogError::InvalidRateValue {
            path: path.to_string(),
            reason: format!("{value} is not a non-negative whole amount"),
        });
    }
    Ok(value as Money)
}

fn as_multiplier(path: &str, value: f64) -> CatalogResult<f64> {
    if !value.is_finite() || value <= 0.0 {
        return Err(CatalogError::InvalidRateValue {
            path: path.to_string(),
            reason: format!("multiplier must be > 0 (got {value})"),
        });
    }
    Ok(value)
}
