//! The in-progress quote being edited: one brief plus one set of production
//! variables. Owned and passed around explicitly by the caller.

use std::collections::BTreeSet;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use lapis_core::{DomainError, DomainResult};

use crate::brief::Brief;
use crate::production::ProductionVars;

/// Field names accepted by [`QuoteDraft::set_field`], brief first.
pub const DRAFT_FIELDS: &[&str] = &[
    "video_length",
    "deliverables",
    "distribution",
    "format",
    "special_requirements",
    "concept",
    "shoot_date",
    "delivery_date",
    "budget_min",
    "budget_max",
    "shooting_days",
    "crew_size",
    "location",
    "talent_count",
    "agency_markup",
    "props_design",
    "footage_volume",
    "contingency",
];

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QuoteDraft {
    #[serde(rename = "questionnaire")]
    pub brief: Brief,
    pub production_vars: ProductionVars,
}

impl QuoteDraft {
    pub fn new(brief: Brief, production_vars: ProductionVars) -> Self {
        Self {
            brief,
            production_vars,
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        self.brief.validate()?;
        self.production_vars.validate()
    }

    /// Set one field from its textual form.
    ///
    /// `none` (or an empty value) clears optional fields and empties the
    /// multi-select sets, which take comma-separated labels. The draft is
    /// only changed if the result still validates.
    pub fn set_field(&mut self, field: &str, value: &str) -> DomainResult<()> {
        let mut next = self.clone();
        {
            let brief = &mut next.brief;
            let vars = &mut next.production_vars;
            match field {
                "video_length" => brief.video_length = parse(field, value)?,
                "deliverables" => brief.deliverables = parse(field, value)?,
                "distribution" => brief.distribution = parse_set(field, value)?,
                "format" => brief.format = parse_opt(field, value)?,
                "special_requirements" => brief.special_requirements = parse_set(field, value)?,
                "concept" => brief.concept = value.to_string(),
                "shoot_date" => brief.shoot_date = parse_date(field, value)?,
                "delivery_date" => brief.delivery_date = parse_date(field, value)?,
                "budget_min" => brief.budget_min = parse_opt(field, value)?,
                "budget_max" => brief.budget_max = parse_opt(field, value)?,
                "shooting_days" => vars.shooting_days = parse(field, value)?,
                "crew_size" => vars.crew_size = parse(field, value)?,
                "location" => vars.location = value.trim().to_string(),
                "talent_count" => vars.talent_count = parse(field, value)?,
                "agency_markup" => vars.agency_markup = parse_flag(field, value)?,
                "props_design" => vars.props_design = parse(field, value)?,
                "footage_volume" => vars.footage_volume = parse(field, value)?,
                "contingency" => vars.contingency = parse(field, value.trim_end_matches('%'))?,
                other => {
                    return Err(DomainError::validation(format!(
                        "unknown draft field {other:?} (expected one of: {})",
                        DRAFT_FIELDS.join(", ")
                    )));
                }
            }
        }
        next.validate()?;
        *self = next;
        Ok(())
    }
}

fn is_none(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || value.eq_ignore_ascii_case("none")
}

fn parse<T: FromStr>(field: &str, value: &str) -> DomainResult<T>
where
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|err| DomainError::validation(format!("{field}: {err}")))
}

fn parse_opt<T: FromStr>(field: &str, value: &str) -> DomainResult<Option<T>>
where
    T::Err: std::fmt::Display,
{
    if is_none(value) {
        Ok(None)
    } else {
        parse(field, value).map(Some)
    }
}

fn parse_set<T: FromStr + Ord>(field: &str, value: &str) -> DomainResult<BTreeSet<T>>
where
    T::Err: std::fmt::Display,
{
    if is_none(value) {
        return Ok(BTreeSet::new());
    }
    value
        .split(',')
        .filter(|part| !part.trim().is_empty())
        .map(|part| parse(field, part))
        .collect()
}

fn parse_date(field: &str, value: &str) -> DomainResult<Option<NaiveDate>> {
    if is_none(value) {
        return Ok(None);
    }
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map(Some)
        .map_err(|err| DomainError::validation(format!("{field}: expected YYYY-MM-DD ({err})")))
}

fn parse_flag(field: &str, value: &str) -> DomainResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        other => Err(DomainError::validation(format!("{field}: expected yes or no, got {other:?}"))),
    }
}
