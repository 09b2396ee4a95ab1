use chrono::NaiveDate;

use lapis_pricing::{Brief, LineItems, ProductionVars, QuoteTotals};

/// Everything an exporter needs to render one quote.
#[derive(Debug, Clone, Copy)]
pub struct QuoteDocument<'a> {
    pub line_items: &'a LineItems,
    pub brief: &'a Brief,
    pub production_vars: &'a ProductionVars,
    pub totals: QuoteTotals,
    pub issued: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailSection {
    ClientBrief,
    ProductionVariables,
}

impl DetailSection {
    pub fn title(self) -> &'static str {
        match self {
            DetailSection::ClientBrief => "Client Brief",
            DetailSection::ProductionVariables => "Production Variables",
        }
    }
}

/// One human-readable row of the project details table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRow {
    pub section: DetailSection,
    pub item: &'static str,
    pub value: String,
}

fn join_or_none<T: ToString>(values: impl IntoIterator<Item = T>) -> String {
    let joined: Vec<String> = values.into_iter().map(|v| v.to_string()).collect();
    if joined.is_empty() {
        "None".to_string()
    } else {
        joined.join(", ")
    }
}

fn or_none<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "None".to_string(), |v| v.to_string())
}

fn number(value: f64) -> String {
    // 2.0 renders as "2", 1.5 as "1.5"
    format!("{value}")
}

/// Flatten the brief and production variables into display rows.
pub fn project_details(brief: &Brief, vars: &ProductionVars) -> Vec<DetailRow> {
    use DetailSection::{ClientBrief, ProductionVariables};

    let concept = if brief.concept.trim().is_empty() {
        "None".to_string()
    } else {
        brief.concept.clone()
    };

    let rows = [
        (ClientBrief, "Video Length", number(brief.video_length)),
        (ClientBrief, "Deliverables", brief.deliverables.to_string()),
        (ClientBrief, "Distribution", join_or_none(&brief.distribution)),
        (ClientBrief, "Format", or_none(brief.format)),
        (ClientBrief, "Special Requirements", join_or_none(&brief.special_requirements)),
        (ClientBrief, "Concept", concept),
        (ClientBrief, "Shoot Date", or_none(brief.shoot_date.map(|d| d.format("%Y-%m-%d")))),
        (ClientBrief, "Delivery Date", or_none(brief.delivery_date.map(|d| d.format("%Y-%m-%d")))),
        (ClientBrief, "Budget Min", or_none(brief.budget_min)),
        (ClientBrief, "Budget Max", or_none(brief.budget_max)),
        (ProductionVariables, "Shooting Days", number(vars.shooting_days)),
        (ProductionVariables, "Crew Size", vars.crew_size.to_string()),
        (ProductionVariables, "Location", vars.location.clone()),
        (ProductionVariables, "Talent Count", vars.talent_count.to_string()),
        (ProductionVariables, "Agency Markup", vars.agency_markup.to_string()),
        (ProductionVariables, "Props Design", vars.props_design.to_string()),
        (ProductionVariables, "Footage Volume", vars.footage_volume.to_string()),
        (ProductionVariables, "Contingency", format!("{}%", vars.contingency)),
    ];

    rows.into_iter()
        .map(|(section, item, value)| DetailRow { section, item, value })
        .collect()
}
