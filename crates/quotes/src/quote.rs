use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use lapis_core::{CustomerId, Entity, QuoteId};
use lapis_pricing::{Brief, LineItems, Money, ProductionVars, QuoteDraft, QuoteTotals};

/// Project name used when the user leaves it blank.
pub const UNTITLED_PROJECT: &str = "Untitled Project";

/// Quote status lifecycle. New quotes start as `Draft`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuoteStatus {
    Draft,
    Quoted,
    Accepted,
    Rejected,
}

impl QuoteStatus {
    pub const ALL: [QuoteStatus; 4] = [
        QuoteStatus::Draft,
        QuoteStatus::Quoted,
        QuoteStatus::Accepted,
        QuoteStatus::Rejected,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            QuoteStatus::Draft => "Draft",
            QuoteStatus::Quoted => "Quoted",
            QuoteStatus::Accepted => "Accepted",
            QuoteStatus::Rejected => "Rejected",
        }
    }
}

impl core::fmt::Display for QuoteStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for QuoteStatus {
    type Err = lapis_core::DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| lapis_core::DomainError::validation(format!("unknown quote status: {s}")))
    }
}

/// A saved quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub quote_id: QuoteId,
    pub customer_id: CustomerId,
    pub project_name: String,
    pub questionnaire_snapshot: Brief,
    pub production_vars_snapshot: ProductionVars,
    pub low_quote: Money,
    pub high_quote: Money,
    pub recommended_quote: Money,
    pub line_items_snapshot: LineItems,
    pub status: QuoteStatus,
    pub creation_date: DateTime<Utc>,
    pub last_updated_date: DateTime<Utc>,
}

/// Input for saving a new quote.
#[derive(Debug, Clone, PartialEq)]
pub struct NewQuote {
    pub customer_id: CustomerId,
    pub project_name: String,
    pub draft: QuoteDraft,
    pub totals: QuoteTotals,
    pub line_items: LineItems,
}

/// Partial update. `None` leaves the field as it is.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QuotePatch {
    pub customer_id: Option<CustomerId>,
    pub project_name: Option<String>,
    pub questionnaire_snapshot: Option<Brief>,
    pub production_vars_snapshot: Option<ProductionVars>,
    pub low_quote: Option<Money>,
    pub high_quote: Option<Money>,
    pub recommended_quote: Option<Money>,
    pub line_items_snapshot: Option<LineItems>,
    pub status: Option<QuoteStatus>,
    /// Only set when the caller explicitly wants to rewrite the creation time.
    pub creation_date: Option<DateTime<Utc>>,
}

impl QuotePatch {
    pub fn status(status: QuoteStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// Replace the snapshot and totals after re-pricing a draft.
    pub fn repriced(draft: QuoteDraft, totals: QuoteTotals, line_items: LineItems) -> Self {
        Self {
            questionnaire_snapshot: Some(draft.brief),
            production_vars_snapshot: Some(draft.production_vars),
            low_quote: Some(totals.low),
            high_quote: Some(totals.high),
            recommended_quote: Some(totals.recommended),
            line_items_snapshot: Some(line_items),
            ..Self::default()
        }
    }
}

fn project_name_or_default(name: String) -> String {
    if name.trim().is_empty() {
        UNTITLED_PROJECT.to_string()
    } else {
        name
    }
}

impl Quote {
    pub fn create(quote_id: QuoteId, new: NewQuote, now: DateTime<Utc>) -> Self {
        Self {
            quote_id,
            customer_id: new.customer_id,
            project_name: project_name_or_default(new.project_name),
            questionnaire_snapshot: new.draft.brief,
            production_vars_snapshot: new.draft.production_vars,
            low_quote: new.totals.low,
            high_quote: new.totals.high,
            recommended_quote: new.totals.recommended,
            line_items_snapshot: new.line_items,
            status: QuoteStatus::Draft,
            creation_date: now,
            last_updated_date: now,
        }
    }

    pub fn totals(&self) -> QuoteTotals {
        QuoteTotals {
            low: self.low_quote,
            high: self.high_quote,
            recommended: self.recommended_quote,
        }
    }

    pub fn draft(&self) -> QuoteDraft {
        QuoteDraft::new(
            self.questionnaire_snapshot.clone(),
            self.production_vars_snapshot.clone(),
        )
    }

    /// Apply a partial update and stamp `last_updated_date`.
    ///
    /// `creation_date` only changes when the patch names it.
    pub fn apply_patch(&mut self, patch: QuotePatch, now: DateTime<Utc>) {
        if let Some(customer_id) = patch.customer_id {
            self.customer_id = customer_id;
        }
        if let Some(name) = patch.project_name {
            self.project_name = project_name_or_default(name);
        }
        if let Some(brief) = patch.questionnaire_snapshot {
            self.questionnaire_snapshot = brief;
        }
        if let Some(vars) = patch.production_vars_snapshot {
            self.production_vars_snapshot = vars;
        }
        if let Some(low) = patch.low_quote {
            self.low_quote = low;
        }
        if let Some(high) = patch.high_quote {
            self.high_quote = high;
        }
        if let Some(recommended) = patch.recommended_quote {
            self.recommended_quote = recommended;
        }
        if let Some(items) = patch.line_items_snapshot {
            self.line_items_snapshot = items;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(created) = patch.creation_date {
            self.creation_date = created;
        }
        self.last_updated_date = now;
    }
}

impl Entity for Quote {
    type Id = QuoteId;

    fn id(&self) -> &Self::Id {
        &self.quote_id
    }
}
