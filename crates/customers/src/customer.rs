use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use lapis_core::{CustomerId, DomainError, DomainResult, Entity, QuoteId};
use lapis_pricing::{Brief, DistributionChannel, Money, ProductionVars, QuoteDraft, VideoFormat};

/// Postal address. Every field is optional free text.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    pub street: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactMethod {
    Email,
    Phone,
    WhatsApp,
}

impl ContactMethod {
    pub const ALL: [ContactMethod; 3] = [ContactMethod::Email, ContactMethod::Phone, ContactMethod::WhatsApp];

    pub fn as_str(self) -> &'static str {
        match self {
            ContactMethod::Email => "email",
            ContactMethod::Phone => "phone",
            ContactMethod::WhatsApp => "whatsapp",
        }
    }
}

impl std::fmt::Display for ContactMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ContactMethod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                DomainError::validation(format!(
                    "unknown contact method {s:?} (expected email, phone or whatsapp)"
                ))
            })
    }
}

/// What the customer usually orders and how they like to be reached.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub preferred_contact: Option<ContactMethod>,
    pub preferred_formats: BTreeSet<VideoFormat>,
    pub preferred_channels: BTreeSet<DistributionChannel>,
    pub language: Option<String>,
}

/// One past or ongoing project in a customer's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub project_name: String,
    #[serde(default)]
    pub quote_id: Option<QuoteId>,
    pub date: NaiveDate,
    #[serde(default)]
    pub recommended_quote: Option<Money>,
    #[serde(default)]
    pub notes: String,
}

impl ProjectRecord {
    /// New history entry. Without an explicit date it is stamped with today's
    /// local date.
    pub fn new(project_name: impl Into<String>, date: Option<NaiveDate>) -> Self {
        Self {
            project_name: project_name.into(),
            quote_id: None,
            date: date.unwrap_or_else(|| chrono::Local::now().date_naive()),
            recommended_quote: None,
            notes: String::new(),
        }
    }

    /// Link the entry to a saved quote and its recommended price.
    pub fn with_quote(mut self, quote_id: QuoteId, recommended_quote: Money) -> Self {
        self.quote_id = Some(quote_id);
        self.recommended_quote = Some(recommended_quote);
        self
    }
}

/// Partial update of a customer's form fields.
///
/// `None` leaves a field alone. For optional text fields a blank value clears
/// the field; sets are replaced wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub notes: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub preferred_contact: Option<ContactMethod>,
    pub preferred_formats: Option<BTreeSet<VideoFormat>>,
    pub preferred_channels: Option<BTreeSet<DistributionChannel>>,
    pub language: Option<String>,
}

impl CustomerPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn overwrite(field: &mut Option<String>, value: Option<String>) {
    if let Some(value) = value {
        let value = value.trim();
        *field = (!value.is_empty()).then(|| value.to_string());
    }
}

/// A customer record, as persisted in the customer document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub customer_id: CustomerId,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub address: Address,
    #[serde(default)]
    pub preferences: Preferences,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub project_history: Vec<ProjectRecord>,
    /// Unsaved brief parked while another customer is active.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub questionnaire_draft: Option<Brief>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub production_vars_draft: Option<ProductionVars>,
}

impl Customer {
    pub fn new(customer_id: CustomerId, name: impl Into<String>) -> Self {
        Self {
            customer_id,
            name: name.into(),
            email: None,
            phone: None,
            company: None,
            address: Address::default(),
            preferences: Preferences::default(),
            notes: String::new(),
            project_history: Vec::new(),
            questionnaire_draft: None,
            production_vars_draft: None,
        }
    }

    /// Validate form input before persisting.
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if let Some(email) = self.email.as_deref().filter(|e| !e.trim().is_empty()) {
            if !email.contains('@') {
                return Err(DomainError::validation(format!("invalid email address: {email}")));
            }
        }
        Ok(())
    }

    /// Case-insensitive substring match across name, email and company.
    ///
    /// An empty query matches every customer.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        [Some(self.name.as_str()), self.email.as_deref(), self.company.as_deref()]
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(&query))
    }

    /// Merge form edits into the record. History and parked drafts are never
    /// touched; call [`Customer::validate`] before persisting.
    pub fn apply_patch(&mut self, patch: CustomerPatch) {
        if let Some(name) = patch.name {
            self.name = name.trim().to_string();
        }
        overwrite(&mut self.email, patch.email);
        overwrite(&mut self.phone, patch.phone);
        overwrite(&mut self.company, patch.company);
        if let Some(notes) = patch.notes {
            self.notes = notes;
        }

        let address = &mut self.address;
        overwrite(&mut address.street, patch.street);
        overwrite(&mut address.city, patch.city);
        overwrite(&mut address.province, patch.province);
        overwrite(&mut address.postal_code, patch.postal_code);
        overwrite(&mut address.country, patch.country);

        let preferences = &mut self.preferences;
        if let Some(contact) = patch.preferred_contact {
            preferences.preferred_contact = Some(contact);
        }
        if let Some(formats) = patch.preferred_formats {
            preferences.preferred_formats = formats;
        }
        if let Some(channels) = patch.preferred_channels {
            preferences.preferred_channels = channels;
        }
        overwrite(&mut preferences.language, patch.language);
    }

    pub fn record_project(&mut self, record: ProjectRecord) {
        self.project_history.push(record);
    }

    /// Park an in-progress draft on this customer.
    pub fn stash_draft(&mut self, draft: &QuoteDraft) {
        self.questionnaire_draft = Some(draft.brief.clone());
        self.production_vars_draft = Some(draft.production_vars.clone());
    }

    /// The parked draft, if any half of it was stored. A missing half falls
    /// back to defaults.
    pub fn parked_draft(&self) -> Option<QuoteDraft> {
        if self.questionnaire_draft.is_none() && self.production_vars_draft.is_none() {
            return None;
        }
        Some(QuoteDraft::new(
            self.questionnaire_draft.clone().unwrap_or_default(),
            self.production_vars_draft.clone().unwrap_or_default(),
        ))
    }
}

impl Entity for Customer {
    type Id = CustomerId;

    fn id(&self) -> &Self::Id {
        &self.customer_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn test_customer() -> Customer {
        let mut customer = Customer::new("CUST-0000AAAA".parse().unwrap(), "Sari Wulandari");
        customer.email = Some("sari@kopikita.id".to_string());
        customer.company = Some("Kopi Kita".to_string());
        customer
    }

    #[test]
    fn validate_rejects_blank_name() {
        let customer = Customer::new(CustomerId::new(), "   ");
        match customer.validate().unwrap_err() {
            DomainError::Validation(_) => {}
            other => panic!("Expected Validation error for empty name, got {other:?}"),
        }
    }

    #[test]
    fn validate_rejects_malformed_email_but_allows_blank() {
        let mut customer = test_customer();
        customer.email = Some("not-an-address".to_string());
        assert!(customer.validate().is_err());

        customer.email = Some(String::new());
        assert!(customer.validate().is_ok());
    }

    #[test]
    fn matches_name_email_and_company_case_insensitively() {
        let customer = test_customer();
        assert!(customer.matches("WULAN"));
        assert!(customer.matches("kopikita.id"));
        assert!(customer.matches("kopi kita"));
        assert!(customer.matches(""));
        assert!(!customer.matches("teh"));
    }

    #[test]
    fn notes_are_not_searched() {
        let mut customer = test_customer();
        customer.notes = "prefers morning shoots".to_string();
        assert!(!customer.matches("morning"));
    }

    #[test]
    fn stash_and_restore_draft() {
        let mut customer = test_customer();
        assert_eq!(customer.parked_draft(), None);

        let mut draft = QuoteDraft::default();
        draft.brief.video_length = 4.5;
        draft.production_vars.crew_size = 2;
        customer.stash_draft(&draft);

        assert_eq!(customer.parked_draft(), Some(draft));
    }

    #[test]
    fn half_parked_draft_fills_defaults() {
        let mut customer = test_customer();
        customer.production_vars_draft = Some(ProductionVars {
            talent_count: 3,
            ..ProductionVars::default()
        });

        let draft = customer.parked_draft().unwrap();
        assert_eq!(draft.brief, Brief::default());
        assert_eq!(draft.production_vars.talent_count, 3);
    }

    #[test]
    fn project_record_keeps_explicit_date_and_quote_link() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
        let quote_id: QuoteId = "QTE-1A2B3C4D".parse().unwrap();
        let record = ProjectRecord::new("Ramadan campaign", Some(date))
            .with_quote(quote_id.clone(), 43_664_880);

        let mut customer = test_customer();
        customer.record_project(record);
        let stored = &customer.project_history[0];
        assert_eq!(stored.date, date);
        assert_eq!(stored.quote_id, Some(quote_id));
        assert_eq!(stored.recommended_quote, Some(43_664_880));
    }

    #[test]
    fn minimal_legacy_record_deserializes() {
        let customer: Customer = serde_json::from_str(
            r#"{"customer_id": "CUST-123", "name": "Budi", "email": "budi@example.com"}"#,
        )
        .unwrap();
        assert_eq!(customer.customer_id.as_str(), "CUST-123");
        assert!(customer.project_history.is_empty());
        assert_eq!(customer.address, Address::default());
    }

    #[test]
    fn drafts_are_omitted_from_json_when_absent() {
        let json = serde_json::to_value(test_customer()).unwrap();
        assert!(json.get("questionnaire_draft").is_none());
        assert!(json.get("production_vars_draft").is_none());
    }

    #[test]
    fn patch_overwrites_only_named_fields() {
        let mut customer = test_customer();
        customer.phone = Some("0812".to_string());
        customer.record_project(ProjectRecord::new("Launch", None));

        customer.apply_patch(CustomerPatch {
            phone: Some("  ".to_string()),
            city: Some(" Bandung ".to_string()),
            preferred_contact: Some(ContactMethod::WhatsApp),
            preferred_formats: Some([VideoFormat::Commercial].into_iter().collect()),
            ..CustomerPatch::default()
        });

        assert_eq!(customer.name, "Sari Wulandari");
        assert_eq!(customer.email.as_deref(), Some("sari@kopikita.id"));
        assert_eq!(customer.phone, None);
        assert_eq!(customer.address.city.as_deref(), Some("Bandung"));
        assert_eq!(customer.preferences.preferred_contact, Some(ContactMethod::WhatsApp));
        assert!(customer.preferences.preferred_formats.contains(&VideoFormat::Commercial));
        assert_eq!(customer.project_history.len(), 1);
    }

    #[test]
    fn empty_patch_changes_nothing() {
        let mut customer = test_customer();
        let before = customer.clone();
        assert!(CustomerPatch::default().is_empty());
        customer.apply_patch(CustomerPatch::default());
        assert_eq!(customer, before);
    }

    #[test]
    fn contact_method_parses_case_insensitively() {
        assert_eq!("WhatsApp".parse::<ContactMethod>().unwrap(), ContactMethod::WhatsApp);
        assert_eq!(" email ".parse::<ContactMethod>().unwrap(), ContactMethod::Email);
        assert!("fax".parse::<ContactMethod>().is_err());
    }

    proptest! {
        /// Property: any substring of the name is a match.
        #[test]
        fn any_name_substring_matches(name in "[A-Za-z ]{1,40}", start in 0usize..40, len in 0usize..40) {
            let customer = Customer::new(CustomerId::new(), name.clone());
            let start = start.min(name.len());
            let end = (start + len).min(name.len());
            prop_assert!(customer.matches(&name[start..end].to_uppercase()));
        }
    }
}
