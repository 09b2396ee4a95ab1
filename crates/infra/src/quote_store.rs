//! File-backed quote repository.
//!
//! Document shape: a bare JSON array of quotes.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use lapis_core::{CustomerId, QuoteId};
use lapis_quotes::{NewQuote, Quote, QuotePatch, QuoteStatus};

use crate::error::StoreResult;
use crate::json_store::{read_json, write_json};
use crate::record_store::RecordStore;

#[derive(Debug, Clone)]
pub struct QuoteStore {
    path: PathBuf,
}

impl QuoteStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist a new quote under a freshly generated id, status `Draft`.
    pub fn create(&self, new: NewQuote) -> StoreResult<Quote> {
        self.create_at(QuoteId::new(), new, Utc::now())
    }

    pub fn create_at(&self, id: QuoteId, new: NewQuote, now: DateTime<Utc>) -> StoreResult<Quote> {
        let quote = Quote::create(id, new, now);
        self.upsert(quote.clone())?;
        tracing::info!(quote_id = %quote.quote_id, customer_id = %quote.customer_id, "quote created");
        Ok(quote)
    }

    pub fn list_by_customer(&self, customer_id: &CustomerId) -> StoreResult<Vec<Quote>> {
        Ok(self
            .load_all()?
            .into_iter()
            .filter(|q| &q.customer_id == customer_id)
            .collect())
    }

    /// Apply a partial update. Returns `false` when no quote has this id.
    pub fn update(&self, quote_id: &QuoteId, patch: QuotePatch) -> StoreResult<bool> {
        self.update_at(quote_id, patch, Utc::now())
    }

    pub fn update_at(
        &self,
        quote_id: &QuoteId,
        patch: QuotePatch,
        now: DateTime<Utc>,
    ) -> StoreResult<bool> {
        let mut quotes = self.load_all()?;
        let Some(quote) = quotes.iter_mut().find(|q| &q.quote_id == quote_id) else {
            tracing::debug!(quote_id = %quote_id, "update skipped; quote not found");
            return Ok(false);
        };
        quote.apply_patch(patch, now);
        self.save_all(&quotes)?;
        Ok(true)
    }

    pub fn update_status(&self, quote_id: &QuoteId, status: QuoteStatus) -> StoreResult<bool> {
        let updated = self.update(quote_id, QuotePatch::status(status))?;
        if updated {
            tracing::info!(quote_id = %quote_id, status = %status, "quote status changed");
        }
        Ok(updated)
    }
}

impl RecordStore for QuoteStore {
    type Record = Quote;

    fn load_all(&self) -> StoreResult<Vec<Quote>> {
        Ok(read_json(&self.path)?.unwrap_or_default())
    }

    fn save_all(&self, records: &[Quote]) -> StoreResult<()> {
        write_json(&self.path, records)?;
        tracing::info!(path = %self.path.display(), count = records.len(), "quotes saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use chrono::{Duration, TimeZone};
    use lapis_pricing::{QuoteDraft, RateCatalog, calculate_quote, generate_line_items};
    use std::fs;
    use tempfile::TempDir;

    fn create_test_store() -> (QuoteStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = QuoteStore::new(temp_dir.path().join("data/quotes.json"));
        (store, temp_dir)
    }

    fn new_quote(customer: &str, project: &str) -> NewQuote {
        let draft = QuoteDraft::default();
        let catalog = RateCatalog::default();
        NewQuote {
            customer_id: customer.parse().unwrap(),
            project_name: project.to_string(),
            totals: calculate_quote(&draft.brief, &draft.production_vars, &catalog).unwrap(),
            line_items: generate_line_items(&draft.brief, &draft.production_vars, &catalog)
                .unwrap(),
            draft,
        }
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, 8, 30, 0).unwrap()
    }

    #[test]
    fn create_persists_a_draft_quote() {
        let (store, _dir) = create_test_store();
        let quote = store.create(new_quote("CUST-00000001", "")).unwrap();

        assert!(quote.quote_id.as_str().starts_with("QTE-"));
        assert_eq!(quote.project_name, "Untitled Project");
        assert_eq!(quote.status, QuoteStatus::Draft);
        assert_eq!(store.get(&quote.quote_id).unwrap(), Some(quote));
    }

    #[test]
    fn list_by_customer_filters() {
        let (store, _dir) = create_test_store();
        store.create(new_quote("CUST-00000001", "A")).unwrap();
        store.create(new_quote("CUST-00000002", "B")).unwrap();
        store.create(new_quote("CUST-00000001", "C")).unwrap();

        let mine = store.list_by_customer(&"CUST-00000001".parse().unwrap()).unwrap();
        let names: Vec<&str> = mine.iter().map(|q| q.project_name.as_str()).collect();
        assert_eq!(names, ["A", "C"]);
    }

    #[test]
    fn update_preserves_creation_and_refreshes_last_updated() {
        let (store, _dir) = create_test_store();
        let id: QuoteId = "QTE-0000BEEF".parse().unwrap();
        store.create_at(id.clone(), new_quote("CUST-00000001", "A"), t0()).unwrap();

        let later = t0() + Duration::hours(2);
        let patch = QuotePatch {
            project_name: Some("Renamed".to_string()),
            ..QuotePatch::default()
        };
        assert!(store.update_at(&id, patch, later).unwrap());

        let stored = store.get(&id).unwrap().unwrap();
        assert_eq!(stored.project_name, "Renamed");
        assert_eq!(stored.creation_date, t0());
        assert_eq!(stored.last_updated_date, later);
    }

    #[test]
    fn update_of_unknown_quote_returns_false_and_writes_nothing() {
        let (store, _dir) = create_test_store();
        let missing: QuoteId = "QTE-00000000".parse().unwrap();
        assert!(!store.update(&missing, QuotePatch::status(QuoteStatus::Quoted)).unwrap());
        assert!(!store.path().exists());
    }

    #[test]
    fn update_status_round_trips() {
        let (store, _dir) = create_test_store();
        let quote = store.create(new_quote("CUST-00000001", "A")).unwrap();
        assert!(store.update_status(&quote.quote_id, QuoteStatus::Accepted).unwrap());
        assert_eq!(
            store.get(&quote.quote_id).unwrap().unwrap().status,
            QuoteStatus::Accepted
        );
    }

    #[test]
    fn delete_removes_only_matching_quote() {
        let (store, _dir) = create_test_store();
        let a = store.create(new_quote("CUST-00000001", "A")).unwrap();
        let b = store.create(new_quote("CUST-00000001", "B")).unwrap();

        assert!(store.delete(&a.quote_id).unwrap());
        assert!(!store.delete(&a.quote_id).unwrap());
        assert_eq!(store.list().unwrap(), vec![b]);
    }

    #[test]
    fn empty_file_is_an_empty_store() {
        let (store, _dir) = create_test_store();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "").unwrap();
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn malformed_file_is_an_error_not_an_empty_list() {
        let (store, _dir) = create_test_store();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "[{\"quote_id\":").unwrap();
        assert!(matches!(store.list(), Err(StoreError::Malformed { .. })));
    }
}
