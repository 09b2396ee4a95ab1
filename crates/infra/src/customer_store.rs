//! File-backed customer repository.
//!
//! Document shape: `{"customers": [ ... ]}`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use lapis_core::CustomerId;
use lapis_customers::{Customer, ProjectRecord};

use crate::error::StoreResult;
use crate::json_store::{read_json, write_json};
use crate::record_store::RecordStore;

#[derive(Debug, Default, Serialize, Deserialize)]
struct CustomerDocument {
    #[serde(default)]
    customers: Vec<Customer>,
}

#[derive(Debug, Clone)]
pub struct CustomerStore {
    path: PathBuf,
}

impl CustomerStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Customers whose name, email or company contains `query`
    /// (case-insensitive).
    pub fn search(&self, query: &str) -> StoreResult<Vec<Customer>> {
        Ok(self
            .load_all()?
            .into_iter()
            .filter(|c| c.matches(query))
            .collect())
    }

    /// Append a project to a customer's history.
    ///
    /// Returns `false` when the customer does not exist.
    pub fn add_project(&self, customer_id: &CustomerId, record: ProjectRecord) -> StoreResult<bool> {
        let Some(mut customer) = self.get(customer_id)? else {
            return Ok(false);
        };
        customer.record_project(record);
        self.upsert(customer)?;
        Ok(true)
    }
}

impl RecordStore for CustomerStore {
    type Record = Customer;

    fn load_all(&self) -> StoreResult<Vec<Customer>> {
        let doc: Option<CustomerDocument> = read_json(&self.path)?;
        Ok(doc.unwrap_or_default().customers)
    }

    fn save_all(&self, records: &[Customer]) -> StoreResult<()> {
        #[derive(Serialize)]
        struct Borrowed<'a> {
            customers: &'a [Customer],
        }
        write_json(&self.path, &Borrowed { customers: records })?;
        tracing::info!(path = %self.path.display(), count = records.len(), "customers saved");
        Ok(())
    }

    fn check(&self, record: &Customer) -> StoreResult<()> {
        record.validate()?;
        Ok(())
    }
}
