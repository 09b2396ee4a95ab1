//! The editing session: the live draft and the active customer.
//!
//! Owned by the caller and passed explicitly; persisted between CLI
//! invocations as `session.json`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use lapis_core::{CustomerId, DomainError};
use lapis_pricing::QuoteDraft;

use crate::customer_store::CustomerStore;
use crate::error::StoreResult;
use crate::json_store::{read_json, write_json};
use crate::record_store::RecordStore;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub active_customer: Option<CustomerId>,
    #[serde(default)]
    pub draft: QuoteDraft,
}

impl Session {
    /// Load the saved session; a fresh one when none exists.
    pub fn load(path: &Path) -> StoreResult<Self> {
        Ok(read_json(path)?.unwrap_or_default())
    }

    pub fn save(&self, path: &Path) -> StoreResult<()> {
        write_json(path, self)
    }

    /// Discard the draft and start over from defaults.
    pub fn reset_draft(&mut self) {
        self.draft = QuoteDraft::default();
    }

    /// Make `next` the active customer.
    ///
    /// The current draft is parked on the outgoing customer, then replaced by
    /// the incoming customer's parked draft (or a default draft). Switching to
    /// an unknown customer fails before anything is written.
    pub fn switch_customer(
        &mut self,
        customers: &CustomerStore,
        next: Option<CustomerId>,
    ) -> StoreResult<()> {
        if self.active_customer == next {
            return Ok(());
        }

        let incoming = match &next {
            Some(id) => Some(customers.get(id)?.ok_or(DomainError::NotFound)?),
            None => None,
        };

        if let Some(outgoing_id) = &self.active_customer {
            match customers.get(outgoing_id)? {
                Some(mut outgoing) => {
                    outgoing.stash_draft(&self.draft);
                    customers.upsert(outgoing)?;
                }
                None => {
                    tracing::warn!(customer_id = %outgoing_id, "active customer no longer exists; draft not parked");
                }
            }
        }

        self.draft = incoming
            .as_ref()
            .and_then(|c| c.parked_draft())
            .unwrap_or_default();
        self.active_customer = next;
        tracing::info!(
            customer_id = self.active_customer.as_ref().map(|c| c.as_str()),
            "active customer switched"
        );
        Ok(())
    }
}
