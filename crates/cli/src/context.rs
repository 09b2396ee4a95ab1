use anyhow::{Context as _, Result};

use lapis_infra::{AppConfig, CustomerStore, QuoteStore, Session, load_rates};
use lapis_pricing::{LineItems, QuoteDraft, QuoteTotals, RateCatalog, calculate_quote, generate_line_items};

/// Stores and paths shared by every command.
pub struct Context {
    pub config: AppConfig,
    pub customers: CustomerStore,
    pub quotes: QuoteStore,
}

impl Context {
    pub fn new(config: AppConfig) -> Self {
        Self {
            customers: CustomerStore::new(&config.customers_file),
            quotes: QuoteStore::new(&config.quotes_file),
            config,
        }
    }

    pub fn rates(&self) -> Result<RateCatalog> {
        load_rates(&self.config.rates_file).context("failed to load rate catalog")
    }

    pub fn session(&self) -> Result<Session> {
        Session::load(&self.config.session_file).context("failed to load session")
    }

    pub fn save_session(&self, session: &Session) -> Result<()> {
        session
            .save(&self.config.session_file)
            .context("failed to save session")
    }

    /// Totals and line items for `draft` under the current catalog.
    pub fn price(&self, draft: &QuoteDraft) -> Result<(QuoteTotals, LineItems)> {
        let catalog = self.rates()?;
        draft.validate()?;
        draft.production_vars.check_against(&catalog)?;
        let totals = calculate_quote(&draft.brief, &draft.production_vars, &catalog)?;
        let items = generate_line_items(&draft.brief, &draft.production_vars, &catalog)?;
        Ok((totals, items))
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use tempfile::TempDir;

    pub fn create_test_context() -> (Context, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let ctx = Context::new(AppConfig::with_data_dir(temp_dir.path()));
        (ctx, temp_dir)
    }
}
