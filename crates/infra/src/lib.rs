//! Infrastructure layer: configuration, JSON document persistence, the rate
//! catalog loader, the customer and quote stores and the editing session.

pub mod config;
pub mod customer_store;
pub mod error;
pub mod json_store;
pub mod quote_store;
pub mod rates;
pub mod record_store;
pub mod session;

pub use config::AppConfig;
pub use customer_store::CustomerStore;
pub use error::{StoreError, StoreResult};
pub use quote_store::QuoteStore;
pub use rates::{load_rates, save_rates};
pub use record_store::RecordStore;
pub use session::Session;
