//! Export module.
//!
//! Pure formatting of a priced draft into byte payloads: an HTML quote
//! document and a sectioned CSV workbook. No business rules live here.

pub mod csv;
pub mod currency;
pub mod details;
pub mod html;

pub use csv::render_csv;
pub use currency::format_rupiah;
pub use details::{DetailRow, DetailSection, QuoteDocument, project_details};
pub use html::render_html;
