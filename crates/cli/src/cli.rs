use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use lapis_core::{CustomerId, QuoteId};
use lapis_customers::ContactMethod;
use lapis_observability::LogFormat;
use lapis_pricing::{DistributionChannel, VideoFormat};
use lapis_quotes::QuoteStatus;

#[derive(Parser, Debug)]
#[command(name = "lapis", version, about = "Video production pricing calculator")]
pub struct Cli {
    /// Directory holding rates, customers, quotes and the session
    #[arg(long, env = "LAPIS_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Log output format (pretty or json)
    #[arg(long, env = "LAPIS_LOG_FORMAT", global = true)]
    pub log_format: Option<LogFormat>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Edit the working draft (brief + production variables)
    Draft {
        #[command(subcommand)]
        action: DraftCommands,
    },

    /// Price, save and manage quotes
    Quote {
        #[command(subcommand)]
        action: QuoteCommands,
    },

    /// Inspect or edit the rate catalog
    Rates {
        #[command(subcommand)]
        action: RatesCommands,
    },

    /// Manage customers
    Customer {
        #[command(subcommand)]
        action: CustomerCommands,
    },

    /// Write the draft or a saved quote to a file
    Export {
        #[command(subcommand)]
        format: ExportCommands,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum DraftCommands {
    /// Print the working draft
    Show {
        /// Print the raw JSON document
        #[arg(long)]
        json: bool,
    },

    /// Set one field, e.g. `lapis draft set crew_size 4`
    Set {
        /// Field name (video_length, distribution, crew_size, ...)
        field: String,

        /// New value; `none` clears optional fields
        value: String,
    },

    /// Overwrite draft fields from a preset (commercial, social, documentary, event)
    Template { name: String },

    /// Start over from the default draft
    Reset,
}

#[derive(Subcommand, Debug, Clone)]
pub enum QuoteCommands {
    /// Price the working draft
    Calc,

    /// Save the priced draft as a quote for a customer
    Save {
        /// Project name (defaults to "Untitled Project")
        #[arg(short, long)]
        project: Option<String>,

        /// Customer id (defaults to the active customer)
        #[arg(short, long)]
        customer: Option<CustomerId>,
    },

    /// List saved quotes
    List {
        /// Only quotes for this customer
        #[arg(short, long)]
        customer: Option<CustomerId>,
    },

    /// Show a saved quote
    Show {
        id: QuoteId,

        /// Print the raw JSON record
        #[arg(long)]
        json: bool,
    },

    /// Change a quote's status (Draft, Quoted, Accepted, Rejected)
    Status { id: QuoteId, status: QuoteStatus },

    /// Re-price a saved quote from the working draft and current rates
    Update {
        id: QuoteId,

        /// Rename the project
        #[arg(short, long)]
        project: Option<String>,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum RatesCommands {
    /// Print the rate catalog
    Show {
        /// Print the raw JSON document
        #[arg(long)]
        json: bool,
    },

    /// Set one rate by dotted path, e.g. `crew_roles.Director 3500000`
    Set { path: String, value: f64 },

    /// Replace the catalog with a JSON file (validated first)
    Import { file: PathBuf },

    /// Restore the built-in rates
    Reset,
}

#[derive(Args, Debug, Clone)]
pub struct NewCustomerArgs {
    pub name: String,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long)]
    pub company: Option<String>,

    #[arg(long)]
    pub notes: Option<String>,
}

/// Fields to change; anything not given is kept. A blank value clears an
/// optional field.
#[derive(Args, Debug, Clone)]
pub struct EditCustomerArgs {
    pub id: CustomerId,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long)]
    pub company: Option<String>,

    #[arg(long)]
    pub notes: Option<String>,

    #[arg(long)]
    pub street: Option<String>,

    #[arg(long)]
    pub city: Option<String>,

    #[arg(long)]
    pub province: Option<String>,

    #[arg(long)]
    pub postal_code: Option<String>,

    #[arg(long)]
    pub country: Option<String>,

    /// Preferred contact method (email, phone, whatsapp)
    #[arg(long)]
    pub contact: Option<ContactMethod>,

    /// Preferred video formats, comma-separated; replaces the current set
    #[arg(long, value_delimiter = ',')]
    pub formats: Option<Vec<VideoFormat>>,

    /// Preferred distribution channels, comma-separated; replaces the current set
    #[arg(long, value_delimiter = ',')]
    pub channels: Option<Vec<DistributionChannel>>,

    #[arg(long)]
    pub language: Option<String>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum CustomerCommands {
    /// Add a customer
    Add(NewCustomerArgs),

    /// List all customers
    List,

    /// Show one customer
    Show { id: CustomerId },

    /// Search by name, email or company
    Search { query: String },

    /// Edit contact details, address or preferences of a customer
    Edit(EditCustomerArgs),

    /// Delete a customer
    Delete { id: CustomerId },

    /// Make a customer active for the working draft
    Use {
        #[arg(required_unless_present = "clear")]
        id: Option<CustomerId>,

        /// Deactivate the current customer
        #[arg(long, conflicts_with = "id")]
        clear: bool,
    },

    /// Project history and saved quotes of a customer
    History { id: CustomerId },
}

#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    /// Export a saved quote instead of the working draft
    #[arg(short, long)]
    pub quote: Option<QuoteId>,

    /// Output path, `-` for stdout (default: lapis_quote_<date>.<ext>)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ExportCommands {
    /// HTML quote document
    Html(ExportArgs),

    /// CSV workbook (breakdown, summary, project details)
    Csv(ExportArgs),
}
