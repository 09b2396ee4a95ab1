//! Configuration loading and representation.
//!
//! Every setting comes from a `LAPIS_*` environment variable with a default.
//! File locations default to fixed names under the data directory.

use std::path::{Path, PathBuf};

use lapis_observability::LogFormat;

pub const DATA_DIR_VAR: &str = "LAPIS_DATA_DIR";
pub const RATES_FILE_VAR: &str = "LAPIS_RATES_FILE";
pub const CUSTOMERS_FILE_VAR: &str = "LAPIS_CUSTOMERS_FILE";
pub const QUOTES_FILE_VAR: &str = "LAPIS_QUOTES_FILE";
pub const SESSION_FILE_VAR: &str = "LAPIS_SESSION_FILE";
pub const LOG_FORMAT_VAR: &str = "LAPIS_LOG_FORMAT";

pub const DEFAULT_DATA_DIR: &str = "data";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub rates_file: PathBuf,
    pub customers_file: PathBuf,
    pub quotes_file: PathBuf,
    pub session_file: PathBuf,
    pub log_format: LogFormat,
}

impl AppConfig {
    /// All files under `data_dir` with their default names.
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        Self {
            rates_file: data_dir.join("rates.json"),
            customers_file: data_dir.join("customers.json"),
            quotes_file: data_dir.join("quotes.json"),
            session_file: data_dir.join("session.json"),
            data_dir,
            log_format: LogFormat::default(),
        }
    }

    /// Read the process environment. `data_dir` (from the command line) wins
    /// over `LAPIS_DATA_DIR`.
    pub fn from_env(data_dir: Option<PathBuf>) -> Self {
        Self::from_lookup(data_dir, |key| std::env::var(key).ok())
    }

    /// Resolve from an arbitrary variable source.
    pub fn from_lookup(
        data_dir: Option<PathBuf>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let data_dir = data_dir
            .or_else(|| var(DATA_DIR_VAR).map(PathBuf::from))
            .unwrap_or_else(|| {
                tracing::debug!("{DATA_DIR_VAR} not set; using ./{DEFAULT_DATA_DIR}");
                PathBuf::from(DEFAULT_DATA_DIR)
            });

        let mut config = Self::with_data_dir(data_dir);
        let file = |key: &str, default: &Path| var(key).map_or_else(|| default.to_path_buf(), PathBuf::from);
        config.rates_file = file(RATES_FILE_VAR, &config.rates_file);
        config.customers_file = file(CUSTOMERS_FILE_VAR, &config.customers_file);
        config.quotes_file = file(QUOTES_FILE_VAR, &config.quotes_file);
        config.session_file = file(SESSION_FILE_VAR, &config.session_file);

        if let Some(raw) = var(LOG_FORMAT_VAR) {
            match raw.parse() {
                Ok(format) => config.log_format = format,
                Err(err) => {
                    tracing::warn!("{LOG_FORMAT_VAR}: {err}; using {}", config.log_format);
                }
            }
        }

        config
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::with_data_dir(DEFAULT_DATA_DIR)
    }
}
