//! Configuration from environment variables
//!
//! Call `dotenv::dotenv()` before `FeedlotConfig::from_env()` so a local `.env`
//! file is honoured. CLI flags override whatever is loaded here.

use crate::report_writer::ReportFormat;
use std::env;
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_DB_PATH: &str = "data/feedlot.db";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeedlotConfig {
    /// SQLite database file
    pub db_path: PathBuf,

    /// JSON snapshot file; when set it is read instead of the database
    pub snapshot_path: Option<PathBuf>,

    pub report_format: ReportFormat,
}

impl Default for FeedlotConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            snapshot_path: None,
            report_format: ReportFormat::Jsonl,
        }
    }
}

impl FeedlotConfig {
    /// Load configuration from environment variables
    ///
    /// Environment variables:
    /// - `FEEDLOT_DB_PATH` (default: data/feedlot.db)
    /// - `FEEDLOT_SNAPSHOT_PATH` (optional)
    /// - `FEEDLOT_REPORT_FORMAT` (`jsonl` | `json`, default: jsonl)
    pub fn from_env() -> Result<Self, ConfigError> {
        let db_path = non_empty_var("FEEDLOT_DB_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH));

        let snapshot_path = non_empty_var("FEEDLOT_SNAPSHOT_PATH").map(PathBuf::from);

        let report_format = match non_empty_var("FEEDLOT_REPORT_FORMAT") {
            Some(raw) => raw.parse().map_err(|reason| ConfigError::InvalidValue {
                var: "FEEDLOT_REPORT_FORMAT",
                reason,
            })?,
            None => ReportFormat::Jsonl,
        };

        Ok(Self {
            db_path,
            snapshot_path,
            report_format,
        })
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}
