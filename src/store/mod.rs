//! Storage boundary
//!
//! The analytics core only ever needs three ordered reads. Everything that
//! writes (intake, reweigh, sale commit, pen edits, deletes) lives in the
//! concrete stores.

pub mod json_snapshot;
pub mod sqlite_store;

pub use json_snapshot::{load_snapshot, save_snapshot};
pub use sqlite_store::SqliteStore;

use crate::records::{InductionRecord, ReweightRecord, SaleRecord};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },
}

/// Read side of the storage collaborator. Each call returns the full
/// collection in insertion order.
pub trait RecordSource {
    fn fetch_inductions(&self) -> Result<Vec<InductionRecord>, StoreError>;
    fn fetch_reweights(&self) -> Result<Vec<ReweightRecord>, StoreError>;
    fn fetch_sales(&self) -> Result<Vec<SaleRecord>, StoreError>;
}
