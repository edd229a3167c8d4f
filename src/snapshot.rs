//! Full in-memory copy of the three record collections
//!
//! Every report reads one snapshot and nothing else. Snapshots are never
//! shared between invocations, so no report can observe a half-applied edit.

use crate::analytics_core::IdentityIndex;
use crate::records::{InductionRecord, ReweightRecord, SaleRecord};
use crate::store::{RecordSource, StoreError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub inductions: Vec<InductionRecord>,
    pub reweights: Vec<ReweightRecord>,
    pub sales: Vec<SaleRecord>,
}

impl Snapshot {
    pub fn new(
        inductions: Vec<InductionRecord>,
        reweights: Vec<ReweightRecord>,
        sales: Vec<SaleRecord>,
    ) -> Self {
        Self {
            inductions,
            reweights,
            sales,
        }
    }

    /// Read all three collections once from `source`
    pub fn load<S: RecordSource + ?Sized>(source: &S) -> Result<Self, StoreError> {
        let snapshot = Self {
            inductions: source.fetch_inductions()?,
            reweights: source.fetch_reweights()?,
            sales: source.fetch_sales()?,
        };

        log::debug!(
            "📥 Snapshot loaded: {} inductions, {} reweights, {} sales",
            snapshot.inductions.len(),
            snapshot.reweights.len(),
            snapshot.sales.len()
        );

        Ok(snapshot)
    }

    pub fn index(&self) -> IdentityIndex<'_> {
        IdentityIndex::build(&self.inductions, &self.reweights, &self.sales)
    }

    pub fn is_empty(&self) -> bool {
        self.inductions.is_empty() && self.reweights.is_empty() && self.sales.is_empty()
    }
}

impl RecordSource for Snapshot {
    fn fetch_inductions(&self) -> Result<Vec<InductionRecord>, StoreError> {
        Ok(self.inductions.clone())
    }

    fn fetch_reweights(&self) -> Result<Vec<ReweightRecord>, StoreError> {
        Ok(self.reweights.clone())
    }

    fn fetch_sales(&self) -> Result<Vec<SaleRecord>, StoreError> {
        Ok(self.sales.clone())
    }
}
