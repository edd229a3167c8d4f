//! Report views over one snapshot
//!
//! ```text
//! Snapshot ──► IdentityIndex ──┬──► active tables (sold animals removed)
//!                              ├──► pen summaries (aggregate_by_key)
//!                              ├──► shipment roll-up / lifecycle detail
//!                              └──► sale history / staff report
//! ```
//!
//! Group keys stay typed until a row is built here; that is the only place the
//! "TANPA PEN" / "TANPA SHIPMENT" labels appear. Weights are rounded to one
//! decimal and ADG to two in every row.

pub mod filters;
pub mod induction;
pub mod reweight;
pub mod sales;
pub mod shipment;

pub use filters::{buyer_options, induction_filter_options, reweight_filter_options, FilterCatalog, FilterOptions};
pub use induction::{active_inductions, induction_pen_summary};
pub use reweight::{active_reweights, reweight_pen_summary, PenStage};
pub use sales::{sale_history, staff_sale_report, StaffSaleRow};
pub use shipment::{lifecycle_detail, shipment_rollup_report, RollupRow};

use crate::analytics_core::{round_to, GroupKey, GroupKind, GroupSummary};
use serde::Serialize;
use std::collections::BTreeMap;

pub(crate) const WEIGHT_PLACES: u32 = 1;
pub(crate) const ADG_PLACES: u32 = 2;

/// Table filter; an empty value matches everything
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableFilter {
    pub shipment: String,
    pub pen: String,
}

impl TableFilter {
    pub fn new(shipment: impl Into<String>, pen: impl Into<String>) -> Self {
        Self {
            shipment: shipment.into(),
            pen: pen.into(),
        }
    }

    pub fn by_shipment(shipment: impl Into<String>) -> Self {
        Self::new(shipment, "")
    }

    pub fn matches(&self, shipment: &str, pen: &str) -> bool {
        matches_key(&self.shipment, shipment) && matches_key(&self.pen, pen)
    }
}

pub(crate) fn matches_key(filter: &str, value: &str) -> bool {
    filter.is_empty() || filter == value
}

/// One pen group in a summary table
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PenSummaryRow {
    pub pen: String,
    pub count: usize,
    pub total_weight: f64,
    pub avg_weight: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_adg: Option<f64>,
    pub breeds: String,
    pub frames: String,
}

impl PenSummaryRow {
    fn from_group(key: &GroupKey, group: &GroupSummary) -> Self {
        Self {
            pen: key.label(GroupKind::Pen).to_string(),
            count: group.count,
            total_weight: round_to(group.total_weight, WEIGHT_PLACES),
            avg_weight: round_to(group.avg_weight(), WEIGHT_PLACES),
            avg_adg: group.avg_adg().map(|adg| round_to(adg, ADG_PLACES)),
            breeds: group.breed_label(),
            frames: group.frame_label(),
        }
    }
}

/// Pen summary rows ordered by display label
pub(crate) fn pen_summary_rows(groups: &BTreeMap<GroupKey, GroupSummary>) -> Vec<PenSummaryRow> {
    let mut rows: Vec<PenSummaryRow> = groups
        .iter()
        .map(|(key, group)| PenSummaryRow::from_group(key, group))
        .collect();
    rows.sort_by(|a, b| a.pen.cmp(&b.pen));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = TableFilter::default();
        assert!(filter.matches("SHP-01", "P1"));
        assert!(filter.matches("", ""));
    }

    #[test]
    fn test_filter_is_exact_match() {
        let filter = TableFilter::new("SHP-01", "P1");
        assert!(filter.matches("SHP-01", "P1"));
        assert!(!filter.matches("SHP-01", "P10"));
        assert!(!filter.matches("shp-01", "P1"));
        assert!(TableFilter::by_shipment("SHP-01").matches("SHP-01", "anything"));
    }

    #[test]
    fn test_unassigned_row_sorts_by_label() {
        let mut groups = BTreeMap::new();
        groups.insert(GroupKey::Unassigned, GroupSummary::default());
        groups.insert(GroupKey::Named("A-1".to_string()), GroupSummary::default());
        groups.insert(GroupKey::Named("Z-9".to_string()), GroupSummary::default());

        let labels: Vec<String> = pen_summary_rows(&groups).into_iter().map(|r| r.pen).collect();
        assert_eq!(labels, vec!["A-1", "TANPA PEN", "Z-9"]);
    }
}
