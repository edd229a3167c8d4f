//! Active reweight table and pen summaries by stage
//!
//! The table lists every reweigh event of unsold animals. Summaries drop
//! events with no usable weight so placeholder rows do not skew averages.

use super::{matches_key, pen_summary_rows, PenSummaryRow, TableFilter};
use crate::analytics_core::{aggregate_by_key, sold_rfid_set, InclusionPolicy};
use crate::records::ReweightRecord;
use crate::snapshot::Snapshot;

/// Which pen of a reweigh event a summary groups by
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PenStage {
    /// PEN awal
    Initial,
    /// PEN akhir
    Final,
}

impl PenStage {
    pub fn pen_of(self, record: &ReweightRecord) -> &str {
        match self {
            PenStage::Initial => &record.pen_initial,
            PenStage::Final => &record.pen_final,
        }
    }
}

/// Reweigh events of unsold animals; the pen filter applies to the final pen
pub fn active_reweights<'a>(snapshot: &'a Snapshot, filter: &TableFilter) -> Vec<&'a ReweightRecord> {
    let sold = sold_rfid_set(&snapshot.sales);

    let rows: Vec<&ReweightRecord> = snapshot
        .reweights
        .iter()
        .filter(|r| !sold.contains(r.rfid.as_str()))
        .filter(|r| filter.matches(&r.shipment, &r.pen_final))
        .collect();

    log::debug!("Reweight table: {} active rows", rows.len());
    rows
}

pub fn reweight_pen_summary(snapshot: &Snapshot, stage: PenStage, shipment: &str) -> Vec<PenSummaryRow> {
    let sold = sold_rfid_set(&snapshot.sales);
    let active = snapshot
        .reweights
        .iter()
        .filter(|r| !sold.contains(r.rfid.as_str()))
        .filter(|r| matches_key(shipment, &r.shipment));

    let groups = aggregate_by_key(
        active,
        |r: &ReweightRecord| stage.pen_of(r),
        InclusionPolicy::PositiveWeightOnly,
    );

    let rows = pen_summary_rows(&groups);
    log::debug!("Reweight summary ({:?}): {} pens", stage, rows.len());
    rows
}
