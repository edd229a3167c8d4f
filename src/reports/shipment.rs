//! Shipment-level views: cross-stage roll-up and per-animal lifecycle detail
//!
//! Both views are historical, so sold animals stay in.

use super::{matches_key, ADG_PLACES, WEIGHT_PLACES};
use crate::analytics_core::{
    build_lifecycle_rows, round_to, shipment_rollup, GroupKind, LifecycleRow, Observation,
};
use crate::snapshot::Snapshot;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RollupRow {
    pub shipment: String,
    pub induction_count: usize,
    pub induction_weight: f64,
    pub reweight_count: usize,
    pub reweight_weight: f64,
    pub sale_count: usize,
    pub sale_weight: f64,
    pub remaining_head: i64,
}

/// Induction, reweight and sale totals per shipment, ordered by shipment label
pub fn shipment_rollup_report(snapshot: &Snapshot, shipment: &str) -> Vec<RollupRow> {
    let groups = shipment_rollup(
        snapshot.inductions.iter().filter(|r| matches_key(shipment, &r.shipment)),
        snapshot.reweights.iter().filter(|r| matches_key(shipment, &r.shipment)),
        snapshot.sales.iter().filter(|r| matches_key(shipment, &r.shipment)),
    );

    let mut rows: Vec<RollupRow> = groups
        .iter()
        .map(|(key, rollup)| RollupRow {
            shipment: key.label(GroupKind::Shipment).to_string(),
            induction_count: rollup.induction.count,
            induction_weight: round_to(rollup.induction.total_weight, WEIGHT_PLACES),
            reweight_count: rollup.reweight.count,
            reweight_weight: round_to(rollup.reweight.total_weight, WEIGHT_PLACES),
            sale_count: rollup.sale.count,
            sale_weight: round_to(rollup.sale.total_weight, WEIGHT_PLACES),
            remaining_head: rollup.remaining_head(),
        })
        .collect();
    rows.sort_by(|a, b| a.shipment.cmp(&b.shipment));

    log::debug!("Shipment roll-up: {} shipments", rows.len());
    rows
}

/// Lifecycle rows for every induction (sold or not), optionally one shipment
pub fn lifecycle_detail(snapshot: &Snapshot, shipment: &str) -> Vec<LifecycleRow> {
    let index = snapshot.index();
    let inductions = snapshot
        .inductions
        .iter()
        .filter(|r| matches_key(shipment, &r.shipment));

    let rows: Vec<LifecycleRow> = build_lifecycle_rows(inductions, &index)
        .into_iter()
        .map(rounded_for_report)
        .collect();

    log::debug!("Lifecycle detail: {} animals", rows.len());
    rows
}

fn rounded_for_report(row: LifecycleRow) -> LifecycleRow {
    let weight = |obs: Observation| Observation::new(obs.date, round_to(obs.weight, WEIGHT_PLACES));

    LifecycleRow {
        induction: weight(row.induction),
        reweight: row.reweight.map(weight),
        sale: row.sale.map(weight),
        induction_to_reweight: row.induction_to_reweight.map(|m| m.rounded(ADG_PLACES)),
        induction_to_sale: row.induction_to_sale.map(|m| m.rounded(ADG_PLACES)),
        reweight_to_sale: row.reweight_to_sale.map(|m| m.rounded(ADG_PLACES)),
        ..row
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{InductionRecord, ReweightRecord, SaleRecord};
    use chrono::NaiveDate;

    fn day(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    fn create_test_induction(rfid: &str, shipment: &str, weight: f64) -> InductionRecord {
        InductionRecord {
            shipment: shipment.to_string(),
            ..InductionRecord::new(rfid, day(2024, 1, 1), weight)
        }
    }

    fn create_test_snapshot() -> Snapshot {
        Snapshot::new(
            vec![
                create_test_induction("A1", "SHP-01", 200.0),
                create_test_induction("A2", "SHP-01", 210.5),
                create_test_induction("A3", "", 190.0),
            ],
            vec![ReweightRecord {
                rfid: "A1".to_string(),
                shipment: "SHP-01".to_string(),
                date: day(2024, 2, 1),
                weight: 230.0,
                ..ReweightRecord::default()
            }],
            vec![SaleRecord {
                shipment: "SHP-01".to_string(),
                ..SaleRecord::new("A1", "Budi", day(2024, 3, 1), 260.0)
            }],
        )
    }

    #[test]
    fn test_rollup_rows() {
        let snapshot = create_test_snapshot();
        let rows = shipment_rollup_report(&snapshot, "");

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].shipment, "SHP-01");
        assert_eq!(rows[0].induction_count, 2);
        assert_eq!(rows[0].induction_weight, 410.5);
        assert_eq!(rows[0].reweight_count, 1);
        assert_eq!(rows[0].sale_count, 1);
        assert_eq!(rows[0].remaining_head, 1);

        assert_eq!(rows[1].shipment, "TANPA SHIPMENT");
        assert_eq!(rows[1].remaining_head, 1);
    }

    #[test]
    fn test_rollup_shipment_filter() {
        let snapshot = create_test_snapshot();
        let rows = shipment_rollup_report(&snapshot, "SHP-01");
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_lifecycle_detail_keeps_sold_animals() {
        let snapshot = create_test_snapshot();
        let rows = lifecycle_detail(&snapshot, "SHP-01");

        assert_eq!(rows.len(), 2);
        let a1 = &rows[0];
        assert_eq!(a1.buyer.as_deref(), Some("Budi"));
        assert_eq!(a1.induction_to_reweight.map(|m| m.dof), Some(31));
        assert_eq!(a1.induction_to_reweight.map(|m| m.adg), Some(0.97));
        assert_eq!(a1.induction_to_sale.map(|m| m.dof), Some(60));
        assert_eq!(a1.reweight_to_sale.map(|m| m.dof), Some(29));
        assert_eq!(a1.reweight_to_sale.map(|m| m.adg), Some(1.03));

        assert_eq!(rows[1].reweight, None);
        assert_eq!(rows[1].induction_to_sale, None);
    }
}
