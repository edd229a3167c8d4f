//! Sale history and the staff sale report

use super::{matches_key, ADG_PLACES, WEIGHT_PLACES};
use crate::analytics_core::{round_to, StageMetrics};
use crate::records::SaleRecord;
use crate::snapshot::Snapshot;
use chrono::NaiveDate;
use serde::Serialize;

/// All sales, optionally for one buyer, in insertion order
pub fn sale_history<'a>(snapshot: &'a Snapshot, buyer: &str) -> Vec<&'a SaleRecord> {
    let rows: Vec<&SaleRecord> = snapshot
        .sales
        .iter()
        .filter(|s| matches_key(buyer, &s.buyer))
        .collect();

    log::debug!("Sale history: {} rows", rows.len());
    rows
}

/// One sold animal with its performance since induction and since the last reweigh
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffSaleRow {
    pub rfid: String,
    pub eartag: String,
    pub shipment: String,
    pub buyer: String,
    #[serde(with = "crate::records::date::lenient")]
    pub sale_date: Option<NaiveDate>,
    pub sale_weight: f64,
    pub induction_weight: Option<f64>,
    pub induction_to_sale: Option<StageMetrics>,
    pub reweight_weight: Option<f64>,
    pub reweight_to_sale: Option<StageMetrics>,
}

/// Staff report for `sales` (a buyer's history or an uncommitted cart preview).
///
/// The reweigh stage uses the latest-dated reweight, the same one the
/// lifecycle report uses.
pub fn staff_sale_report(sales: &[SaleRecord], snapshot: &Snapshot) -> Vec<StaffSaleRow> {
    let index = snapshot.index();

    let rows: Vec<StaffSaleRow> = sales
        .iter()
        .map(|sale| {
            let induction = index.induction.get(sale.rfid.as_str()).copied();
            let reweight = index.latest_reweight.get(sale.rfid.as_str()).copied();

            let eartag = match (sale.eartag.is_empty(), induction) {
                (true, Some(ind)) => ind.eartag.clone(),
                _ => sale.eartag.clone(),
            };

            StaffSaleRow {
                rfid: sale.rfid.clone(),
                eartag,
                shipment: sale.shipment.clone(),
                buyer: sale.buyer.clone(),
                sale_date: sale.sale_date,
                sale_weight: round_to(sale.weight, WEIGHT_PLACES),
                induction_weight: induction.map(|ind| round_to(ind.weight, WEIGHT_PLACES)),
                induction_to_sale: induction.map(|ind| {
                    StageMetrics::between(ind.date, ind.weight, sale.sale_date, sale.weight)
                        .rounded(ADG_PLACES)
                }),
                reweight_weight: reweight.map(|rew| round_to(rew.weight, WEIGHT_PLACES)),
                reweight_to_sale: reweight.map(|rew| {
                    StageMetrics::between(rew.date, rew.weight, sale.sale_date, sale.weight)
                        .rounded(ADG_PLACES)
                }),
            }
        })
        .collect();

    log::debug!("Staff sale report: {} rows", rows.len());
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{InductionRecord, ReweightRecord};

    fn day(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    fn create_test_reweight(rfid: &str, date: Option<NaiveDate>, weight: f64) -> ReweightRecord {
        ReweightRecord {
            rfid: rfid.to_string(),
            date,
            weight,
            ..ReweightRecord::default()
        }
    }

    fn create_test_snapshot() -> Snapshot {
        let induction = InductionRecord {
            eartag: "ET-001".to_string(),
            ..InductionRecord::new("A1", day(2024, 1, 1), 200.0)
        };
        Snapshot::new(
            vec![induction],
            vec![
                create_test_reweight("A1", day(2024, 2, 10), 245.0),
                create_test_reweight("A1", day(2024, 2, 1), 230.0),
            ],
            vec![
                SaleRecord::new("A1", "Budi", day(2024, 3, 1), 260.0),
                SaleRecord::new("B7", "Sari", day(2024, 3, 2), 240.0),
            ],
        )
    }

    #[test]
    fn test_history_by_buyer() {
        let snapshot = create_test_snapshot();
        assert_eq!(sale_history(&snapshot, "").len(), 2);

        let budi = sale_history(&snapshot, "Budi");
        assert_eq!(budi.len(), 1);
        assert_eq!(budi[0].rfid, "A1");
    }

    #[test]
    fn test_staff_report_uses_latest_reweight() {
        let snapshot = create_test_snapshot();
        let rows = staff_sale_report(&snapshot.sales, &snapshot);

        let a1 = &rows[0];
        assert_eq!(a1.eartag, "ET-001");
        assert_eq!(a1.induction_weight, Some(200.0));
        assert_eq!(a1.induction_to_sale.map(|m| m.dof), Some(60));
        assert_eq!(a1.induction_to_sale.map(|m| m.adg), Some(1.0));

        // 2024-02-10 is the latest reweigh even though it was recorded first
        assert_eq!(a1.reweight_weight, Some(245.0));
        assert_eq!(a1.reweight_to_sale.map(|m| m.dof), Some(20));
        assert_eq!(a1.reweight_to_sale.map(|m| m.adg), Some(0.75));
    }

    #[test]
    fn test_staff_report_unknown_animal() {
        let snapshot = create_test_snapshot();
        let rows = staff_sale_report(&snapshot.sales, &snapshot);

        let b7 = &rows[1];
        assert_eq!(b7.eartag, "");
        assert_eq!(b7.induction_weight, None);
        assert_eq!(b7.induction_to_sale, None);
        assert_eq!(b7.reweight_to_sale, None);
    }
}
