//! Active induction table and pen summary

use super::{pen_summary_rows, PenSummaryRow, TableFilter};
use crate::analytics_core::{aggregate_by_key, sold_rfid_set, InclusionPolicy};
use crate::records::InductionRecord;
use crate::snapshot::Snapshot;

/// Unsold inductions matching `filter`, in insertion order
pub fn active_inductions<'a>(snapshot: &'a Snapshot, filter: &TableFilter) -> Vec<&'a InductionRecord> {
    let sold = sold_rfid_set(&snapshot.sales);

    let rows: Vec<&InductionRecord> = snapshot
        .inductions
        .iter()
        .filter(|r| !sold.contains(r.rfid.as_str()))
        .filter(|r| filter.matches(&r.shipment, &r.pen))
        .collect();

    log::debug!("Induction table: {} active rows", rows.len());
    rows
}

/// Active inductions grouped by pen, optionally limited to one shipment
pub fn induction_pen_summary(snapshot: &Snapshot, shipment: &str) -> Vec<PenSummaryRow> {
    let active = active_inductions(snapshot, &TableFilter::by_shipment(shipment));
    let groups = aggregate_by_key(
        active.iter().copied(),
        |r: &InductionRecord| r.pen.as_str(),
        InclusionPolicy::AllRecords,
    );

    let rows = pen_summary_rows(&groups);
    log::debug!("Induction summary: {} pens", rows.len());
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::SaleRecord;

    fn create_test_induction(rfid: &str, shipment: &str, pen: &str, weight: f64) -> InductionRecord {
        InductionRecord {
            shipment: shipment.to_string(),
            pen: pen.to_string(),
            breed: "Brahman".to_string(),
            ..InductionRecord::new(rfid, None, weight)
        }
    }

    fn create_test_snapshot() -> Snapshot {
        Snapshot::new(
            vec![
                create_test_induction("A1", "SHP-01", "P1", 200.0),
                create_test_induction("A2", "SHP-01", "P1", 220.0),
                create_test_induction("A3", "SHP-02", "", 180.0),
                create_test_induction("A4", "SHP-02", "P2", 190.0),
            ],
            Vec::new(),
            vec![SaleRecord::new("A4", "Budi", None, 250.0)],
        )
    }

    #[test]
    fn test_sold_animals_hidden() {
        let snapshot = create_test_snapshot();
        let rows = active_inductions(&snapshot, &TableFilter::default());

        let rfids: Vec<&str> = rows.iter().map(|r| r.rfid.as_str()).collect();
        assert_eq!(rfids, vec!["A1", "A2", "A3"]);
    }

    #[test]
    fn test_table_filters() {
        let snapshot = create_test_snapshot();

        assert_eq!(active_inductions(&snapshot, &TableFilter::by_shipment("SHP-02")).len(), 1);
        assert_eq!(active_inductions(&snapshot, &TableFilter::new("", "P1")).len(), 2);
        assert!(active_inductions(&snapshot, &TableFilter::new("SHP-02", "P1")).is_empty());
    }

    #[test]
    fn test_pen_summary() {
        let snapshot = create_test_snapshot();
        let rows = induction_pen_summary(&snapshot, "");

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].pen, "P1");
        assert_eq!(rows[0].count, 2);
        assert_eq!(rows[0].total_weight, 420.0);
        assert_eq!(rows[0].avg_weight, 210.0);
        assert_eq!(rows[0].avg_adg, None);
        assert_eq!(rows[0].breeds, "Brahman");

        assert_eq!(rows[1].pen, "TANPA PEN");
        assert_eq!(rows[1].count, 1);
    }

    #[test]
    fn test_pen_summary_by_shipment() {
        let snapshot = create_test_snapshot();
        let rows = induction_pen_summary(&snapshot, "SHP-01");

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].count, 2);
    }

    #[test]
    fn test_infinite_weight_does_not_poison_summary() {
        let json = r#"{"inductions":[
            {"rfid":"A1","pen":"P1","weight":"inf"},
            {"rfid":"A2","pen":"P1","weight":210}
        ]}"#;
        let snapshot: Snapshot = serde_json::from_str(json).unwrap();
        let rows = induction_pen_summary(&snapshot, "");

        assert_eq!(rows[0].count, 2);
        assert_eq!(rows[0].total_weight, 210.0);
        assert_eq!(rows[0].avg_weight, 105.0);

        let out = serde_json::to_value(&rows[0]).unwrap();
        assert_eq!(out["totalWeight"], 210.0);
    }
}
