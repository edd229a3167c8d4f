//! Identity resolution across the three record streams
//!
//! All lookups borrow from the snapshot and are rebuilt per report call.
//! Iteration order of the input slices decides every tie.

use crate::records::{InductionRecord, ReweightRecord, SaleRecord};
use chrono::NaiveDate;
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

/// Distinct rfids with at least one sale
pub fn sold_rfid_set(sales: &[SaleRecord]) -> HashSet<&str> {
    sales.iter().map(|s| s.rfid.as_str()).collect()
}

/// The current reweight per rfid: latest `date`, earlier-encountered on ties.
///
/// A record only replaces the stored one when its date is strictly later.
/// Unknown dates never compare as later, so such a record is kept only when it
/// is the first one seen for its rfid.
pub fn latest_reweight_by_rfid(reweights: &[ReweightRecord]) -> HashMap<&str, &ReweightRecord> {
    let mut latest: HashMap<&str, &ReweightRecord> = HashMap::new();

    for record in reweights {
        match latest.entry(record.rfid.as_str()) {
            Entry::Vacant(slot) => {
                slot.insert(record);
            }
            Entry::Occupied(mut slot) => {
                if is_strictly_later(record.date, slot.get().date) {
                    slot.insert(record);
                }
            }
        }
    }

    latest
}

/// Sale per rfid; with duplicates the last one encountered wins
pub fn sale_by_rfid(sales: &[SaleRecord]) -> HashMap<&str, &SaleRecord> {
    sales.iter().map(|s| (s.rfid.as_str(), s)).collect()
}

/// Induction per rfid; with duplicates the last one encountered wins
pub fn induction_by_rfid(inductions: &[InductionRecord]) -> HashMap<&str, &InductionRecord> {
    inductions.iter().map(|i| (i.rfid.as_str(), i)).collect()
}

fn is_strictly_later(candidate: Option<NaiveDate>, current: Option<NaiveDate>) -> bool {
    matches!((candidate, current), (Some(c), Some(k)) if c > k)
}

/// All identity lookups for one snapshot, built in a single pass per collection
#[derive(Debug)]
pub struct IdentityIndex<'a> {
    pub sold: HashSet<&'a str>,
    pub latest_reweight: HashMap<&'a str, &'a ReweightRecord>,
    pub sale: HashMap<&'a str, &'a SaleRecord>,
    pub induction: HashMap<&'a str, &'a InductionRecord>,
}

impl<'a> IdentityIndex<'a> {
    pub fn build(
        inductions: &'a [InductionRecord],
        reweights: &'a [ReweightRecord],
        sales: &'a [SaleRecord],
    ) -> Self {
        Self {
            sold: sold_rfid_set(sales),
            latest_reweight: latest_reweight_by_rfid(reweights),
            sale: sale_by_rfid(sales),
            induction: induction_by_rfid(inductions),
        }
    }

    pub fn is_sold(&self, rfid: &str) -> bool {
        self.sold.contains(rfid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    fn create_test_reweight(id: i64, rfid: &str, date: Option<NaiveDate>, weight: f64) -> ReweightRecord {
        ReweightRecord {
            id: Some(id),
            rfid: rfid.to_string(),
            date,
            weight,
            ..ReweightRecord::default()
        }
    }

    #[test]
    fn test_sold_set_counts_distinct_rfids() {
        let sales = vec![
            SaleRecord::new("A1", "Budi", day(2024, 3, 1), 260.0),
            SaleRecord::new("A1", "Budi", day(2024, 3, 2), 261.0),
            SaleRecord::new("B2", "Sari", day(2024, 3, 1), 300.0),
        ];

        let sold = sold_rfid_set(&sales);
        assert_eq!(sold.len(), 2);
        assert!(sold.contains("A1"));
        assert!(sold.contains("B2"));
        assert!(!sold.contains("C3"));
    }

    #[test]
    fn test_latest_reweight_picks_max_date() {
        let reweights = vec![
            create_test_reweight(1, "A1", day(2024, 2, 1), 230.0),
            create_test_reweight(2, "A1", day(2024, 4, 1), 280.0),
            create_test_reweight(3, "A1", day(2024, 3, 1), 250.0),
            create_test_reweight(4, "B2", day(2024, 1, 15), 210.0),
        ];

        let latest = latest_reweight_by_rfid(&reweights);
        assert_eq!(latest.len(), 2);
        assert_eq!(latest["A1"].id, Some(2));
        assert_eq!(latest["B2"].id, Some(4));
    }

    #[test]
    fn test_latest_reweight_tie_keeps_first() {
        let reweights = vec![
            create_test_reweight(1, "A1", day(2024, 2, 1), 230.0),
            create_test_reweight(2, "A1", day(2024, 2, 1), 235.0),
        ];

        let latest = latest_reweight_by_rfid(&reweights);
        assert_eq!(latest["A1"].id, Some(1));
    }

    #[test]
    fn test_latest_reweight_unknown_dates() {
        // Unknown date seen first can never be replaced
        let reweights = vec![
            create_test_reweight(1, "A1", None, 230.0),
            create_test_reweight(2, "A1", day(2024, 2, 1), 235.0),
        ];
        assert_eq!(latest_reweight_by_rfid(&reweights)["A1"].id, Some(1));

        // Unknown date seen later never replaces a dated record
        let reweights = vec![
            create_test_reweight(1, "A1", day(2024, 2, 1), 230.0),
            create_test_reweight(2, "A1", None, 235.0),
        ];
        assert_eq!(latest_reweight_by_rfid(&reweights)["A1"].id, Some(1));
    }

    #[test]
    fn test_duplicate_sale_last_wins() {
        let mut first = SaleRecord::new("A1", "Budi", day(2024, 3, 1), 260.0);
        first.id = Some(1);
        let mut second = SaleRecord::new("A1", "Sari", day(2024, 3, 5), 262.0);
        second.id = Some(2);
        let sales = vec![first, second];

        let by_rfid = sale_by_rfid(&sales);
        assert_eq!(by_rfid["A1"].id, Some(2));
        assert_eq!(by_rfid["A1"].buyer, "Sari");
    }

    #[test]
    fn test_identity_index() {
        let inductions = vec![InductionRecord::new("A1", day(2024, 1, 1), 200.0)];
        let reweights = vec![create_test_reweight(1, "A1", day(2024, 2, 1), 230.0)];
        let sales = vec![SaleRecord::new("A1", "Budi", day(2024, 3, 1), 260.0)];

        let index = IdentityIndex::build(&inductions, &reweights, &sales);
        assert!(index.is_sold("A1"));
        assert!(!index.is_sold("B2"));
        assert_eq!(index.latest_reweight["A1"].weight, 230.0);
        assert_eq!(index.induction["A1"].weight, 200.0);
    }
}
