//! Grouped summaries by categorical key (pen, shipment)

use super::metrics::usable_weight;
use crate::records::{InductionRecord, ReweightRecord, SaleRecord};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Group key with an explicit bucket for records that carry no key
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum GroupKey {
    Named(String),
    Unassigned,
}

impl GroupKey {
    pub fn from_raw(raw: &str) -> Self {
        if raw.is_empty() {
            GroupKey::Unassigned
        } else {
            GroupKey::Named(raw.to_string())
        }
    }

    /// Display label; the unassigned bucket is named after the grouping kind
    pub fn label(&self, kind: GroupKind) -> &str {
        match self {
            GroupKey::Named(name) => name,
            GroupKey::Unassigned => kind.unassigned_label(),
        }
    }
}

/// What a summary is grouped by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKind {
    Pen,
    Shipment,
}

impl GroupKind {
    pub fn unassigned_label(self) -> &'static str {
        match self {
            GroupKind::Pen => "TANPA PEN",
            GroupKind::Shipment => "TANPA SHIPMENT",
        }
    }
}

/// Which records take part in an aggregation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InclusionPolicy {
    AllRecords,
    /// Drop records whose weight is zero, negative, non-finite or missing. Used by reweight
    /// summaries so placeholder entries do not drag averages down.
    PositiveWeightOnly,
}

impl InclusionPolicy {
    pub fn includes(self, weight: f64) -> bool {
        match self {
            InclusionPolicy::AllRecords => true,
            InclusionPolicy::PositiveWeightOnly => weight.is_finite() && weight > 0.0,
        }
    }
}

/// Per-record values an aggregation reads
pub trait Aggregatable {
    fn weight(&self) -> f64;

    /// Stored ADG, for record types that carry one
    fn adg(&self) -> Option<f64> {
        None
    }

    fn breed(&self) -> &str {
        ""
    }

    fn frame(&self) -> &str {
        ""
    }
}

impl Aggregatable for InductionRecord {
    fn weight(&self) -> f64 {
        self.weight
    }

    fn breed(&self) -> &str {
        &self.breed
    }

    fn frame(&self) -> &str {
        &self.frame
    }
}

impl Aggregatable for ReweightRecord {
    fn weight(&self) -> f64 {
        self.weight
    }

    fn adg(&self) -> Option<f64> {
        Some(self.adg)
    }

    fn breed(&self) -> &str {
        &self.breed
    }

    fn frame(&self) -> &str {
        &self.frame
    }
}

impl Aggregatable for SaleRecord {
    fn weight(&self) -> f64 {
        self.weight
    }
}

/// Running totals for one group
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GroupSummary {
    pub count: usize,
    pub total_weight: f64,
    /// `None` when the grouped records carry no ADG
    pub total_adg: Option<f64>,
    pub breeds: BTreeSet<String>,
    pub frames: BTreeSet<String>,
}

impl GroupSummary {
    pub fn add<T: Aggregatable + ?Sized>(&mut self, record: &T) {
        self.count += 1;
        self.total_weight += usable_weight(record.weight());

        if let Some(adg) = record.adg() {
            *self.total_adg.get_or_insert(0.0) += usable_weight(adg);
        }
        if !record.breed().is_empty() {
            self.breeds.insert(record.breed().to_string());
        }
        if !record.frame().is_empty() {
            self.frames.insert(record.frame().to_string());
        }
    }

    pub fn avg_weight(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.total_weight / self.count as f64
    }

    pub fn avg_adg(&self) -> Option<f64> {
        let count = self.count.max(1) as f64;
        self.total_adg.map(|total| total / count)
    }

    pub fn breed_label(&self) -> String {
        join_label(&self.breeds)
    }

    pub fn frame_label(&self) -> String {
        join_label(&self.frames)
    }
}

fn join_label(values: &BTreeSet<String>) -> String {
    values.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
}

/// Group `records` by `key_fn`, skipping records the policy rejects.
///
/// Every included record lands in exactly one group, so the group counts sum
/// to the number of included records.
pub fn aggregate_by_key<'a, T, I, F>(
    records: I,
    key_fn: F,
    policy: InclusionPolicy,
) -> BTreeMap<GroupKey, GroupSummary>
where
    T: Aggregatable + 'a,
    I: IntoIterator<Item = &'a T>,
    F: Fn(&T) -> &str,
{
    let mut groups: BTreeMap<GroupKey, GroupSummary> = BTreeMap::new();

    for record in records {
        if !policy.includes(record.weight()) {
            continue;
        }
        groups
            .entry(GroupKey::from_raw(key_fn(record)))
            .or_default()
            .add(record);
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_induction(rfid: &str, pen: &str, weight: f64, breed: &str, frame: &str) -> InductionRecord {
        InductionRecord {
            pen: pen.to_string(),
            breed: breed.to_string(),
            frame: frame.to_string(),
            ..InductionRecord::new(rfid, None, weight)
        }
    }

    fn create_test_reweight(rfid: &str, pen_final: &str, weight: f64, adg: f64) -> ReweightRecord {
        ReweightRecord {
            rfid: rfid.to_string(),
            pen_final: pen_final.to_string(),
            weight,
            adg,
            ..ReweightRecord::default()
        }
    }

    #[test]
    fn test_group_by_pen() {
        let records = vec![
            create_test_induction("A1", "P1", 200.0, "Brahman", "M"),
            create_test_induction("A2", "P1", 220.0, "Limousin", "L"),
            create_test_induction("A3", "P2", 180.0, "Brahman", "M"),
        ];

        let groups = aggregate_by_key(&records, |r: &InductionRecord| r.pen.as_str(), InclusionPolicy::AllRecords);

        let p1 = &groups[&GroupKey::Named("P1".to_string())];
        assert_eq!(p1.count, 2);
        assert_eq!(p1.total_weight, 420.0);
        assert_eq!(p1.avg_weight(), 210.0);
        assert_eq!(p1.avg_adg(), None);
        assert_eq!(p1.breed_label(), "Brahman, Limousin");
        assert_eq!(p1.frame_label(), "L, M");

        assert_eq!(groups[&GroupKey::Named("P2".to_string())].count, 1);
    }

    #[test]
    fn test_empty_key_goes_to_unassigned() {
        let records = vec![
            create_test_induction("A1", "", 200.0, "", ""),
            create_test_induction("A2", "", 210.0, "", ""),
        ];

        let groups = aggregate_by_key(&records, |r: &InductionRecord| r.pen.as_str(), InclusionPolicy::AllRecords);

        assert_eq!(groups.len(), 1);
        let unassigned = &groups[&GroupKey::Unassigned];
        assert_eq!(unassigned.count, 2);
        assert_eq!(unassigned.breed_label(), "");
        assert_eq!(GroupKey::Unassigned.label(GroupKind::Pen), "TANPA PEN");
        assert_eq!(GroupKey::Unassigned.label(GroupKind::Shipment), "TANPA SHIPMENT");
    }

    #[test]
    fn test_positive_weight_policy() {
        let records = vec![
            create_test_reweight("A1", "P1", 200.0, 1.0),
            create_test_reweight("A2", "P1", 220.0, 0.5),
            create_test_reweight("A3", "P1", 0.0, -6.5),
            create_test_reweight("A4", "P1", -5.0, 0.0),
            create_test_reweight("A5", "P1", f64::INFINITY, 0.0),
        ];

        let groups = aggregate_by_key(
            &records,
            |r: &ReweightRecord| r.pen_final.as_str(),
            InclusionPolicy::PositiveWeightOnly,
        );

        let p1 = &groups[&GroupKey::Named("P1".to_string())];
        assert_eq!(p1.count, 2);
        assert_eq!(p1.total_weight, 420.0);
        assert_eq!(p1.avg_weight(), 210.0);
        assert_eq!(p1.avg_adg(), Some(0.75));
    }

    #[test]
    fn test_counts_sum_to_included_records() {
        let records: Vec<ReweightRecord> = (0..20)
            .map(|i| {
                let pen = match i % 3 {
                    0 => "P1",
                    1 => "P2",
                    _ => "",
                };
                let weight = if i % 4 == 0 { 0.0 } else { 200.0 + i as f64 };
                create_test_reweight(&format!("R{}", i), pen, weight, 0.8)
            })
            .collect();

        let included = records.iter().filter(|r| r.weight > 0.0).count();
        let groups = aggregate_by_key(
            &records,
            |r: &ReweightRecord| r.pen_final.as_str(),
            InclusionPolicy::PositiveWeightOnly,
        );

        let total: usize = groups.values().map(|g| g.count).sum();
        assert_eq!(total, included);
        assert_eq!(included, 15);
    }
}
