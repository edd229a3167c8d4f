//! Cross-stage shipment roll-up
//!
//! Induction, reweight and sale populations are tallied by the same shipment
//! key at once. Every reweight event counts, not only the latest per animal.

use super::aggregate::GroupKey;
use super::metrics::usable_weight;
use crate::records::{InductionRecord, ReweightRecord, SaleRecord};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct StageTally {
    pub count: usize,
    pub total_weight: f64,
}

impl StageTally {
    fn add(&mut self, weight: f64) {
        self.count += 1;
        self.total_weight += usable_weight(weight);
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ShipmentRollup {
    pub induction: StageTally,
    pub reweight: StageTally,
    pub sale: StageTally,
}

impl ShipmentRollup {
    /// Head still on feed: inductions minus sales. Negative when a shipment
    /// has more sales than inductions.
    pub fn remaining_head(&self) -> i64 {
        self.induction.count as i64 - self.sale.count as i64
    }
}

pub fn shipment_rollup<'a, I, R, S>(
    inductions: I,
    reweights: R,
    sales: S,
) -> BTreeMap<GroupKey, ShipmentRollup>
where
    I: IntoIterator<Item = &'a InductionRecord>,
    R: IntoIterator<Item = &'a ReweightRecord>,
    S: IntoIterator<Item = &'a SaleRecord>,
{
    let mut groups: BTreeMap<GroupKey, ShipmentRollup> = BTreeMap::new();

    for ind in inductions {
        groups
            .entry(GroupKey::from_raw(&ind.shipment))
            .or_default()
            .induction
            .add(ind.weight);
    }
    for rew in reweights {
        groups
            .entry(GroupKey::from_raw(&rew.shipment))
            .or_default()
            .reweight
            .add(rew.weight);
    }
    for sale in sales {
        groups
            .entry(GroupKey::from_raw(&sale.shipment))
            .or_default()
            .sale
            .add(sale.weight);
    }

    groups
}
