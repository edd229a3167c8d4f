//! Induction-rooted lifecycle join
//!
//! One row per induction record. Animals that only have reweight or sale
//! records are not represented.

use super::metrics::StageMetrics;
use super::resolver::IdentityIndex;
use crate::records::{InductionRecord, ReweightRecord, SaleRecord};
use chrono::NaiveDate;
use serde::Serialize;

/// A dated weight observation at one stage
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Observation {
    #[serde(with = "crate::records::date::lenient")]
    pub date: Option<NaiveDate>,
    pub weight: f64,
}

impl Observation {
    pub fn new(date: Option<NaiveDate>, weight: f64) -> Self {
        Self { date, weight }
    }
}

/// Full lifecycle of one animal. `None` stages and metric pairs mean
/// "not applicable", which is distinct from a computed zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LifecycleRow {
    pub rfid: String,
    pub eartag: String,
    pub shipment: String,
    pub breed: String,
    pub buyer: Option<String>,
    pub induction: Observation,
    pub reweight: Option<Observation>,
    pub sale: Option<Observation>,
    pub induction_to_reweight: Option<StageMetrics>,
    pub induction_to_sale: Option<StageMetrics>,
    pub reweight_to_sale: Option<StageMetrics>,
}

/// Join one induction record with its resolved reweight and sale
pub fn join_lifecycle(
    induction: &InductionRecord,
    reweight: Option<&ReweightRecord>,
    sale: Option<&SaleRecord>,
) -> LifecycleRow {
    let ind = Observation::new(induction.date, induction.weight);
    let rew = reweight.map(|r| Observation::new(r.date, r.weight));
    let sold = sale.map(|s| Observation::new(s.sale_date, s.weight));

    let pair = |from: Observation, to: Observation| {
        StageMetrics::between(from.date, from.weight, to.date, to.weight)
    };

    LifecycleRow {
        rfid: induction.rfid.clone(),
        eartag: induction.eartag.clone(),
        shipment: induction.shipment.clone(),
        breed: induction.breed.clone(),
        buyer: sale.map(|s| s.buyer.clone()),
        induction: ind,
        reweight: rew,
        sale: sold,
        induction_to_reweight: rew.map(|r| pair(ind, r)),
        induction_to_sale: sold.map(|s| pair(ind, s)),
        reweight_to_sale: rew.zip(sold).map(|(r, s)| pair(r, s)),
    }
}

/// Lifecycle rows for `inductions`, in input order
pub fn build_lifecycle_rows<'a, I>(inductions: I, index: &IdentityIndex<'_>) -> Vec<LifecycleRow>
where
    I: IntoIterator<Item = &'a InductionRecord>,
{
    inductions
        .into_iter()
        .map(|ind| {
            let rfid = ind.rfid.as_str();
            join_lifecycle(
                ind,
                index.latest_reweight.get(rfid).copied(),
                index.sale.get(rfid).copied(),
            )
        })
        .collect()
}
