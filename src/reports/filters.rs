//! Option lists for table and summary filters
//!
//! Options are drawn from every record, sold animals included, so a filter
//! value never vanishes just because the last animal in a pen was sold.

use crate::snapshot::Snapshot;
use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub shipments: Vec<String>,
    pub pens: Vec<String>,
}

/// Every option list the reports accept
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterCatalog {
    pub induction: FilterOptions,
    pub reweight: FilterOptions,
    pub buyers: Vec<String>,
}

impl FilterCatalog {
    pub fn build(snapshot: &Snapshot) -> Self {
        Self {
            induction: induction_filter_options(snapshot),
            reweight: reweight_filter_options(snapshot),
            buyers: buyer_options(snapshot),
        }
    }
}

fn distinct_sorted<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .filter(|v| !v.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

pub fn induction_filter_options(snapshot: &Snapshot) -> FilterOptions {
    FilterOptions {
        shipments: distinct_sorted(snapshot.inductions.iter().map(|r| r.shipment.as_str())),
        pens: distinct_sorted(snapshot.inductions.iter().map(|r| r.pen.as_str())),
    }
}

/// Reweight options; pens are final pens
pub fn reweight_filter_options(snapshot: &Snapshot) -> FilterOptions {
    FilterOptions {
        shipments: distinct_sorted(snapshot.reweights.iter().map(|r| r.shipment.as_str())),
        pens: distinct_sorted(snapshot.reweights.iter().map(|r| r.pen_final.as_str())),
    }
}

pub fn buyer_options(snapshot: &Snapshot) -> Vec<String> {
    distinct_sorted(snapshot.sales.iter().map(|s| s.buyer.as_str()))
}
