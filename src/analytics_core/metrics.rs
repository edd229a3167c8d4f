//! Days-on-feed and average-daily-gain calculations

use chrono::NaiveDate;
use serde::Serialize;

/// Days on feed: signed whole-day difference between two dates.
///
/// Returns 0 when either date is unknown. A negative result (end before start)
/// is passed through so callers can spot mis-ordered entries.
pub fn calculate_dof(start: Option<NaiveDate>, end: Option<NaiveDate>) -> i64 {
    match (start, end) {
        (Some(start), Some(end)) => end.signed_duration_since(start).num_days(),
        _ => 0,
    }
}

/// Average daily gain in kg/day. Returns 0 when `dof` is 0. Not rounded.
pub fn calculate_adg(start_weight: f64, end_weight: f64, dof: i64) -> f64 {
    if dof == 0 {
        return 0.0;
    }
    (end_weight - start_weight) / dof as f64
}

/// Round half away from zero to `places` decimals (report display precision)
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

/// Non-finite weights count as 0 when summing
pub(crate) fn usable_weight(weight: f64) -> f64 {
    if weight.is_finite() {
        weight
    } else {
        0.0
    }
}

/// One DOF/ADG pair between two observations of the same animal
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StageMetrics {
    pub dof: i64,
    pub adg: f64,
}

impl StageMetrics {
    pub fn between(
        start_date: Option<NaiveDate>,
        start_weight: f64,
        end_date: Option<NaiveDate>,
        end_weight: f64,
    ) -> Self {
        let dof = calculate_dof(start_date, end_date);
        Self {
            dof,
            adg: calculate_adg(start_weight, end_weight, dof),
        }
    }

    pub fn rounded(self, places: u32) -> Self {
        Self {
            dof: self.dof,
            adg: round_to(self.adg, places),
        }
    }
}
