//! Record types for the three life-cycle stages
//!
//! ```text
//! InductionRecord (1 per rfid) ──┬── ReweightRecord (0..n per rfid)
//!                                └── SaleRecord     (0..1 per rfid, duplicates possible)
//! ```
//!
//! Records are immutable by default. The only sanctioned edits (temporary pen to
//! fixed pen) go through copy-with-one-field-changed helpers.

pub mod date;
mod induction;
mod reweight;
mod sale;

pub use induction::InductionRecord;
pub use reweight::{ReweighEntry, ReweightRecord};
pub use sale::SaleRecord;

pub(crate) fn default_vitamin_dose() -> u32 {
    1
}

/// Lenient numeric deserialization for hand-entered and imported fields.
///
/// Numbers and numeric strings are accepted. `null`, unparseable text and
/// non-finite values (`NaN`, `inf`) fall back to the field's neutral value.
pub(crate) mod lenient_number {
    use super::default_vitamin_dose;
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawNumber {
        Number(f64),
        Text(String),
    }

    fn finite<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<RawNumber> = Option::deserialize(deserializer)?;
        let value = match raw {
            Some(RawNumber::Number(n)) => Some(n),
            Some(RawNumber::Text(s)) => s.trim().parse::<f64>().ok(),
            None => None,
        };
        Ok(value.filter(|v| v.is_finite()))
    }

    /// Weights and ADG; unusable input -> 0.0
    pub fn f64_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(finite(deserializer)?.unwrap_or(0.0))
    }

    /// Whole days, fractional part dropped; unusable input -> 0
    pub fn days_or_zero<'de, D>(deserializer: D) -> Result<i64, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(finite(deserializer)?.map(|v| v.trunc() as i64).unwrap_or(0))
    }

    /// Vitamin dose; anything below 1 or unusable -> the default dose
    pub fn dose_or_default<'de, D>(deserializer: D) -> Result<u32, D::Error>
    where
        D: Deserializer<'de>,
    {
        let dose = finite(deserializer)?
            .map(f64::trunc)
            .filter(|v| *v >= 1.0 && *v <= u32::MAX as f64)
            .map(|v| v as u32);
        Ok(dose.unwrap_or_else(default_vitamin_dose))
    }
}
