use super::{date, default_vitamin_dose, lenient_number, InductionRecord};
use crate::analytics_core::metrics::{calculate_adg, calculate_dof, round_to};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Reweigh event. Several may exist per `rfid`; `id` tells them apart once stored.
///
/// `induction_weight`, `dof` and `adg` are snapshots taken at save time and are
/// never refreshed when the induction record changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReweightRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub rfid: String,
    #[serde(with = "date::lenient")]
    pub induction_date: Option<NaiveDate>,
    #[serde(with = "date::lenient")]
    pub date: Option<NaiveDate>,
    pub eartag: String,
    pub shipment: String,
    #[serde(deserialize_with = "lenient_number::f64_or_zero")]
    pub weight: f64,
    #[serde(deserialize_with = "lenient_number::f64_or_zero")]
    pub induction_weight: f64,
    pub pen_at_induction: String,
    pub pen_initial: String,
    pub pen_final: String,
    #[serde(deserialize_with = "lenient_number::days_or_zero")]
    pub dof: i64,
    #[serde(deserialize_with = "lenient_number::f64_or_zero")]
    pub adg: f64,
    pub frame: String,
    #[serde(deserialize_with = "lenient_number::dose_or_default")]
    pub vitamin_dose: u32,
    pub breed: String,
}

impl Default for ReweightRecord {
    fn default() -> Self {
        Self {
            id: None,
            rfid: String::new(),
            induction_date: None,
            date: None,
            eartag: String::new(),
            shipment: String::new(),
            weight: 0.0,
            induction_weight: 0.0,
            pen_at_induction: String::new(),
            pen_initial: String::new(),
            pen_final: String::new(),
            dof: 0,
            adg: 0.0,
            frame: String::new(),
            vitamin_dose: default_vitamin_dose(),
            breed: String::new(),
        }
    }
}

/// Operator input for one reweigh (scanner RFID + scale reading + pens)
#[derive(Debug, Clone, PartialEq)]
pub struct ReweighEntry {
    pub rfid: String,
    pub date: Option<NaiveDate>,
    pub weight: f64,
    pub pen_initial: String,
    pub pen_final: String,
    pub vitamin_dose: u32,
}

impl ReweighEntry {
    pub fn new(rfid: impl Into<String>, date: Option<NaiveDate>, weight: f64) -> Self {
        Self {
            rfid: rfid.into().trim().to_string(),
            date,
            weight,
            pen_initial: String::new(),
            pen_final: String::new(),
            vitamin_dose: default_vitamin_dose(),
        }
    }
}

impl ReweightRecord {
    /// Build a reweight record from an entry, inheriting identity fields from the
    /// animal's induction record and freezing the DOF/ADG snapshot.
    ///
    /// Without an induction record the inherited fields stay empty and the
    /// snapshot degrades to DOF 0 / ADG 0.
    pub fn capture(entry: ReweighEntry, induction: Option<&InductionRecord>) -> Self {
        let mut record = Self {
            rfid: entry.rfid,
            date: entry.date,
            weight: entry.weight,
            pen_initial: entry.pen_initial.trim().to_string(),
            pen_final: entry.pen_final.trim().to_string(),
            vitamin_dose: entry.vitamin_dose.max(1),
            ..Self::default()
        };

        if let Some(ind) = induction {
            record.induction_date = ind.date;
            record.induction_weight = ind.weight;
            record.eartag = ind.eartag.clone();
            record.shipment = ind.shipment.clone();
            record.pen_at_induction = ind.pen.clone();
            record.frame = ind.frame.clone();
            record.breed = ind.breed.clone();
        }

        record.dof = calculate_dof(record.induction_date, record.date);
        record.adg = round_to(
            calculate_adg(record.induction_weight, record.weight, record.dof),
            2,
        );
        record
    }

    /// Copy of this record with a new final pen (temporary pen -> fixed pen)
    pub fn with_pen_final(&self, pen: impl Into<String>) -> Self {
        Self {
            pen_final: pen.into().trim().to_string(),
            ..self.clone()
        }
    }
}
