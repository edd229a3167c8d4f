use super::{date, default_vitamin_dose, lenient_number};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Intake record, one per animal, keyed by `rfid`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InductionRecord {
    pub rfid: String,
    pub shipment: String,
    #[serde(with = "date::lenient")]
    pub date: Option<NaiveDate>,
    pub eartag: String,
    #[serde(deserialize_with = "lenient_number::f64_or_zero")]
    pub weight: f64,
    pub pen: String,
    pub tooth_stage: String,
    pub frame: String,
    pub property_code: String,
    #[serde(deserialize_with = "lenient_number::dose_or_default")]
    pub vitamin_dose: u32,
    pub breed: String,
}

impl Default for InductionRecord {
    fn default() -> Self {
        Self {
            rfid: String::new(),
            shipment: String::new(),
            date: None,
            eartag: String::new(),
            weight: 0.0,
            pen: String::new(),
            tooth_stage: String::new(),
            frame: String::new(),
            property_code: String::new(),
            vitamin_dose: default_vitamin_dose(),
            breed: String::new(),
        }
    }
}

impl InductionRecord {
    pub fn new(rfid: impl Into<String>, date: Option<NaiveDate>, weight: f64) -> Self {
        Self {
            rfid: rfid.into().trim().to_string(),
            date,
            weight,
            ..Self::default()
        }
    }

    /// Copy of this record moved to another pen (temporary pen -> fixed pen)
    pub fn with_pen(&self, pen: impl Into<String>) -> Self {
        Self {
            pen: pen.into().trim().to_string(),
            ..self.clone()
        }
    }
}
