use super::{date, lenient_number};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Sale record; normally one per animal but duplicates are not prevented
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SaleRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub rfid: String,
    pub buyer: String,
    #[serde(with = "date::lenient")]
    pub sale_date: Option<NaiveDate>,
    pub eartag: String,
    pub shipment: String,
    #[serde(deserialize_with = "lenient_number::f64_or_zero")]
    pub weight: f64,
}

impl SaleRecord {
    pub fn new(
        rfid: impl Into<String>,
        buyer: impl Into<String>,
        sale_date: Option<NaiveDate>,
        weight: f64,
    ) -> Self {
        Self {
            rfid: rfid.into().trim().to_string(),
            buyer: buyer.into(),
            sale_date,
            weight,
            ..Self::default()
        }
    }
}
