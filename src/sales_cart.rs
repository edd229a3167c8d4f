//! Sale staging cart
//!
//! Animals are staged one by one, then committed as a single batch for one
//! buyer. Committing only builds the records; persisting them is the store's
//! job (`SqliteStore::insert_sales`).

use crate::records::{InductionRecord, SaleRecord};
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    #[error("RFID must not be empty")]
    EmptyRfid,
    #[error("RFID {0} is already in the cart")]
    DuplicateRfid(String),
    #[error("Cart is empty")]
    EmptyCart,
    #[error("Buyer must be selected before saving")]
    MissingBuyer,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartItem {
    pub rfid: String,
    pub eartag: String,
    pub shipment: String,
    pub sale_date: Option<NaiveDate>,
    pub weight: f64,
}

impl CartItem {
    pub fn new(rfid: impl Into<String>, sale_date: Option<NaiveDate>, weight: f64) -> Self {
        Self {
            rfid: rfid.into().trim().to_string(),
            sale_date,
            weight,
            ..Self::default()
        }
    }

    /// Item prefilled with eartag and shipment from the animal's induction
    pub fn from_induction(induction: &InductionRecord, sale_date: Option<NaiveDate>, weight: f64) -> Self {
        Self {
            eartag: induction.eartag.clone(),
            shipment: induction.shipment.clone(),
            ..Self::new(induction.rfid.clone(), sale_date, weight)
        }
    }

    fn to_sale(&self, buyer: &str) -> SaleRecord {
        SaleRecord {
            id: None,
            rfid: self.rfid.clone(),
            buyer: buyer.to_string(),
            sale_date: self.sale_date,
            eartag: self.eartag.clone(),
            shipment: self.shipment.clone(),
            weight: self.weight,
        }
    }
}

#[derive(Debug, Default)]
pub struct SaleCart {
    items: Vec<CartItem>,
}

impl SaleCart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, item: CartItem) -> Result<(), CartError> {
        if item.rfid.is_empty() {
            return Err(CartError::EmptyRfid);
        }
        if self.items.iter().any(|i| i.rfid == item.rfid) {
            return Err(CartError::DuplicateRfid(item.rfid));
        }

        self.items.push(item);
        Ok(())
    }

    /// Remove the item at `index`; out-of-range indices are ignored
    pub fn remove(&mut self, index: usize) -> Option<CartItem> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn total_weight(&self) -> f64 {
        self.items.iter().map(|i| i.weight).sum()
    }

    /// Staged items as sale records, without committing (staff report preview)
    pub fn preview(&self, buyer: &str) -> Vec<SaleRecord> {
        self.items.iter().map(|i| i.to_sale(buyer)).collect()
    }

    /// Turn the staged items into sale records for `buyer` and empty the cart
    pub fn commit(&mut self, buyer: &str) -> Result<Vec<SaleRecord>, CartError> {
        if self.items.is_empty() {
            return Err(CartError::EmptyCart);
        }
        let buyer = buyer.trim();
        if buyer.is_empty() {
            return Err(CartError::MissingBuyer);
        }

        let sales = self.preview(buyer);
        self.items.clear();

        log::info!("Penjualan: committed {} items for buyer {}", sales.len(), buyer);
        Ok(sales)
    }
}
