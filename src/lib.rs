//! Feedlot lifecycle analytics
//!
//! Links induction, reweight and sale records by RFID and turns them into
//! DOF/ADG metrics, active-inventory tables, pen summaries, shipment roll-ups
//! and per-animal lifecycle reports.

pub mod analytics_core;
pub mod config;
pub mod records;
pub mod report_writer;
pub mod reports;
pub mod sales_cart;
pub mod snapshot;
pub mod sqlite_pragma;
pub mod store;

pub use snapshot::Snapshot;
