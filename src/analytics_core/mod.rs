//! Analytics Core - Record Linkage and Aggregation Engine
//!
//! Pure functions over a full in-memory snapshot of the three record
//! collections. Nothing here holds state between calls or performs I/O.
//!
//! # Architecture
//!
//! ```text
//! Snapshot (inductions, reweights, sales)
//!     ↓
//! Resolver (sold set, latest reweight per rfid, sale per rfid)
//!     ↓
//! Join (induction-rooted lifecycle rows, three DOF/ADG pairs)
//!     ↓
//! Aggregate (group by pen / shipment) + Rollup (per-shipment stage counts)
//!     ↓
//! reports::* → ordered rows
//! ```
//!
//! Malformed input never raises: unknown dates give DOF 0, zero DOF gives ADG 0,
//! missing stages give `None`.

pub mod aggregate;
pub mod join;
pub mod metrics;
pub mod resolver;
pub mod rollup;

pub use aggregate::{aggregate_by_key, Aggregatable, GroupKey, GroupKind, GroupSummary, InclusionPolicy};
pub use join::{build_lifecycle_rows, join_lifecycle, LifecycleRow, Observation};
pub use metrics::{calculate_adg, calculate_dof, round_to, StageMetrics};
pub use resolver::{latest_reweight_by_rfid, sale_by_rfid, sold_rfid_set, IdentityIndex};
pub use rollup::{shipment_rollup, ShipmentRollup, StageTally};
