//! Agency Desk - back-office engine for an insurance agency
//!
//! This library provides:
//! - Typed customer and policy records with CSV snapshot loading
//! - Formatting, validation and renewal countdown helpers
//! - Dashboard aggregation: premium totals, forecasts, state ranking with hazard exposure
//! - Renewal outreach ordering and free-text customer search
//! - An in-memory customer/policy store and the quoting flow

pub mod customer;
pub mod policy;
pub mod format;
pub mod aggregation;
pub mod snapshot;
pub mod store;
pub mod quote;

// Re-export commonly used types
pub use customer::{Customer, CustomerForm, load_customers};
pub use policy::{Policy, NewPolicy, load_policies};
pub use aggregation::{compute_dashboard, DashboardConfig, DashboardSummary, StateExposure, Hazard};
pub use snapshot::{Snapshot, SnapshotRunner};
pub use store::{AgencyStore, StoreError};
pub use quote::{Quote, generate_quote, confirm_quote};
