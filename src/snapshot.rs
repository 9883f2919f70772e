//! Snapshot runner for dashboard summaries
//!
//! A snapshot is an owned copy of the customer and policy lists. The runner
//! holds the dashboard config once and summarizes one snapshot or many
//! independent snapshots in parallel.

use std::error::Error;
use std::path::Path;

use chrono::{DateTime, Utc};
use rayon::prelude::*;

use crate::aggregation::{compute_dashboard, DashboardConfig, DashboardSummary};
use crate::{load_customers, load_policies, Customer, Policy};

/// Default directory holding customers.csv and policies.csv
pub const DEFAULT_DATA_PATH: &str = "data";

/// Customers and policies as of one point in time
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub customers: Vec<Customer>,
    pub policies: Vec<Policy>,
}

impl Snapshot {
    pub fn new(customers: Vec<Customer>, policies: Vec<Policy>) -> Self {
        Self { customers, policies }
    }

    /// Load customers.csv and policies.csv from the default data directory
    pub fn load_default() -> Result<Self, Box<dyn Error>> {
        Self::load_from(Path::new(DEFAULT_DATA_PATH))
    }

    /// Load customers.csv and policies.csv from `dir`
    pub fn load_from(dir: &Path) -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            customers: load_customers(dir.join("customers.csv"))?,
            policies: load_policies(dir.join("policies.csv"))?,
        })
    }

    /// Policies whose customer id matches no customer
    pub fn orphaned_policies(&self) -> Vec<&Policy> {
        self.policies
            .iter()
            .filter(|p| !self.customers.iter().any(|c| c.customer_id == p.customer_id))
            .collect()
    }
}

/// Pre-configured runner for dashboard summaries
///
/// # Example
/// ```ignore
/// let runner = SnapshotRunner::new();
/// let summaries = runner.summarize_batch(&snapshots, Utc::now());
/// ```
#[derive(Debug, Clone, Default)]
pub struct SnapshotRunner {
    config: DashboardConfig,
}

impl SnapshotRunner {
    /// Create runner with the default dashboard config
    pub fn new() -> Self {
        Self::default()
    }

    /// Create runner with a custom config
    pub fn with_config(config: DashboardConfig) -> Self {
        Self { config }
    }

    /// Summarize a single snapshot
    pub fn summarize(&self, snapshot: &Snapshot, now: DateTime<Utc>) -> DashboardSummary {
        compute_dashboard(&snapshot.customers, &snapshot.policies, &self.config, now)
    }

    /// Summarize independent snapshots in parallel; output order matches input order
    pub fn summarize_batch(&self, snapshots: &[Snapshot], now: DateTime<Utc>) -> Vec<DashboardSummary> {
        log::debug!("Summarizing {} snapshots", snapshots.len());
        snapshots
            .par_iter()
            .map(|snapshot| self.summarize(snapshot, now))
            .collect()
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut DashboardConfig {
        &mut self.config
    }
}
