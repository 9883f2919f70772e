//! Dashboard summary: everything the landing page shows, computed in one pass

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::states::{rank_states, StateExposure};
use super::totals::{expiring_soon_count, premium_totals};
use crate::{Customer, Policy};

/// Flat growth applied to this year's premium to forecast next year's revenue.
/// A product decision, not derived from history.
pub const REVENUE_GROWTH_FACTOR: f64 = 1.1;

/// Policies renewing within this many days count as expiring soon
pub const EXPIRING_SOON_DAYS: i64 = 30;

/// Number of states shown in the premium ranking
pub const TOP_STATE_LIMIT: usize = 5;

/// Number of states shown by the legacy policy-count ranking
pub const LEGACY_TOP_STATE_LIMIT: usize = 3;

/// Tunables for the dashboard computation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Window for the expiring-soon count, in days
    pub expiring_soon_days: i64,

    /// How many states to rank
    pub top_state_limit: usize,

    /// Multiplier from total premium to revenue forecast
    pub revenue_growth_factor: f64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            expiring_soon_days: EXPIRING_SOON_DAYS,
            top_state_limit: TOP_STATE_LIMIT,
            revenue_growth_factor: REVENUE_GROWTH_FACTOR,
        }
    }
}

/// Aggregate metrics for the dashboard
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub customer_count: usize,
    pub policy_count: usize,
    pub total_premium: f64,
    pub average_premium: f64,
    pub revenue_forecast: f64,
    pub expiring_soon: usize,
    pub top_states: Vec<StateExposure>,
}

/// Compute the dashboard from the full customer and policy lists.
///
/// Never fails: missing premiums count as zero, policies of unknown
/// customers are left out of the state ranking only, and empty inputs give
/// an all-zero summary.
pub fn compute_dashboard(
    customers: &[Customer],
    policies: &[Policy],
    config: &DashboardConfig,
    now: DateTime<Utc>,
) -> DashboardSummary {
    let totals = premium_totals(customers, policies, config.revenue_growth_factor);

    DashboardSummary {
        customer_count: totals.customer_count,
        policy_count: totals.policy_count,
        total_premium: totals.total_premium,
        average_premium: totals.average_premium,
        revenue_forecast: totals.revenue_forecast,
        expiring_soon: expiring_soon_count(policies, now, config.expiring_soon_days),
        top_states: rank_states(customers, policies, config.top_state_limit),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregation::fixtures::{customer, policy};
    use approx::assert_relative_eq;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_single_customer_example() {
        let now = Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap();
        let customers = vec![customer(1, "Ada", "Lovelace", "CA", "")];
        let policies = vec![policy(1, 1, "POL-1", Some(1000.0), Some(now.date_naive() + Duration::days(200)))];

        let summary = compute_dashboard(&customers, &policies, &DashboardConfig::default(), now);
        assert_eq!(summary.customer_count, 1);
        assert_eq!(summary.policy_count, 1);
        assert_relative_eq!(summary.total_premium, 1000.0);
        assert_relative_eq!(summary.average_premium, 1000.0);
        assert_relative_eq!(summary.revenue_forecast, 1100.0);
        assert_eq!(summary.expiring_soon, 0);

        assert_eq!(summary.top_states.len(), 1);
        assert_eq!(summary.top_states[0].state, "CA");
        assert_eq!(summary.top_states[0].exposure, 95);
    }

    #[test]
    fn test_orphaned_policy_counts_in_totals_only() {
        let now = Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap();
        let customers = vec![customer(1, "Ada", "Lovelace", "CA", "")];
        let policies = vec![
            policy(1, 1, "POL-1", Some(1000.0), None),
            policy(2, 42, "POL-2", Some(500.0), None),
        ];

        let summary = compute_dashboard(&customers, &policies, &DashboardConfig::default(), now);
        assert_eq!(summary.policy_count, 2);
        assert_relative_eq!(summary.total_premium, 1500.0);
        assert_eq!(summary.top_states.len(), 1);
        assert_relative_eq!(summary.top_states[0].total_premium, 1000.0);
        assert_eq!(summary.top_states[0].policy_count, 1);
    }

    #[test]
    fn test_empty_inputs() {
        let now = Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap();
        let summary = compute_dashboard(&[], &[], &DashboardConfig::default(), now);
        assert_eq!(summary, DashboardSummary::default());
    }

    #[test]
    fn test_custom_config() {
        let now = Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap();
        let today = now.date_naive();
        let customers = vec![
            customer(1, "A", "B", "CA", ""),
            customer(2, "C", "D", "TX", ""),
        ];
        let policies = vec![
            policy(1, 1, "POL-1", Some(100.0), Some(today + Duration::days(45))),
            policy(2, 2, "POL-2", Some(300.0), Some(today + Duration::days(5))),
        ];
        let config = DashboardConfig {
            expiring_soon_days: 60,
            top_state_limit: 1,
            revenue_growth_factor: 1.0,
        };

        let summary = compute_dashboard(&customers, &policies, &config, now);
        assert_eq!(summary.expiring_soon, 2);
        assert_eq!(summary.top_states.len(), 1);
        assert_eq!(summary.top_states[0].state, "TX");
        assert_relative_eq!(summary.revenue_forecast, 400.0);
    }

    #[test]
    fn test_summary_json_shape() {
        let now = Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap();
        let customers = vec![customer(1, "A", "B", "TX", "")];
        let policies = vec![policy(1, 1, "POL-1", Some(10.0), None)];
        let summary = compute_dashboard(&customers, &policies, &DashboardConfig::default(), now);

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["top_states"][0]["exposure"], 125);
        assert_eq!(json["top_states"][0]["hazards"][1], "flood");
        assert_eq!(json["expiring_soon"], 1);
    }
}
