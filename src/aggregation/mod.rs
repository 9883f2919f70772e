//! Aggregation engine over the customer and policy lists
//!
//! Every function here is a pure function of its inputs plus an injected
//! `now`, so the same snapshot always produces the same numbers:
//! - Premium totals, averages and the revenue forecast
//! - Expiring-soon counts and the renewal outreach order
//! - Per-state premium ranking with hazard exposure scoring
//! - Free-text customer search

mod dashboard;
mod outreach;
mod search;
mod states;
mod totals;
pub mod hazard;

pub use dashboard::{
    compute_dashboard, DashboardConfig, DashboardSummary,
    EXPIRING_SOON_DAYS, LEGACY_TOP_STATE_LIMIT, REVENUE_GROWTH_FACTOR, TOP_STATE_LIMIT,
};
pub use hazard::{hazards_for_state, Hazard};
pub use outreach::{outreach_list, sort_by_renewal, suggested_outreach, OutreachEntry};
pub use search::{customer_overview, policies_by_customer, search_customers, CustomerOverview, SearchQuery};
pub use states::{
    exposure_score, legacy_rank_states_by_policy_count, rank_states, state_premiums,
    StateExposure, StatePremium, EXPOSURE_PREMIUM_WEIGHT, HAZARD_EXPOSURE_POINTS,
};
pub use totals::{
    customer_premium_total, expiring_soon_count, premium_totals, round_cents, total_premium,
    PremiumTotals,
};

/// Number of policies in the suggested outreach list
pub const OUTREACH_LIMIT: usize = 5;

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::NaiveDate;

    use crate::{Customer, Policy};

    pub fn customer(id: i64, first: &str, last: &str, state: &str, phone: &str) -> Customer {
        Customer {
            customer_id: id,
            first_name: first.into(),
            last_name: last.into(),
            email: format!("{}@example.com", first.to_lowercase()),
            phone: phone.into(),
            address: "1 Main St".into(),
            city: "Springfield".into(),
            state: state.into(),
            zipcode: "00000".into(),
            date_of_birth: None,
            created_at: None,
        }
    }

    pub fn policy(
        id: i64,
        customer_id: i64,
        number: &str,
        premium: Option<f64>,
        expiration: Option<NaiveDate>,
    ) -> Policy {
        Policy {
            policy_id: id,
            customer_id,
            policy_number: number.into(),
            policy_type: "Auto".into(),
            effective_date: None,
            expiration_date: expiration,
            premium,
        }
    }
}
