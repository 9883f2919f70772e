//! Per-state premium ranking and hazard exposure

use std::collections::HashMap;

use serde::Serialize;

use super::hazard::{hazards_for_state, Hazard};
use crate::{Customer, Policy};

/// Share of the exposure score driven by premium, relative to the top state
pub const EXPOSURE_PREMIUM_WEIGHT: f64 = 80.0;

/// Points added per hazard category a state belongs to
pub const HAZARD_EXPOSURE_POINTS: f64 = 15.0;

/// Premium and policy count accumulated for one state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatePremium {
    pub state: String,
    pub total_premium: f64,
    pub policy_count: usize,
}

/// A ranked state with its display exposure score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateExposure {
    pub state: String,
    pub total_premium: f64,
    pub policy_count: usize,
    /// Not clamped: a negative premium gives a negative score
    pub exposure: i32,
    pub hazards: Vec<Hazard>,
}

/// Accumulate premium per customer state, in order of first appearance.
///
/// Policies whose customer is unknown, or whose customer has no state,
/// are skipped.
pub fn state_premiums(customers: &[Customer], policies: &[Policy]) -> Vec<StatePremium> {
    let state_by_customer: HashMap<i64, String> = customers
        .iter()
        .filter_map(|c| c.state_code().map(|state| (c.customer_id, state)))
        .collect();

    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut states: Vec<StatePremium> = Vec::new();

    for policy in policies {
        let Some(state) = state_by_customer.get(&policy.customer_id) else {
            continue;
        };
        let slot = *index.entry(state.as_str()).or_insert_with(|| {
            states.push(StatePremium {
                state: state.clone(),
                total_premium: 0.0,
                policy_count: 0,
            });
            states.len() - 1
        });
        states[slot].total_premium += policy.premium_amount();
        states[slot].policy_count += 1;
    }

    states
}

/// Exposure score: premium share of the top state scaled to 80, plus 15 per hazard.
///
/// A zero top premium contributes no premium share.
pub fn exposure_score(total_premium: f64, max_premium: f64, state: &str) -> i32 {
    let base = if max_premium != 0.0 {
        total_premium / max_premium * EXPOSURE_PREMIUM_WEIGHT
    } else {
        0.0
    };
    let hazard_points = hazards_for_state(state).len() as f64 * HAZARD_EXPOSURE_POINTS;
    (base + hazard_points).round() as i32
}

/// Top `limit` states by total premium, scored for hazard exposure.
///
/// States with equal premium keep the order in which they first appear in
/// `policies`.
pub fn rank_states(customers: &[Customer], policies: &[Policy], limit: usize) -> Vec<StateExposure> {
    let mut states = state_premiums(customers, policies);
    states.sort_by(|a, b| b.total_premium.total_cmp(&a.total_premium));
    states.truncate(limit);

    let max_premium = states.first().map(|s| s.total_premium).unwrap_or(0.0);

    states
        .into_iter()
        .map(|s| StateExposure {
            exposure: exposure_score(s.total_premium, max_premium, &s.state),
            hazards: hazards_for_state(&s.state).to_vec(),
            state: s.state,
            total_premium: s.total_premium,
            policy_count: s.policy_count,
        })
        .collect()
}

/// Legacy ranking by policy count, without hazard scoring.
///
/// Kept for the older customer-count widget; the dashboard summary always
/// uses [`rank_states`].
pub fn legacy_rank_states_by_policy_count(
    customers: &[Customer],
    policies: &[Policy],
    limit: usize,
) -> Vec<StatePremium> {
    let mut states = state_premiums(customers, policies);
    states.sort_by(|a, b| b.policy_count.cmp(&a.policy_count));
    states.truncate(limit);
    states
}
