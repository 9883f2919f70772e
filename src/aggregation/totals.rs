//! Premium totals across the book

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{Customer, Policy};

/// Book-level counts and premium figures
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PremiumTotals {
    pub customer_count: usize,
    pub policy_count: usize,
    pub total_premium: f64,
    /// Rounded to cents; 0 with no policies
    pub average_premium: f64,
    /// Next-year revenue, rounded to cents
    pub revenue_forecast: f64,
}

/// Round a currency amount to whole cents
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Sum of coerced premiums
pub fn total_premium<'a, I>(policies: I) -> f64
where
    I: IntoIterator<Item = &'a Policy>,
{
    policies.into_iter().map(Policy::premium_amount).sum()
}

/// Counts, total and average premium, and the growth-based revenue forecast
pub fn premium_totals(customers: &[Customer], policies: &[Policy], growth_factor: f64) -> PremiumTotals {
    let total = total_premium(policies);
    let average = if policies.is_empty() {
        0.0
    } else {
        round_cents(total / policies.len() as f64)
    };

    PremiumTotals {
        customer_count: customers.len(),
        policy_count: policies.len(),
        total_premium: total,
        average_premium: average,
        revenue_forecast: round_cents(total * growth_factor),
    }
}

/// Number of policies renewing within `window_days` (past and undated ones included)
pub fn expiring_soon_count(policies: &[Policy], now: DateTime<Utc>, window_days: i64) -> usize {
    policies.iter().filter(|p| p.expires_within(now, window_days)).count()
}

/// Total premium a single customer carries
pub fn customer_premium_total(customer_id: i64, policies: &[Policy]) -> f64 {
    total_premium(policies.iter().filter(|p| p.customer_id == customer_id))
}
