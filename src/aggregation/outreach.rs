//! Renewal outreach ordering

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::Policy;

/// A policy paired with its renewal countdown
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutreachEntry {
    #[serde(flatten)]
    pub policy: Policy,
    pub days_until_renewal: i64,
}

/// Sort policies soonest-renewal first, in place.
/// Equal countdowns keep their existing order.
pub fn sort_by_renewal(policies: &mut [Policy], now: DateTime<Utc>) {
    policies.sort_by_key(|p| p.days_until_renewal(now));
}

/// Every policy with its countdown, soonest first
pub fn outreach_list(policies: &[Policy], now: DateTime<Utc>) -> Vec<OutreachEntry> {
    let mut entries: Vec<OutreachEntry> = policies
        .iter()
        .map(|p| OutreachEntry {
            days_until_renewal: p.days_until_renewal(now),
            policy: p.clone(),
        })
        .collect();
    entries.sort_by_key(|e| e.days_until_renewal);
    entries
}

/// The first `limit` policies to contact about renewal
pub fn suggested_outreach(policies: &[Policy], now: DateTime<Utc>, limit: usize) -> Vec<OutreachEntry> {
    let mut entries = outreach_list(policies, now);
    entries.truncate(limit);
    entries
}
