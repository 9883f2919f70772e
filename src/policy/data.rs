//! Policy data structures matching the policies table

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::format::{days_until_renewal, lenient};

/// A single policy record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Policy {
    /// Unique policy identifier
    pub policy_id: i64,

    /// Owning customer; not enforced, so it may point at a deleted customer
    pub customer_id: i64,

    /// Human-facing policy number, expected unique (e.g. "POL-482")
    pub policy_number: String,

    /// Free-text line of business ("Auto", "Home", ...)
    #[serde(default)]
    pub policy_type: String,

    #[serde(default, deserialize_with = "lenient::date")]
    pub effective_date: Option<NaiveDate>,

    /// Renewal date
    #[serde(default, deserialize_with = "lenient::date")]
    pub expiration_date: Option<NaiveDate>,

    /// Periodic premium; `None` when missing or non-numeric
    #[serde(default, deserialize_with = "lenient::amount")]
    pub premium: Option<f64>,
}

impl Policy {
    /// Build a stored policy from a creation request
    pub fn from_new(policy_id: i64, new: NewPolicy) -> Self {
        Self {
            policy_id,
            customer_id: new.customer_id,
            policy_number: new.policy_number,
            policy_type: new.policy_type,
            effective_date: new.effective_date,
            expiration_date: new.expiration_date,
            premium: new.premium,
        }
    }

    /// Premium coerced for arithmetic: absent or non-finite counts as 0
    pub fn premium_amount(&self) -> f64 {
        self.premium.filter(|p| p.is_finite()).unwrap_or(0.0)
    }

    /// Whole days until this policy renews (never negative)
    pub fn days_until_renewal(&self, now: DateTime<Utc>) -> i64 {
        days_until_renewal(self.expiration_date, now)
    }

    /// Whether the policy renews within `window_days` of `now`
    pub fn expires_within(&self, now: DateTime<Utc>, window_days: i64) -> bool {
        self.days_until_renewal(now) <= window_days
    }
}

/// Policy fields supplied on create or update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPolicy {
    pub customer_id: i64,
    pub policy_number: String,
    #[serde(default)]
    pub policy_type: String,
    #[serde(default, deserialize_with = "lenient::date")]
    pub effective_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient::date")]
    pub expiration_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub premium: Option<f64>,
}
