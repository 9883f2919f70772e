//! Ad-hoc premium quotes and their confirmation into a customer and policy

use chrono::{DateTime, NaiveDate, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::aggregation::round_cents;
use crate::format::{required_message, term_end, validate_customer};
use crate::store::{AgencyStore, StoreError};
use crate::{Customer, CustomerForm, NewPolicy, Policy};

/// Starting premium for auto policies
pub const AUTO_BASE_PREMIUM: f64 = 1200.0;

/// Starting premium for every other line (home)
pub const HOME_BASE_PREMIUM: f64 = 1400.0;

/// Discounts are drawn from [0, MAX_DISCOUNT)
pub const MAX_DISCOUNT: f64 = 200.0;

/// Policy term granted on confirmation
pub const POLICY_TERM_MONTHS: u32 = 12;

/// Policy numbers are POL-0 through POL-999
const POLICY_NUMBER_SPACE: u32 = 1000;

/// Fresh numbers drawn before giving up on a collision
const POLICY_NUMBER_ATTEMPTS: usize = 20;

/// A proposed premium for one policy type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub policy_type: String,
    pub base_premium: f64,
    pub discount: f64,
    pub proposed_premium: f64,
}

/// Base premium for a policy type
pub fn base_premium(policy_type: &str) -> f64 {
    if policy_type.eq_ignore_ascii_case("auto") {
        AUTO_BASE_PREMIUM
    } else {
        HOME_BASE_PREMIUM
    }
}

/// Quote `policy_type` with a random discount
pub fn generate_quote<R: Rng>(policy_type: &str, rng: &mut R) -> Quote {
    let base = base_premium(policy_type);
    let discount = rng.gen_range(0.0..MAX_DISCOUNT);
    Quote {
        policy_type: policy_type.to_string(),
        base_premium: base,
        discount,
        proposed_premium: round_cents(base - discount),
    }
}

/// Random policy number of the form `POL-<n>`
pub fn policy_number<R: Rng>(rng: &mut R) -> String {
    format!("POL-{}", rng.gen_range(0..POLICY_NUMBER_SPACE))
}

/// Validation problems that block a quote confirmation.
///
/// The quote form does not collect a date of birth, so its absence is not
/// an error here; every other problem still is.
pub fn quote_form_errors(form: &CustomerForm) -> Vec<String> {
    let missing_dob = required_message("date_of_birth");
    validate_customer(form)
        .into_iter()
        .filter(|e| *e != missing_dob)
        .collect()
}

/// Turn an accepted quote into a customer and a one-year policy starting `today`.
///
/// The customer is created first; if the policy cannot be created the
/// customer stays, matching the single-row guarantees of the store.
pub fn confirm_quote<R: Rng>(
    store: &mut AgencyStore,
    form: &CustomerForm,
    quote: &Quote,
    today: NaiveDate,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Result<(Customer, Policy), StoreError> {
    let errors = quote_form_errors(form);
    if !errors.is_empty() {
        return Err(StoreError::Invalid(errors));
    }
    let customer = store.insert_customer(form, now);

    let mut number = policy_number(rng);
    for _ in 1..POLICY_NUMBER_ATTEMPTS {
        if !store.has_policy_number(&number) {
            break;
        }
        number = policy_number(rng);
    }

    let policy = store.create_policy(NewPolicy {
        customer_id: customer.customer_id,
        policy_number: number,
        policy_type: quote.policy_type.clone(),
        effective_date: Some(today),
        expiration_date: Some(term_end(today, POLICY_TERM_MONTHS)),
        premium: Some(quote.proposed_premium),
    })?;

    log::info!(
        "Confirmed {} quote {} for customer {} at {:.2}",
        policy.policy_type, policy.policy_number, customer.customer_id, quote.proposed_premium
    );
    Ok((customer, policy))
}
