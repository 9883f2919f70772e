//! Free-text customer search and the customer list view

use std::collections::HashMap;

use serde::Serialize;

use super::hazard::{hazards_for_state, Hazard};
use super::totals::total_premium;
use crate::format::phone_digits;
use crate::{Customer, Policy};

/// A normalized search query.
///
/// The phone check compares digit strings, so a query without digits
/// matches every phone and therefore every customer. That is the list
/// view's established behaviour; [`SearchQuery::strict_phone`] opts out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    text: String,
    digits: String,
    strict_phone: bool,
}

impl SearchQuery {
    pub fn new(raw: &str) -> Self {
        let text = raw.trim().to_lowercase();
        let digits = phone_digits(&text);
        Self { text, digits, strict_phone: false }
    }

    /// Skip the phone check when the query has no digits
    pub fn strict_phone(mut self) -> Self {
        self.strict_phone = true;
        self
    }

    /// An empty query matches every customer
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Match on full name, phone digits, or any of the customer's policy numbers
    pub fn matches(&self, customer: &Customer, policies: &[&Policy]) -> bool {
        if self.is_empty() {
            return true;
        }

        if customer.full_name().to_lowercase().contains(&self.text) {
            return true;
        }

        let skip_phone = self.strict_phone && self.digits.is_empty();
        if !skip_phone && phone_digits(&customer.phone).contains(&self.digits) {
            return true;
        }

        policies
            .iter()
            .any(|p| p.policy_number.to_lowercase().contains(&self.text))
    }
}

/// Group policies under their owning customer id, keeping input order
pub fn policies_by_customer(policies: &[Policy]) -> HashMap<i64, Vec<&Policy>> {
    let mut grouped: HashMap<i64, Vec<&Policy>> = HashMap::new();
    for policy in policies {
        grouped.entry(policy.customer_id).or_default().push(policy);
    }
    grouped
}

/// Customers matching `query`, in input order
pub fn search_customers<'a>(customers: &'a [Customer], policies: &[Policy], query: &str) -> Vec<&'a Customer> {
    let query = SearchQuery::new(query);
    let grouped = policies_by_customer(policies);

    customers
        .iter()
        .filter(|c| {
            let owned = grouped.get(&c.customer_id).map(Vec::as_slice).unwrap_or(&[]);
            query.matches(c, owned)
        })
        .collect()
}

/// One row of the customer list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerOverview {
    #[serde(flatten)]
    pub customer: Customer,
    pub policy_count: usize,
    pub total_premium: f64,
    pub hazards: Vec<Hazard>,
}

/// The filtered customer list, newest customers first
pub fn customer_overview(customers: &[Customer], policies: &[Policy], query: &str) -> Vec<CustomerOverview> {
    let query = SearchQuery::new(query);
    let grouped = policies_by_customer(policies);

    let mut rows: Vec<CustomerOverview> = customers
        .iter()
        .filter_map(|c| {
            let owned = grouped.get(&c.customer_id).map(Vec::as_slice).unwrap_or(&[]);
            query.matches(c, owned).then(|| CustomerOverview {
                customer: c.clone(),
                policy_count: owned.len(),
                total_premium: total_premium(owned.iter().copied()),
                hazards: hazards_for_state(&c.state).to_vec(),
            })
        })
        .collect();

    rows.sort_by(|a, b| b.customer.customer_id.cmp(&a.customer.customer_id));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregation::fixtures::{customer, policy};

    fn book() -> (Vec<Customer>, Vec<Policy>) {
        let customers = vec![
            customer(1, "Mickey", "Mouse", "FL", "631-555-1234"),
            customer(2, "Minnie", "Mouse", "CA", "1235555678"),
            customer(3, "Donald", "Duck", "TX", "(212) 867-5309"),
        ];
        let policies = vec![
            policy(1, 1, "POL-101", Some(1100.0), None),
            policy(2, 3, "AUTO-77", Some(900.0), None),
            policy(3, 3, "HOME-12", Some(1400.0), None),
        ];
        (customers, policies)
    }

    fn names(found: &[&Customer]) -> Vec<String> {
        found.iter().map(|c| c.first_name.clone()).collect()
    }

    fn strict_names(customers: &[Customer], policies: &[Policy], raw: &str) -> Vec<String> {
        let query = SearchQuery::new(raw).strict_phone();
        let grouped = policies_by_customer(policies);
        customers
            .iter()
            .filter(|c| query.matches(c, grouped.get(&c.customer_id).map(Vec::as_slice).unwrap_or(&[])))
            .map(|c| c.first_name.clone())
            .collect()
    }

    #[test]
    fn test_empty_query_matches_everyone() {
        let (customers, policies) = book();
        assert_eq!(search_customers(&customers, &policies, "").len(), 3);
        assert_eq!(search_customers(&customers, &policies, "   ").len(), 3);
    }

    #[test]
    fn test_name_match() {
        let (customers, policies) = book();
        assert_eq!(strict_names(&customers, &policies, "MOUSE"), vec!["Mickey", "Minnie"]);
        assert_eq!(strict_names(&customers, &policies, "donald duck"), vec!["Donald"]);
    }

    #[test]
    fn test_phone_match_ignores_formatting() {
        let (customers, policies) = book();
        assert_eq!(names(&search_customers(&customers, &policies, "555")), vec!["Mickey", "Minnie"]);
        assert_eq!(names(&search_customers(&customers, &policies, "867-53")), vec!["Donald"]);
    }

    #[test]
    fn test_policy_number_match() {
        let (customers, policies) = book();
        assert_eq!(strict_names(&customers, &policies, "home-"), vec!["Donald"]);
        assert_eq!(names(&search_customers(&customers, &policies, "pol-101")), vec!["Mickey"]);
    }

    #[test]
    fn test_query_without_digits_matches_every_phone() {
        let (customers, policies) = book();
        assert_eq!(search_customers(&customers, &policies, "goofy").len(), 3);
        assert_eq!(search_customers(&customers, &policies, "MOUSE").len(), 3);

        let mut no_phone = customers.clone();
        no_phone[0].phone = String::new();
        assert_eq!(search_customers(&no_phone, &policies, "goofy").len(), 3);
    }

    #[test]
    fn test_strict_phone_skips_digitless_queries() {
        let (customers, policies) = book();
        assert!(strict_names(&customers, &policies, "goofy").is_empty());
        assert_eq!(strict_names(&customers, &policies, "555"), vec!["Mickey", "Minnie"]);
    }

    #[test]
    fn test_customer_overview() {
        let (customers, policies) = book();
        let rows = customer_overview(&customers, &policies, "");
        let ids: Vec<_> = rows.iter().map(|r| r.customer.customer_id).collect();
        assert_eq!(ids, vec![3, 2, 1]);

        assert_eq!(rows[0].policy_count, 2);
        assert_eq!(rows[0].total_premium, 2300.0);
        assert_eq!(rows[0].hazards, vec![Hazard::Fire, Hazard::Flood, Hazard::Tornado]);
        assert_eq!(rows[1].policy_count, 0);
        assert_eq!(rows[1].total_premium, 0.0);

        let filtered = customer_overview(&customers, &policies, "auto-77");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].customer.first_name, "Donald");
    }
}
