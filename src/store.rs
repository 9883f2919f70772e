//! In-memory persistence for customers and policies
//!
//! Mirrors the REST contract of the agency's database service: sequential
//! ids, single-row create/update/delete, no cascades. Deleting a customer
//! leaves its policies behind as orphans.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::format::{sanitize, validate_customer};
use crate::snapshot::Snapshot;
use crate::{Customer, CustomerForm, NewPolicy, Policy};

/// Errors returned by store operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    #[error("Customer not found")]
    CustomerNotFound(i64),

    #[error("Policy not found")]
    PolicyNotFound(i64),

    #[error("Policy already exists")]
    DuplicatePolicyNumber(String),

    #[error("Invalid customer: {}", .0.join(" "))]
    Invalid(Vec<String>),
}

/// Customer and policy tables held in memory
#[derive(Debug, Clone)]
pub struct AgencyStore {
    customers: Vec<Customer>,
    policies: Vec<Policy>,
    next_customer_id: i64,
    next_policy_id: i64,
}

impl Default for AgencyStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AgencyStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::from_snapshot(Snapshot::default())
    }

    /// Seed the store from a snapshot; new ids continue after the highest loaded id
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let next_customer_id = snapshot.customers.iter().map(|c| c.customer_id).max().unwrap_or(0) + 1;
        let next_policy_id = snapshot.policies.iter().map(|p| p.policy_id).max().unwrap_or(0) + 1;
        Self {
            customers: snapshot.customers,
            policies: snapshot.policies,
            next_customer_id,
            next_policy_id,
        }
    }

    /// Copy of both tables, for aggregation
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(self.customers.clone(), self.policies.clone())
    }

    // ---- Customers ----

    pub fn list_customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn get_customer(&self, customer_id: i64) -> Result<&Customer, StoreError> {
        self.customers
            .iter()
            .find(|c| c.customer_id == customer_id)
            .ok_or(StoreError::CustomerNotFound(customer_id))
    }

    /// Validate, sanitize and insert a customer
    pub fn create_customer(&mut self, form: &CustomerForm, now: DateTime<Utc>) -> Result<Customer, StoreError> {
        let errors = validate_customer(form);
        if !errors.is_empty() {
            return Err(StoreError::Invalid(errors));
        }
        Ok(self.insert_customer(form, now))
    }

    /// Sanitize and insert a customer the caller has already vetted
    pub fn insert_customer(&mut self, form: &CustomerForm, now: DateTime<Utc>) -> Customer {
        let clean = sanitize(form);
        let customer = Customer::from_form(self.next_customer_id, &clean, now);
        self.next_customer_id += 1;

        log::debug!("Created customer {} ({})", customer.customer_id, customer.full_name());
        self.customers.push(customer.clone());
        customer
    }

    /// Validate, sanitize and overwrite a customer's editable fields
    pub fn update_customer(&mut self, customer_id: i64, form: &CustomerForm) -> Result<Customer, StoreError> {
        let clean = checked(form)?;
        let customer = self
            .customers
            .iter_mut()
            .find(|c| c.customer_id == customer_id)
            .ok_or(StoreError::CustomerNotFound(customer_id))?;
        customer.apply_form(&clean);

        log::debug!("Updated customer {}", customer_id);
        Ok(customer.clone())
    }

    /// Remove a customer. Removing an unknown id is not an error.
    pub fn delete_customer(&mut self, customer_id: i64) {
        self.customers.retain(|c| c.customer_id != customer_id);
        let orphaned = self.policies.iter().filter(|p| p.customer_id == customer_id).count();
        if orphaned > 0 {
            log::warn!("Deleted customer {} still owns {} policies", customer_id, orphaned);
        }
    }

    // ---- Policies ----

    pub fn list_policies(&self) -> &[Policy] {
        &self.policies
    }

    pub fn list_policies_for_customer(&self, customer_id: i64) -> Vec<Policy> {
        self.policies
            .iter()
            .filter(|p| p.customer_id == customer_id)
            .cloned()
            .collect()
    }

    pub fn get_policy(&self, policy_id: i64) -> Result<&Policy, StoreError> {
        self.policies
            .iter()
            .find(|p| p.policy_id == policy_id)
            .ok_or(StoreError::PolicyNotFound(policy_id))
    }

    pub fn has_policy_number(&self, policy_number: &str) -> bool {
        self.policies.iter().any(|p| p.policy_number == policy_number)
    }

    /// Insert a policy; the policy number must not already be taken
    pub fn create_policy(&mut self, new: NewPolicy) -> Result<Policy, StoreError> {
        if self.has_policy_number(&new.policy_number) {
            log::warn!("Rejected duplicate policy number {}", new.policy_number);
            return Err(StoreError::DuplicatePolicyNumber(new.policy_number));
        }

        let policy = Policy::from_new(self.next_policy_id, new);
        self.next_policy_id += 1;

        log::debug!("Created policy {} for customer {}", policy.policy_number, policy.customer_id);
        self.policies.push(policy.clone());
        Ok(policy)
    }

    /// Replace a policy's fields; the new number must not belong to another policy
    pub fn update_policy(&mut self, policy_id: i64, new: NewPolicy) -> Result<Policy, StoreError> {
        let taken = self
            .policies
            .iter()
            .any(|p| p.policy_id != policy_id && p.policy_number == new.policy_number);
        if taken {
            return Err(StoreError::DuplicatePolicyNumber(new.policy_number));
        }

        let policy = self
            .policies
            .iter_mut()
            .find(|p| p.policy_id == policy_id)
            .ok_or(StoreError::PolicyNotFound(policy_id))?;
        *policy = Policy::from_new(policy_id, new);
        Ok(policy.clone())
    }

    /// Remove a policy. Removing an unknown id is not an error.
    pub fn delete_policy(&mut self, policy_id: i64) {
        self.policies.retain(|p| p.policy_id != policy_id);
    }
}

fn checked(form: &CustomerForm) -> Result<CustomerForm, StoreError> {
    let errors = validate_customer(form);
    if !errors.is_empty() {
        return Err(StoreError::Invalid(errors));
    }
    Ok(sanitize(form))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, 9, 0, 0).unwrap()
    }

    fn form() -> CustomerForm {
        CustomerForm {
            first_name: "mickey".into(),
            last_name: "mouse".into(),
            email: "mickey@disney.com".into(),
            phone: "631-555-1234".into(),
            address: "123 magic way".into(),
            city: "orlando".into(),
            state: "fl".into(),
            zipcode: "32830".into(),
            date_of_birth: "1928-11-18".into(),
        }
    }

    fn new_policy(customer_id: i64, number: &str) -> NewPolicy {
        NewPolicy {
            customer_id,
            policy_number: number.into(),
            policy_type: "Auto".into(),
            effective_date: NaiveDate::from_ymd_opt(2026, 10, 16),
            expiration_date: NaiveDate::from_ymd_opt(2027, 10, 16),
            premium: Some(1134.5),
        }
    }

    #[test]
    fn test_create_customer_sanitizes() {
        let mut store = AgencyStore::new();
        let customer = store.create_customer(&form(), now()).unwrap();

        assert_eq!(customer.customer_id, 1);
        assert_eq!(customer.first_name, "Mickey");
        assert_eq!(customer.address, "123 Magic Way");
        assert_eq!(customer.state, "FL");
        assert_eq!(customer.phone, "6315551234");
        assert_eq!(customer.created_at, Some(now()));
        assert_eq!(store.list_customers().len(), 1);
    }

    #[test]
    fn test_invalid_customer_is_rejected() {
        let mut store = AgencyStore::new();
        let mut bad = form();
        bad.phone = "12".into();

        match store.create_customer(&bad, now()) {
            Err(StoreError::Invalid(errors)) => {
                assert_eq!(errors, vec!["Phone number must be exactly 10 digits."]);
            }
            other => panic!("expected validation failure, got {:?}", other),
        }
        assert!(store.list_customers().is_empty());
    }

    #[test]
    fn test_insert_customer_sanitizes_without_blocking() {
        let mut store = AgencyStore::new();
        let mut partial = form();
        partial.date_of_birth = String::new();

        let customer = store.insert_customer(&partial, now());
        assert_eq!(customer.customer_id, 1);
        assert_eq!(customer.city, "Orlando");
        assert_eq!(customer.date_of_birth, None);
        assert!(store.create_customer(&partial, now()).is_err());
    }

    #[test]
    fn test_update_customer_keeps_created_at() {
        let mut store = AgencyStore::new();
        let created = store.create_customer(&form(), now()).unwrap();

        let mut edit = form();
        edit.city = "lake buena vista".into();
        let updated = store.update_customer(created.customer_id, &edit).unwrap();

        assert_eq!(updated.city, "Lake Buena Vista");
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(store.update_customer(99, &edit), Err(StoreError::CustomerNotFound(99)));
    }

    #[test]
    fn test_delete_customer_leaves_orphans() {
        let mut store = AgencyStore::new();
        let customer = store.create_customer(&form(), now()).unwrap();
        store.create_policy(new_policy(customer.customer_id, "POL-1")).unwrap();

        store.delete_customer(customer.customer_id);
        assert!(store.get_customer(customer.customer_id).is_err());
        assert_eq!(store.list_policies_for_customer(customer.customer_id).len(), 1);

        let snapshot = store.snapshot();
        assert_eq!(snapshot.orphaned_policies().len(), 1);
    }

    #[test]
    fn test_duplicate_policy_number() {
        let mut store = AgencyStore::new();
        store.create_policy(new_policy(1, "POL-7")).unwrap();
        let err = store.create_policy(new_policy(2, "POL-7")).unwrap_err();
        assert_eq!(err, StoreError::DuplicatePolicyNumber("POL-7".into()));
        assert_eq!(err.to_string(), "Policy already exists");
        assert_eq!(store.list_policies().len(), 1);
    }

    #[test]
    fn test_update_and_delete_policy() {
        let mut store = AgencyStore::new();
        let a = store.create_policy(new_policy(1, "POL-1")).unwrap();
        let b = store.create_policy(new_policy(1, "POL-2")).unwrap();
        assert_eq!(b.policy_id, a.policy_id + 1);

        let mut change = new_policy(1, "POL-1");
        change.premium = Some(999.0);
        let updated = store.update_policy(a.policy_id, change).unwrap();
        assert_eq!(updated.premium, Some(999.0));

        assert!(matches!(
            store.update_policy(a.policy_id, new_policy(1, "POL-2")),
            Err(StoreError::DuplicatePolicyNumber(_))
        ));
        assert_eq!(store.update_policy(50, new_policy(1, "POL-9")), Err(StoreError::PolicyNotFound(50)));

        store.delete_policy(a.policy_id);
        assert!(store.get_policy(a.policy_id).is_err());
        assert_eq!(store.list_policies().len(), 1);
    }

    #[test]
    fn test_ids_continue_after_snapshot() {
        let mut seeded = AgencyStore::new();
        seeded.create_customer(&form(), now()).unwrap();
        seeded.create_customer(&form(), now()).unwrap();
        seeded.create_policy(new_policy(2, "POL-1")).unwrap();

        let mut store = AgencyStore::from_snapshot(seeded.snapshot());
        let customer = store.create_customer(&form(), now()).unwrap();
        let policy = store.create_policy(new_policy(3, "POL-2")).unwrap();
        assert_eq!(customer.customer_id, 3);
        assert_eq!(policy.policy_id, 2);
    }
}
