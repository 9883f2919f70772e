//! Customer records as stored and as submitted from a form

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::format::{lenient, parse_date};

/// A persisted customer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    /// Server-assigned identifier
    pub customer_id: i64,

    pub first_name: String,
    pub last_name: String,

    /// Expected to contain "@" and "."
    #[serde(default)]
    pub email: String,

    /// Digits only once sanitized
    #[serde(default)]
    pub phone: String,

    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,

    /// Upper-case state code
    #[serde(default)]
    pub state: String,

    #[serde(default)]
    pub zipcode: String,

    #[serde(default, deserialize_with = "lenient::date")]
    pub date_of_birth: Option<NaiveDate>,

    /// Stamped on creation, never changed afterwards
    #[serde(default, deserialize_with = "lenient::timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Customer {
    /// Build a customer from already-sanitized form values
    pub fn from_form(customer_id: i64, form: &CustomerForm, created_at: DateTime<Utc>) -> Self {
        Self {
            customer_id,
            first_name: form.first_name.clone(),
            last_name: form.last_name.clone(),
            email: form.email.clone(),
            phone: form.phone.clone(),
            address: form.address.clone(),
            city: form.city.clone(),
            state: form.state.clone(),
            zipcode: form.zipcode.clone(),
            date_of_birth: parse_date(&form.date_of_birth),
            created_at: Some(created_at),
        }
    }

    /// Overwrite every editable field, keeping the id and creation stamp
    pub fn apply_form(&mut self, form: &CustomerForm) {
        self.first_name = form.first_name.clone();
        self.last_name = form.last_name.clone();
        self.email = form.email.clone();
        self.phone = form.phone.clone();
        self.address = form.address.clone();
        self.city = form.city.clone();
        self.state = form.state.clone();
        self.zipcode = form.zipcode.clone();
        self.date_of_birth = parse_date(&form.date_of_birth);
    }

    /// "First Last"
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Normalized state code used as an aggregation key, if any
    pub fn state_code(&self) -> Option<String> {
        let code = self.state.trim().to_uppercase();
        (!code.is_empty()).then_some(code)
    }
}

/// The nine text fields of a create/edit submission, unvalidated
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomerForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zipcode: String,
    pub date_of_birth: String,
}

impl CustomerForm {
    /// Field names paired with their values, in form order
    pub fn fields(&self) -> [(&'static str, &str); 9] {
        [
            ("first_name", self.first_name.as_str()),
            ("last_name", self.last_name.as_str()),
            ("email", self.email.as_str()),
            ("phone", self.phone.as_str()),
            ("address", self.address.as_str()),
            ("city", self.city.as_str()),
            ("state", self.state.as_str()),
            ("zipcode", self.zipcode.as_str()),
            ("date_of_birth", self.date_of_birth.as_str()),
        ]
    }
}

impl From<&Customer> for CustomerForm {
    fn from(customer: &Customer) -> Self {
        Self {
            first_name: customer.first_name.clone(),
            last_name: customer.last_name.clone(),
            email: customer.email.clone(),
            phone: customer.phone.clone(),
            address: customer.address.clone(),
            city: customer.city.clone(),
            state: customer.state.clone(),
            zipcode: customer.zipcode.clone(),
            date_of_birth: crate::format::format_date(customer.date_of_birth),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn form() -> CustomerForm {
        CustomerForm {
            first_name: "Minnie".into(),
            last_name: "Mouse".into(),
            email: "minnie@disney.com".into(),
            phone: "1235555678".into(),
            address: "456 Daisy St".into(),
            city: "Toontown".into(),
            state: "CA".into(),
            zipcode: "90001".into(),
            date_of_birth: "1928-01-01".into(),
        }
    }

    #[test]
    fn test_from_form() {
        let created = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        let customer = Customer::from_form(7, &form(), created);
        assert_eq!(customer.customer_id, 7);
        assert_eq!(customer.full_name(), "Minnie Mouse");
        assert_eq!(customer.date_of_birth, NaiveDate::from_ymd_opt(1928, 1, 1));
        assert_eq!(customer.created_at, Some(created));
    }

    #[test]
    fn test_apply_form_keeps_identity() {
        let created = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        let mut customer = Customer::from_form(7, &form(), created);

        let mut edit = form();
        edit.city = "Anaheim".into();
        customer.apply_form(&edit);

        assert_eq!(customer.customer_id, 7);
        assert_eq!(customer.city, "Anaheim");
        assert_eq!(customer.created_at, Some(created));
    }

    #[test]
    fn test_state_code() {
        let created = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        let mut customer = Customer::from_form(1, &form(), created);
        customer.state = " tx ".into();
        assert_eq!(customer.state_code().as_deref(), Some("TX"));
        customer.state = "  ".into();
        assert_eq!(customer.state_code(), None);
    }

    #[test]
    fn test_deserialize_database_row() {
        let json = r#"{
            "customer_id": 3,
            "first_name": "Mickey",
            "last_name": "Mouse",
            "email": "mickey@disney.com",
            "phone": "6315551234",
            "address": "123 Magic Way",
            "city": "Orlando",
            "state": "FL",
            "zipcode": "32830",
            "date_of_birth": "1928-11-18T05:00:00.000Z",
            "created_at": "2025-02-11T15:42:10.123Z"
        }"#;
        let customer: Customer = serde_json::from_str(json).unwrap();
        assert_eq!(customer.date_of_birth, NaiveDate::from_ymd_opt(1928, 11, 18));
        assert!(customer.created_at.is_some());
    }
}
