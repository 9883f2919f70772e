//! Load customers from customers.csv

use super::Customer;
use crate::format::{parse_date, parse_timestamp};
use csv::{Reader, ReaderBuilder, Trim};
use std::error::Error;
use std::path::Path;

/// Raw CSV row matching customers.csv columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    customer_id: i64,
    first_name: String,
    last_name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    phone: String,
    #[serde(default)]
    address: String,
    #[serde(default)]
    city: String,
    #[serde(default)]
    state: String,
    #[serde(default)]
    zipcode: String,
    #[serde(default)]
    date_of_birth: String,
    #[serde(default)]
    created_at: String,
}

impl CsvRow {
    fn into_customer(self) -> Customer {
        Customer {
            customer_id: self.customer_id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            address: self.address,
            city: self.city,
            state: self.state.to_uppercase(),
            zipcode: self.zipcode,
            date_of_birth: parse_date(&self.date_of_birth),
            created_at: parse_timestamp(&self.created_at),
        }
    }
}

/// Load all customers from a CSV file
pub fn load_customers<P: AsRef<Path>>(path: P) -> Result<Vec<Customer>, Box<dyn Error>> {
    let path = path.as_ref();
    let reader = ReaderBuilder::new().trim(Trim::All).from_path(path)?;
    let customers = read_rows(reader)?;
    log::info!("Loaded {} customers from {}", customers.len(), path.display());
    Ok(customers)
}

/// Load customers from any reader (e.g., string buffer, request body)
pub fn load_customers_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<Customer>, Box<dyn Error>> {
    read_rows(ReaderBuilder::new().trim(Trim::All).from_reader(reader))
}

fn read_rows<R: std::io::Read>(mut reader: Reader<R>) -> Result<Vec<Customer>, Box<dyn Error>> {
    let mut customers = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        customers.push(row.into_customer());
    }

    Ok(customers)
}
