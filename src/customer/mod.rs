//! Customer records and snapshot loading

mod data;
pub mod loader;

pub use data::{Customer, CustomerForm};
pub use loader::{load_customers, load_customers_from_reader};
