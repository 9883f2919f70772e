//! Policy data structures and snapshot loading

mod data;
pub mod loader;

pub use data::{Policy, NewPolicy};
pub use loader::{load_policies, load_policies_from_reader};
