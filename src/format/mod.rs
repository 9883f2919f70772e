//! Formatting and derivation helpers shared by the views and the aggregation engine

mod dates;
mod text;
mod validate;
pub mod lenient;

pub use dates::{parse_date, parse_timestamp, format_date, format_date_str, days_until_renewal, term_end};
pub use text::{phone_digits, format_phone, title_case};
pub use validate::{validate_customer, required_message, sanitize};
