//! Load policies from policies.csv

use super::Policy;
use csv::{Reader, ReaderBuilder, Trim};
use std::error::Error;
use std::path::Path;

/// Load all policies from a CSV file.
///
/// Columns are named after the `Policy` fields. Bad dates or premiums in a
/// row are kept as absent values; a bad id or missing policy number is an error.
pub fn load_policies<P: AsRef<Path>>(path: P) -> Result<Vec<Policy>, Box<dyn Error>> {
    let path = path.as_ref();
    let reader = ReaderBuilder::new().trim(Trim::All).from_path(path)?;
    let policies = read_rows(reader)?;

    let unpriced = policies.iter().filter(|p| p.premium.is_none()).count();
    if unpriced > 0 {
        log::warn!("{} of {} policies in {} have no usable premium", unpriced, policies.len(), path.display());
    }
    log::info!("Loaded {} policies from {}", policies.len(), path.display());

    Ok(policies)
}

/// Load policies from any reader (e.g., string buffer, request body)
pub fn load_policies_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<Policy>, Box<dyn Error>> {
    read_rows(ReaderBuilder::new().trim(Trim::All).from_reader(reader))
}

fn read_rows<R: std::io::Read>(mut reader: Reader<R>) -> Result<Vec<Policy>, Box<dyn Error>> {
    let mut policies = Vec::new();

    for result in reader.deserialize() {
        let policy: Policy = result?;
        policies.push(policy);
    }

    Ok(policies)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const CSV: &str = "\
policy_id,customer_id,policy_number,policy_type,effective_date,expiration_date,premium
1,1,POL-101,Auto,2025-11-01,2026-11-01,1134.50
2,1,POL-102,Home,2025-12-15,2026-12-15,
3,9,POL-103,Auto,not-a-date,2026-10-30,abc
";

    #[test]
    fn test_load_policies_from_reader() {
        let policies = load_policies_from_reader(CSV.as_bytes()).expect("Failed to load policies");
        assert_eq!(policies.len(), 3);

        let first = &policies[0];
        assert_eq!(first.policy_number, "POL-101");
        assert_eq!(first.premium, Some(1134.5));
        assert_eq!(first.expiration_date, NaiveDate::from_ymd_opt(2026, 11, 1));

        assert_eq!(policies[1].premium, None);

        let third = &policies[2];
        assert_eq!(third.effective_date, None);
        assert_eq!(third.premium, None);
        assert_eq!(third.premium_amount(), 0.0);
    }

    #[test]
    fn test_bad_policy_id_is_an_error() {
        let csv = "policy_id,customer_id,policy_number\nx,1,POL-1\n";
        assert!(load_policies_from_reader(csv.as_bytes()).is_err());
    }
}
