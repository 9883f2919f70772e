//! Natural-hazard membership by state
//!
//! One table maps each state code to the hazard categories it is considered
//! high-risk for. The dashboard ranking and the customer views both read it.

use serde::{Deserialize, Serialize};

/// Natural-hazard category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Hazard {
    Fire,
    Flood,
    Tornado,
}

impl Hazard {
    pub fn as_str(&self) -> &'static str {
        match self {
            Hazard::Fire => "fire",
            Hazard::Flood => "flood",
            Hazard::Tornado => "tornado",
        }
    }

    /// Tooltip text shown next to a customer's state
    pub fn description(&self) -> &'static str {
        match self {
            Hazard::Fire => "High-risk fire exposure",
            Hazard::Flood => "High-risk flood exposure",
            Hazard::Tornado => "High-risk tornado exposure",
        }
    }
}

use Hazard::{Fire, Flood, Tornado};

/// State code -> hazard categories, sorted by state code
const HAZARD_TABLE: &[(&str, &[Hazard])] = &[
    ("AL", &[Flood, Tornado]),
    ("CA", &[Fire]),
    ("CO", &[Fire, Tornado]),
    ("FL", &[Flood]),
    ("GA", &[Flood, Tornado]),
    ("IA", &[Tornado]),
    ("ID", &[Fire]),
    ("IL", &[Tornado]),
    ("LA", &[Flood]),
    ("MA", &[Flood]),
    ("MI", &[Flood, Tornado]),
    ("NC", &[Flood]),
    ("NE", &[Tornado]),
    ("NV", &[Fire]),
    ("NY", &[Flood]),
    ("OH", &[Tornado]),
    ("OK", &[Fire]),
    ("OR", &[Fire]),
    ("SC", &[Flood]),
    ("TN", &[Tornado]),
    ("TX", &[Fire, Flood, Tornado]),
    ("UT", &[Fire]),
];

/// Hazard categories for a state code (case-insensitive); empty when none apply
pub fn hazards_for_state(state: &str) -> &'static [Hazard] {
    let code = state.trim().to_uppercase();
    HAZARD_TABLE
        .binary_search_by(|(entry, _)| (*entry).cmp(code.as_str()))
        .map(|idx| HAZARD_TABLE[idx].1)
        .unwrap_or(&[])
}
