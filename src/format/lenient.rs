//! Forgiving deserializers for fields that arrive as numbers, strings or garbage
//!
//! The database hands `NUMERIC` premiums over as strings and `DATE` columns as
//! full timestamps, while CSV snapshots leave optional columns empty. These
//! helpers fold all of that into `Option`s instead of failing the whole record.

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

use super::dates::{parse_date, parse_timestamp};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawValue {
    Number(f64),
    Text(String),
    Other(IgnoredAny),
}

fn raw<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<RawValue>, D::Error> {
    Option::<RawValue>::deserialize(deserializer)
}

/// Parse a currency amount; anything non-numeric becomes `None`
pub fn amount<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let value = match raw(deserializer)? {
        Some(RawValue::Number(n)) => Some(n),
        Some(RawValue::Text(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(value.filter(|v| v.is_finite()))
}

/// Parse a calendar date from date or timestamp text
pub fn date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDate>, D::Error> {
    Ok(match raw(deserializer)? {
        Some(RawValue::Text(s)) => parse_date(&s),
        _ => None,
    })
}

/// Parse a UTC instant from timestamp text
pub fn timestamp<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error> {
    Ok(match raw(deserializer)? {
        Some(RawValue::Text(s)) => parse_timestamp(&s),
        _ => None,
    })
}
